//! Handing rendered artifacts to the platform's default viewer.

use std::io::{BufRead, Write};
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Build the command that opens `path` with the default application.
#[must_use]
pub fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    let command = {
        let mut command = Command::new("open");
        command.arg(path);
        command
    };

    #[cfg(target_os = "windows")]
    let command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    };

    command
}

/// Open `path` in the default viewer.
///
/// # Errors
///
/// Returns [`Error::Viewer`] if the launcher cannot be run or exits with a
/// failure status.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let mut command = viewer_command(path);
    debug!(program = ?command.get_program(), "Launching viewer");

    let status = command.status().map_err(|source| Error::Viewer {
        path: path.to_path_buf(),
        source,
    })?;

    if !status.success() {
        return Err(Error::Viewer {
            path: path.to_path_buf(),
            source: std::io::Error::other(format!("viewer exited with {status}")),
        });
    }

    info!("Opened {}", path.display());
    Ok(())
}

/// Print `prompt` to stderr and block until a line is read from stdin.
///
/// # Errors
///
/// Returns an error if stdin or stderr fails.
pub fn wait_for_dismiss(prompt: &str) -> Result<()> {
    wait_on(&mut std::io::stdin().lock(), &mut std::io::stderr(), prompt)
}

fn wait_on(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<()> {
    write!(output, "{prompt}")?;
    output.flush()?;

    // EOF also dismisses.
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
