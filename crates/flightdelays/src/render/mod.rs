//! Chart and map rendering.
//!
//! Charts are standalone SVG documents and the route map is a single HTML
//! document. Both are written to the configured output directory and handed
//! to the platform's default viewer.

pub mod chart;
pub mod map;
pub mod viewer;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::delays;
use crate::error::{Error, Result};
use crate::storage::FlightData;

pub use chart::{BarChart, ChartKind, ChartSize, Heatmap};
pub use map::{RouteLine, RouteMap};

/// Write `contents` to `dir/file_name`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn write_artifact(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = dir.join(file_name);
    std::fs::write(&path, contents)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Query the store and write the requested chart as SVG.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the chart cannot be written.
pub fn render_chart(kind: ChartKind, store: &FlightData, config: &Config) -> Result<PathBuf> {
    let size = ChartSize::from(&config.render);
    let svg = match kind {
        ChartKind::Airline => BarChart::airline(&delays::delays_by_airline(store), size).to_string(),
        ChartKind::Hour => BarChart::hour(&delays::delays_by_hour(store), size).to_string(),
        ChartKind::Routes => Heatmap::new(&delays::route_matrix(store), size).to_string(),
    };
    write_artifact(&config.output_dir(), kind.file_name(), &svg)
}

/// Query the store and write the delayed-routes map.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the map cannot be serialized or written.
pub fn render_route_map(store: &FlightData, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let map = RouteMap::build(&delays::delays_by_route(store), &store.airport_coordinates());
    info!(routes = map.lines().len(), "Route map built");
    write_artifact(dir, file_name, &map.to_html()?)
}

/// Escape text for use in XML/HTML content and attribute values.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
