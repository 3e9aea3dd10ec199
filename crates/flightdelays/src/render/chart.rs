//! SVG bar charts and the route heatmap.
//!
//! Each chart type implements [`Display`] and formats itself as a complete
//! SVG document.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use crate::config::RenderConfig;
use crate::delays::{DelayStat, RouteMatrix};

use super::escape_xml;

const FONT: &str = r#"font-family="Helvetica, Arial, sans-serif""#;

/// Categorical palette for airline bars.
const CATEGORY_PALETTE: &[&str] = &[
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3", "#8c8c8c",
    "#ccb974", "#64b5cd",
];

/// Yellow-green-blue ramp for the hour axis.
const YLGNBU: &[(u8, u8, u8)] = &[(255, 255, 217), (65, 182, 196), (8, 29, 88)];

/// White-to-dark-red ramp for heatmap cells.
const REDS: &[(u8, u8, u8)] = &[(255, 245, 240), (251, 106, 74), (103, 0, 13)];

/// Which aggregate to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Bar chart of percent delayed per airline.
    Airline,
    /// Bar chart of percent delayed per hour of day.
    Hour,
    /// Heatmap of percent delayed per route.
    Routes,
}

impl ChartKind {
    /// File name the chart is written under.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Airline => "delays_by_airline.svg",
            Self::Hour => "delays_by_hour.svg",
            Self::Routes => "delays_by_route.svg",
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Airline => write!(f, "airline"),
            Self::Hour => write!(f, "hour"),
            Self::Routes => write!(f, "routes"),
        }
    }
}

/// Pixel dimensions of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl From<&RenderConfig> for ChartSize {
    fn from(config: &RenderConfig) -> Self {
        Self {
            width: config.chart_width,
            height: config.chart_height,
        }
    }
}

/// One bar on a category axis. `None` leaves the slot empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label.
    pub label: String,
    /// Percent delayed, if the category has data.
    pub value: Option<f64>,
    /// Fill color.
    pub fill: String,
}

/// A vertical bar chart of percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    title: String,
    x_label: String,
    y_label: String,
    bars: Vec<Bar>,
    rotate_labels: bool,
    size: ChartSize,
}

impl BarChart {
    /// Percent delayed by airline, bars in the order given.
    #[must_use]
    pub fn airline(stats: &[DelayStat<String>], size: ChartSize) -> Self {
        let bars = stats
            .iter()
            .enumerate()
            .map(|(i, stat)| Bar {
                label: stat.key().clone(),
                value: Some(stat.percent_delayed()),
                fill: CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()].to_string(),
            })
            .collect();

        Self {
            title: "Percentage of Delayed Flights by Airline".to_string(),
            x_label: "Airline".to_string(),
            y_label: "Percentage of Delayed Flights".to_string(),
            bars,
            rotate_labels: true,
            size,
        }
    }

    /// Percent delayed by hour on a fixed 0–23 axis.
    #[must_use]
    pub fn hour(stats: &[DelayStat<u8>], size: ChartSize) -> Self {
        let by_hour: HashMap<u8, f64> = stats
            .iter()
            .map(|stat| (*stat.key(), stat.percent_delayed()))
            .collect();

        let bars = (0..24u8)
            .map(|hour| Bar {
                label: hour.to_string(),
                value: by_hour.get(&hour).copied(),
                fill: interpolate(YLGNBU, f64::from(hour) / 23.0),
            })
            .collect();

        Self {
            title: "Percentage of Delayed Flights by Hour of Day".to_string(),
            x_label: "Hour of Day".to_string(),
            y_label: "Percentage of Delayed Flights".to_string(),
            bars,
            rotate_labels: false,
            size,
        }
    }

    /// The bars, in axis order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }
}

impl Display for BarChart {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = f64::from(self.size.width);
        let height = f64::from(self.size.height);
        let (left, right, top) = (80.0, 30.0, 60.0);
        let bottom = if self.rotate_labels { 150.0 } else { 70.0 };
        let plot_w = (width - left - right).max(1.0);
        let plot_h = (height - top - bottom).max(1.0);
        let baseline = top + plot_h;

        open_svg(f, width, height, &self.title)?;

        let y_max = axis_max(self.bars.iter().filter_map(|bar| bar.value));
        for step in 0..=5u8 {
            let value = y_max * f64::from(step) / 5.0;
            let y = baseline - value / y_max * plot_h;
            writeln!(
                f,
                r##"<line x1="{left:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e0e0e0"/>"##,
                left + plot_w
            )?;
            writeln!(
                f,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="12" {FONT}>{value:.0}</text>"#,
                left - 8.0,
                y + 4.0
            )?;
        }
        write_axes(f, left, top, plot_w, plot_h)?;

        if self.bars.iter().all(|bar| bar.value.is_none()) {
            write_no_data(f, left + plot_w / 2.0, top + plot_h / 2.0)?;
        }

        if !self.bars.is_empty() {
            let slot = plot_w / self.bars.len() as f64;
            for (i, bar) in self.bars.iter().enumerate() {
                let x = left + slot * i as f64;
                let center = x + slot / 2.0;
                let label = escape_xml(&bar.label);

                if let Some(value) = bar.value {
                    let bar_h = value / y_max * plot_h;
                    writeln!(
                        f,
                        r#"<rect class="bar" x="{:.1}" y="{:.1}" width="{:.1}" height="{bar_h:.1}" fill="{}"><title>{label}: {value:.1}%</title></rect>"#,
                        x + slot * 0.1,
                        baseline - bar_h,
                        slot * 0.8,
                        bar.fill
                    )?;
                }

                if self.rotate_labels {
                    let y = baseline + 12.0;
                    writeln!(
                        f,
                        r#"<text x="{center:.1}" y="{y:.1}" text-anchor="end" font-size="11" transform="rotate(-45 {center:.1} {y:.1})" {FONT}>{label}</text>"#
                    )?;
                } else {
                    writeln!(
                        f,
                        r#"<text x="{center:.1}" y="{:.1}" text-anchor="middle" font-size="11" {FONT}>{label}</text>"#,
                        baseline + 18.0
                    )?;
                }
            }
        }

        write_axis_labels(
            f,
            &self.x_label,
            &self.y_label,
            (left + plot_w / 2.0, height - 15.0),
            (22.0, top + plot_h / 2.0),
        )?;
        writeln!(f, "</svg>")
    }
}

/// A heatmap of a [`RouteMatrix`]: origins down, destinations across.
#[derive(Debug, Clone, Copy)]
pub struct Heatmap<'a> {
    matrix: &'a RouteMatrix,
    size: ChartSize,
}

impl<'a> Heatmap<'a> {
    /// Build a heatmap over `matrix`.
    #[must_use]
    pub fn new(matrix: &'a RouteMatrix, size: ChartSize) -> Self {
        Self { matrix, size }
    }

    fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for origin in self.matrix.origins() {
            for destination in self.matrix.destinations() {
                if let Some(value) = self.matrix.get(origin, destination) {
                    range = Some(match range {
                        Some((lo, hi)) => (lo.min(value), hi.max(value)),
                        None => (value, value),
                    });
                }
            }
        }
        range
    }
}

impl Display for Heatmap<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = f64::from(self.size.width);
        let height = f64::from(self.size.height);
        let (left, right, top, bottom) = (80.0, 110.0, 60.0, 80.0);
        let plot_w = (width - left - right).max(1.0);
        let plot_h = (height - top - bottom).max(1.0);

        open_svg(
            f,
            width,
            height,
            "Heatmap: % Delayed Flights by Route (Origin → Destination)",
        )?;

        let origins = self.matrix.origins();
        let destinations = self.matrix.destinations();

        match self.value_range() {
            None => write_no_data(f, left + plot_w / 2.0, top + plot_h / 2.0)?,
            Some((lo, hi)) => {
                let cell_w = plot_w / destinations.len() as f64;
                let cell_h = plot_h / origins.len() as f64;
                let span = hi - lo;
                let scale = |value: f64| if span > 0.0 { (value - lo) / span } else { 0.5 };

                for (r, origin) in origins.iter().enumerate() {
                    for (c, destination) in destinations.iter().enumerate() {
                        let Some(value) = self.matrix.get(origin, destination) else {
                            continue;
                        };
                        writeln!(
                            f,
                            r#"<rect class="cell" x="{:.1}" y="{:.1}" width="{cell_w:.1}" height="{cell_h:.1}" fill="{}" stroke="white" stroke-width="0.5"><title>{} → {}: {value:.1}%</title></rect>"#,
                            left + cell_w * c as f64,
                            top + cell_h * r as f64,
                            interpolate(REDS, scale(value)),
                            escape_xml(origin),
                            escape_xml(destination),
                        )?;
                    }
                }

                for (r, origin) in origins.iter().enumerate() {
                    writeln!(
                        f,
                        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10" {FONT}>{}</text>"#,
                        left - 6.0,
                        top + cell_h * (r as f64 + 0.5) + 3.0,
                        escape_xml(origin)
                    )?;
                }
                for (c, destination) in destinations.iter().enumerate() {
                    let x = left + cell_w * (c as f64 + 0.5);
                    let y = top + plot_h + 8.0;
                    writeln!(
                        f,
                        r#"<text x="{x:.1}" y="{y:.1}" text-anchor="end" font-size="10" transform="rotate(-90 {x:.1} {y:.1})" {FONT}>{}</text>"#,
                        escape_xml(destination)
                    )?;
                }

                write_legend(f, width - right + 30.0, top, plot_h, lo, hi)?;
            }
        }

        write_axes(f, left, top, plot_w, plot_h)?;
        write_axis_labels(
            f,
            "Destination Airport",
            "Origin Airport",
            (left + plot_w / 2.0, height - 12.0),
            (22.0, top + plot_h / 2.0),
        )?;
        writeln!(f, "</svg>")
    }
}

fn open_svg(f: &mut Formatter<'_>, width: f64, height: f64, title: &str) -> fmt::Result {
    writeln!(
        f,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    )?;
    writeln!(f, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        f,
        r#"<text x="{:.1}" y="35" text-anchor="middle" font-size="18" font-weight="bold" {FONT}>{}</text>"#,
        width / 2.0,
        escape_xml(title)
    )
}

fn write_axes(f: &mut Formatter<'_>, left: f64, top: f64, plot_w: f64, plot_h: f64) -> fmt::Result {
    let baseline = top + plot_h;
    writeln!(
        f,
        r#"<line x1="{left:.1}" y1="{top:.1}" x2="{left:.1}" y2="{baseline:.1}" stroke="black"/>"#
    )?;
    writeln!(
        f,
        r#"<line x1="{left:.1}" y1="{baseline:.1}" x2="{:.1}" y2="{baseline:.1}" stroke="black"/>"#,
        left + plot_w
    )
}

fn write_axis_labels(
    f: &mut Formatter<'_>,
    x_label: &str,
    y_label: &str,
    (x_x, x_y): (f64, f64),
    (y_x, y_y): (f64, f64),
) -> fmt::Result {
    writeln!(
        f,
        r#"<text x="{x_x:.1}" y="{x_y:.1}" text-anchor="middle" font-size="13" {FONT}>{}</text>"#,
        escape_xml(x_label)
    )?;
    writeln!(
        f,
        r#"<text x="{y_x:.1}" y="{y_y:.1}" text-anchor="middle" font-size="13" transform="rotate(-90 {y_x:.1} {y_y:.1})" {FONT}>{}</text>"#,
        escape_xml(y_label)
    )
}

fn write_no_data(f: &mut Formatter<'_>, x: f64, y: f64) -> fmt::Result {
    writeln!(
        f,
        r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="16" fill="#888888" {FONT}>No data</text>"##
    )
}

fn write_legend(f: &mut Formatter<'_>, x: f64, top: f64, plot_h: f64, lo: f64, hi: f64) -> fmt::Result {
    writeln!(
        f,
        r#"<defs><linearGradient id="legend" x1="0" y1="1" x2="0" y2="0">"#
    )?;
    for (i, offset) in [0.0, 0.5, 1.0].iter().enumerate() {
        let (r, g, b) = REDS[i];
        writeln!(
            f,
            r##"<stop offset="{offset}" stop-color="#{r:02x}{g:02x}{b:02x}"/>"##
        )?;
    }
    writeln!(f, "</linearGradient></defs>")?;
    writeln!(
        f,
        r#"<rect x="{x:.1}" y="{top:.1}" width="20" height="{plot_h:.1}" fill="url(#legend)" stroke="black" stroke-width="0.5"/>"#
    )?;
    writeln!(
        f,
        r#"<text x="{:.1}" y="{:.1}" font-size="11" {FONT}>{hi:.0}%</text>"#,
        x + 26.0,
        top + 10.0
    )?;
    writeln!(
        f,
        r#"<text x="{:.1}" y="{:.1}" font-size="11" {FONT}>{lo:.0}%</text>"#,
        x + 26.0,
        top + plot_h
    )
}

/// Upper bound of the value axis: the data maximum rounded up to a multiple
/// of ten, never below ten.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0.0_f64, f64::max);
    ((max / 10.0).ceil() * 10.0).max(10.0)
}

/// Linear interpolation along a color ramp; `t` is clamped to `[0, 1]`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let segments = stops.len().saturating_sub(1).max(1);
    let scaled = t * segments as f64;
    let i = (scaled.floor() as usize).min(segments - 1);
    let local = scaled - i as f64;

    let a = stops[i.min(stops.len() - 1)];
    let b = stops[(i + 1).min(stops.len() - 1)];
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * local).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
