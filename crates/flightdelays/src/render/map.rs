//! Delayed-routes map overlay.
//!
//! Routes delayed more than [`MAP_THRESHOLD_PERCENT`] of the time are drawn as
//! lines between their airports on a Leaflet map. The document pulls Leaflet
//! from a CDN and carries its data inline.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::delays::DelayStat;
use crate::error::Result;
use crate::models::{Coordinates, Route};

use super::escape_xml;

/// Routes at or below this percentage are not drawn.
pub const MAP_THRESHOLD_PERCENT: f64 = 30.0;

/// Routes above this percentage are drawn in the high-tier color.
pub const HIGH_TIER_PERCENT: f64 = 50.0;

const LEAFLET_VERSION: &str = "1.9.4";

/// Fallback view when there is nothing to fit: the contiguous United States.
const DEFAULT_CENTER: (f64, f64) = (39.8283, -98.5795);
const DEFAULT_ZOOM: u8 = 4;

/// One route drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLine {
    /// The route.
    pub route: Route,
    /// Origin airport position.
    pub from: Coordinates,
    /// Destination airport position.
    pub to: Coordinates,
    /// Percent of flights delayed on the route.
    pub percent_delayed: f64,
}

impl RouteLine {
    /// Line weight in pixels, proportional to the delay rate.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.percent_delayed / 10.0
    }

    /// Line color: `red` above [`HIGH_TIER_PERCENT`], `orange` otherwise.
    #[must_use]
    pub fn color(&self) -> &'static str {
        if self.percent_delayed > HIGH_TIER_PERCENT {
            "red"
        } else {
            "orange"
        }
    }
}

#[derive(Serialize)]
struct LineData<'a> {
    origin: &'a str,
    destination: &'a str,
    from: [f64; 2],
    to: [f64; 2],
    percent_delayed: f64,
    weight: f64,
    color: &'static str,
    /// Tooltip markup; airport codes are escaped.
    label: String,
}

impl<'a> From<&'a RouteLine> for LineData<'a> {
    fn from(line: &'a RouteLine) -> Self {
        Self {
            origin: &line.route.origin,
            destination: &line.route.destination,
            from: [line.from.latitude, line.from.longitude],
            to: [line.to.latitude, line.to.longitude],
            percent_delayed: line.percent_delayed,
            weight: line.weight(),
            color: line.color(),
            label: format!(
                "{} → {}: {:.1}% delayed",
                escape_xml(&line.route.origin),
                escape_xml(&line.route.destination),
                line.percent_delayed
            ),
        }
    }
}

/// The set of lines making up the delayed-routes map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMap {
    lines: Vec<RouteLine>,
}

impl RouteMap {
    /// Select the routes above the map threshold and attach coordinates.
    ///
    /// Routes with either endpoint missing from `coordinates` are skipped.
    #[must_use]
    pub fn build(stats: &[DelayStat<Route>], coordinates: &HashMap<String, Coordinates>) -> Self {
        let lines = stats
            .iter()
            .filter(|stat| stat.percent_delayed() > MAP_THRESHOLD_PERCENT)
            .filter_map(|stat| {
                let route = stat.key();
                let from = coordinates.get(&route.origin);
                let to = coordinates.get(&route.destination);
                match (from, to) {
                    (Some(from), Some(to)) => Some(RouteLine {
                        route: route.clone(),
                        from: *from,
                        to: *to,
                        percent_delayed: stat.percent_delayed(),
                    }),
                    _ => {
                        debug!(route = %route, "Skipping route without coordinates");
                        None
                    }
                }
            })
            .collect();

        Self { lines }
    }

    /// The lines to draw.
    #[must_use]
    pub fn lines(&self) -> &[RouteLine] {
        &self.lines
    }

    /// Render the map as a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the route data cannot be serialized.
    pub fn to_html(&self) -> Result<String> {
        let data: Vec<LineData<'_>> = self.lines.iter().map(LineData::from).collect();
        // Inlined in a <script> element.
        let data = serde_json::to_string(&data)?.replace("</", "<\\/");
        let (lat, lon) = DEFAULT_CENTER;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Delayed Routes</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const routes = {data};
const map = L.map("map").setView([{lat}, {lon}], {DEFAULT_ZOOM});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 18,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
const bounds = [];
for (const r of routes) {{
  L.polyline([r.from, r.to], {{ color: r.color, weight: r.weight, opacity: 0.8 }})
    .bindTooltip(r.label)
    .addTo(map);
  bounds.push(r.from, r.to);
}}
if (bounds.length > 0) {{
  map.fitBounds(bounds, {{ padding: [20, 20] }});
}}
</script>
</body>
</html>
"#
        ))
    }
}
