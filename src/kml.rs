//! KML export of station coordinates.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::observation::StationCoordinate;

/// Writes one point placemark per station, named by station, at
/// (longitude, latitude) with no elevation. Stations keep run order.
pub fn write_kml(path: &Path, coordinates: &[StationCoordinate]) -> Result<()> {
    fs::write(path, render_kml(coordinates))?;

    Ok(())
}

fn render_kml(coordinates: &[StationCoordinate]) -> String {
    let mut document = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <kml xmlns=\"http://www.opengis.net/kml/2.2\">\n\
         <Document>\n",
    );
    for coordinate in coordinates {
        document.push_str(&format!(
            "  <Placemark>\n    <name>{}</name>\n    <Point>\n      <coordinates>{},{}</coordinates>\n    </Point>\n  </Placemark>\n",
            escape_xml(&coordinate.station),
            coordinate.longitude,
            coordinate.latitude,
        ));
    }
    document.push_str("</Document>\n</kml>\n");

    document
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// -- Tests -------------------------------------------------------------------
