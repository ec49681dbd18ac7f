//! Station coordinate extraction.
//!
//! Primary path: the dashboard embeds its serialized application state in a
//! `script#app-root-state` element, with quotes escaped as `&q;`. Longitude
//! and latitude are pulled out of that text with two independent patterns.
//!
//! The overlay-text decoder for the browser fallback also lives here so the
//! environment-dependent part of the fallback is only the page driving.

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

const STATE_BLOB_SELECTOR: &str = "script#app-root-state";
const OVERLAY_LINE_MARKER: &str = "Latitude / Longitude";

#[derive(Debug, Error, PartialEq)]
pub enum CoordsError {
    #[error("app state blob not found in page")]
    MissingStateBlob,
    #[error("pattern for `{0}` not found in app state blob")]
    PatternNotFound(&'static str),
    #[error("could not parse `{0}` value `{1}`")]
    BadNumber(&'static str, String),
    #[error("overlay text has no latitude/longitude line")]
    MissingOverlayLine,
    #[error("overlay line `{0}` has too few numeric groups")]
    ShortOverlayLine(String),
}

/// Extracts (longitude, latitude) from a station page's app-state blob.
pub fn extract_coords_from_blob(html: &str) -> Result<(f64, f64), CoordsError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(STATE_BLOB_SELECTOR).unwrap();
    let script = document
        .select(&selector)
        .next()
        .ok_or(CoordsError::MissingStateBlob)?;
    let blob: String = script.text().collect();

    let longitude = capture_field(&blob, "lon")?;
    let latitude = capture_field(&blob, "lat")?;

    Ok((longitude, latitude))
}

fn capture_field(blob: &str, field: &'static str) -> Result<f64, CoordsError> {
    // `&q;` is the blob's escaped double quote.
    let pattern = Regex::new(&format!("{}&q;:(.*?),&q;", field)).unwrap();
    let captures = pattern
        .captures(blob)
        .ok_or(CoordsError::PatternNotFound(field))?;
    let raw = captures[1].to_string();

    raw.parse()
        .map_err(|_| CoordsError::BadNumber(field, raw))
}

/// Decodes (longitude, latitude) from the PWS info overlay's text.
///
/// The overlay renders coordinates on a single "Latitude / Longitude" line;
/// its first four integer groups are read as degrees and thousandths, with
/// longitude forced negative (the dashboard covers the western hemisphere).
pub fn parse_overlay_coords(text: &str) -> Result<(f64, f64), CoordsError> {
    let line = text
        .lines()
        .find(|line| line.contains(OVERLAY_LINE_MARKER))
        .ok_or(CoordsError::MissingOverlayLine)?;

    let digits = Regex::new(r"[0-9]+").unwrap();
    let groups: Vec<f64> = digits
        .find_iter(line)
        .filter_map(|m| m.as_str().parse().ok())
        .take(4)
        .collect();
    if groups.len() < 4 {
        return Err(CoordsError::ShortOverlayLine(line.to_string()));
    }

    let latitude = groups[0] + groups[1] * 0.001;
    let longitude = -groups[2] - groups[3] * 0.001;

    Ok((longitude, latitude))
}

// -- Tests -------------------------------------------------------------------
