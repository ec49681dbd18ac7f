//! Daily history table parser.
//!
//! Turns the rendered observation table of one station-day page into typed
//! records keyed off the scraped header labels.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::observation::Observation;

const TABLE_HEAD_SELECTOR: &str = "table.desktop-table.history-table thead tr th";
const TABLE_ROW_SELECTOR: &str = "table.desktop-table.history-table tbody tr";

const TIME_COLUMN: &str = "Time";
const RATE_COLUMN: &str = "Precip. Rate.";
const ACCUM_COLUMN: &str = "Precip. Accum.";

/// Time-of-day format used by the dashboard table ("12:04 AM").
const TIME_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("column `{0}` missing from history table")]
    MissingColumn(&'static str),
}

/// Parses one station-day page into observations, timestamps prefixed with
/// the requested date.
///
/// A page without the table structure yields zero rows; a table missing one
/// of the expected columns fails the whole day so the caller can skip it.
pub fn parse_daily_table(html: &str, date: NaiveDate) -> Result<Vec<Observation>, TableError> {
    let document = Html::parse_document(html);
    let head_selector = Selector::parse(TABLE_HEAD_SELECTOR).unwrap();
    let row_selector = Selector::parse(TABLE_ROW_SELECTOR).unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let headers: Vec<String> = document.select(&head_selector).map(cell_text).collect();
    if headers.is_empty() {
        // Structurally absent table: a day with no records, not a failure.
        return Ok(Vec::new());
    }

    let time_index = column_index(&headers, TIME_COLUMN)?;
    let rate_index = column_index(&headers, RATE_COLUMN)?;
    let accum_index = column_index(&headers, ACCUM_COLUMN)?;

    let mut observations = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();

        let time_text = cells.get(time_index).map(String::as_str).unwrap_or("");
        let Ok(time) = NaiveTime::parse_from_str(time_text, TIME_FORMAT) else {
            eprintln!("Skipping table row with unparseable time `{}`", time_text);
            continue;
        };

        observations.push(Observation {
            datetime: date.and_time(time),
            prate: cells.get(rate_index).and_then(|s| extract_number(s)),
            paccum: cells.get(accum_index).and_then(|s| extract_number(s)),
        });
    }

    Ok(observations)
}

/// Extracts the first decimal-or-integer substring of a cell as a number.
/// Placeholders like `--` have no digits and become `None`.
pub fn extract_number(text: &str) -> Option<f64> {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let number = NUMBER.get_or_init(|| Regex::new(r"\d*\.\d+|\d+").unwrap());

    number.find(text).and_then(|m| m.as_str().parse().ok())
}

// The dashboard glues a non-breaking space and degree sign onto unit cells.
fn cell_text(element: ElementRef) -> String {
    let text: String = element.text().collect();

    text.replace('\u{a0}', " ").replace('°', " ").trim().to_string()
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, TableError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(TableError::MissingColumn(name))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
    }

    fn sample_page() -> &'static str {
        r#"<html><body>
        <table class="desktop-table history-table">
          <thead>
            <tr>
              <th>Time</th><th>Temperature</th><th>Precip. Rate.</th><th>Precip. Accum.</th>
            </tr>
          </thead>
          <tbody>
            <tr><td>12:04 AM</td><td>54.1&nbsp;&#176;F</td><td>0.12 in</td><td>0.25 in</td></tr>
            <tr><td>12:09 AM</td><td>54.0&nbsp;&#176;F</td><td>--</td><td>3</td></tr>
          </tbody>
        </table>
        </body></html>"#
    }

    #[test]
    fn should_produce_one_observation_per_body_row() {
        let observations = parse_daily_table(sample_page(), day()).unwrap();

        assert_eq!(observations.len(), 2);
    }

    #[test]
    fn should_prefix_timestamps_with_the_requested_date() {
        let observations = parse_daily_table(sample_page(), day()).unwrap();

        assert_eq!(
            observations[0].datetime,
            day().and_hms_opt(0, 4, 0).unwrap()
        );
        assert_eq!(
            observations[1].datetime,
            day().and_hms_opt(0, 9, 0).unwrap()
        );
    }

    #[test]
    fn should_extract_numbers_and_mark_placeholders_missing() {
        let observations = parse_daily_table(sample_page(), day()).unwrap();

        assert_eq!(observations[0].prate, Some(0.12));
        assert_eq!(observations[0].paccum, Some(0.25));
        assert_eq!(observations[1].prate, None);
        assert_eq!(observations[1].paccum, Some(3.0));
    }

    #[test]
    fn should_treat_absent_table_as_zero_rows() {
        let observations = parse_daily_table("<html><body></body></html>", day()).unwrap();

        assert!(observations.is_empty());
    }

    #[test]
    fn should_fail_the_day_when_a_column_is_missing() {
        let page = r#"<table class="desktop-table history-table">
          <thead><tr><th>Time</th><th>Precip. Accum.</th></tr></thead>
          <tbody><tr><td>12:04 AM</td><td>0.25 in</td></tr></tbody>
        </table>"#;

        let error = parse_daily_table(page, day()).unwrap_err();

        assert_eq!(error, TableError::MissingColumn(RATE_COLUMN));
    }

    #[test]
    fn should_extract_first_numeric_substring() {
        assert_eq!(extract_number("0.12 in"), Some(0.12));
        assert_eq!(extract_number("--"), None);
        assert_eq!(extract_number("3"), Some(3.0));
        assert_eq!(extract_number(".5 in"), Some(0.5));
        assert_eq!(extract_number(""), None);
    }
}
