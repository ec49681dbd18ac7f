//! Station list input file: `station,start date,end date` per line.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};

/// One line of the input list: a station to scrape over an inclusive range.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRequest {
    pub station: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub fn read_station_list(path: &Path) -> Result<Vec<StationRequest>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read station list `{}`", path.display()))?;

    let mut requests = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let request =
            parse_line(line).with_context(|| format!("station list line {}", number + 1))?;
        requests.push(request);
    }

    Ok(requests)
}

fn parse_line(line: &str) -> Result<StationRequest> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 3 {
        return Err(anyhow!(
            "expected `station,start date,end date`, got `{}`",
            line
        ));
    }

    Ok(StationRequest {
        station: fields[0].trim().to_string(),
        start: parse_human_date(fields[1])?,
        end: parse_human_date(fields[2])?,
    })
}

/// Parses a free-form human date ("2020-01-15", "Jan 15 2020", "01/15/2020").
pub fn parse_human_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    // Anchor date-only inputs to UTC midnight so the calendar day never
    // shifts with the host timezone.
    let parsed = dateparser::parse_with_timezone(text, &Utc)
        .map_err(|e| anyhow!("unrecognised date `{}`: {}", text, e))?;

    Ok(parsed.date_naive())
}

// -- Tests -------------------------------------------------------------------
