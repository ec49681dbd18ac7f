//! Builds and persists one station's concatenated observation series.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use crate::dates::DateRange;
use crate::fetch;
use crate::observation::{self, Observation};
use crate::scrape::table::{self, TableError};
use crate::stationlist::StationRequest;

/// Accumulates per-day parse results for one station, in scrape order.
///
/// A failed day is reported and skipped; it never aborts the range.
pub struct SeriesBuilder {
    station: String,
    rows: Vec<Observation>,
}

impl SeriesBuilder {
    pub fn new(station: &str) -> Self {
        SeriesBuilder {
            station: station.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn add_day(&mut self, date: NaiveDate, parsed: Result<Vec<Observation>, TableError>) {
        match parsed {
            Ok(day_rows) => self.rows.extend(day_rows),
            Err(e) => eprintln!(
                "The data for station {} is not available on {} ({}); consider changing the date range or skipping this station",
                self.station, date, e
            ),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Rewrites `<out_dir>/<station>.csv` with everything collected so far.
    pub fn persist(&self, out_dir: &Path) -> Result<()> {
        let path = out_dir.join(format!("{}.csv", self.station));
        observation::write_series_csv(&path, &self.rows)
    }
}

/// Scrapes a station's whole date range, persisting the running series after
/// every day. Returns whether any data was collected; a station yielding
/// nothing leaves no series file behind and belongs on the no-data list.
pub async fn collect_station(request: &StationRequest, out_dir: &Path) -> Result<bool> {
    let mut builder = SeriesBuilder::new(&request.station);

    for date in DateRange(request.start, request.end) {
        match fetch::fetch_daily_page(&request.station, date).await {
            Ok(page) => builder.add_day(date, table::parse_daily_table(&page, date)),
            Err(e) => eprintln!("Fetch failed for station {} on {}: {}", request.station, date, e),
        }
        if builder.has_data() {
            builder.persist(out_dir)?;
        }
    }

    if !builder.has_data() {
        println!("No data has been collected for {}", request.station);
    }

    Ok(builder.has_data())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::read_series_csv;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn day_rows(d: u32, count: usize) -> Vec<Observation> {
        (0..count)
            .map(|i| Observation {
                datetime: day(d).and_hms_opt(i as u32, 0, 0).unwrap(),
                prate: Some(0.1),
                paccum: Some(i as f64),
            })
            .collect()
    }

    #[test]
    fn should_keep_partial_series_when_one_day_fails() {
        let mut builder = SeriesBuilder::new("KCATEST1");

        builder.add_day(day(1), Ok(day_rows(1, 1)));
        builder.add_day(day(2), Err(TableError::MissingColumn("Precip. Rate.")));
        builder.add_day(day(3), Ok(day_rows(3, 1)));

        assert!(builder.has_data());
        assert_eq!(builder.rows().len(), 2);
    }

    #[test]
    fn should_concatenate_days_in_scrape_order() {
        let mut builder = SeriesBuilder::new("KCATEST1");

        builder.add_day(day(1), Ok(day_rows(1, 2)));
        builder.add_day(day(2), Ok(day_rows(2, 1)));

        let dates: Vec<NaiveDate> = builder.rows().iter().map(|r| r.datetime.date()).collect();
        assert_eq!(dates, vec![day(1), day(1), day(2)]);
    }

    #[test]
    fn should_have_no_data_when_every_day_fails() {
        let mut builder = SeriesBuilder::new("KCATEST1");

        builder.add_day(day(1), Err(TableError::MissingColumn("Precip. Rate.")));
        builder.add_day(day(2), Err(TableError::MissingColumn("Precip. Rate.")));

        assert!(!builder.has_data());
    }

    #[test]
    fn should_persist_running_series() {
        let dir = TempDir::new().unwrap();
        let mut builder = SeriesBuilder::new("KCATEST1");

        builder.add_day(day(1), Ok(day_rows(1, 2)));
        builder.persist(dir.path()).unwrap();
        builder.add_day(day(2), Ok(day_rows(2, 1)));
        builder.persist(dir.path()).unwrap();

        let rows = read_series_csv(&dir.path().join("KCATEST1.csv")).unwrap();
        assert_eq!(rows.len(), 3);
    }
}
