//! Observation records and their CSV artifacts.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Writer};
use serde::Serialize;

/// Datetime text format used in the per-station CSV files, a date prefix
/// followed by the dashboard's 12-hour time of day.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// Header row of the coordinates CSV.
pub const COORDINATE_HEADERS: [&str; 3] = ["Station", "Longitude (Degree)", "Latitude (Degree)"];

/// One scraped reading. Either precipitation field may be absent when the
/// dashboard shows a placeholder instead of a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    #[serde(serialize_with = "serialize_datetime")]
    pub datetime: NaiveDateTime,
    pub prate: Option<f64>,
    pub paccum: Option<f64>,
}

/// A station's geolocation, extracted once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCoordinate {
    pub station: String,
    pub longitude: f64,
    pub latitude: f64,
}

fn serialize_datetime<S>(datetime: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&datetime.format(DATETIME_FORMAT).to_string())
}

/// Writes a station's concatenated series, header `datetime,prate,paccum`,
/// missing values as empty fields.
pub fn write_series_csv(path: &Path, rows: &[Observation]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Re-reads a persisted series. Literal repeated header rows (an artifact of
/// older append-mode scrapes) are dropped, and rows whose datetime no longer
/// parses are skipped rather than failing the file.
pub fn read_series_csv(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let datetime_text = record.get(0).unwrap_or("");
        if datetime_text == "datetime" {
            continue;
        }
        let Ok(datetime) = NaiveDateTime::parse_from_str(datetime_text, DATETIME_FORMAT) else {
            eprintln!(
                "Skipping unparseable series row `{}` in {}",
                datetime_text,
                path.display()
            );
            continue;
        };
        rows.push(Observation {
            datetime,
            prate: field_f64(&record, 1),
            paccum: field_f64(&record, 2),
        });
    }

    Ok(rows)
}

fn field_f64(record: &StringRecord, index: usize) -> Option<f64> {
    record.get(index).and_then(|s| s.trim().parse().ok())
}

/// Writes the batch coordinates CSV, one station per row in run order.
pub fn write_coordinates_csv(path: &Path, coordinates: &[StationCoordinate]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(COORDINATE_HEADERS)?;
    for coordinate in coordinates {
        writer.write_record([
            coordinate.station.as_str(),
            &coordinate.longitude.to_string(),
            &coordinate.latitude.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn observation(h: u32, m: u32, prate: Option<f64>, paccum: Option<f64>) -> Observation {
        Observation {
            datetime: NaiveDate::from_ymd_opt(2020, 1, 15)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
            prate,
            paccum,
        }
    }

    #[test]
    fn should_write_and_reread_series() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("KCATEST1.csv");
        let rows = vec![
            observation(0, 4, Some(0.12), Some(0.25)),
            observation(14, 9, None, Some(3.0)),
        ];

        write_series_csv(&path, &rows).unwrap();
        let reread = read_series_csv(&path).unwrap();

        assert_eq!(reread, rows);
    }

    #[test]
    fn should_render_twelve_hour_datetimes_and_blank_missing_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("KCATEST1.csv");

        write_series_csv(&path, &[observation(14, 9, None, Some(3.0))]).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("datetime,prate,paccum\n"));
        assert!(content.contains("2020-01-15 02:09 PM,,3.0"));
    }

    #[test]
    fn should_drop_repeated_header_rows_on_reread() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("KCATEST1.csv");
        fs::write(
            &path,
            "datetime,prate,paccum\n\
             2020-01-15 12:04 AM,0.12,0.25\n\
             datetime,prate,paccum\n\
             2020-01-16 12:04 AM,,0.5\n",
        )
        .unwrap();

        let rows = read_series_csv(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].prate, Some(0.12));
        assert_eq!(rows[1].prate, None);
        assert_eq!(rows[1].paccum, Some(0.5));
    }

    #[test]
    fn should_write_coordinates_csv_in_run_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coords.csv");
        let coordinates = vec![
            StationCoordinate {
                station: "StationB".to_string(),
                longitude: -122.1,
                latitude: 37.4,
            },
            StationCoordinate {
                station: "StationA".to_string(),
                longitude: -121.9,
                latitude: 37.2,
            },
        ];

        write_coordinates_csv(&path, &coordinates).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Station,Longitude (Degree),Latitude (Degree)");
        assert_eq!(lines[1], "StationB,-122.1,37.4");
        assert_eq!(lines[2], "StationA,-121.9,37.2");
    }
}
