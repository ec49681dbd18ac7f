//! Spreadsheet report filler.
//!
//! Copies a station's persisted series into the report template, starting at
//! row 6, and re-derives the template's row-10 formula columns for every row
//! below them by positional translation.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::formula;
use crate::observation::{self, Observation};

/// Columns whose row-10 template formulas are translated down the sheet.
const FORMULA_COLUMNS: [&str; 8] = ["D", "E", "F", "H", "I", "J", "K", "L"];

/// First data row; rows 1-5 are the template's header block.
const FIRST_DATA_ROW: u32 = 6;

/// Row holding the template formulas.
const TEMPLATE_ROW: u32 = 10;

/// Datetime rendering used inside the workbook cells.
const CELL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn report_path(station: &str, out_dir: &Path) -> PathBuf {
    out_dir.join(format!("{}_processed.xlsx", station))
}

/// Fills the report for one station from `<out_dir>/<station>.csv`.
///
/// Returns `false` without touching anything when the series CSV is missing;
/// a station that produced no data gets no report.
pub fn fill_report(station: &str, out_dir: &Path, template: &Path) -> Result<bool> {
    let csv_path = out_dir.join(format!("{}.csv", station));
    if !csv_path.is_file() {
        println!("No series CSV for {}; skipping report", station);
        return Ok(false);
    }
    let rows = observation::read_series_csv(&csv_path)?;

    let mut book = umya_spreadsheet::reader::xlsx::read(template)
        .map_err(|e| anyhow!("failed to open template `{}`: {:?}", template.display(), e))?;
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| anyhow!("template `{}` has no worksheet", template.display()))?;

    // Capture the row-10 formulas before any filling.
    let templates: Vec<(&str, String)> = FORMULA_COLUMNS
        .iter()
        .map(|column| {
            let coordinate = format!("{}{}", column, TEMPLATE_ROW);
            let text = sheet
                .get_cell(coordinate.as_str())
                .map(|cell| cell.get_formula().to_string())
                .unwrap_or_default();
            (*column, text)
        })
        .collect();

    for (index, row) in rows.iter().enumerate() {
        let r = FIRST_DATA_ROW + index as u32;
        write_data_row(sheet, r, row);

        if r > TEMPLATE_ROW {
            for (column, text) in &templates {
                if text.is_empty() {
                    continue;
                }
                let origin = format!("{}{}", column, TEMPLATE_ROW);
                let target = format!("{}{}", column, r);
                let translated = formula::translate_formula(text, &origin, &target)?;
                sheet.get_cell_mut(target.as_str()).set_formula(translated);
            }
        }
    }

    let last_row = sheet.get_highest_row();
    sheet.set_auto_filter(format!("H7:L{}", last_row));

    let out_path = report_path(station, out_dir);
    umya_spreadsheet::writer::xlsx::write(&book, &out_path)
        .map_err(|e| anyhow!("failed to write `{}`: {:?}", out_path.display(), e))?;

    Ok(true)
}

fn write_data_row(sheet: &mut umya_spreadsheet::Worksheet, r: u32, row: &Observation) {
    sheet
        .get_cell_mut(format!("A{}", r).as_str())
        .set_value(row.datetime.format(CELL_DATETIME_FORMAT).to_string());
    if let Some(prate) = row.prate {
        sheet
            .get_cell_mut(format!("B{}", r).as_str())
            .set_value_number(prate);
    }
    if let Some(paccum) = row.paccum {
        sheet
            .get_cell_mut(format!("C{}", r).as_str())
            .set_value_number(paccum);
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn series(count: usize) -> Vec<Observation> {
        (0..count)
            .map(|i| Observation {
                datetime: NaiveDate::from_ymd_opt(2020, 1, 15)
                    .unwrap()
                    .and_hms_opt(i as u32, 0, 0)
                    .unwrap(),
                prate: Some(0.1),
                paccum: Some(i as f64),
            })
            .collect()
    }

    fn write_template(path: &Path) {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut("D10").set_formula("=A10*2");
        sheet.get_cell_mut("H10").set_formula("=C10-C9");
        umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
    }

    #[test]
    fn should_skip_when_series_csv_is_missing() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.xlsx");
        write_template(&template);

        let written = fill_report("KCATEST1", dir.path(), &template).unwrap();

        assert!(!written);
        assert!(!report_path("KCATEST1", dir.path()).exists());
    }

    #[test]
    fn should_fill_rows_and_translate_formulas_below_row_ten() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("template.xlsx");
        write_template(&template);
        // 7 rows: written rows 6..=12, so translation reaches row 12.
        observation::write_series_csv(&dir.path().join("KCATEST1.csv"), &series(7)).unwrap();

        let written = fill_report("KCATEST1", dir.path(), &template).unwrap();
        assert!(written);

        let book = umya_spreadsheet::reader::xlsx::read(report_path("KCATEST1", dir.path())).unwrap();
        let sheet = book.get_sheet(&0).unwrap();

        // Data lands from row 6 in series order.
        let a6 = sheet.get_cell("A6").unwrap().get_value().to_string();
        assert_eq!(a6, "2020-01-15 00:00:00");
        let c12 = sheet.get_cell("C12").unwrap().get_value().to_string();
        assert_eq!(c12, "6");

        // Row-10 formulas are position-translated, not evaluated.
        let d12 = sheet.get_cell("D12").unwrap().get_formula().to_string();
        assert!(d12.contains("A12"), "got formula `{}`", d12);
        let h11 = sheet.get_cell("H11").unwrap().get_formula().to_string();
        assert!(h11.contains("C11") && h11.contains("C10"), "got formula `{}`", h11);

        // Rows 6..=10 carry data but no translated formulas.
        let d6_has_formula = sheet
            .get_cell("D6")
            .map(|cell| !cell.get_formula().is_empty())
            .unwrap_or(false);
        assert!(!d6_has_formula);
    }
}
