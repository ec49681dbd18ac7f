//! Refill a station's spreadsheet report from its persisted series.

use std::path::PathBuf;

use anyhow::Result;

use crate::report;

pub fn report(station: &str, out_dir: PathBuf, template: PathBuf) -> Result<String> {
    let written = report::fill_report(station, &out_dir, &template)?;

    if written {
        Ok(format!(
            "Report saved to `{}`",
            report::report_path(station, &out_dir).display()
        ))
    } else {
        Ok(format!(
            "No series CSV for `{}` in `{}`; nothing to report",
            station,
            out_dir.display()
        ))
    }
}
