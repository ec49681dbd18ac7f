//! NOAA Atlas 14 precipitation-frequency (IDF) curve downloads.
//!
//! Reads a coordinates CSV from a previous run and saves the Atlas 14 mean
//! depth curve for each station next to it, as `<station>_idf.csv`.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::cli::create_spinner;
use crate::fetch;

const ATLAS14_BASE: &str = "https://hdsc.nws.noaa.gov/cgi-bin/hdsc/new/fe_text_mean.csv";

pub async fn idf(coords_csv: PathBuf) -> Result<String> {
    let out_dir = coords_csv
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut reader = csv::Reader::from_path(&coords_csv)
        .with_context(|| format!("failed to open coordinates CSV `{}`", coords_csv.display()))?;

    let mut saved = 0usize;
    for record in reader.records() {
        let record = record?;
        let station = record
            .get(0)
            .ok_or_else(|| anyhow!("coordinate row missing station name"))?
            .to_string();
        let longitude = record
            .get(1)
            .ok_or_else(|| anyhow!("coordinate row for `{}` missing longitude", station))?
            .trim()
            .to_string();
        let latitude = record
            .get(2)
            .ok_or_else(|| anyhow!("coordinate row for `{}` missing latitude", station))?
            .trim()
            .to_string();

        let url = atlas14_url(&latitude, &longitude);
        let bar = create_spinner(format!("Downloading IDF curve for {}...", station));
        match fetch::fetch_page(&url).await {
            Ok(body) => {
                fs::write(out_dir.join(format!("{}_idf.csv", station)), body)?;
                saved += 1;
                bar.finish_with_message(format!("IDF curve for {} saved", station));
            }
            Err(e) => {
                bar.finish_with_message(format!("IDF download failed for {}", station));
                eprintln!("  {}", e);
            }
        }
    }

    Ok(format!(
        "Saved {} IDF curve files to `{}`",
        saved,
        out_dir.display()
    ))
}

fn atlas14_url(latitude: &str, longitude: &str) -> String {
    format!(
        "{}?lat={}&lon={}&data=depth&units=english&series=pds",
        ATLAS14_BASE, latitude, longitude
    )
}

// -- Tests -------------------------------------------------------------------
