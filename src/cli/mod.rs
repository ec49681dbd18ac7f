//! Command line interface.

pub mod command;

use std::path::PathBuf;
use std::time::Duration;

use clap::{command, Parser, Subcommand};
use indicatif::ProgressBar;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape rainfall history for every station in a list file
    Run {
        /// Station list CSV (`station,start date,end date` per line); prompted for when omitted
        list: Option<PathBuf>,
        /// Directory the per-station and batch artifacts are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Spreadsheet template with report formulas in row 10
        #[arg(long, default_value = "CUMULATIVE REMOVE formula.xlsx")]
        template: PathBuf,
        /// Skip the spreadsheet report step
        #[arg(long)]
        no_report: bool,
        /// Skip the KML export
        #[arg(long)]
        no_kml: bool,
    },
    /// Refill the spreadsheet report from an existing station CSV
    Report {
        /// Station whose `<station>.csv` series should be re-reported
        station: String,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long, default_value = "CUMULATIVE REMOVE formula.xlsx")]
        template: PathBuf,
    },
    /// Download NOAA Atlas 14 precipitation-frequency curves for saved coordinates
    Idf {
        /// Coordinates CSV produced by a previous run
        coords: PathBuf,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}
