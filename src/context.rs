//! Per-run state, created once at startup and threaded through each step.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::observation::StationCoordinate;

/// Everything a batch run accumulates: where artifacts go, which template to
/// fill, the coordinates gathered so far and the stations that yielded no
/// data. Replaces the original tool's module-level mutable state.
pub struct RunContext {
    pub list_path: PathBuf,
    pub out_dir: PathBuf,
    pub template: PathBuf,
    pub coordinates: Vec<StationCoordinate>,
    pub no_data: Vec<String>,
}

impl RunContext {
    pub fn new(list_path: PathBuf, out_dir: PathBuf, template: PathBuf) -> Result<Self> {
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("failed to create output directory `{}`", out_dir.display()))?;

        Ok(RunContext {
            list_path,
            out_dir,
            template,
            coordinates: Vec::new(),
            no_data: Vec::new(),
        })
    }

    fn list_stem(&self) -> &str {
        path_str(self.list_path.file_stem().map(Path::new))
    }

    fn list_file_name(&self) -> &str {
        path_str(self.list_path.file_name().map(Path::new))
    }

    /// `<out>/<liststem>.kml`
    pub fn kml_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}.kml", self.list_stem()))
    }

    /// `<out>/Coordination for <listfile>`
    pub fn coordination_path(&self) -> PathBuf {
        self.out_dir
            .join(format!("Coordination for {}", self.list_file_name()))
    }
}

fn path_str(part: Option<&Path>) -> &str {
    part.and_then(Path::to_str).unwrap_or("stationlist")
}

// -- Tests -------------------------------------------------------------------
