//! Headless-browser fallback for station coordinates.
//!
//! Some station pages ship without the app-state blob. The fallback drives a
//! local Chrome/Chromium session, opens the PWS info overlay and decodes the
//! coordinate line from its rendered text. Environment-dependent and brittle;
//! everything except the page driving lives in `scrape::coords`.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use headless_chrome::Browser;

use crate::fetch;
use crate::scrape::coords;

const INFO_ICON_SELECTOR: &str = "lib-pws-info-icon mat-icon";
const OVERLAY_SELECTOR: &str = ".cdk-overlay-container";

/// Secondary coordinate lookup. Implementations must return the same
/// (longitude, latitude) contract as the primary extraction, or fail the
/// station's coordinate entirely.
pub trait CoordinateFallback {
    fn lookup(&self, station: &str, date: NaiveDate) -> Result<(f64, f64)>;
}

/// Drives a local Chrome/Chromium to read the dashboard's station overlay.
pub struct ChromeFallback;

impl CoordinateFallback for ChromeFallback {
    fn lookup(&self, station: &str, date: NaiveDate) -> Result<(f64, f64)> {
        let url = fetch::daily_table_url(station, date);

        let browser =
            Browser::default().context("failed to launch browser for coordinate fallback")?;
        let tab = browser.new_tab()?;
        tab.navigate_to(&url)?;
        tab.wait_until_navigated()?;
        // Let the dashboard finish rendering before poking at the UI.
        thread::sleep(Duration::from_secs(2));

        tab.wait_for_element(INFO_ICON_SELECTOR)?.click()?;
        let overlay = tab.wait_for_element(OVERLAY_SELECTOR)?;
        let text = overlay.get_inner_text()?;

        coords::parse_overlay_coords(&text)
            .map_err(|e| anyhow!("overlay text for `{}` did not decode: {}", station, e))
    }
}
