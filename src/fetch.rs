//! Network boundary: dashboard URL building and page fetching.
//!
//! Parsers never touch the network; they take the page text this module
//! returns, so the upstream contract is isolated here and in `scrape`.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

const DASHBOARD_BASE: &str = "https://www.wunderground.com/dashboard/pws";

/// URL of the daily history table page for one station-day.
pub fn daily_table_url(station: &str, date: NaiveDate) -> String {
    let day = date.format("%Y-%m-%d");
    format!(
        "{}/{}/table/{}/{}/daily",
        DASHBOARD_BASE,
        station.to_uppercase(),
        day,
        day
    )
}

/// Fetches a page body, treating any non-success status as an error.
pub async fn fetch_page(url: &str) -> Result<String> {
    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(anyhow!("request for `{}` failed: {}", url, response.status()));
    }

    Ok(response.text().await?)
}

pub async fn fetch_daily_page(station: &str, date: NaiveDate) -> Result<String> {
    let url = daily_table_url(station, date);
    println!("fetching page {}", url);

    fetch_page(&url).await
}

// -- Tests -------------------------------------------------------------------
