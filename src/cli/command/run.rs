//! Full scrape-and-report pipeline over a station list.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::browser::{ChromeFallback, CoordinateFallback};
use crate::context::RunContext;
use crate::fetch;
use crate::kml;
use crate::observation::{self, StationCoordinate};
use crate::report;
use crate::scrape::coords;
use crate::series;
use crate::stationlist;

pub async fn run(
    list: Option<PathBuf>,
    out_dir: PathBuf,
    template: PathBuf,
    no_report: bool,
    no_kml: bool,
) -> Result<String> {
    let list_path = match list {
        Some(path) => path,
        None => prompt_for_list()?,
    };
    let mut ctx = RunContext::new(list_path, out_dir, template)?;
    let requests = stationlist::read_station_list(&ctx.list_path)?;
    let fallback = ChromeFallback;

    for request in &requests {
        println!(
            "Get {} from {} to {}",
            request.station, request.start, request.end
        );

        let had_data = series::collect_station(request, &ctx.out_dir).await?;
        if !had_data {
            ctx.no_data.push(request.station.clone());
        }

        match station_coordinate(&request.station, request.start, &fallback).await {
            Ok((longitude, latitude)) => {
                println!(
                    "The longitude value for station {} is: {}",
                    request.station, longitude
                );
                println!(
                    "The latitude value for station {} is: {}",
                    request.station, latitude
                );
                ctx.coordinates.push(StationCoordinate {
                    station: request.station.clone(),
                    longitude,
                    latitude,
                });
            }
            // A station without a coordinate stays out of the KML and the
            // coordinates CSV; the run itself carries on.
            Err(e) => eprintln!("Coordinate lookup failed for {}: {:#}", request.station, e),
        }

        if !no_report {
            report::fill_report(&request.station, &ctx.out_dir, &ctx.template)?;
        }
    }

    observation::write_coordinates_csv(&ctx.coordination_path(), &ctx.coordinates)?;
    if !no_kml {
        kml::write_kml(&ctx.kml_path(), &ctx.coordinates)?;
    }

    if !ctx.no_data.is_empty() {
        println!(
            "Stations with no data over their whole range: {}",
            ctx.no_data.join(", ")
        );
    }

    Ok(format!(
        "Processed {} stations; outputs in `{}`",
        requests.len(),
        ctx.out_dir.display()
    ))
}

/// Primary extraction from the start-date page, browser fallback on any
/// primary failure.
async fn station_coordinate(
    station: &str,
    date: NaiveDate,
    fallback: &dyn CoordinateFallback,
) -> Result<(f64, f64)> {
    println!("fetching coordinate for {}", station);
    let page = fetch::fetch_daily_page(station, date).await?;

    match coords::extract_coords_from_blob(&page) {
        Ok(pair) => Ok(pair),
        Err(e) => {
            eprintln!(
                "Structured coordinate extraction failed for {} ({}); falling back to browser",
                station, e
            );
            fallback.lookup(station, date)
        }
    }
}

fn prompt_for_list() -> Result<PathBuf> {
    print!("Enter the station list csv filename (e.g. stationlist.csv): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("failed to read station list filename")?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("no station list filename given");
    }

    Ok(PathBuf::from(trimmed))
}
