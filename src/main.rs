mod browser;
mod cli;
mod context;
mod dates;
mod fetch;
mod formula;
mod kml;
mod observation;
mod report;
mod scrape;
mod series;
mod stationlist;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run {
            list,
            out_dir,
            template,
            no_report,
            no_kml,
        } => {
            let result = command::run(
                list.clone(),
                out_dir.clone(),
                template.clone(),
                *no_report,
                *no_kml,
            )
            .await;
            match result {
                Ok(summary) => println!("{}", summary),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Commands::Report {
            station,
            out_dir,
            template,
        } => match command::report(station, out_dir.clone(), template.clone()) {
            Ok(summary) => println!("{}", summary),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Idf { coords } => match command::idf(coords.clone()).await {
            Ok(summary) => println!("{}", summary),
            Err(e) => eprintln!("Error: {}", e),
        },
    }

    Ok(())
}
