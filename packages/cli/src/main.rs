#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for weather predict.
//!
//! ```text
//! weather_predict_cli analyze --lat 14.6 --lon 121.0 [--date 2025-07-15] [--json]
//! weather_predict_cli disasters [--days 30] [--status open] [--severity high]
//! weather_predict_cli co2 [--bbox 0,10,100,120] [--step 1.0] [--json]
//! weather_predict_cli export --lat 40 --lon -74 --format csv [--output out.csv]
//! weather_predict_cli serve [--bind-addr 0.0.0.0] [--port 8080]
//! ```
//!
//! Running with no subcommand enters interactive mode.

mod commands;
mod interactive;
mod render;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use weather_predict_analysis::{
    WeatherService,
    config::{ConfigUpdate, ServiceConfig},
    export::ExportFormat,
};
use weather_predict_co2_models::BoundingBox;
use weather_predict_disaster_models::{DisasterCategory, EventStatus, Selection, Severity};

#[derive(Parser)]
#[command(
    name = "weather_predict_cli",
    about = "Weather probabilities, disaster events, and CO2 fields"
)]
struct Cli {
    /// Fixed RNG seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the weather for a location and date
    Analyze {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Target date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recent natural disaster events
    Disasters {
        /// Look-back window in days
        #[arg(long)]
        days: Option<u32>,
        #[arg(long, default_value = "open")]
        status: EventStatus,
        /// Category id or `all`
        #[arg(long, default_value = "all")]
        category: Selection<DisasterCategory>,
        /// `low`, `moderate`, `high`, or `all`
        #[arg(long, default_value = "all")]
        severity: Selection<Severity>,
    },
    /// Synthesize a CO2 concentration field
    Co2 {
        /// Bounding box as latMin,latMax,lonMin,lonMax; defaults to the globe
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<BoundingBox>,
        /// Grid spacing in degrees
        #[arg(long)]
        step: Option<f64>,
        /// Print every sample as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export an analysis as JSON or CSV
    Export {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Start the API server
    Serve {
        #[arg(long, default_value = weather_predict_server::DEFAULT_BIND_ADDR)]
        bind_addr: String,
        #[arg(long, default_value_t = weather_predict_server::DEFAULT_PORT)]
        port: u16,
    },
}

/// Loads `WEATHER_PREDICT_CONFIG`, applying any command-line overrides.
fn load_config(update: &ConfigUpdate) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut config = ServiceConfig::from_env()?;
    update.apply_to(&mut config);
    log::debug!("Service configuration: {config:?}");
    Ok(config)
}

fn build_service(update: &ConfigUpdate) -> Result<WeatherService, Box<dyn std::error::Error>> {
    Ok(WeatherService::from_config(load_config(update)?)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let mut update = ConfigUpdate {
        seed: cli.seed,
        ..ConfigUpdate::default()
    };

    let Some(command) = cli.command else {
        let service = build_service(&update)?;
        return interactive::run(&service).await;
    };

    match command {
        Commands::Analyze {
            lat,
            lon,
            date,
            json,
        } => {
            let service = build_service(&update)?;
            commands::analyze(&service, lat, lon, date, json)?;
        }
        Commands::Disasters {
            days,
            status,
            category,
            severity,
        } => {
            let service = build_service(&update)?;
            commands::disasters(&service, days, status, category, severity).await?;
        }
        Commands::Co2 { bbox, step, json } => {
            update.co2_grid_step = step;
            let service = build_service(&update)?;
            commands::co2(&service, bbox.unwrap_or_default(), json)?;
        }
        Commands::Export {
            lat,
            lon,
            date,
            format,
            output,
        } => {
            let service = build_service(&update)?;
            commands::export(&service, lat, lon, date, format, output.as_deref())?;
        }
        Commands::Serve { bind_addr, port } => {
            commands::serve(bind_addr, port, load_config(&update)?).await?;
        }
    }

    Ok(())
}
