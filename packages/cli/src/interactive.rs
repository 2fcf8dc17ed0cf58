//! Interactive mode, entered when no subcommand is given.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use dialoguer::{Input, Select};
use weather_predict_analysis::{WeatherService, export::ExportFormat};
use weather_predict_co2_models::BoundingBox;
use weather_predict_disaster_models::{EventStatus, Selection, Severity};

use crate::commands;

type InteractiveResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Top-level actions offered by the menu.
enum Action {
    Analyze,
    Disasters,
    Co2,
    Export,
    Serve,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Analyze,
        Self::Disasters,
        Self::Co2,
        Self::Export,
        Self::Serve,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Analyze => "Analyze weather for a location",
            Self::Disasters => "List recent disaster events",
            Self::Co2 => "Synthesize a CO2 field",
            Self::Export => "Export an analysis",
            Self::Serve => "Start server",
        }
    }
}

const EXPORT_FORMATS: [ExportFormat; 2] = [ExportFormat::Json, ExportFormat::Csv];

fn prompt_coordinate(prompt: &str, limit: f64) -> InteractiveResult<f64> {
    Ok(Input::<f64>::new()
        .with_prompt(prompt)
        .validate_with(|value: &f64| {
            if (-limit..=limit).contains(value) {
                Ok(())
            } else {
                Err(format!("must be between -{limit} and {limit}"))
            }
        })
        .interact_text()?)
}

fn prompt_location() -> InteractiveResult<(f64, f64)> {
    let lat = prompt_coordinate("Latitude", 90.0)?;
    let lon = prompt_coordinate("Longitude", 180.0)?;
    Ok((lat, lon))
}

fn prompt_date() -> InteractiveResult<NaiveDate> {
    Ok(Input::<NaiveDate>::new()
        .with_prompt("Date (YYYY-MM-DD)")
        .default(Utc::now().date_naive())
        .interact_text()?)
}

fn prompt_severity() -> InteractiveResult<Selection<Severity>> {
    let mut labels = vec!["all".to_string()];
    labels.extend(Severity::all().iter().map(ToString::to_string));

    let idx = Select::new()
        .with_prompt("Severity")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(idx
        .checked_sub(1)
        .map_or(Selection::All, |i| Selection::Only(Severity::all()[i])))
}

/// Shows the action menu and runs the chosen action.
///
/// # Errors
///
/// Returns an error if a prompt fails or the chosen action fails.
pub async fn run(service: &WeatherService) -> InteractiveResult<()> {
    println!("Weather Predict");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Analyze => {
            let (lat, lon) = prompt_location()?;
            let date = prompt_date()?;
            commands::analyze(service, lat, lon, Some(date), false)?;
        }
        Action::Disasters => {
            let days: u32 = Input::new()
                .with_prompt("Days to look back")
                .default(service.config().default_day_range)
                .interact_text()?;
            let severity = prompt_severity()?;
            commands::disasters(
                service,
                Some(days),
                EventStatus::Open,
                Selection::All,
                severity,
            )
            .await?;
        }
        Action::Co2 => {
            let bbox: String = Input::new()
                .with_prompt("Bounding box (latMin,latMax,lonMin,lonMax)")
                .default("-10,10,-10,10".to_string())
                .validate_with(|value: &String| {
                    value
                        .parse::<BoundingBox>()
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()?;
            commands::co2(service, bbox.parse()?, false)?;
        }
        Action::Export => {
            let (lat, lon) = prompt_location()?;
            let date = prompt_date()?;
            let format_idx = Select::new()
                .with_prompt("Format")
                .items(&EXPORT_FORMATS)
                .default(0)
                .interact()?;
            let output: String = Input::new()
                .with_prompt("Output file (empty for stdout)")
                .allow_empty(true)
                .interact_text()?;
            let output = (!output.is_empty()).then(|| PathBuf::from(output));

            commands::export(
                service,
                lat,
                lon,
                Some(date),
                EXPORT_FORMATS[format_idx],
                output.as_deref(),
            )?;
        }
        Action::Serve => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(weather_predict_server::interactive::run())
            })
            .await??;
        }
    }

    Ok(())
}
