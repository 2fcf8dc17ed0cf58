//! Subcommand implementations shared by the flag-driven and interactive
//! front ends.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use weather_predict_analysis::{WeatherService, config::ServiceConfig, export::ExportFormat};
use weather_predict_co2_models::BoundingBox;
use weather_predict_disaster_models::{
    DisasterCategory, EventFilter, EventStatus, Selection, Severity,
};

use crate::render;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn analyze(
    service: &WeatherService,
    lat: f64,
    lon: f64,
    date: Option<NaiveDate>,
    json: bool,
) -> CommandResult {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let analysis = service.get_weather_analysis(lat, lon, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        let mut out = String::new();
        render::analysis(&mut out, &analysis)?;
        print!("{out}");
    }
    Ok(())
}

pub async fn disasters(
    service: &WeatherService,
    days: Option<u32>,
    status: EventStatus,
    category: Selection<DisasterCategory>,
    severity: Selection<Severity>,
) -> CommandResult {
    let events = service.get_disaster_events(days, status).await;
    let events = service.filter_disaster_events(&events, EventFilter { category, severity });
    let statistics = service.disaster_statistics(&events);

    let mut out = String::new();
    render::disasters(&mut out, service, &events, &statistics)?;
    print!("{out}");
    Ok(())
}

pub fn co2(service: &WeatherService, bbox: BoundingBox, json: bool) -> CommandResult {
    let dataset = service.get_co2_data(bbox, None, None)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
    } else {
        let mut out = String::new();
        render::co2(&mut out, &dataset)?;
        print!("{out}");
    }
    Ok(())
}

pub fn export(
    service: &WeatherService,
    lat: f64,
    lon: f64,
    date: Option<NaiveDate>,
    format: ExportFormat,
    output: Option<&Path>,
) -> CommandResult {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let analysis = service.get_weather_analysis(lat, lon, date)?;
    let body = service.export(&analysis, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, body)?;
            println!("Wrote {format} export to {}", path.display());
        }
        None => print!("{body}"),
    }
    Ok(())
}

/// Runs the API server until it exits.
///
/// The server uses actix-web's runtime, so it runs on a blocking task to
/// avoid nesting tokio runtimes.
pub async fn serve(bind_addr: String, port: u16, config: ServiceConfig) -> CommandResult {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new()
            .block_on(weather_predict_server::serve(bind_addr, port, config))
    })
    .await??;
    Ok(())
}
