#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for weather predict.
//!
//! Serves weather analyses, disaster events, and CO2 fields as JSON under
//! `/api`. Every error body is `{"error": "..."}` with a generic message;
//! the underlying cause is only logged.

mod handlers;
pub mod interactive;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error::InternalError, middleware, web};
use weather_predict_analysis::{WeatherService, config::ServiceConfig};
use weather_predict_server_models::ApiError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    pub service: WeatherService,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("Rejected query '{}': {err}", req.query_string());
        let response = HttpResponse::BadRequest().json(ApiError::new("Invalid query parameters"));
        InternalError::from_response(err, response).into()
    });

    cfg.app_data(query_config).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/status", web::get().to(handlers::status))
            .route("/analysis", web::get().to(handlers::analysis))
            .route("/disasters", web::get().to(handlers::disasters))
            .route("/co2", web::get().to(handlers::co2))
            .route("/export", web::get().to(handlers::export)),
    );
}

/// Starts the API server on `bind_addr:port`.
///
/// Builds the shared [`WeatherService`] from `config`. The caller provides
/// the async runtime (e.g. via `#[actix_web::main]`) and initializes
/// logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the service cannot be built or
/// the HTTP server fails to bind.
#[allow(clippy::future_not_send)]
pub async fn serve(bind_addr: String, port: u16, config: ServiceConfig) -> std::io::Result<()> {
    let service = WeatherService::from_config(config).map_err(std::io::Error::other)?;
    log::info!("Weather service ready: {service:?}");

    let state = web::Data::new(AppState { service });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

/// Starts the API server on the address named by `BIND_ADDR` and `PORT`,
/// with the [`ServiceConfig`] named by `WEATHER_PREDICT_CONFIG`.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the configuration cannot be
/// loaded. See also [`serve`].
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let config = ServiceConfig::from_env().map_err(std::io::Error::other)?;
    serve(bind_addr, port, config).await
}
