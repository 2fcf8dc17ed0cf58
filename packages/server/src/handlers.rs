//! HTTP handler functions for the weather predict API.

use actix_web::{HttpResponse, http::header, web};
use chrono::{NaiveDate, Utc};
use weather_predict_analysis::{AnalysisError, export::ExportFormat, status::HealthStatus};
use weather_predict_server_models::{
    AnalysisQueryParams, ApiDisasters, ApiError, Co2QueryParams, DisasterQueryParams,
    ExportQueryParams,
};

use crate::AppState;

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiError::new(message))
}

/// Maps a service error to a response, logging the cause.
fn error_response(context: &str, e: &AnalysisError) -> HttpResponse {
    match e {
        AnalysisError::InvalidCoordinate(_) => {
            log::warn!("{context}: {e}");
            bad_request("Invalid coordinates")
        }
        AnalysisError::InvalidTimeRange { .. } | AnalysisError::Co2(_) => {
            log::warn!("{context}: {e}");
            bad_request("Invalid request")
        }
        _ => {
            log::error!("{context}: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(context))
        }
    }
}

fn target_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}

/// `GET /api/health`
///
/// Responds 503 when any component is unhealthy.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let report = state.service.health_check();
    if report.overall == HealthStatus::Unhealthy {
        HttpResponse::ServiceUnavailable().json(report)
    } else {
        HttpResponse::Ok().json(report)
    }
}

/// `GET /api/status`
pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.service.service_status())
}

/// `GET /api/analysis`
pub async fn analysis(
    state: web::Data<AppState>,
    params: web::Query<AnalysisQueryParams>,
) -> HttpResponse {
    match state
        .service
        .get_weather_analysis(params.lat, params.lon, target_date(params.date))
    {
        Ok(analysis) => HttpResponse::Ok().json(analysis),
        Err(e) => error_response("Failed to build weather analysis", &e),
    }
}

/// `GET /api/disasters`
///
/// Statistics describe the filtered events.
pub async fn disasters(
    state: web::Data<AppState>,
    params: web::Query<DisasterQueryParams>,
) -> HttpResponse {
    let filter = match params.filter() {
        Ok(filter) => filter,
        Err(e) => {
            log::warn!("Rejected disaster query: {e}");
            return bad_request("Invalid query parameters");
        }
    };

    let events = state
        .service
        .get_disaster_events(params.days, params.status.unwrap_or_default())
        .await;
    let events = state.service.filter_disaster_events(&events, filter);
    let statistics = state.service.disaster_statistics(&events);

    HttpResponse::Ok().json(ApiDisasters { events, statistics })
}

/// `GET /api/co2`
pub async fn co2(state: web::Data<AppState>, params: web::Query<Co2QueryParams>) -> HttpResponse {
    let bbox = match params.bounding_box() {
        Ok(bbox) => bbox,
        Err(e) => {
            log::warn!("Rejected CO2 query: {e}");
            return bad_request("Invalid query parameters");
        }
    };

    match state.service.get_co2_data(bbox, params.start, params.end) {
        Ok(dataset) => HttpResponse::Ok().json(dataset),
        Err(e) => error_response("Failed to generate CO2 data", &e),
    }
}

/// `GET /api/export`
///
/// Returns the analysis as a JSON or CSV attachment.
pub async fn export(
    state: web::Data<AppState>,
    params: web::Query<ExportQueryParams>,
) -> HttpResponse {
    let name = params.format.as_deref().unwrap_or("json");
    let Ok(format) = name.parse::<ExportFormat>() else {
        log::warn!("Rejected export format '{name}'");
        return bad_request("Unsupported export format");
    };

    let analysis = match state.service.get_weather_analysis(
        params.lat,
        params.lon,
        target_date(params.date),
    ) {
        Ok(analysis) => analysis,
        Err(e) => return error_response("Failed to build weather analysis", &e),
    };

    match state.service.export(&analysis, format) {
        Ok(body) => HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"weather-analysis.{format}\""),
            ))
            .body(body),
        Err(e) => error_response("Failed to export weather analysis", &e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use weather_predict_analysis::{WeatherService, config::ServiceConfig};
    use weather_predict_disaster::NullDisasterFeed;

    use super::*;
    use crate::configure;

    fn state() -> web::Data<AppState> {
        let config = ServiceConfig {
            seed: Some(9),
            ..ServiceConfig::default()
        };
        let service = WeatherService::new(config, Arc::new(NullDisasterFeed))
            .unwrap()
            .with_current_year(2025);
        web::Data::new(AppState { service })
    }

    #[actix_web::test]
    async fn health_reports_components() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["overall"], "healthy");
        assert_eq!(body["services"]["co2"]["status"], "healthy");
    }

    #[actix_web::test]
    async fn status_lists_services() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/status").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["configuration"]["seed"], 9);
        assert_eq!(body["services"]["disasterTracking"]["dataSource"], "null");
    }

    #[actix_web::test]
    async fn analysis_for_valid_location() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/analysis?lat=14.5995&lon=120.9842&date=2025-07-15")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["daily"].as_array().unwrap().len(), 15);
        assert_eq!(body["monthly"].as_array().unwrap().len(), 12);
        assert_eq!(body["metadata"]["isSpecialRegion"], true);
        assert_eq!(body["validation"]["isValid"], true);
    }

    #[actix_web::test]
    async fn analysis_rejects_bad_coordinates() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/analysis?lat=95&lon=0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid coordinates");
    }

    #[actix_web::test]
    async fn missing_parameters_are_json_errors() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/analysis?lat=10")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid query parameters");
    }

    #[actix_web::test]
    async fn disasters_from_empty_feed() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/disasters?days=30&status=all&category=wildfires&severity=high")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(body["events"].as_array().unwrap().is_empty());
        assert_eq!(body["statistics"]["total"], 0);
    }

    #[actix_web::test]
    async fn disasters_reject_unknown_severity() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/disasters?severity=catastrophic")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn disasters_reject_unrecognized_category() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/disasters?category=foo")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/disasters?category=unknown")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn co2_over_small_box() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/co2?bbox=0,4,10,12")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"].as_array().unwrap().len(), 6);
        assert_eq!(body["statistics"]["dataPoints"], 6);
    }

    #[actix_web::test]
    async fn co2_rejects_inverted_box() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/co2?bbox=10,0,10,12")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn export_csv_attachment() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/export?lat=40&lon=-74&date=2025-01-10&format=csv")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("Date,Temperature,"));
        assert_eq!(text.lines().count(), 16);
    }

    #[actix_web::test]
    async fn export_rejects_unknown_format() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/export?lat=40&lon=-74&format=xml")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Unsupported export format");
    }
}
