#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the weather predict server.
//!
//! Query parameter structs keep raw strings for filters and bounding boxes
//! so that a malformed value can be reported as a 400 with a generic
//! message instead of an opaque extractor error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use weather_predict_co2_models::BoundingBox;
use weather_predict_disaster_models::{
    DisasterEvent, EventFilter, EventStatistics, EventStatus, Selection,
};

/// A query parameter that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQueryParam {
    /// Name of the offending parameter.
    pub name: &'static str,
    pub value: String,
}

impl std::fmt::Display for InvalidQueryParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid value for '{}': {}", self.name, self.value)
    }
}

impl std::error::Error for InvalidQueryParam {}

fn parse_selection<T: std::str::FromStr>(
    name: &'static str,
    value: Option<&str>,
) -> Result<Selection<T>, InvalidQueryParam> {
    value.map_or(Ok(Selection::All), |value| {
        value.parse().map_err(|_| InvalidQueryParam {
            name,
            value: value.to_string(),
        })
    })
}

/// Query parameters for the analysis endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQueryParams {
    pub lat: f64,
    pub lon: f64,
    /// Target date (`YYYY-MM-DD`). Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Query parameters for the disasters endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterQueryParams {
    /// Look-back window in days. Defaults to the service's configured range.
    pub days: Option<u32>,
    pub status: Option<EventStatus>,
    /// Category id or `all`.
    pub category: Option<String>,
    /// Severity tier or `all`.
    pub severity: Option<String>,
}

impl DisasterQueryParams {
    /// Builds the event filter named by `category` and `severity`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQueryParam`] for an unknown category or severity.
    pub fn filter(&self) -> Result<EventFilter, InvalidQueryParam> {
        Ok(EventFilter {
            category: parse_selection("category", self.category.as_deref())?,
            severity: parse_selection("severity", self.severity.as_deref())?,
        })
    }
}

/// Query parameters for the CO2 endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2QueryParams {
    /// Bounding box as `latMin,latMax,lonMin,lonMax`. Defaults to the
    /// whole globe.
    pub bbox: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Co2QueryParams {
    /// # Errors
    ///
    /// Returns [`InvalidQueryParam`] if `bbox` is not a valid box.
    pub fn bounding_box(&self) -> Result<BoundingBox, InvalidQueryParam> {
        self.bbox.as_deref().map_or(Ok(BoundingBox::WORLD), |bbox| {
            bbox.parse().map_err(|_| InvalidQueryParam {
                name: "bbox",
                value: bbox.to_string(),
            })
        })
    }
}

/// Query parameters for the export endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQueryParams {
    pub lat: f64,
    pub lon: f64,
    pub date: Option<NaiveDate>,
    /// `json` (default) or `csv`.
    pub format: Option<String>,
}

/// Response body of the disasters endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDisasters {
    pub events: Vec<DisasterEvent>,
    pub statistics: EventStatistics,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use weather_predict_disaster_models::{DisasterCategory, Severity};

    use super::*;

    #[test]
    fn missing_filters_select_everything() {
        let filter = DisasterQueryParams::default().filter().unwrap();
        assert_eq!(filter, EventFilter::default());
    }

    #[test]
    fn filters_parse_ids_and_all() {
        let params = DisasterQueryParams {
            category: Some("seaLakeIce".to_string()),
            severity: Some("all".to_string()),
            ..DisasterQueryParams::default()
        };
        let filter = params.filter().unwrap();
        assert_eq!(
            filter.category,
            Selection::Only(DisasterCategory::SeaLakeIce)
        );
        assert_eq!(filter.severity, Selection::<Severity>::All);
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let params = DisasterQueryParams {
            severity: Some("extreme".to_string()),
            ..DisasterQueryParams::default()
        };
        let err = params.filter().unwrap_err();
        assert_eq!(err.name, "severity");
        assert_eq!(err.to_string(), "Invalid value for 'severity': extreme");
    }

    #[test]
    fn bbox_defaults_to_world() {
        assert_eq!(
            Co2QueryParams::default().bounding_box().unwrap(),
            BoundingBox::WORLD
        );
    }

    #[test]
    fn bbox_is_parsed_and_validated() {
        let params = Co2QueryParams {
            bbox: Some("10,20,30,40".to_string()),
            ..Co2QueryParams::default()
        };
        let bbox = params.bounding_box().unwrap();
        assert!((bbox.lat_max() - 20.0).abs() < f64::EPSILON);

        let inverted = Co2QueryParams {
            bbox: Some("20,10,30,40".to_string()),
            ..Co2QueryParams::default()
        };
        assert!(inverted.bounding_box().is_err());
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_string(&ApiError::new("Failed to build analysis")).unwrap();
        assert_eq!(json, r#"{"error":"Failed to build analysis"}"#);
    }
}
