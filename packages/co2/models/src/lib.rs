#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Column-averaged CO2 sample and dataset types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Error returned for a bounding box that is non-finite, out of range, or
/// inverted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidBoundingBox {
    /// What is wrong with the box.
    pub message: String,
}

impl std::fmt::Display for InvalidBoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid bounding box: {}", self.message)
    }
}

impl std::error::Error for InvalidBoundingBox {}

impl InvalidBoundingBox {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A validated latitude/longitude rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundingBoxParts", rename_all = "camelCase")]
pub struct BoundingBox {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundingBoxParts {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl TryFrom<BoundingBoxParts> for BoundingBox {
    type Error = InvalidBoundingBox;

    fn try_from(parts: BoundingBoxParts) -> Result<Self, Self::Error> {
        Self::new(parts.lat_min, parts.lat_max, parts.lon_min, parts.lon_max)
    }
}

impl BoundingBox {
    /// The whole globe.
    pub const WORLD: Self = Self {
        lat_min: -90.0,
        lat_max: 90.0,
        lon_min: -180.0,
        lon_max: 180.0,
    };

    /// Validates and creates a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBoundingBox`] if any edge is non-finite or out of
    /// range, or if a minimum exceeds its maximum.
    pub fn new(
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    ) -> Result<Self, InvalidBoundingBox> {
        if ![lat_min, lat_max, lon_min, lon_max]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(InvalidBoundingBox::new("edges must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat_min) || !(-90.0..=90.0).contains(&lat_max) {
            return Err(InvalidBoundingBox::new("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon_min) || !(-180.0..=180.0).contains(&lon_max) {
            return Err(InvalidBoundingBox::new(
                "longitude must be within [-180, 180]",
            ));
        }
        if lat_min > lat_max {
            return Err(InvalidBoundingBox::new(format!(
                "latMin {lat_min} is greater than latMax {lat_max}"
            )));
        }
        if lon_min > lon_max {
            return Err(InvalidBoundingBox::new(format!(
                "lonMin {lon_min} is greater than lonMax {lon_max}"
            )));
        }

        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    #[must_use]
    pub const fn lat_min(&self) -> f64 {
        self.lat_min
    }

    #[must_use]
    pub const fn lat_max(&self) -> f64 {
        self.lat_max
    }

    #[must_use]
    pub const fn lon_min(&self) -> f64 {
        self.lon_min
    }

    #[must_use]
    pub const fn lon_max(&self) -> f64 {
        self.lon_max
    }

    /// Whether the point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::WORLD
    }
}

/// Parses `latMin,latMax,lonMin,lonMax`.
impl FromStr for BoundingBox {
    type Err = InvalidBoundingBox;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| InvalidBoundingBox::new(format!("{s:?}: {e}")))?;

        let [lat_min, lat_max, lon_min, lon_max] = values[..] else {
            return Err(InvalidBoundingBox::new(format!(
                "expected latMin,latMax,lonMin,lonMax, got {s:?}"
            )));
        };

        Self::new(lat_min, lat_max, lon_min, lon_max)
    }
}

/// Retrieval quality flag of a sample.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Co2Quality {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// One grid cell of the CO2 field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Sample {
    pub latitude: f64,
    pub longitude: f64,
    /// Column-averaged dry-air mole fraction in ppm.
    pub co2_concentration: f64,
    /// One-sigma uncertainty in ppm.
    pub uncertainty: f64,
    pub quality: Co2Quality,
}

/// Number of samples per quality flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl QualityDistribution {
    /// Counts one sample of the given quality.
    pub const fn record(&mut self, quality: Co2Quality) {
        match quality {
            Co2Quality::Excellent => self.excellent += 1,
            Co2Quality::Good => self.good += 1,
            Co2Quality::Fair => self.fair += 1,
            Co2Quality::Poor => self.poor += 1,
        }
    }
}

/// Summary of a sample set; every float rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Statistics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub standard_deviation: f64,
    pub data_points: usize,
    pub quality_distribution: QualityDistribution,
}

/// Variable names in the upstream OCO-2 Level 2 product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Parameters {
    pub co2: String,
    pub latitude: String,
    pub longitude: String,
    pub time: String,
    pub pressure: String,
    pub altitude: String,
}

impl Default for Co2Parameters {
    fn default() -> Self {
        Self {
            co2: "xco2".to_string(),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
            time: "time".to_string(),
            pressure: "pressure_levels".to_string(),
            altitude: "altitude".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Units {
    pub co2: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for Co2Units {
    fn default() -> Self {
        Self {
            co2: "ppm (parts per million)".to_string(),
            latitude: "degrees_north".to_string(),
            longitude: "degrees_east".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalCoverage {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Provenance of a synthesized CO2 field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Metadata {
    pub source: String,
    pub dataset: String,
    pub parameters: Co2Parameters,
    pub spatial_coverage: BoundingBox,
    pub temporal_coverage: TemporalCoverage,
    pub data_quality: String,
    pub methodology: String,
    pub units: Co2Units,
    pub generated_at: DateTime<Utc>,
}

/// Samples over a bounding box with their provenance and summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Dataset {
    pub data: Vec<Co2Sample>,
    pub metadata: Co2Metadata,
    pub statistics: Co2Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_rejects_inverted_and_out_of_range() {
        assert!(BoundingBox::new(10.0, 5.0, 0.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 1.0, 10.0, -10.0).is_err());
        assert!(BoundingBox::new(-91.0, 0.0, 0.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 1.0, 0.0, 181.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(BoundingBox::new(10.0, 10.0, 120.0, 120.0).is_ok());
    }

    #[test]
    fn bounding_box_parses_query_form() {
        let bbox: BoundingBox = "10, 20,-130,-120".parse().unwrap();
        assert!((bbox.lat_max() - 20.0).abs() < f64::EPSILON);
        assert!((bbox.lon_min() + 130.0).abs() < f64::EPSILON);

        assert!("10,20,30".parse::<BoundingBox>().is_err());
        assert!("a,b,c,d".parse::<BoundingBox>().is_err());
        assert!("20,10,0,1".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn bounding_box_serializes_camel_case_and_validates() {
        let json = serde_json::to_value(BoundingBox::WORLD).unwrap();
        assert_eq!(json["latMin"], -90.0);
        assert_eq!(json["lonMax"], 180.0);

        let bad = serde_json::from_str::<BoundingBox>(
            r#"{"latMin":5.0,"latMax":1.0,"lonMin":0.0,"lonMax":1.0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn quality_distribution_counts() {
        let mut distribution = QualityDistribution::default();
        for quality in [Co2Quality::Good, Co2Quality::Good, Co2Quality::Poor] {
            distribution.record(quality);
        }
        assert_eq!(distribution.good, 2);
        assert_eq!(distribution.poor, 1);
        assert_eq!(distribution.excellent, 0);
    }
}
