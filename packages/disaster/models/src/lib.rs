#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Natural disaster event types.
//!
//! [`RawEvent`] mirrors the NASA EONET v3 event payload as it arrives on the
//! wire. [`DisasterEvent`] is the normalized, classified form shown to
//! users.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use weather_predict_weather_models::Coordinate;

/// Query-string value meaning "do not filter on this field".
pub const ALL: &str = "all";

/// EONET event category.
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DisasterCategory {
    Storms,
    Volcanoes,
    Wildfires,
    Floods,
    Drought,
    DustHaze,
    Earthquakes,
    Landslides,
    Manmade,
    SeaLakeIce,
    SevereStorms,
    Snow,
    TempExtremes,
    WaterColor,
    /// Any id not listed above.
    Unknown,
}

impl DisasterCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Storms,
            Self::Volcanoes,
            Self::Wildfires,
            Self::Floods,
            Self::Drought,
            Self::DustHaze,
            Self::Earthquakes,
            Self::Landslides,
            Self::Manmade,
            Self::SeaLakeIce,
            Self::SevereStorms,
            Self::Snow,
            Self::TempExtremes,
            Self::WaterColor,
            Self::Unknown,
        ]
    }

    /// Maps an EONET category id to a category, falling back to
    /// [`DisasterCategory::Unknown`].
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or(Self::Unknown)
    }
}

/// Coarse impact tier of an event.
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
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Moderate, Self::High]
    }
}

/// Event status filter understood by the EONET API.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Open,
    Closed,
    All,
}

/// Either every value of a field, or exactly one.
///
/// Parses from the string `"all"` or from `T`'s own string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this selection.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Conjunctive event filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub category: Selection<DisasterCategory>,
    pub severity: Selection<Severity>,
}

/// A classified natural disaster event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterEvent {
    /// EONET event id (e.g. `"EONET_6512"`).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Human-readable category title.
    pub category: String,
    /// EONET category id as received, kept verbatim for unknown ids.
    pub category_id: String,
    /// Timestamp of the most recent geometry.
    pub date: String,
    /// Location of the most recent geometry.
    pub coordinates: Coordinate,
    pub magnitude_value: Option<f64>,
    pub magnitude_unit: Option<String>,
    pub link: Option<String>,
    /// When the event was closed, if it has been.
    pub closed: Option<String>,
    pub severity: Severity,
}

impl DisasterEvent {
    /// The parsed category of this event.
    #[must_use]
    pub fn category_kind(&self) -> DisasterCategory {
        DisasterCategory::from_id(&self.category_id)
    }
}

/// Severity counts and category ids over a set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStatistics {
    pub total: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    /// Distinct category ids in first-seen order.
    pub categories: Vec<String>,
}

/// Top-level EONET `/events` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEventsResponse {
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// One EONET event as received.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub closed: Option<String>,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub geometry: Vec<RawGeometry>,
}

/// EONET category reference.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub id: String,
    pub title: String,
}

/// One observation of an event's position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGeometry {
    #[serde(default)]
    pub date: String,
    /// GeoJSON geometry type (`"Point"`, `"Polygon"`).
    #[serde(rename = "type", default)]
    pub geometry_type: Option<String>,
    /// GeoJSON coordinates; `[lon, lat]` for points, nested for polygons.
    #[serde(default)]
    pub coordinates: serde_json::Value,
    #[serde(default)]
    pub magnitude_value: Option<f64>,
    #[serde(default)]
    pub magnitude_unit: Option<String>,
}
