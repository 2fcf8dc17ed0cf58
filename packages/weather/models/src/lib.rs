#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Coordinate, weather record, and probability types.
//!
//! This crate defines the canonical record shapes used across the whole
//! weather-predict system. Generators produce these records, the
//! statistics and probability crates consume them, and the server
//! serializes them as-is (camelCase JSON).

pub mod analysis;

use chrono::Month;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Error returned when a latitude/longitude pair is non-finite or out of
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinate {
    /// The rejected latitude.
    pub latitude: f64,
    /// The rejected longitude.
    pub longitude: f64,
}

impl std::fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid coordinate ({}, {}): expected latitude in [-90, 90] and longitude in [-180, 180]",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinate {}

/// A validated WGS84 point.
///
/// Can only be constructed through [`Coordinate::new`] (or deserialized,
/// which runs the same validation), so every `Coordinate` in the system is
/// finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateParts", rename_all = "camelCase")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct CoordinateParts {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<CoordinateParts> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(parts: CoordinateParts) -> Result<Self, Self::Error> {
        Self::new(parts.latitude, parts.longitude)
    }
}

impl Coordinate {
    /// Validates and creates a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinate`] if either value is non-finite, the
    /// latitude is outside `[-90, 90]`, or the longitude is outside
    /// `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if Self::is_valid(latitude, longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Returns `true` if the pair would pass [`Coordinate::new`].
    #[must_use]
    pub fn is_valid(latitude: f64, longitude: f64) -> bool {
        latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `1.0` north of the equator, `-1.0` otherwise.
    ///
    /// The equator itself (`latitude == 0`) takes the southern branch.
    #[must_use]
    pub fn hemisphere_sign(&self) -> f64 {
        if self.latitude > 0.0 { 1.0 } else { -1.0 }
    }

    /// Whether the point lies between the tropics (|lat| < 23.5).
    #[must_use]
    pub fn is_tropical(&self) -> bool {
        self.latitude.abs() < 23.5
    }
}

/// One simulated observation for a fixed calendar day in a given year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Year the record stands for.
    pub year: i32,
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Mean temperature in °C.
    pub temperature: f64,
    /// Daily maximum temperature in °C.
    pub temperature_max: f64,
    /// Daily minimum temperature in °C.
    pub temperature_min: f64,
    /// Precipitation in mm (never negative).
    pub precipitation: f64,
    /// Wind speed in m/s (never negative).
    pub wind_speed: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

impl DailyRecord {
    /// Returns the value of a single measured field.
    ///
    /// Non-finite values are reported as missing.
    #[must_use]
    pub fn value(&self, field: DailyField) -> Option<f64> {
        let value = match field {
            DailyField::Temperature => self.temperature,
            DailyField::TemperatureMax => self.temperature_max,
            DailyField::TemperatureMin => self.temperature_min,
            DailyField::Precipitation => self.precipitation,
            DailyField::WindSpeed => self.wind_speed,
            DailyField::Humidity => self.humidity,
        };
        value.is_finite().then_some(value)
    }
}

/// Measured fields of a [`DailyRecord`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DailyField {
    Temperature,
    TemperatureMax,
    TemperatureMin,
    Precipitation,
    WindSpeed,
    Humidity,
}

impl DailyField {
    /// Fields that must be present for a record to count as complete.
    pub const REQUIRED: &'static [Self] =
        &[Self::Temperature, Self::Precipitation, Self::WindSpeed];
}

/// Climate summary for one calendar month at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Three-letter month name (`"Jan"`, `"Feb"`, ...).
    pub month: String,
    /// Typical temperature in °C.
    pub temperature: f64,
    /// Typical rainfall in mm (never negative).
    pub rainfall: f64,
    /// Typical wind speed in m/s (never negative).
    pub wind_speed: f64,
}

/// Three-letter English abbreviation for a month.
#[must_use]
pub fn month_abbreviation(month: Month) -> &'static str {
    &month.name()[..3]
}

/// All twelve months, January first.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Percent chance of each weather category on the target day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilitySet {
    /// Chance of temperature above 35°C.
    pub hot: u8,
    /// Chance of temperature below 5°C.
    pub cold: u8,
    /// Chance of more than 10mm of precipitation.
    pub wet: u8,
    /// Chance of wind above 10m/s.
    pub windy: u8,
    /// Chance of a heat index above 32°C.
    pub uncomfortable: u8,
}

impl ProbabilitySet {
    /// Returns the probability for one category.
    #[must_use]
    pub const fn get(&self, category: WeatherCategory) -> u8 {
        match category {
            WeatherCategory::Hot => self.hot,
            WeatherCategory::Cold => self.cold,
            WeatherCategory::Wet => self.wet,
            WeatherCategory::Windy => self.windy,
            WeatherCategory::Uncomfortable => self.uncomfortable,
        }
    }
}

/// The weather categories a [`ProbabilitySet`] reports on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum WeatherCategory {
    Hot,
    Cold,
    Wet,
    Windy,
    Uncomfortable,
}

impl WeatherCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hot,
            Self::Cold,
            Self::Wet,
            Self::Windy,
            Self::Uncomfortable,
        ]
    }

    /// Phrase used in "N% chance of ..." sentences.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Hot => "hot weather",
            Self::Cold => "cold weather",
            Self::Wet => "rain",
            Self::Windy => "windy conditions",
            Self::Uncomfortable => "uncomfortable heat",
        }
    }
}

/// Rounds to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
