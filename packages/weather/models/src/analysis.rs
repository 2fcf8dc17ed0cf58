//! Aggregated analysis result types.
//!
//! These are derived from a [`DailyRecord`](crate::DailyRecord) /
//! [`MonthlySummary`](crate::MonthlySummary) population and returned to
//! callers as part of a [`WeatherAnalysis`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{Coordinate, DailyRecord, MonthlySummary, ProbabilitySet};

/// Descriptive statistics for one temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureAggregate {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

/// Descriptive statistics for one precipitation series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecipitationAggregate {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Sum over all records.
    pub total: f64,
}

/// Descriptive statistics for one wind speed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindAggregate {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-variable aggregations over the daily records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregations {
    pub temperature: TemperatureAggregate,
    pub precipitation: PrecipitationAggregate,
    pub wind_speed: WindAggregate,
}

/// Least-squares slope per year-index for each variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
}

/// Earliest and latest record dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Shape and coverage of the daily record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub date_range: DateRange,
    /// Percent of required fields that hold a value.
    pub completeness: f64,
    pub years_covered: usize,
}

/// Which month is most extreme in each direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPatterns {
    pub hottest_month: String,
    pub coldest_month: String,
    pub wettest_month: String,
    pub driest_month: String,
    pub windiest_month: String,
    pub calmest_month: String,
}

/// Record values and counts of sustained runs of extreme weather.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeEvents {
    pub record_high: f64,
    pub record_low: f64,
    pub max_rainfall: f64,
    pub max_wind_speed: f64,
    /// Runs of at least 3 consecutive records above 30°C.
    pub heat_waves: u32,
    /// Runs of at least 3 consecutive records below 10°C.
    pub cold_snaps: u32,
    /// Runs of at least 7 consecutive records under 1mm.
    pub droughts: u32,
    /// Runs of at least 3 consecutive records above 5mm.
    pub wet_spells: u32,
}

/// Tone of an [`Insight`].
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Info,
    Success,
}

/// A short human-readable observation derived from the probabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

/// Context the generator attaches to a synthetic data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherMetadata {
    pub location: Coordinate,
    /// Whether the special tropical-archipelago climate rules applied.
    pub is_special_region: bool,
    pub is_tropical: bool,
    pub target_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
}

/// Raw generator output before any aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub daily: Vec<DailyRecord>,
    pub monthly: Vec<MonthlySummary>,
    pub metadata: WeatherMetadata,
}

/// Where the numbers in a [`WeatherAnalysis`] came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub total_years: usize,
    pub data_source: String,
    pub location: Coordinate,
    pub methodology: String,
    pub data_sources: Vec<String>,
    pub disaster_tracking: bool,
}

/// Outcome of an integrity check over an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// The merged response for one (location, date) request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAnalysis {
    pub daily: Vec<DailyRecord>,
    pub monthly: Vec<MonthlySummary>,
    pub metadata: WeatherMetadata,
    /// `None` when there are no daily records.
    pub aggregations: Option<Aggregations>,
    /// `None` when there are fewer than two daily records.
    pub trends: Option<Trends>,
    pub statistics: DatasetStatistics,
    /// `None` when there are no monthly records.
    pub seasonal_patterns: Option<SeasonalPatterns>,
    /// `None` when there are no daily records.
    pub extremes: Option<ExtremeEvents>,
    pub probabilities: ProbabilitySet,
    /// One-sentence description of the notable probabilities.
    pub summary: String,
    pub insights: Vec<Insight>,
    pub provenance: Provenance,
    pub validation: ValidationReport,
}
