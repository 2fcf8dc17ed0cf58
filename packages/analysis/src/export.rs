//! JSON and CSV export of a [`WeatherAnalysis`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use weather_predict_weather_models::analysis::WeatherAnalysis;

/// Version stamped into every JSON export.
pub const EXPORT_VERSION: &str = "1.0";
/// Producer name stamped into every JSON export.
pub const EXPORT_SOURCE: &str = "WeatherPredict NASA Integration Platform";

pub const CSV_HEADERS: [&str; 7] = [
    "Date",
    "Temperature",
    "Temperature Max",
    "Temperature Min",
    "Precipitation",
    "Wind Speed",
    "Humidity",
];

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The requested format is not `json` or `csv`.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Supported export formats.
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
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    /// MIME type of the exported body.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

/// Envelope wrapping exported JSON data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope<T> {
    pub exported_at: DateTime<Utc>,
    pub data: T,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub version: String,
    pub source: String,
}

impl Default for ExportMetadata {
    fn default() -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            source: EXPORT_SOURCE.to_string(),
        }
    }
}

/// Serializes the analysis inside an [`ExportEnvelope`].
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn to_json(
    analysis: &WeatherAnalysis,
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let envelope = ExportEnvelope {
        exported_at,
        data: analysis,
        metadata: ExportMetadata::default(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Flattens the daily records to CSV, one row per record after the header.
///
/// # Errors
///
/// Returns [`ExportError`] if writing a record fails.
pub fn to_csv(analysis: &WeatherAnalysis) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    writer.write_record(CSV_HEADERS)?;
    for record in &analysis.daily {
        writer.write_record([
            record.date.clone(),
            record.temperature.to_string(),
            record.temperature_max.to_string(),
            record.temperature_min.to_string(),
            record.precipitation.to_string(),
            record.wind_speed.to_string(),
            record.humidity.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Exports in the given format.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn export(analysis: &WeatherAnalysis, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => to_json(analysis, Utc::now()),
        ExportFormat::Csv => to_csv(analysis),
    }
}

/// Exports in the format named by `format` (`"json"` or `"csv"`).
///
/// # Errors
///
/// Returns [`ExportError::UnsupportedFormat`] for any other name, or any
/// error from [`export`].
pub fn format_for_export(analysis: &WeatherAnalysis, format: &str) -> Result<String, ExportError> {
    let format: ExportFormat = format
        .parse()
        .map_err(|_| ExportError::UnsupportedFormat(format.to_string()))?;
    export(analysis, format)
}
