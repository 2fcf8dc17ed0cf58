//! Service configuration.
//!
//! Defaults match a production deployment. A TOML file named by the
//! `WEATHER_PREDICT_CONFIG` environment variable overrides any subset of
//! the fields:
//!
//! ```toml
//! enableDisasterTracking = true
//! defaultDayRange = 14
//! yearSpan = 20
//! seed = 42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use weather_predict_climate::generator::DEFAULT_YEAR_SPAN;
use weather_predict_co2::synthesizer::DEFAULT_GRID_STEP;
use weather_predict_disaster::eonet::{DEFAULT_EONET_URL, DEFAULT_TIMEOUT};

/// Environment variable holding the path of an optional TOML config file.
pub const CONFIG_ENV_VAR: &str = "WEATHER_PREDICT_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`ServiceConfig`].
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Runtime settings for [`crate::WeatherService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// When `false`, disaster queries return nothing without contacting
    /// the feed.
    pub enable_disaster_tracking: bool,
    /// Look-back window in days when a caller does not give one.
    pub default_day_range: u32,
    /// Retries for transient feed failures.
    pub max_retries: u32,
    /// Past years simulated per analysis.
    pub year_span: u32,
    /// CO2 grid spacing in degrees.
    pub co2_grid_step: f64,
    pub eonet_url: String,
    pub request_timeout_secs: u64,
    /// Fixed RNG seed; every request is reproducible when set.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enable_disaster_tracking: true,
            default_day_range: 7,
            max_retries: 3,
            year_span: DEFAULT_YEAR_SPAN,
            co2_grid_step: DEFAULT_GRID_STEP,
            eonet_url: DEFAULT_EONET_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            seed: None,
        }
    }
}

impl ServiceConfig {
    /// Parses a TOML document; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when
    /// the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the named file cannot be read or parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                log::info!("Loading service configuration from {path}");
                Self::from_file(Path::new(&path))
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

/// A partial change to a running service's configuration.
///
/// Feed connection settings (URL, timeout, retries) are fixed when the
/// service is built and cannot be updated here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub enable_disaster_tracking: Option<bool>,
    pub default_day_range: Option<u32>,
    pub year_span: Option<u32>,
    pub co2_grid_step: Option<f64>,
    pub seed: Option<u64>,
    /// Removes a configured seed; ignored when `seed` is set.
    #[serde(default)]
    pub clear_seed: bool,
}

impl ConfigUpdate {
    /// Applies every set field to `config`.
    pub fn apply_to(&self, config: &mut ServiceConfig) {
        if let Some(enabled) = self.enable_disaster_tracking {
            config.enable_disaster_tracking = enabled;
        }
        if let Some(days) = self.default_day_range {
            config.default_day_range = days;
        }
        if let Some(year_span) = self.year_span {
            config.year_span = year_span;
        }
        if let Some(step) = self.co2_grid_step {
            config.co2_grid_step = step;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        } else if self.clear_seed {
            config.seed = None;
        }
    }
}
