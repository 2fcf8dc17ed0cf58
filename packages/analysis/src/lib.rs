#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather analysis orchestration.
//!
//! [`WeatherService`] is the single entry point used by the server and
//! CLI. It ties together synthetic record generation, historical
//! statistics, probability scoring, the disaster feed, and the CO2 field
//! synthesizer. Construct it once at startup and share it; it holds no
//! global state.

pub mod config;
pub mod export;
pub mod status;
pub mod validation;

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use chrono::{DateTime, Datelike as _, NaiveDate, Utc};
use rand::{SeedableRng, rngs::StdRng};
use weather_predict_climate::generator::{MAX_YEAR_SPAN, SyntheticRecordGenerator};
use weather_predict_co2::{Co2Error, synthesizer::Co2FieldSynthesizer};
use weather_predict_co2_models::{BoundingBox, Co2Dataset, TemporalCoverage};
use weather_predict_disaster::{DisasterError, DisasterFeed, eonet::EonetFeed};
use weather_predict_disaster_models::{
    DisasterCategory, DisasterEvent, EventFilter, EventStatistics, EventStatus,
};
use weather_predict_probability::{
    calculate_probabilities, generate_summary, insights::generate_insights,
};
use weather_predict_statistics::historical::process_historical_data;
use weather_predict_weather_models::{
    Coordinate, InvalidCoordinate,
    analysis::{Provenance, ValidationReport, WeatherAnalysis},
};

use crate::{
    config::{ConfigError, ConfigUpdate, ServiceConfig},
    export::{ExportError, ExportFormat},
    status::{ComponentHealth, ComponentInfo, HealthReport, HealthStatus, ServiceStatus},
};

pub use validation::validate_data_integrity;

const DATA_SOURCE: &str = "Synthetic latitude-band climate model";
const METHODOLOGY: &str = "Threshold frequencies over simulated historical records";
const DATA_SOURCES: &[&str] = &[
    "Synthetic climate model",
    "NASA EONET Disaster Tracking",
    "NASA OCO-2 (Simulated)",
];

/// Errors that can occur in the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    #[error(transparent)]
    Co2(#[from] Co2Error),

    #[error(transparent)]
    Disaster(#[from] DisasterError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A time range whose start is after its end.
    #[error("Invalid time range: {start} is after {end}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid year span {year_span}: must be between 1 and {max}", max = MAX_YEAR_SPAN)]
    InvalidYearSpan { year_span: u32 },
}

const fn check_year_span(year_span: u32) -> Result<(), AnalysisError> {
    if year_span == 0 || year_span > MAX_YEAR_SPAN {
        return Err(AnalysisError::InvalidYearSpan { year_span });
    }
    Ok(())
}

/// Orchestrates every weather-related data source.
pub struct WeatherService {
    config: ServiceConfig,
    generator: SyntheticRecordGenerator,
    co2: Co2FieldSynthesizer,
    feed: Arc<dyn DisasterFeed>,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("config", &self.config)
            .field("generator", &self.generator)
            .field("co2", &self.co2)
            .field("feed", &self.feed.name())
            .finish()
    }
}

impl WeatherService {
    /// Creates a service backed by the given disaster feed.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidYearSpan`] if the year span is out
    /// of range, or [`AnalysisError::Co2`] if the configured grid step is
    /// invalid.
    pub fn new(config: ServiceConfig, feed: Arc<dyn DisasterFeed>) -> Result<Self, AnalysisError> {
        check_year_span(config.year_span)?;
        let co2 = Co2FieldSynthesizer::new(config.co2_grid_step)?;
        let generator = SyntheticRecordGenerator::default().with_year_span(config.year_span);

        Ok(Self {
            config,
            generator,
            co2,
            feed,
        })
    }

    /// Creates a service backed by the EONET feed named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the HTTP client cannot be built or the
    /// configuration is invalid.
    pub fn from_config(config: ServiceConfig) -> Result<Self, AnalysisError> {
        let feed = EonetFeed::new(
            config.eonet_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
            config.max_retries,
        )?;
        Self::new(config, Arc::new(feed))
    }

    /// Pins the year the simulated history ends at.
    #[must_use]
    pub fn with_current_year(mut self, current_year: i32) -> Self {
        self.generator =
            SyntheticRecordGenerator::new(current_year).with_year_span(self.config.year_span);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        self.config.seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        )
    }

    /// Builds the full analysis for a location and target date.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidCoordinate`] if the coordinates are
    /// out of range.
    pub fn get_weather_analysis(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<WeatherAnalysis, AnalysisError> {
        let location = Coordinate::new(latitude, longitude)?;
        log::info!("Building weather analysis for ({latitude}, {longitude}) on {date}");

        let mut rng = self.rng();
        let data = self
            .generator
            .generate_weather_data(&mut rng, location, date);
        let historical = process_historical_data(&data.daily, &data.monthly);

        let probabilities = calculate_probabilities(&data.daily);
        let summary = generate_summary(&probabilities);
        let insights = generate_insights(&probabilities);

        let provenance = Provenance {
            total_years: data.daily.len(),
            data_source: DATA_SOURCE.to_string(),
            location,
            methodology: METHODOLOGY.to_string(),
            data_sources: DATA_SOURCES.iter().map(ToString::to_string).collect(),
            disaster_tracking: self.config.enable_disaster_tracking,
        };

        let mut analysis = WeatherAnalysis {
            daily: data.daily,
            monthly: data.monthly,
            metadata: data.metadata,
            aggregations: historical.aggregations,
            trends: historical.trends,
            statistics: historical.statistics,
            seasonal_patterns: historical.seasonal_patterns,
            extremes: historical.extremes,
            probabilities,
            summary,
            insights,
            provenance,
            validation: ValidationReport::default(),
        };

        let validation = validate_data_integrity(&analysis);
        if !validation.is_valid {
            log::warn!("Data validation failed: {:?}", validation.errors);
        }
        analysis.validation = validation;

        Ok(analysis)
    }

    /// Fetches and classifies recent disaster events.
    ///
    /// Never fails: feed errors are logged and produce an empty list, and
    /// nothing is fetched while disaster tracking is disabled.
    pub async fn get_disaster_events(
        &self,
        days_back: Option<u32>,
        status: EventStatus,
    ) -> Vec<DisasterEvent> {
        if !self.config.enable_disaster_tracking {
            log::info!("Disaster tracking is disabled");
            return vec![];
        }

        let days = days_back.unwrap_or(self.config.default_day_range);
        match self.feed.fetch_events(days, status).await {
            Ok(raw) => weather_predict_disaster::transform_events(raw),
            Err(e) => {
                log::warn!("Disaster feed '{}' failed: {e}", self.feed.name());
                vec![]
            }
        }
    }

    #[must_use]
    pub fn filter_disaster_events(
        &self,
        events: &[DisasterEvent],
        filter: EventFilter,
    ) -> Vec<DisasterEvent> {
        weather_predict_disaster::filter_events(events, filter)
    }

    #[must_use]
    pub fn disaster_statistics(&self, events: &[DisasterEvent]) -> EventStatistics {
        weather_predict_disaster::event_statistics(events)
    }

    #[must_use]
    pub fn disaster_icon(&self, category_id: &str) -> &'static str {
        weather_predict_disaster::icon_for(DisasterCategory::from_id(category_id))
    }

    /// Synthesizes a CO2 field over `bbox`.
    ///
    /// Missing times default to now.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the time range is inverted or the grid
    /// is too large.
    pub fn get_co2_data(
        &self,
        bbox: BoundingBox,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Co2Dataset, AnalysisError> {
        let now = Utc::now();
        let start = start_time.unwrap_or(now);
        let end = end_time.unwrap_or(now);
        if start > end {
            return Err(AnalysisError::InvalidTimeRange { start, end });
        }

        let mut rng = self.rng();
        Ok(self.co2.generate_dataset(
            &mut rng,
            bbox,
            TemporalCoverage {
                start_time: start,
                end_time: end,
            },
            now.month0(),
            now,
        )?)
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::Export`] if serialization fails.
    pub fn export(
        &self,
        analysis: &WeatherAnalysis,
        format: ExportFormat,
    ) -> Result<String, AnalysisError> {
        Ok(export::export(analysis, format)?)
    }

    /// Exports using a format name.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Export`] wrapping
    /// [`ExportError::UnsupportedFormat`] for anything but `json`/`csv`.
    pub fn format_for_export(
        &self,
        analysis: &WeatherAnalysis,
        format: &str,
    ) -> Result<String, AnalysisError> {
        Ok(export::format_for_export(analysis, format)?)
    }

    #[must_use]
    pub fn service_status(&self) -> ServiceStatus {
        let mut services = BTreeMap::new();
        services.insert(
            "climate".to_string(),
            ComponentInfo {
                service: "Synthetic Climate Model".to_string(),
                enabled: true,
                data_source: DATA_SOURCE.to_string(),
                base_url: None,
            },
        );
        services.insert(
            "disasterTracking".to_string(),
            ComponentInfo {
                service: "NASA EONET Disaster Tracking".to_string(),
                enabled: self.config.enable_disaster_tracking,
                data_source: self.feed.name().to_string(),
                base_url: Some(self.config.eonet_url.clone()),
            },
        );
        services.insert(
            "co2".to_string(),
            ComponentInfo {
                service: "NASA OCO-2 Atmospheric CO2 Monitoring".to_string(),
                enabled: true,
                data_source: weather_predict_co2::synthesizer::METHODOLOGY.to_string(),
                base_url: None,
            },
        );

        ServiceStatus {
            services,
            configuration: self.config.clone(),
            last_updated: Utc::now(),
        }
    }

    /// Exercises each component offline and reports its health.
    #[must_use]
    pub fn health_check(&self) -> HealthReport {
        let mut services = BTreeMap::new();
        let today = Utc::now().date_naive();

        let climate = match self.get_weather_analysis(0.0, 0.0, today) {
            Ok(analysis) if analysis.validation.is_valid => ComponentHealth {
                status: HealthStatus::Healthy,
                message: "Generator operational".to_string(),
            },
            Ok(analysis) => ComponentHealth {
                status: HealthStatus::Degraded,
                message: analysis.validation.errors.join("; "),
            },
            Err(e) => ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: e.to_string(),
            },
        };
        services.insert("climate".to_string(), climate);

        let disaster = if self.config.enable_disaster_tracking {
            ComponentHealth {
                status: HealthStatus::Healthy,
                message: format!("Service operational (feed: {})", self.feed.name()),
            }
        } else {
            ComponentHealth {
                status: HealthStatus::Degraded,
                message: "Disaster tracking disabled".to_string(),
            }
        };
        services.insert("disasterTracking".to_string(), disaster);

        let sample_grid = BoundingBox::new(0.0, 0.0, 0.0, 0.0)
            .map_err(Co2Error::from)
            .and_then(|bbox| self.co2.synthesize_grid(&mut self.rng(), &bbox, 0));
        let co2 = match sample_grid {
            Ok(_) => ComponentHealth {
                status: HealthStatus::Healthy,
                message: "Synthesizer operational".to_string(),
            },
            Err(e) => ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: e.to_string(),
            },
        };
        services.insert("co2".to_string(), co2);

        let overall = services
            .values()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        HealthReport {
            overall,
            services,
            timestamp: Utc::now(),
        }
    }

    /// Merges `update` into the running configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidYearSpan`] or [`AnalysisError::Co2`]
    /// if the merged values are invalid; the configuration is left
    /// unchanged in that case.
    pub fn update_configuration(&mut self, update: &ConfigUpdate) -> Result<(), AnalysisError> {
        let mut config = self.config.clone();
        update.apply_to(&mut config);

        check_year_span(config.year_span)?;
        self.co2 = Co2FieldSynthesizer::new(config.co2_grid_step)?;
        self.generator = SyntheticRecordGenerator::new(self.generator.current_year())
            .with_year_span(config.year_span);
        self.config = config;

        log::info!("Service configuration updated: {:?}", self.config);
        Ok(())
    }
}
