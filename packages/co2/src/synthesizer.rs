//! Fixed-step grid walk over a bounding box.

use chrono::{DateTime, Utc};
use rand::Rng;
use weather_predict_co2_models::{
    BoundingBox, Co2Dataset, Co2Metadata, Co2Parameters, Co2Sample, Co2Units, TemporalCoverage,
};

use crate::{Co2Error, sample_at, statistics};

/// Grid spacing in degrees used when none is configured.
pub const DEFAULT_GRID_STEP: f64 = 2.0;

/// Upper bound on samples in one grid.
pub const MAX_GRID_POINTS: usize = 250_000;

// Absorbs float error so that a maximum reached by an exact number of
// steps is still included.
const STEP_EPSILON: f64 = 1e-9;

pub const SOURCE: &str = "NASA OCO-2 Satellite (Simulated)";
pub const DATASET: &str = "OCO2_L2_Standard.11r";
pub const DATA_QUALITY: &str = "Research Grade";
pub const METHODOLOGY: &str = "NASA OCO-2 Level 2 Standard Product";

/// Produces CO2 samples on a regular lat/lon grid.
#[derive(Debug, Clone, Copy)]
pub struct Co2FieldSynthesizer {
    grid_step: f64,
}

impl Default for Co2FieldSynthesizer {
    fn default() -> Self {
        Self {
            grid_step: DEFAULT_GRID_STEP,
        }
    }
}

fn axis_len(min: f64, max: f64, step: f64) -> f64 {
    ((max - min) / step + STEP_EPSILON).floor() + 1.0
}

impl Co2FieldSynthesizer {
    /// Creates a synthesizer with the given grid spacing in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Co2Error::InvalidGridStep`] if `grid_step` is not positive
    /// and finite.
    pub fn new(grid_step: f64) -> Result<Self, Co2Error> {
        if !grid_step.is_finite() || grid_step <= 0.0 {
            return Err(Co2Error::InvalidGridStep { step: grid_step });
        }
        Ok(Self { grid_step })
    }

    #[must_use]
    pub const fn grid_step(&self) -> f64 {
        self.grid_step
    }

    /// Samples every grid point `(lat_min + i*step, lon_min + j*step)`
    /// inside `bbox`, latitude-major. The maximum edges are included when
    /// an exact number of steps reaches them.
    ///
    /// # Errors
    ///
    /// Returns [`Co2Error::GridTooLarge`] if the grid would exceed
    /// [`MAX_GRID_POINTS`].
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn synthesize_grid<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bbox: &BoundingBox,
        month0: u32,
    ) -> Result<Vec<Co2Sample>, Co2Error> {
        let step = self.grid_step;
        let lat_count = axis_len(bbox.lat_min(), bbox.lat_max(), step);
        let lon_count = axis_len(bbox.lon_min(), bbox.lon_max(), step);
        let points = lat_count * lon_count;

        if points > MAX_GRID_POINTS as f64 {
            return Err(Co2Error::GridTooLarge {
                points,
                max: MAX_GRID_POINTS,
            });
        }

        let lat_count = lat_count as usize;
        let lon_count = lon_count as usize;
        log::debug!("Synthesizing {lat_count}x{lon_count} CO2 grid at {step}° spacing");

        let mut samples = Vec::with_capacity(lat_count * lon_count);
        for i in 0..lat_count {
            let latitude = step.mul_add(i as f64, bbox.lat_min()).min(bbox.lat_max());
            for j in 0..lon_count {
                let longitude = step.mul_add(j as f64, bbox.lon_min()).min(bbox.lon_max());
                samples.push(sample_at(rng, latitude, longitude, month0));
            }
        }

        Ok(samples)
    }

    /// Synthesizes a grid and wraps it with metadata and statistics.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::synthesize_grid`].
    pub fn generate_dataset<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bbox: BoundingBox,
        temporal_coverage: TemporalCoverage,
        month0: u32,
        generated_at: DateTime<Utc>,
    ) -> Result<Co2Dataset, Co2Error> {
        let data = self.synthesize_grid(rng, &bbox, month0)?;
        let statistics = statistics(&data);

        log::info!(
            "Generated {} CO2 samples (mean {} ppm)",
            statistics.data_points,
            statistics.mean
        );

        Ok(Co2Dataset {
            data,
            metadata: Co2Metadata {
                source: SOURCE.to_string(),
                dataset: DATASET.to_string(),
                parameters: Co2Parameters::default(),
                spatial_coverage: bbox,
                temporal_coverage,
                data_quality: DATA_QUALITY.to_string(),
                methodology: METHODOLOGY.to_string(),
                units: Co2Units::default(),
                generated_at,
            },
            statistics,
        })
    }
}
