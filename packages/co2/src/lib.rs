#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic column-averaged CO2 fields.
//!
//! Concentrations start from a 420 ppm global background and are adjusted
//! for season, proximity to major urban emitters, ocean uptake, and
//! terrain altitude, then perturbed with ±1 ppm of noise. See
//! [`synthesizer::Co2FieldSynthesizer`] for the grid walk.

pub mod synthesizer;

use std::f64::consts::PI;

use geo::{Distance as _, Haversine, Intersects as _, Point, Rect, coord};
use rand::Rng;
use weather_predict_co2_models::{
    Co2Quality, Co2Sample, Co2Statistics, InvalidBoundingBox, QualityDistribution,
};
use weather_predict_weather_models::round_to;

/// Errors that can occur while synthesizing a CO2 field.
#[derive(Debug, thiserror::Error)]
pub enum Co2Error {
    /// The requested region is not a valid bounding box.
    #[error(transparent)]
    InvalidBoundingBox(#[from] InvalidBoundingBox),

    /// The grid step is zero, negative, or non-finite.
    #[error("Invalid grid step {step}: must be positive and finite")]
    InvalidGridStep {
        /// The rejected step in degrees.
        step: f64,
    },

    /// The region/step combination would produce too many samples.
    #[error("Grid of {points} points exceeds the limit of {max}")]
    GridTooLarge {
        /// Points the grid would contain.
        points: f64,
        /// Maximum allowed points.
        max: usize,
    },
}

/// Global background concentration in ppm.
pub const BASE_CO2_PPM: f64 = 420.0;

const METERS_PER_KM: f64 = 1000.0;
const SEASONAL_AMPLITUDE_PPM: f64 = 3.0;
const URBAN_RADIUS_KM: f64 = 500.0;
const URBAN_DECAY_KM: f64 = 200.0;
const OCEAN_UPTAKE_PPM: f64 = -2.0;
const PPM_PER_METER: f64 = 0.01;
const MOUNTAIN_LATITUDE: f64 = 30.0;
const MOUNTAIN_ALTITUDE_M: f64 = 1000.0;
const ALTITUDE_JITTER_M: f64 = 250.0;

const PLAUSIBLE_MIN_PPM: f64 = 350.0;
const PLAUSIBLE_MAX_PPM: f64 = 500.0;
const FAIR_URBAN_FACTOR: f64 = 10.0;

/// A major emitter and its peak enhancement in ppm.
#[derive(Debug, Clone, Copy)]
pub struct UrbanCenter {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub factor: f64,
}

pub const URBAN_CENTERS: &[UrbanCenter] = &[
    UrbanCenter {
        name: "New York",
        latitude: 40.7128,
        longitude: -74.0060,
        factor: 15.0,
    },
    UrbanCenter {
        name: "Tokyo",
        latitude: 35.6762,
        longitude: 139.6503,
        factor: 12.0,
    },
    UrbanCenter {
        name: "London",
        latitude: 51.5074,
        longitude: -0.1278,
        factor: 10.0,
    },
    UrbanCenter {
        name: "Beijing",
        latitude: 39.9042,
        longitude: 116.4074,
        factor: 18.0,
    },
    UrbanCenter {
        name: "Mumbai",
        latitude: 19.0760,
        longitude: 72.8777,
        factor: 14.0,
    },
    UrbanCenter {
        name: "Sydney",
        latitude: -33.8688,
        longitude: 151.2093,
        factor: 8.0,
    },
    UrbanCenter {
        name: "Manila",
        latitude: 14.5995,
        longitude: 120.9842,
        factor: 6.0,
    },
];

/// Ocean basins as `(lat_min, lat_max, lon_min, lon_max)`: Pacific,
/// Atlantic, Indian.
const OCEAN_BOUNDS: [(f64, f64, f64, f64); 3] = [
    (-60.0, 60.0, -180.0, -120.0),
    (-60.0, 60.0, -20.0, 20.0),
    (-60.0, 60.0, 40.0, 120.0),
];

fn ocean_regions() -> impl Iterator<Item = Rect<f64>> {
    OCEAN_BOUNDS
        .iter()
        .map(|&(lat_min, lat_max, lon_min, lon_max)| {
            Rect::new(
                coord! { x: lon_min, y: lat_min },
                coord! { x: lon_max, y: lat_max },
            )
        })
}

/// Great-circle distance in km.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine.distance(Point::new(lon1, lat1), Point::new(lon2, lat2)) / METERS_PER_KM
}

/// `sin(month0 / 12 * 2pi) * 3` for a 0-based month.
#[must_use]
pub fn seasonal_factor(month0: u32) -> f64 {
    (f64::from(month0) / 12.0 * 2.0 * PI).sin() * SEASONAL_AMPLITUDE_PPM
}

/// Strongest enhancement from any urban center within 500 km, decaying
/// exponentially with distance.
#[must_use]
pub fn urban_factor(latitude: f64, longitude: f64) -> f64 {
    URBAN_CENTERS
        .iter()
        .filter_map(|center| {
            let distance = haversine_km(latitude, longitude, center.latitude, center.longitude);
            (distance < URBAN_RADIUS_KM).then(|| center.factor * (-distance / URBAN_DECAY_KM).exp())
        })
        .fold(0.0, f64::max)
}

/// Whether the point lies in an ocean basin. Basin edges count as ocean.
#[must_use]
pub fn is_ocean(latitude: f64, longitude: f64) -> bool {
    let point = Point::new(longitude, latitude);
    ocean_regions().any(|region| region.intersects(&point))
}

#[must_use]
pub fn ocean_factor(latitude: f64, longitude: f64) -> f64 {
    if is_ocean(latitude, longitude) {
        OCEAN_UPTAKE_PPM
    } else {
        0.0
    }
}

/// Rough terrain altitude in meters: 1000 m poleward of 30°, plus up to
/// ±250 m of jitter, never below sea level.
pub fn estimated_altitude<R: Rng + ?Sized>(rng: &mut R, latitude: f64) -> f64 {
    let mountain = if latitude.abs() > MOUNTAIN_LATITUDE {
        MOUNTAIN_ALTITUDE_M
    } else {
        0.0
    };
    (mountain + rng.random_range(-ALTITUDE_JITTER_M..ALTITUDE_JITTER_M)).max(0.0)
}

/// Quality flag for a concentration observed at a point.
///
/// Implausible values are poor regardless of location; otherwise ocean
/// points are good, heavily urban points fair, and the rest excellent.
#[must_use]
pub fn assess_quality(latitude: f64, longitude: f64, concentration: f64) -> Co2Quality {
    if !(PLAUSIBLE_MIN_PPM..=PLAUSIBLE_MAX_PPM).contains(&concentration) {
        Co2Quality::Poor
    } else if is_ocean(latitude, longitude) {
        Co2Quality::Good
    } else if urban_factor(latitude, longitude) > FAIR_URBAN_FACTOR {
        Co2Quality::Fair
    } else {
        Co2Quality::Excellent
    }
}

/// Synthesizes one sample.
///
/// Quality is judged on the concentration before noise is added.
pub fn sample_at<R: Rng + ?Sized>(
    rng: &mut R,
    latitude: f64,
    longitude: f64,
    month0: u32,
) -> Co2Sample {
    let altitude_factor = -estimated_altitude(rng, latitude) * PPM_PER_METER;
    let concentration = BASE_CO2_PPM
        + seasonal_factor(month0)
        + urban_factor(latitude, longitude)
        + ocean_factor(latitude, longitude)
        + altitude_factor;
    let noise = rng.random_range(-1.0..1.0);

    Co2Sample {
        latitude,
        longitude,
        co2_concentration: round_to(concentration + noise, 2),
        uncertainty: round_to(1.0 + rng.random::<f64>(), 2),
        quality: assess_quality(latitude, longitude, concentration),
    }
}

/// Mean, extrema, and population standard deviation of the concentrations
/// (two decimals), plus counts. All zero for an empty slice.
#[must_use]
pub fn statistics(samples: &[Co2Sample]) -> Co2Statistics {
    let concentrations: Vec<f64> = samples.iter().map(|s| s.co2_concentration).collect();
    let summary = weather_predict_statistics::summarize(&concentrations);

    let mut quality_distribution = QualityDistribution::default();
    for sample in samples {
        quality_distribution.record(sample.quality);
    }

    Co2Statistics {
        mean: round_to(summary.mean, 2),
        min: round_to(summary.min, 2),
        max: round_to(summary.max, 2),
        standard_deviation: round_to(summary.standard_deviation, 2),
        data_points: samples.len(),
        quality_distribution,
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn sample(concentration: f64, quality: Co2Quality) -> Co2Sample {
        Co2Sample {
            latitude: 0.0,
            longitude: 0.0,
            co2_concentration: concentration,
            uncertainty: 1.0,
            quality,
        }
    }

    #[test]
    fn haversine_known_distance() {
        // London to Paris is roughly 344 km.
        let d = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((d - 344.0).abs() < 2.0, "distance {d}");
        assert!(haversine_km(10.0, 10.0, 10.0, 10.0).abs() < 1e-9);
    }

    #[test]
    fn urban_factor_peaks_at_center_and_vanishes_far_away() {
        assert!((urban_factor(39.9042, 116.4074) - 18.0).abs() < 1e-9);
        assert!(urban_factor(40.6, -74.0) > 10.0);
        assert!(urban_factor(0.0, -30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ocean_boxes() {
        assert!(is_ocean(0.0, -150.0));
        assert!(is_ocean(10.0, 0.0));
        assert!(is_ocean(10.0, 120.0));
        assert!(!is_ocean(70.0, 0.0));
        assert!(!is_ocean(40.0, -100.0));
    }

    #[test]
    fn ocean_edges_are_inclusive() {
        assert!(is_ocean(60.0, -120.0));
        assert!(is_ocean(-60.0, -180.0));
        assert!(is_ocean(0.0, 20.0));
        assert!(!is_ocean(0.0, 20.5));
        assert!(!is_ocean(60.5, 0.0));
    }

    #[test]
    fn quality_rules() {
        assert_eq!(assess_quality(10.0, 0.0, 349.9), Co2Quality::Poor);
        assert_eq!(assess_quality(10.0, 0.0, 500.1), Co2Quality::Poor);
        assert_eq!(assess_quality(10.0, 0.0, 420.0), Co2Quality::Good);
        assert_eq!(assess_quality(40.7128, -74.0060, 430.0), Co2Quality::Fair);
        assert_eq!(assess_quality(45.0, -100.0, 420.0), Co2Quality::Excellent);
    }

    #[test]
    fn altitude_is_never_negative() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let low = estimated_altitude(&mut rng, 5.0);
            assert!((0.0..250.0).contains(&low));
            let high = estimated_altitude(&mut rng, 45.0);
            assert!((750.0..1250.0).contains(&high));
        }
    }

    #[test]
    fn sample_values_are_plausible() {
        let mut rng = StdRng::seed_from_u64(12);
        for month0 in 0..12 {
            let s = sample_at(&mut rng, 45.0, -100.0, month0);
            assert!((400.0..430.0).contains(&s.co2_concentration), "{s:?}");
            assert!((1.0..=2.0).contains(&s.uncertainty));
            assert_eq!(s.quality, Co2Quality::Excellent);
        }
    }

    #[test]
    fn statistics_are_rounded() {
        let samples = vec![
            sample(410.0, Co2Quality::Good),
            sample(420.0, Co2Quality::Excellent),
            sample(431.0, Co2Quality::Good),
        ];
        let stats = statistics(&samples);
        assert!((stats.mean - 420.33).abs() < 1e-9);
        assert!((stats.min - 410.0).abs() < 1e-9);
        assert!((stats.max - 431.0).abs() < 1e-9);
        assert!((stats.standard_deviation - 8.58).abs() < 1e-9);
        assert_eq!(stats.data_points, 3);
        assert_eq!(stats.quality_distribution.good, 2);
    }

    #[test]
    fn empty_statistics_are_zero() {
        assert_eq!(statistics(&[]), Co2Statistics::default());
    }
}
