#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Latitude-band climate model and synthetic record generation.
//!
//! [`ClimateModel`] estimates a plausible temperature and precipitation for
//! any point and month. A rectangle approximating the Philippine
//! archipelago gets a fixed tropical monsoon climate; everywhere else uses
//! cosine-of-latitude heuristics. [`generator::SyntheticRecordGenerator`]
//! builds daily and monthly series on top of the model.
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces the same output.

pub mod generator;

use std::f64::consts::PI;

use chrono::Month;
use rand::Rng;
use weather_predict_weather_models::Coordinate;

const SPECIAL_LAT_MIN: f64 = 4.5;
const SPECIAL_LAT_MAX: f64 = 21.5;
const SPECIAL_LON_MIN: f64 = 116.0;
const SPECIAL_LON_MAX: f64 = 127.0;

const SPECIAL_BASE_TEMPERATURE_C: f64 = 27.0;
const SPECIAL_SEASONAL_AMPLITUDE_C: f64 = 2.0;

const GENERAL_BASE_TEMPERATURE_C: f64 = 15.0;
const LATITUDE_TEMPERATURE_SPAN_C: f64 = 20.0;
const GENERAL_SEASONAL_AMPLITUDE_C: f64 = 15.0;

const BASE_PRECIPITATION_MM: f64 = 5.0;
const TROPICAL_PRECIPITATION_MM: f64 = 15.0;
const TROPICAL_BAND_DEGREES: f64 = 30.0;
const SEASONAL_PRECIPITATION_MM: f64 = 10.0;
const PRECIPITATION_NOISE_MM: f64 = 10.0;

/// `sin((month - 1) * pi / 6)`: 0 in January, peaking at +1 in April and
/// -1 in October.
#[must_use]
pub fn seasonal_phase(month: Month) -> f64 {
    (f64::from(month.number_from_month() - 1) * PI / 6.0).sin()
}

/// Deterministic-with-noise climate estimates for a point and month.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClimateModel;

impl ClimateModel {
    /// Whether the point falls in the tropical archipelago rectangle
    /// (lat 4.5..=21.5, lon 116..=127).
    #[must_use]
    pub fn is_special_region(coord: Coordinate) -> bool {
        (SPECIAL_LAT_MIN..=SPECIAL_LAT_MAX).contains(&coord.latitude())
            && (SPECIAL_LON_MIN..=SPECIAL_LON_MAX).contains(&coord.longitude())
    }

    /// Monsoon wet season in the special region: June through November.
    #[must_use]
    pub const fn is_wet_season(month: Month) -> bool {
        matches!(month.number_from_month(), 6..=11)
    }

    /// Base temperature in °C.
    #[must_use]
    pub fn base_temperature(self, coord: Coordinate, month: Month) -> f64 {
        if Self::is_special_region(coord) {
            return SPECIAL_BASE_TEMPERATURE_C
                + seasonal_phase(month) * SPECIAL_SEASONAL_AMPLITUDE_C;
        }

        let latitude_factor = coord.latitude().to_radians().cos();
        let base = GENERAL_BASE_TEMPERATURE_C + latitude_factor * LATITUDE_TEMPERATURE_SPAN_C;
        base + seasonal_phase(month) * coord.hemisphere_sign() * GENERAL_SEASONAL_AMPLITUDE_C
    }

    /// Base precipitation in mm, never negative.
    pub fn base_precipitation<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        coord: Coordinate,
        month: Month,
    ) -> f64 {
        if Self::is_special_region(coord) {
            return if Self::is_wet_season(month) {
                rng.random_range(15.0..40.0)
            } else {
                rng.random_range(2.0..10.0)
            };
        }

        let tropical_factor = (1.0 - coord.latitude().abs() / TROPICAL_BAND_DEGREES).max(0.0);
        let base = BASE_PRECIPITATION_MM + tropical_factor * TROPICAL_PRECIPITATION_MM;
        let seasonal = seasonal_phase(month) * SEASONAL_PRECIPITATION_MM;
        let noise = rng.random_range(0.0..PRECIPITATION_NOISE_MM);

        (base + seasonal + noise).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn special_region_bounds() {
        assert!(ClimateModel::is_special_region(coord(14.5995, 120.9842)));
        assert!(ClimateModel::is_special_region(coord(4.5, 116.0)));
        assert!(ClimateModel::is_special_region(coord(21.5, 127.0)));
        assert!(!ClimateModel::is_special_region(coord(22.0, 120.0)));
        assert!(!ClimateModel::is_special_region(coord(14.0, 128.0)));
    }

    #[test]
    fn special_region_temperature_is_mild() {
        let manila = coord(14.5995, 120.9842);
        let model = ClimateModel;
        assert!((model.base_temperature(manila, Month::January) - 27.0).abs() < 1e-9);
        assert!((model.base_temperature(manila, Month::April) - 29.0).abs() < 1e-9);
        assert!((model.base_temperature(manila, Month::October) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn general_temperature_follows_latitude_and_hemisphere() {
        let model = ClimateModel;
        // cos(60deg) = 0.5 -> 15 + 10, no seasonal term in January.
        assert!((model.base_temperature(coord(60.0, 10.0), Month::January) - 25.0).abs() < 1e-9);
        assert!((model.base_temperature(coord(60.0, 10.0), Month::April) - 40.0).abs() < 1e-9);
        assert!((model.base_temperature(coord(-60.0, 10.0), Month::April) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn equator_uses_southern_seasonal_sign() {
        let model = ClimateModel;
        assert!((model.base_temperature(coord(0.0, 0.0), Month::April) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn manila_monsoon_precipitation() {
        let manila = coord(14.5995, 120.9842);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let wet = ClimateModel.base_precipitation(&mut rng, manila, Month::July);
            assert!((15.0..=40.0).contains(&wet), "wet season {wet}");
            let dry = ClimateModel.base_precipitation(&mut rng, manila, Month::February);
            assert!((2.0..=10.0).contains(&dry), "dry season {dry}");
        }
    }

    #[test]
    fn general_precipitation_is_floored_at_zero() {
        // Polar October: 5 - 10 + [0, 10) can go negative before the floor.
        let polar = coord(80.0, 0.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let p = ClimateModel.base_precipitation(&mut rng, polar, Month::October);
            assert!((0.0..5.0).contains(&p), "precipitation {p}");
        }
    }

    #[test]
    fn general_precipitation_range_in_january() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = ClimateModel.base_precipitation(&mut rng, coord(60.0, 0.0), Month::January);
            assert!((5.0..15.0).contains(&p), "precipitation {p}");
        }
    }

    #[test]
    fn seeded_precipitation_is_reproducible() {
        let point = coord(35.0, -40.0);
        let a = ClimateModel.base_precipitation(&mut StdRng::seed_from_u64(99), point, Month::May);
        let b = ClimateModel.base_precipitation(&mut StdRng::seed_from_u64(99), point, Month::May);
        assert!((a - b).abs() < f64::EPSILON);
    }
}
