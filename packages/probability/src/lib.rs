#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather category probabilities from historical daily records.
//!
//! Each probability is the share of simulated years in which a threshold
//! was crossed on the target day. "Uncomfortable" uses the NWS Rothfusz
//! heat index regression.

pub mod insights;

use weather_predict_weather_models::{DailyRecord, ProbabilitySet, WeatherCategory, round_to};

/// Above this temperature (°C) a day counts as hot.
pub const HOT_THRESHOLD_C: f64 = 35.0;
/// Below this temperature (°C) a day counts as cold.
pub const COLD_THRESHOLD_C: f64 = 5.0;
/// Above this precipitation (mm) a day counts as wet.
pub const WET_THRESHOLD_MM: f64 = 10.0;
/// Above this wind speed (m/s) a day counts as windy.
pub const WINDY_THRESHOLD_MS: f64 = 10.0;
/// Above this heat index (°C) a day counts as uncomfortable.
pub const UNCOMFORTABLE_HEAT_INDEX_C: f64 = 32.0;

/// Below this temperature (°C) the heat index is the air temperature.
pub const HEAT_INDEX_MIN_C: f64 = 27.0;

/// Probabilities returned when there are no records to count.
pub const DEFAULT_PROBABILITIES: ProbabilitySet = ProbabilitySet {
    hot: 15,
    cold: 10,
    wet: 25,
    windy: 20,
    uncomfortable: 18,
};

/// Probabilities above this percentage are mentioned in the summary.
pub const SUMMARY_THRESHOLD: u8 = 50;

const MODERATE_SUMMARY: &str =
    "Weather conditions are expected to be moderate with no extreme conditions likely.";

/// Feels-like temperature in °C for air temperature `temperature` (°C) and
/// relative humidity `humidity` (%), rounded to one decimal.
///
/// Uses the Celsius form of the Rothfusz regression. Below
/// [`HEAT_INDEX_MIN_C`] the regression is meaningless and the air
/// temperature is returned unchanged.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn heat_index(temperature: f64, humidity: f64) -> f64 {
    if temperature < HEAT_INDEX_MIN_C {
        return temperature;
    }

    let t = temperature;
    let rh = humidity;

    let hi = -8.784_694_755_56 + 1.611_394_11 * t + 2.338_548_838_89 * rh
        - 0.146_116_05 * t * rh
        - 0.012_308_094 * t * t
        - 0.016_424_827_777_8 * rh * rh
        + 0.002_211_732 * t * t * rh
        + 0.000_725_46 * t * rh * rh
        - 0.000_003_582 * t * t * rh * rh;

    round_to(hi, 1)
}

/// Counts threshold crossings across `daily`.
///
/// Returns [`DEFAULT_PROBABILITIES`] when `daily` is empty.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn calculate_probabilities(daily: &[DailyRecord]) -> ProbabilitySet {
    if daily.is_empty() {
        log::debug!("No daily records, using default probabilities");
        return DEFAULT_PROBABILITIES;
    }

    let total = daily.len() as f64;
    let percent = |predicate: &dyn Fn(&DailyRecord) -> bool| -> u8 {
        let count = daily.iter().filter(|r| predicate(r)).count() as f64;
        (count / total * 100.0).round() as u8
    };

    ProbabilitySet {
        hot: percent(&|r| r.temperature > HOT_THRESHOLD_C),
        cold: percent(&|r| r.temperature < COLD_THRESHOLD_C),
        wet: percent(&|r| r.precipitation > WET_THRESHOLD_MM),
        windy: percent(&|r| r.wind_speed > WINDY_THRESHOLD_MS),
        uncomfortable: percent(&|r| {
            heat_index(r.temperature, r.humidity) > UNCOMFORTABLE_HEAT_INDEX_C
        }),
    }
}

/// One-sentence summary of the categories more likely than
/// [`SUMMARY_THRESHOLD`].
#[must_use]
pub fn generate_summary(probabilities: &ProbabilitySet) -> String {
    let conditions: Vec<String> = WeatherCategory::all()
        .iter()
        .filter_map(|&category| {
            let value = probabilities.get(category);
            (value > SUMMARY_THRESHOLD).then(|| format!("{value}% chance of {}", category.phrase()))
        })
        .collect();

    if conditions.is_empty() {
        return MODERATE_SUMMARY.to_string();
    }

    format!("Based on historical data: {}.", conditions.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(temperature: f64, precipitation: f64, wind_speed: f64, humidity: f64) -> DailyRecord {
        DailyRecord {
            year: 2020,
            date: "2020-01-01".to_string(),
            temperature,
            temperature_max: temperature + 5.0,
            temperature_min: temperature - 5.0,
            precipitation,
            wind_speed,
            humidity,
        }
    }

    #[test]
    fn empty_records_use_defaults() {
        assert_eq!(
            calculate_probabilities(&[]),
            ProbabilitySet {
                hot: 15,
                cold: 10,
                wet: 25,
                windy: 20,
                uncomfortable: 18,
            }
        );
    }

    #[test]
    fn heat_index_is_identity_below_threshold() {
        for rh in [0.0, 25.0, 50.0, 75.0, 100.0] {
            assert!((heat_index(25.0, rh) - 25.0).abs() < f64::EPSILON);
        }
        assert!((heat_index(-10.0, 90.0) + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn heat_index_regression_values() {
        assert!((heat_index(40.0, 80.0) - 82.5).abs() < 1e-9);
        assert!((heat_index(35.0, 60.0) - 45.1).abs() < 1e-9);
        assert!((heat_index(30.0, 70.0) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn heat_index_is_rounded() {
        let hi = heat_index(30.0, 70.0);
        assert!((hi * 10.0 - (hi * 10.0).round()).abs() < 1e-9);
        assert!(hi > 30.0);
    }

    #[test]
    fn counts_threshold_crossings() {
        let daily = vec![
            record(36.0, 12.0, 11.0, 80.0),
            record(20.0, 0.0, 5.0, 60.0),
            record(4.0, 11.0, 10.0, 60.0),
            record(35.0, 10.0, 10.5, 60.0),
        ];
        let p = calculate_probabilities(&daily);
        assert_eq!(p.hot, 25);
        assert_eq!(p.cold, 25);
        assert_eq!(p.wet, 50);
        assert_eq!(p.windy, 50);
        // 36°C/80% and 35°C/60% both exceed a 32°C heat index.
        assert_eq!(p.uncomfortable, 50);
    }

    #[test]
    fn percentages_are_rounded() {
        let daily = vec![
            record(40.0, 0.0, 0.0, 10.0),
            record(20.0, 0.0, 0.0, 10.0),
            record(20.0, 0.0, 0.0, 10.0),
        ];
        assert_eq!(calculate_probabilities(&daily).hot, 33);
    }

    #[test]
    fn summary_lists_likely_conditions() {
        let p = ProbabilitySet {
            hot: 80,
            cold: 0,
            wet: 51,
            windy: 50,
            uncomfortable: 67,
        };
        assert_eq!(
            generate_summary(&p),
            "Based on historical data: 80% chance of hot weather, 51% chance of rain, \
             67% chance of uncomfortable heat."
        );
    }

    #[test]
    fn summary_falls_back_to_moderate() {
        assert_eq!(generate_summary(&DEFAULT_PROBABILITIES), MODERATE_SUMMARY);
    }
}
