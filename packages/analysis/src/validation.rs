//! Sanity checks run on every assembled analysis.

use weather_predict_weather_models::{
    Coordinate,
    analysis::{ValidationReport, WeatherAnalysis},
};

/// Checks an analysis for structural problems.
///
/// Errors make the report invalid; warnings do not.
#[must_use]
pub fn validate_data_integrity(analysis: &WeatherAnalysis) -> ValidationReport {
    let mut report = ValidationReport {
        is_valid: true,
        ..Default::default()
    };

    let location = analysis.metadata.location;
    if !Coordinate::is_valid(location.latitude(), location.longitude()) {
        report.is_valid = false;
        report.errors.push("Invalid coordinates".to_string());
    }

    if analysis.daily.is_empty() {
        report
            .warnings
            .push("No daily weather records found".to_string());
    }

    let non_finite = analysis
        .daily
        .iter()
        .filter(|r| {
            ![
                r.temperature,
                r.temperature_max,
                r.temperature_min,
                r.precipitation,
                r.wind_speed,
                r.humidity,
            ]
            .iter()
            .all(|v| v.is_finite())
        })
        .count();
    if non_finite > 0 {
        report.is_valid = false;
        report
            .errors
            .push(format!("{non_finite} daily records contain non-finite values"));
    }

    if analysis.monthly.len() != 12 {
        report.warnings.push(format!(
            "Expected 12 monthly summaries, found {}",
            analysis.monthly.len()
        ));
    }

    let p = analysis.probabilities;
    if [p.hot, p.cold, p.wet, p.windy, p.uncomfortable]
        .iter()
        .any(|&value| value > 100)
    {
        report.is_valid = false;
        report
            .errors
            .push("Probabilities must be within 0-100".to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use weather_predict_disaster::NullDisasterFeed;

    use super::*;
    use crate::{WeatherService, config::ServiceConfig};

    fn analysis() -> WeatherAnalysis {
        WeatherService::new(
            ServiceConfig {
                seed: Some(5),
                ..ServiceConfig::default()
            },
            Arc::new(NullDisasterFeed),
        )
        .unwrap()
        .with_current_year(2025)
        .get_weather_analysis(51.5, -0.1, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap())
        .unwrap()
    }

    #[test]
    fn generated_analysis_is_valid() {
        let report = validate_data_integrity(&analysis());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn empty_series_only_warn() {
        let mut analysis = analysis();
        analysis.daily.clear();
        analysis.monthly.truncate(3);

        let report = validate_data_integrity(&analysis);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0], "No daily weather records found");
    }

    #[test]
    fn non_finite_values_are_errors() {
        let mut analysis = analysis();
        analysis.daily[0].temperature = f64::NAN;
        analysis.daily[3].humidity = f64::INFINITY;

        let report = validate_data_integrity(&analysis);
        assert!(!report.is_valid);
        assert_eq!(report.errors, ["2 daily records contain non-finite values"]);
    }

    #[test]
    fn out_of_range_probability_is_an_error() {
        let mut analysis = analysis();
        analysis.probabilities.hot = 101;
        assert!(!validate_data_integrity(&analysis).is_valid);
    }
}
