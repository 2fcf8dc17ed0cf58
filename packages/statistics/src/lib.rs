#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Descriptive statistics over numeric series.
//!
//! Every function here is total: empty input produces `0.0` rather than
//! `NaN`, and [`trend`] returns `0.0` for fewer than two points. The
//! [`historical`] module applies these to daily/monthly weather records.

pub mod historical;

use weather_predict_weather_models::{DailyField, DailyRecord};

/// Mean, extrema, and population standard deviation of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub standard_deviation: f64,
}

/// Arithmetic mean, `0.0` for an empty series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, `0.0` for an empty series.
#[must_use]
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let square_diffs: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    mean(&square_diffs).sqrt()
}

/// Smallest value, `0.0` for an empty series.
#[must_use]
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Largest value, `0.0` for an empty series.
#[must_use]
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Computes [`Summary`] in one call.
#[must_use]
pub fn summarize(values: &[f64]) -> Summary {
    Summary {
        mean: mean(values),
        min: min(values),
        max: max(values),
        standard_deviation: standard_deviation(values),
    }
}

/// Ordinary least-squares slope of `values` against their 0-based index.
///
/// Returns `0.0` for fewer than two points.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trend(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let x_sum = n * (n - 1.0) / 2.0;
    let y_sum: f64 = values.iter().sum();
    let xy_sum: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let x_squared_sum = n * (n - 1.0) * (2.0 * n - 1.0) / 6.0;

    (n * xy_sum - x_sum * y_sum) / (n * x_squared_sum - x_sum * x_sum)
}

/// A record with named numeric fields that may be missing.
pub trait FieldSource {
    /// Field selector type.
    type Field: Copy;

    /// Returns the field's value, or `None` if it is missing.
    fn field_value(&self, field: Self::Field) -> Option<f64>;
}

impl FieldSource for DailyRecord {
    type Field = DailyField;

    fn field_value(&self, field: DailyField) -> Option<f64> {
        self.value(field)
    }
}

/// Percentage of `(record, field)` pairs that hold a value.
///
/// `0.0` when there are no records or no fields.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completeness<T: FieldSource>(records: &[T], fields: &[T::Field]) -> f64 {
    let total = records.len() * fields.len();
    if total == 0 {
        return 0.0;
    }

    let present = records
        .iter()
        .flat_map(|record| fields.iter().map(move |f| record.field_value(*f)))
        .filter(Option::is_some)
        .count();

    present as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn constant_series_has_zero_deviation() {
        assert!(approx(standard_deviation(&[5.0, 5.0, 5.0, 5.0]), 0.0));
    }

    #[test]
    fn empty_series_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert!(approx(mean(&[]), 0.0));
        assert!(!summary.mean.is_nan());
    }

    #[test]
    fn population_standard_deviation() {
        // Population (not sample) deviation of 2,4,4,4,5,5,7,9 is exactly 2.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(standard_deviation(&values), 2.0));
        let summary = summarize(&values);
        assert!(approx(summary.mean, 5.0));
        assert!(approx(summary.min, 2.0));
        assert!(approx(summary.max, 9.0));
    }

    #[test]
    fn perfect_line_has_unit_slope() {
        assert!(approx(trend(&[1.0, 2.0, 3.0, 4.0]), 1.0));
        assert!(approx(trend(&[10.0, 8.0, 6.0]), -2.0));
    }

    #[test]
    fn trend_needs_two_points() {
        assert!(approx(trend(&[]), 0.0));
        assert!(approx(trend(&[42.0]), 0.0));
    }

    struct Sparse(Vec<Option<f64>>);

    impl FieldSource for Sparse {
        type Field = usize;

        fn field_value(&self, field: usize) -> Option<f64> {
            self.0.get(field).copied().flatten()
        }
    }

    #[test]
    fn completeness_counts_present_fields() {
        let records = vec![
            Sparse(vec![Some(1.0), None]),
            Sparse(vec![Some(2.0), Some(3.0)]),
        ];
        assert!(approx(completeness(&records, &[0, 1]), 75.0));
        assert!(approx(completeness::<Sparse>(&[], &[0, 1]), 0.0));
        assert!(approx(completeness(&records, &[]), 0.0));
    }
}
