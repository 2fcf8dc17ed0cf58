//! Synthetic daily and monthly weather series.
//!
//! Daily records cover one fixed calendar day across `year_span` past
//! years. Monthly summaries are drawn independently from the climate model
//! for each calendar month; they are not averages of the daily series, so
//! the two views are not expected to agree numerically.

use chrono::{Datelike as _, Month, NaiveDate, Utc};
use rand::Rng;
use weather_predict_weather_models::{
    Coordinate, DailyRecord, MONTHS, MonthlySummary,
    analysis::{WeatherData, WeatherMetadata},
    month_abbreviation, round_to,
};

use crate::{ClimateModel, seasonal_phase};

/// Number of past years simulated when no span is configured.
pub const DEFAULT_YEAR_SPAN: u32 = 15;

/// Longest history a service accepts.
pub const MAX_YEAR_SPAN: u32 = 200;

/// `YYYY-MM-DD`, with `day` clamped to the last day of the month.
fn calendar_date(year: i32, month: u32, day: u32) -> String {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .map_or_else(
            || format!("{year}-{month:02}-{day:02}"),
            |date| date.format("%Y-%m-%d").to_string(),
        )
}

/// Builds synthetic record sets from a [`ClimateModel`].
#[derive(Debug, Clone, Copy)]
pub struct SyntheticRecordGenerator {
    model: ClimateModel,
    year_span: u32,
    current_year: i32,
}

impl Default for SyntheticRecordGenerator {
    fn default() -> Self {
        Self::new(Utc::now().year())
    }
}

impl SyntheticRecordGenerator {
    /// Creates a generator that simulates the [`DEFAULT_YEAR_SPAN`] years
    /// before `current_year`.
    #[must_use]
    pub const fn new(current_year: i32) -> Self {
        Self {
            model: ClimateModel,
            year_span: DEFAULT_YEAR_SPAN,
            current_year,
        }
    }

    /// Overrides how many past years are simulated.
    #[must_use]
    pub const fn with_year_span(mut self, year_span: u32) -> Self {
        self.year_span = year_span;
        self
    }

    /// Number of past years simulated.
    #[must_use]
    pub const fn year_span(&self) -> u32 {
        self.year_span
    }

    /// The (exclusive) year the simulated history ends at.
    #[must_use]
    pub const fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Generates one record per year in `[current_year - year_span,
    /// current_year)` for the given month and day.
    ///
    /// Days past the end of the month are clamped per year, so a Feb 29
    /// target yields Feb 28 in non-leap years. A span that reaches past
    /// the representable years yields no records.
    pub fn generate_daily_records<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        coord: Coordinate,
        month: Month,
        day: u32,
    ) -> Vec<DailyRecord> {
        let Some(first_year) = i32::try_from(self.year_span)
            .ok()
            .and_then(|span| self.current_year.checked_sub(span))
        else {
            log::warn!(
                "Year span {} before {} is out of range; no daily records generated",
                self.year_span,
                self.current_year
            );
            return vec![];
        };
        let month_number = month.number_from_month();
        let seasonal = seasonal_phase(month) * coord.hemisphere_sign();

        (first_year..self.current_year)
            .map(|year| {
                let base = self.model.base_temperature(coord, month) + seasonal;

                DailyRecord {
                    year,
                    date: calendar_date(year, month_number, day),
                    temperature: round_to(base + rng.random_range(-4.0..4.0), 1),
                    temperature_max: round_to(base + 5.0 + rng.random_range(0.0..5.0), 1),
                    temperature_min: round_to(base - 5.0 - rng.random_range(0.0..3.0), 1),
                    precipitation: round_to(self.model.base_precipitation(rng, coord, month), 1),
                    wind_speed: round_to(rng.random_range(5.0..20.0), 1),
                    humidity: round_to(rng.random_range(60.0..90.0), 1),
                }
            })
            .collect()
    }

    /// Generates twelve monthly summaries, January first.
    pub fn generate_monthly_records<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        coord: Coordinate,
    ) -> Vec<MonthlySummary> {
        MONTHS
            .iter()
            .map(|&month| MonthlySummary {
                month: month_abbreviation(month).to_string(),
                temperature: round_to(self.model.base_temperature(coord, month), 1),
                rainfall: round_to(self.model.base_precipitation(rng, coord, month), 1),
                wind_speed: round_to(rng.random_range(8.0..14.0), 1),
            })
            .collect()
    }

    /// Generates the daily series for `date`'s month/day, the monthly
    /// series, and metadata describing the location.
    pub fn generate_weather_data<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        coord: Coordinate,
        date: NaiveDate,
    ) -> WeatherData {
        let month = MONTHS[date.month0() as usize];

        log::debug!(
            "Generating {} years of synthetic records for ({}, {}) on {date}",
            self.year_span,
            coord.latitude(),
            coord.longitude()
        );

        let daily = self.generate_daily_records(rng, coord, month, date.day());
        let monthly = self.generate_monthly_records(rng, coord);

        WeatherData {
            daily,
            monthly,
            metadata: WeatherMetadata {
                location: coord,
                is_special_region: ClimateModel::is_special_region(coord),
                is_tropical: coord.is_tropical(),
                target_date: date,
                generated_at: Utc::now(),
            },
        }
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
    fn daily_records_cover_year_span() {
        let generator = SyntheticRecordGenerator::new(2025);
        let mut rng = StdRng::seed_from_u64(1);
        let records =
            generator.generate_daily_records(&mut rng, coord(40.0, -74.0), Month::March, 9);

        assert_eq!(records.len(), 15);
        assert_eq!(records.first().unwrap().year, 2010);
        assert_eq!(records.last().unwrap().year, 2024);
        assert_eq!(records[0].date, "2010-03-09");
    }

    #[test]
    fn daily_records_respect_value_ranges() {
        let generator = SyntheticRecordGenerator::new(2025).with_year_span(40);
        let points = [
            coord(14.5995, 120.9842),
            coord(-33.9, 151.2),
            coord(0.0, 0.0),
            coord(89.0, 179.0),
        ];

        let mut rng = StdRng::seed_from_u64(42);
        for point in points {
            for month in MONTHS {
                let records = generator.generate_daily_records(&mut rng, point, month, 15);
                assert_eq!(records.len(), 40);
                for r in &records {
                    assert!(r.precipitation >= 0.0);
                    assert!(
                        (60.0..=90.0).contains(&r.humidity),
                        "humidity {}",
                        r.humidity
                    );
                    assert!(
                        (5.0..=20.0).contains(&r.wind_speed),
                        "wind {}",
                        r.wind_speed
                    );
                    assert!(r.temperature_min < r.temperature_max);
                }
            }
        }
    }

    #[test]
    fn leap_day_is_clamped_in_common_years() {
        let generator = SyntheticRecordGenerator::new(2025).with_year_span(4);
        let mut rng = StdRng::seed_from_u64(2);
        let records =
            generator.generate_daily_records(&mut rng, coord(40.0, -74.0), Month::February, 29);

        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            ["2021-02-28", "2022-02-28", "2023-02-28", "2024-02-29"]
        );
    }

    #[test]
    fn oversized_span_yields_no_records() {
        let generator = SyntheticRecordGenerator::new(2025).with_year_span(u32::MAX);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(
            generator
                .generate_daily_records(&mut rng, coord(1.0, 1.0), Month::May, 1)
                .is_empty()
        );

        let generator = SyntheticRecordGenerator::new(i32::MIN + 5).with_year_span(10);
        assert!(
            generator
                .generate_daily_records(&mut rng, coord(1.0, 1.0), Month::May, 1)
                .is_empty()
        );
    }

    #[test]
    fn zero_span_yields_no_records() {
        let generator = SyntheticRecordGenerator::new(2025).with_year_span(0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(
            generator
                .generate_daily_records(&mut rng, coord(1.0, 1.0), Month::May, 1)
                .is_empty()
        );
    }

    #[test]
    fn monthly_records_are_jan_to_dec() {
        let generator = SyntheticRecordGenerator::new(2025);
        let mut rng = StdRng::seed_from_u64(5);
        let monthly = generator.generate_monthly_records(&mut rng, coord(51.5, -0.1));

        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly[0].month, "Jan");
        assert_eq!(monthly[11].month, "Dec");
        for m in &monthly {
            assert!(m.rainfall >= 0.0);
            assert!((8.0..=14.0).contains(&m.wind_speed));
        }
    }

    #[test]
    fn values_are_rounded_to_one_decimal() {
        let generator = SyntheticRecordGenerator::new(2025);
        let mut rng = StdRng::seed_from_u64(8);
        for r in generator.generate_daily_records(&mut rng, coord(30.0, 30.0), Month::June, 1) {
            for v in [r.temperature, r.precipitation, r.wind_speed, r.humidity] {
                assert!(
                    (v * 10.0 - (v * 10.0).round()).abs() < 1e-6,
                    "{v} not rounded"
                );
            }
        }
    }

    #[test]
    fn same_seed_same_output() {
        let generator = SyntheticRecordGenerator::new(2025);
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let a = generator.generate_weather_data(
            &mut StdRng::seed_from_u64(3),
            coord(14.6, 121.0),
            date,
        );
        let b = generator.generate_weather_data(
            &mut StdRng::seed_from_u64(3),
            coord(14.6, 121.0),
            date,
        );

        assert_eq!(a.daily, b.daily);
        assert_eq!(a.monthly, b.monthly);
        assert!(a.metadata.is_special_region);
        assert!(a.metadata.is_tropical);
    }
}
