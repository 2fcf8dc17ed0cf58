//! Aggregation of simulated historical weather records.
//!
//! Turns the raw daily and monthly series produced by the climate
//! generator into the aggregate views shown alongside the probabilities:
//! per-variable aggregations, trends, dataset coverage, seasonal
//! extremes, and runs of extreme weather.

use std::collections::BTreeSet;

use weather_predict_weather_models::{
    DailyField, DailyRecord, MonthlySummary,
    analysis::{
        Aggregations, DateRange, DatasetStatistics, ExtremeEvents, PrecipitationAggregate,
        SeasonalPatterns, TemperatureAggregate, Trends, WindAggregate,
    },
};

use crate::{completeness, summarize, trend};

const HOT_DAY_C: f64 = 30.0;
const COLD_DAY_C: f64 = 10.0;
const DRY_DAY_MM: f64 = 1.0;
const WET_DAY_MM: f64 = 5.0;

const HEAT_WAVE_RUN: u32 = 3;
const COLD_SNAP_RUN: u32 = 3;
const DROUGHT_RUN: u32 = 7;
const WET_SPELL_RUN: u32 = 3;

/// Everything derived from one daily/monthly record set.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSummary {
    pub aggregations: Option<Aggregations>,
    pub trends: Option<Trends>,
    pub statistics: DatasetStatistics,
    pub seasonal_patterns: Option<SeasonalPatterns>,
    pub extremes: Option<ExtremeEvents>,
}

/// Runs every aggregation over the given records.
#[must_use]
pub fn process_historical_data(
    daily: &[DailyRecord],
    monthly: &[MonthlySummary],
) -> HistoricalSummary {
    log::debug!(
        "Processing {} daily and {} monthly records",
        daily.len(),
        monthly.len()
    );

    HistoricalSummary {
        aggregations: calculate_aggregations(daily),
        trends: calculate_trends(daily),
        statistics: calculate_statistics(daily),
        seasonal_patterns: analyze_seasonal_patterns(monthly),
        extremes: calculate_extreme_events(daily),
    }
}

fn series(daily: &[DailyRecord], field: DailyField) -> Vec<f64> {
    daily.iter().filter_map(|r| r.value(field)).collect()
}

/// Per-variable aggregations; `None` when there are no records.
#[must_use]
pub fn calculate_aggregations(daily: &[DailyRecord]) -> Option<Aggregations> {
    if daily.is_empty() {
        return None;
    }

    let temperature = summarize(&series(daily, DailyField::Temperature));
    let precipitation_values = series(daily, DailyField::Precipitation);
    let precipitation = summarize(&precipitation_values);
    let wind = summarize(&series(daily, DailyField::WindSpeed));

    Some(Aggregations {
        temperature: TemperatureAggregate {
            avg: temperature.mean,
            min: temperature.min,
            max: temperature.max,
            std: temperature.standard_deviation,
        },
        precipitation: PrecipitationAggregate {
            avg: precipitation.mean,
            min: precipitation.min,
            max: precipitation.max,
            total: precipitation_values.iter().sum(),
        },
        wind_speed: WindAggregate {
            avg: wind.mean,
            min: wind.min,
            max: wind.max,
        },
    })
}

/// Linear trends over the records in date order; `None` for fewer than
/// two records.
#[must_use]
pub fn calculate_trends(daily: &[DailyRecord]) -> Option<Trends> {
    if daily.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&DailyRecord> = daily.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let values =
        |field: DailyField| -> Vec<f64> { sorted.iter().filter_map(|r| r.value(field)).collect() };

    Some(Trends {
        temperature: trend(&values(DailyField::Temperature)),
        precipitation: trend(&values(DailyField::Precipitation)),
        wind_speed: trend(&values(DailyField::WindSpeed)),
    })
}

/// Record count, date span, field completeness, and distinct years.
#[must_use]
pub fn calculate_statistics(daily: &[DailyRecord]) -> DatasetStatistics {
    let date_range = DateRange {
        start: daily.iter().map(|r| r.date.clone()).min(),
        end: daily.iter().map(|r| r.date.clone()).max(),
    };
    let years: BTreeSet<i32> = daily.iter().map(|r| r.year).collect();

    DatasetStatistics {
        total_records: daily.len(),
        date_range,
        completeness: completeness(daily, DailyField::REQUIRED),
        years_covered: years.len(),
    }
}

/// Finds the most extreme month in each direction. Ties keep the earlier
/// month.
#[must_use]
pub fn analyze_seasonal_patterns(monthly: &[MonthlySummary]) -> Option<SeasonalPatterns> {
    let first = monthly.first()?;

    let mut hottest = first;
    let mut coldest = first;
    let mut wettest = first;
    let mut driest = first;
    let mut windiest = first;
    let mut calmest = first;

    for month in &monthly[1..] {
        if month.temperature > hottest.temperature {
            hottest = month;
        }
        if month.temperature < coldest.temperature {
            coldest = month;
        }
        if month.rainfall > wettest.rainfall {
            wettest = month;
        }
        if month.rainfall < driest.rainfall {
            driest = month;
        }
        if month.wind_speed > windiest.wind_speed {
            windiest = month;
        }
        if month.wind_speed < calmest.wind_speed {
            calmest = month;
        }
    }

    Some(SeasonalPatterns {
        hottest_month: hottest.month.clone(),
        coldest_month: coldest.month.clone(),
        wettest_month: wettest.month.clone(),
        driest_month: driest.month.clone(),
        windiest_month: windiest.month.clone(),
        calmest_month: calmest.month.clone(),
    })
}

/// Tracks one pair of mutually exclusive runs (hot/cold, dry/wet).
#[derive(Default)]
struct RunCounter {
    high: u32,
    low: u32,
}

/// Record values plus counts of sustained extreme runs, scanning the
/// records in the order given. `None` when there are no records.
#[must_use]
pub fn calculate_extreme_events(daily: &[DailyRecord]) -> Option<ExtremeEvents> {
    if daily.is_empty() {
        return None;
    }

    let mut extremes = ExtremeEvents {
        record_high: f64::NEG_INFINITY,
        record_low: f64::INFINITY,
        max_rainfall: f64::NEG_INFINITY,
        max_wind_speed: f64::NEG_INFINITY,
        heat_waves: 0,
        cold_snaps: 0,
        droughts: 0,
        wet_spells: 0,
    };

    let mut temperature_run = RunCounter::default();
    let mut rain_run = RunCounter::default();

    for record in daily {
        extremes.record_high = extremes.record_high.max(record.temperature);
        extremes.record_low = extremes.record_low.min(record.temperature);
        extremes.max_rainfall = extremes.max_rainfall.max(record.precipitation);
        extremes.max_wind_speed = extremes.max_wind_speed.max(record.wind_speed);

        if record.temperature > HOT_DAY_C {
            temperature_run.high += 1;
            temperature_run.low = 0;
        } else if record.temperature < COLD_DAY_C {
            temperature_run.low += 1;
            temperature_run.high = 0;
        } else {
            close_temperature_runs(&mut extremes, &mut temperature_run);
        }

        if record.precipitation < DRY_DAY_MM {
            rain_run.low += 1;
            rain_run.high = 0;
        } else if record.precipitation > WET_DAY_MM {
            rain_run.high += 1;
            rain_run.low = 0;
        } else {
            close_rain_runs(&mut extremes, &mut rain_run);
        }
    }

    close_temperature_runs(&mut extremes, &mut temperature_run);
    close_rain_runs(&mut extremes, &mut rain_run);

    Some(extremes)
}

// A run only counts once a neutral record (or the end of the data) closes
// it; switching directly from hot to cold drops the hot run.
fn close_temperature_runs(extremes: &mut ExtremeEvents, run: &mut RunCounter) {
    if run.high >= HEAT_WAVE_RUN {
        extremes.heat_waves += 1;
    }
    if run.low >= COLD_SNAP_RUN {
        extremes.cold_snaps += 1;
    }
    *run = RunCounter::default();
}

fn close_rain_runs(extremes: &mut ExtremeEvents, run: &mut RunCounter) {
    if run.low >= DROUGHT_RUN {
        extremes.droughts += 1;
    }
    if run.high >= WET_SPELL_RUN {
        extremes.wet_spells += 1;
    }
    *run = RunCounter::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, temperature: f64, precipitation: f64, wind_speed: f64) -> DailyRecord {
        DailyRecord {
            year,
            date: format!("{year}-07-15"),
            temperature,
            temperature_max: temperature + 5.0,
            temperature_min: temperature - 5.0,
            precipitation,
            wind_speed,
            humidity: 70.0,
        }
    }

    fn month(name: &str, temperature: f64, rainfall: f64, wind_speed: f64) -> MonthlySummary {
        MonthlySummary {
            month: name.to_string(),
            temperature,
            rainfall,
            wind_speed,
        }
    }

    #[test]
    fn empty_input_yields_defined_defaults() {
        let summary = process_historical_data(&[], &[]);
        assert!(summary.aggregations.is_none());
        assert!(summary.trends.is_none());
        assert!(summary.seasonal_patterns.is_none());
        assert!(summary.extremes.is_none());
        assert_eq!(summary.statistics.total_records, 0);
        assert_eq!(summary.statistics.date_range, DateRange::default());
        assert!(summary.statistics.completeness.abs() < f64::EPSILON);
    }

    #[test]
    fn aggregations_over_records() {
        let daily = vec![
            record(2020, 20.0, 2.0, 5.0),
            record(2021, 30.0, 4.0, 15.0),
        ];
        let agg = calculate_aggregations(&daily).unwrap();
        assert!((agg.temperature.avg - 25.0).abs() < 1e-9);
        assert!((agg.temperature.std - 5.0).abs() < 1e-9);
        assert!((agg.precipitation.total - 6.0).abs() < 1e-9);
        assert!((agg.wind_speed.max - 15.0).abs() < 1e-9);
    }

    #[test]
    fn trends_follow_date_order() {
        // Given out of order; sorted by date the temperatures rise by 1/yr.
        let daily = vec![
            record(2022, 22.0, 0.0, 5.0),
            record(2020, 20.0, 0.0, 5.0),
            record(2021, 21.0, 0.0, 5.0),
        ];
        let trends = calculate_trends(&daily).unwrap();
        assert!((trends.temperature - 1.0).abs() < 1e-9);
        assert!(trends.wind_speed.abs() < 1e-9);
        assert!(calculate_trends(&daily[..1]).is_none());
    }

    #[test]
    fn statistics_cover_range_and_years() {
        let daily = vec![record(2019, 20.0, 1.0, 5.0), record(2011, 20.0, 1.0, 5.0)];
        let stats = calculate_statistics(&daily);
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.date_range.start.as_deref(), Some("2011-07-15"));
        assert_eq!(stats.date_range.end.as_deref(), Some("2019-07-15"));
        assert_eq!(stats.years_covered, 2);
        assert!((stats.completeness - 100.0).abs() < 1e-9);
    }

    #[test]
    fn seasonal_patterns_pick_extremes_first_wins() {
        let monthly = vec![
            month("Jan", 10.0, 50.0, 9.0),
            month("Feb", 30.0, 5.0, 12.0),
            month("Mar", 30.0, 5.0, 8.0),
        ];
        let patterns = analyze_seasonal_patterns(&monthly).unwrap();
        assert_eq!(patterns.hottest_month, "Feb");
        assert_eq!(patterns.coldest_month, "Jan");
        assert_eq!(patterns.wettest_month, "Jan");
        assert_eq!(patterns.driest_month, "Feb");
        assert_eq!(patterns.windiest_month, "Feb");
        assert_eq!(patterns.calmest_month, "Mar");
    }

    #[test]
    fn heat_wave_counted_when_closed_by_neutral_day_or_end() {
        let mut daily: Vec<DailyRecord> =
            (0..3).map(|i| record(2000 + i, 32.0, 3.0, 5.0)).collect();
        daily.push(record(2003, 20.0, 3.0, 5.0));
        daily.extend((4..7).map(|i| record(2000 + i, 33.0, 3.0, 5.0)));

        let extremes = calculate_extreme_events(&daily).unwrap();
        assert_eq!(extremes.heat_waves, 2);
        assert_eq!(extremes.cold_snaps, 0);
        assert!((extremes.record_high - 33.0).abs() < 1e-9);
        assert!((extremes.record_low - 20.0).abs() < 1e-9);
    }

    #[test]
    fn drought_needs_seven_dry_days() {
        let six_dry: Vec<DailyRecord> =
            (0..6).map(|i| record(2000 + i, 20.0, 0.0, 5.0)).collect();
        assert_eq!(calculate_extreme_events(&six_dry).unwrap().droughts, 0);

        let seven_dry: Vec<DailyRecord> =
            (0..7).map(|i| record(2000 + i, 20.0, 0.0, 5.0)).collect();
        assert_eq!(calculate_extreme_events(&seven_dry).unwrap().droughts, 1);
    }

    #[test]
    fn wet_spell_and_cold_snap() {
        let daily: Vec<DailyRecord> = (0..4).map(|i| record(2000 + i, 2.0, 12.0, 5.0)).collect();
        let extremes = calculate_extreme_events(&daily).unwrap();
        assert_eq!(extremes.wet_spells, 1);
        assert_eq!(extremes.cold_snaps, 1);
        assert!((extremes.max_rainfall - 12.0).abs() < 1e-9);
    }
}
