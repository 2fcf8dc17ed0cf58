//! Plain-text rendering of service results for the terminal.

use std::fmt::{self, Write};

use weather_predict_analysis::WeatherService;
use weather_predict_co2_models::Co2Dataset;
use weather_predict_disaster_models::{DisasterEvent, EventStatistics};
use weather_predict_weather_models::{WeatherCategory, analysis::WeatherAnalysis};

pub fn analysis(out: &mut impl Write, analysis: &WeatherAnalysis) -> fmt::Result {
    let location = analysis.metadata.location;
    writeln!(
        out,
        "Weather analysis for ({:.4}, {:.4}) on {}",
        location.latitude(),
        location.longitude(),
        analysis.metadata.target_date
    )?;
    writeln!(
        out,
        "{} years of simulated history",
        analysis.provenance.total_years
    )?;
    writeln!(out)?;
    writeln!(out, "{}", analysis.summary)?;
    writeln!(out)?;

    writeln!(out, "Probabilities:")?;
    for &category in WeatherCategory::all() {
        writeln!(
            out,
            "  {:<14} {:>3}%",
            category.as_ref(),
            analysis.probabilities.get(category)
        )?;
    }

    if let Some(aggregations) = &analysis.aggregations {
        writeln!(out)?;
        writeln!(out, "History:")?;
        let t = &aggregations.temperature;
        writeln!(
            out,
            "  Temperature    avg {:.1}°C (min {:.1}, max {:.1})",
            t.avg, t.min, t.max
        )?;
        let p = &aggregations.precipitation;
        writeln!(
            out,
            "  Precipitation  avg {:.1}mm (total {:.1})",
            p.avg, p.total
        )?;
        writeln!(
            out,
            "  Wind speed     avg {:.1}m/s",
            aggregations.wind_speed.avg
        )?;
    }

    if let Some(extremes) = &analysis.extremes {
        writeln!(
            out,
            "  Records        high {:.1}°C, low {:.1}°C, rain {:.1}mm",
            extremes.record_high, extremes.record_low, extremes.max_rainfall
        )?;
    }

    if let Some(seasonal) = &analysis.seasonal_patterns {
        writeln!(
            out,
            "  Seasons        hottest {}, coldest {}, wettest {}, driest {}",
            seasonal.hottest_month,
            seasonal.coldest_month,
            seasonal.wettest_month,
            seasonal.driest_month
        )?;
    }

    if !analysis.insights.is_empty() {
        writeln!(out)?;
        writeln!(out, "Insights:")?;
        for insight in &analysis.insights {
            writeln!(
                out,
                "  [{}] {}: {}",
                insight.kind, insight.title, insight.message
            )?;
        }
    }

    for warning in &analysis.validation.warnings {
        writeln!(out, "warning: {warning}")?;
    }

    Ok(())
}

pub fn disasters(
    out: &mut impl Write,
    service: &WeatherService,
    events: &[DisasterEvent],
    statistics: &EventStatistics,
) -> fmt::Result {
    if events.is_empty() {
        return writeln!(out, "No disaster events found.");
    }

    writeln!(
        out,
        "{} events ({} high, {} moderate, {} low)",
        statistics.total, statistics.high, statistics.moderate, statistics.low
    )?;
    writeln!(out)?;

    for event in events {
        writeln!(
            out,
            "{} [{}] {} ({}, {}) at ({:.2}, {:.2})",
            service.disaster_icon(&event.category_id),
            event.severity,
            event.title,
            event.category,
            event.date,
            event.coordinates.latitude(),
            event.coordinates.longitude()
        )?;
    }

    Ok(())
}

pub fn co2(out: &mut impl Write, dataset: &Co2Dataset) -> fmt::Result {
    let stats = &dataset.statistics;
    let quality = &stats.quality_distribution;

    writeln!(
        out,
        "{} ({})",
        dataset.metadata.source, dataset.metadata.dataset
    )?;
    writeln!(out, "Samples: {}", stats.data_points)?;
    writeln!(
        out,
        "XCO2: mean {:.2} ppm (min {:.2}, max {:.2}, std {:.2})",
        stats.mean, stats.min, stats.max, stats.standard_deviation
    )?;
    writeln!(
        out,
        "Quality: {} excellent, {} good, {} fair, {} poor",
        quality.excellent, quality.good, quality.fair, quality.poor
    )
}
