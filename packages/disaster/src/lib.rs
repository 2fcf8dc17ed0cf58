#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disaster severity classification and event feeds.
//!
//! Events come from a [`DisasterFeed`] as raw EONET payloads and are
//! normalized with [`transform_events`], which assigns each one a
//! [`Severity`] via [`classify`]. Nothing here fabricates events: a feed
//! that cannot be reached yields an error, never synthetic data.

pub mod eonet;
pub mod retry;

use async_trait::async_trait;
use weather_predict_disaster_models::{
    DisasterCategory, DisasterEvent, EventFilter, EventStatistics, EventStatus, RawEvent,
    RawGeometry, Selection, Severity,
};
use weather_predict_weather_models::Coordinate;

/// Errors that can occur while fetching disaster events.
#[derive(Debug, thiserror::Error)]
pub enum DisasterError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Feed returned HTTP {status}")]
    Status {
        /// The HTTP status returned.
        status: reqwest::StatusCode,
    },

    /// The response body was not a valid event payload.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A source of raw natural disaster events.
#[async_trait]
pub trait DisasterFeed: Send + Sync {
    /// Short identifier used in logs (e.g. `"eonet"`).
    fn name(&self) -> &str;

    /// Fetches events active within the last `days_back` days.
    ///
    /// # Errors
    ///
    /// Returns [`DisasterError`] if the feed cannot be reached or answers
    /// with something that is not an event list.
    async fn fetch_events(
        &self,
        days_back: u32,
        status: EventStatus,
    ) -> Result<Vec<RawEvent>, DisasterError>;
}

/// A feed that never has any events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisasterFeed;

#[async_trait]
impl DisasterFeed for NullDisasterFeed {
    fn name(&self) -> &str {
        "null"
    }

    async fn fetch_events(
        &self,
        _days_back: u32,
        _status: EventStatus,
    ) -> Result<Vec<RawEvent>, DisasterError> {
        Ok(vec![])
    }
}

fn tiered(magnitude: Option<f64>, high_above: f64, moderate_above: f64) -> Severity {
    match magnitude {
        None => Severity::Moderate,
        Some(m) if m > high_above => Severity::High,
        Some(m) if m > moderate_above => Severity::Moderate,
        Some(_) => Severity::Low,
    }
}

/// Treats zero and NaN magnitudes as missing.
fn known_magnitude(magnitude: Option<f64>) -> Option<f64> {
    magnitude.filter(|m| m.abs() > 0.0)
}

/// Assigns a severity tier from the category and, for storms, wildfires,
/// and earthquakes, the magnitude.
///
/// Magnitude-tiered categories are [`Severity::Moderate`] when the
/// magnitude is missing, zero, or NaN.
#[must_use]
pub fn classify(category: DisasterCategory, magnitude: Option<f64>) -> Severity {
    let magnitude = known_magnitude(magnitude);

    match category {
        DisasterCategory::Storms => tiered(magnitude, 100.0, 50.0),
        DisasterCategory::Wildfires => tiered(magnitude, 1000.0, 100.0),
        DisasterCategory::Earthquakes => tiered(magnitude, 6.0, 4.0),
        DisasterCategory::Volcanoes | DisasterCategory::SevereStorms => Severity::High,
        DisasterCategory::Floods
        | DisasterCategory::Landslides
        | DisasterCategory::TempExtremes => Severity::Moderate,
        DisasterCategory::Drought
        | DisasterCategory::DustHaze
        | DisasterCategory::Manmade
        | DisasterCategory::SeaLakeIce
        | DisasterCategory::Snow
        | DisasterCategory::WaterColor
        | DisasterCategory::Unknown => Severity::Low,
    }
}

/// Emoji shown next to events of a category.
#[must_use]
pub const fn icon_for(category: DisasterCategory) -> &'static str {
    match category {
        DisasterCategory::Storms => "🌪️",
        DisasterCategory::Volcanoes => "🌋",
        DisasterCategory::Wildfires => "🔥",
        DisasterCategory::Floods => "🌊",
        DisasterCategory::Drought => "🏜️",
        DisasterCategory::DustHaze => "🌫️",
        DisasterCategory::Earthquakes => "🌍",
        DisasterCategory::Landslides => "⛰️",
        DisasterCategory::Manmade => "🏭",
        DisasterCategory::SeaLakeIce => "🧊",
        DisasterCategory::SevereStorms => "⛈️",
        DisasterCategory::Snow => "❄️",
        DisasterCategory::TempExtremes => "🌡️",
        DisasterCategory::WaterColor => "💧",
        DisasterCategory::Unknown => "⚠️",
    }
}

/// Keeps events of the selected category.
///
/// Matching is on [`DisasterEvent::category_kind`], so every unrecognized
/// id falls in the single [`DisasterCategory::Unknown`] bucket.
#[must_use]
pub fn filter_by_category(
    events: &[DisasterEvent],
    category: Selection<DisasterCategory>,
) -> Vec<DisasterEvent> {
    events
        .iter()
        .filter(|e| category.matches(&e.category_kind()))
        .cloned()
        .collect()
}

/// Keeps events of the selected severity.
#[must_use]
pub fn filter_by_severity(
    events: &[DisasterEvent],
    severity: Selection<Severity>,
) -> Vec<DisasterEvent> {
    events
        .iter()
        .filter(|e| severity.matches(&e.severity))
        .cloned()
        .collect()
}

/// Keeps events passing every part of `filter`.
#[must_use]
pub fn filter_events(events: &[DisasterEvent], filter: EventFilter) -> Vec<DisasterEvent> {
    events
        .iter()
        .filter(|e| {
            filter.category.matches(&e.category_kind()) && filter.severity.matches(&e.severity)
        })
        .cloned()
        .collect()
}

/// Distinct category ids in first-seen order.
#[must_use]
pub fn unique_categories(events: &[DisasterEvent]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for event in events {
        if !categories.contains(&event.category_id) {
            categories.push(event.category_id.clone());
        }
    }
    categories
}

/// Counts events per severity and lists their categories.
#[must_use]
pub fn event_statistics(events: &[DisasterEvent]) -> EventStatistics {
    let count = |severity: Severity| events.iter().filter(|e| e.severity == severity).count();

    EventStatistics {
        total: events.len(),
        high: count(Severity::High),
        moderate: count(Severity::Moderate),
        low: count(Severity::Low),
        categories: unique_categories(events),
    }
}

/// Reads a GeoJSON point (`[lon, lat]`) into a validated coordinate.
///
/// Polygons and malformed positions yield `None`.
fn point_coordinate(geometry: &RawGeometry) -> Option<Coordinate> {
    let position = geometry.coordinates.as_array()?;
    let longitude = position.first()?.as_f64()?;
    let latitude = position.get(1)?.as_f64()?;
    Coordinate::new(latitude, longitude).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Normalizes one raw event using its most recent geometry.
///
/// Returns `None` when the event has no geometry or its latest position is
/// not a valid point.
#[must_use]
pub fn transform_event(event: RawEvent) -> Option<DisasterEvent> {
    let RawEvent {
        id,
        title,
        description,
        link,
        closed,
        categories,
        mut geometry,
    } = event;

    let latest = geometry.pop()?;
    let Some(coordinates) = point_coordinate(&latest) else {
        log::debug!("Dropping event {id}: latest geometry is not a valid point");
        return None;
    };

    let (category, category_id) = categories
        .into_iter()
        .next()
        .map_or_else(
            || ("Unknown".to_string(), "unknown".to_string()),
            |c| (c.title, c.id),
        );

    let magnitude_value = known_magnitude(latest.magnitude_value);
    let severity = classify(DisasterCategory::from_id(&category_id), magnitude_value);

    Some(DisasterEvent {
        id,
        title,
        description: non_empty(description)
            .unwrap_or_else(|| "No description available".to_string()),
        category,
        category_id,
        date: latest.date,
        coordinates,
        magnitude_value,
        magnitude_unit: non_empty(latest.magnitude_unit),
        link: non_empty(link),
        closed: non_empty(closed),
        severity,
    })
}

/// Normalizes raw events, dropping those without a usable location.
#[must_use]
pub fn transform_events(events: Vec<RawEvent>) -> Vec<DisasterEvent> {
    let total = events.len();
    let transformed: Vec<DisasterEvent> = events.into_iter().filter_map(transform_event).collect();

    if transformed.len() < total {
        log::debug!(
            "Dropped {} of {total} events without a valid point location",
            total - transformed.len()
        );
    }

    transformed
}
