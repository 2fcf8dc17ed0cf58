//! NASA EONET v3 event feed.

use std::time::Duration;

use async_trait::async_trait;
use weather_predict_disaster_models::{EventStatus, RawEvent, RawEventsResponse};

use crate::{
    DisasterError, DisasterFeed,
    retry::{self, RetryPolicy},
};

/// Public EONET v3 events endpoint.
pub const DEFAULT_EONET_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3/events";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Fetches events from an EONET-compatible HTTP endpoint.
#[derive(Debug, Clone)]
pub struct EonetFeed {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl EonetFeed {
    /// Creates a feed for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DisasterError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, DisasterError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            retry: RetryPolicy {
                max_retries,
                initial_backoff: INITIAL_BACKOFF,
            },
        })
    }

    /// The endpoint this feed queries.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DisasterFeed for EonetFeed {
    fn name(&self) -> &str {
        "eonet"
    }

    async fn fetch_events(
        &self,
        days_back: u32,
        status: EventStatus,
    ) -> Result<Vec<RawEvent>, DisasterError> {
        log::info!("Fetching EONET events (days={days_back}, status={status})");

        let query = [
            ("days", days_back.to_string()),
            ("status", status.to_string()),
        ];
        let text = retry::send_text(
            || self.client.get(&self.base_url).query(&query),
            self.retry,
        )
        .await?;

        let body: RawEventsResponse = serde_json::from_str(&text)?;
        log::info!("Found {} EONET events", body.events.len());

        Ok(body.events)
    }
}
