//! Bounded HTTP retry with exponential backoff.
//!
//! Connection failures, timeouts, HTTP 429, and HTTP 5xx are retried.
//! Other 4xx responses are permanent and returned immediately.

use std::time::Duration;

use crate::DisasterError;

/// How many times and how patiently to retry a request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each one after.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    fn delay(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(1u32 << (attempt - 1).min(16))
    }
}

/// Sends the request built by `build_request` and returns the body text of
/// the first successful response.
///
/// The closure is called once per attempt since a
/// [`reqwest::RequestBuilder`] is consumed by `send()`.
///
/// # Errors
///
/// Returns [`DisasterError`] once retries are exhausted or on a permanent
/// failure.
pub async fn send_text<F>(build_request: F, policy: RetryPolicy) -> Result<String, DisasterError>
where
    F: Fn() -> reqwest::RequestBuilder + Send + Sync,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = policy.delay(attempt);
            log::warn!("  retry {attempt}/{} in {delay:?}...", policy.max_retries);
            tokio::time::sleep(delay).await;
        }

        let can_retry = attempt < policy.max_retries;
        attempt += 1;

        match build_request().send().await {
            Err(e) => {
                if is_transient(&e) && can_retry {
                    log::warn!("  transient error: {e}");
                    continue;
                }
                return Err(DisasterError::Http(e));
            }
            Ok(response) => {
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    if can_retry {
                        log::warn!("  HTTP {status}");
                        continue;
                    }
                    return Err(DisasterError::Status { status });
                }

                if !status.is_success() {
                    return Err(DisasterError::Status { status });
                }

                return Ok(response.text().await?);
            }
        }
    }
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_request()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        };
        assert_eq!(policy.delay(1), Duration::from_millis(500));
        assert_eq!(policy.delay(2), Duration::from_secs(1));
        assert_eq!(policy.delay(3), Duration::from_secs(2));
    }
}
