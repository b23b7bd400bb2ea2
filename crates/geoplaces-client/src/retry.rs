//! Retry of transient places-service failures.
//!
//! Timeouts, refused connections, throttling and 5xx responses are retried
//! after an exponential, jittered wait. Everything else goes straight back
//! to the caller.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

const MAX_DELAY_MS: u64 = 10_000;

/// Whether another attempt could succeed where this one failed.
///
/// A 4xx response means the request itself is wrong, and a body that did
/// not parse will not parse next time either.
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        PlacesError::Throttled { .. } => true,
        PlacesError::Api { status, .. } => *status >= 500,
        PlacesError::Deserialize { .. } | PlacesError::InvalidBaseUrl { .. } => false,
    }
}

/// Wait before retry number `attempt` (1-based): `base_ms * 2^(attempt-1)`
/// capped at 10 s, scaled by `jitter` (expected in `0.75..1.25`). A
/// throttling error's `Retry-After` is a lower bound.
pub(crate) fn backoff_delay(attempt: u32, base_ms: u64, jitter: f64, err: &PlacesError) -> Duration {
    let exponent = attempt.saturating_sub(1).min(10);
    let capped = base_ms.saturating_mul(1u64 << exponent).min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * jitter) as u64;
    let floor = match err {
        PlacesError::Throttled { retry_after_secs } => {
            retry_after_secs.saturating_mul(1000).min(MAX_DELAY_MS)
        }
        _ => 0,
    };
    Duration::from_millis(jittered.max(floor))
}

/// Calls `operation` until it succeeds, fails with a non-retriable error, or
/// `max_retries` retries have been spent.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let mut attempt = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_retries || !is_retriable(&err) => return Err(err),
            Err(err) => err,
        };
        attempt += 1;
        let jitter = 0.75 + rand::random::<f64>() * 0.5;
        let delay = backoff_delay(attempt, backoff_base_ms, jitter, &err);
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "places request failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    fn api(status: u16) -> PlacesError {
        PlacesError::Api {
            status,
            message: format!("status {status}"),
        }
    }

    /// Runs the retry loop over a scripted sequence of outcomes and returns
    /// the final result with the number of attempts made.
    async fn run_script(
        max_retries: u32,
        script: Vec<Result<u32, PlacesError>>,
    ) -> (Result<u32, PlacesError>, usize) {
        let total = script.len();
        let remaining = Mutex::new(VecDeque::from(script));
        let result = retry_with_backoff(max_retries, 0, || {
            let next = remaining
                .lock()
                .unwrap()
                .pop_front()
                .expect("retry loop ran past the script");
            async move { next }
        })
        .await;
        let left = remaining.lock().unwrap().len();
        (result, total - left)
    }

    #[test]
    fn only_server_side_failures_are_retriable() {
        assert!(is_retriable(&api(500)));
        assert!(is_retriable(&api(503)));
        assert!(is_retriable(&PlacesError::Throttled { retry_after_secs: 1 }));
        assert!(!is_retriable(&api(400)));
        assert!(!is_retriable(&api(404)));
    }

    #[test]
    fn bad_bodies_are_not_retriable() {
        let source = serde_json::from_str::<Vec<u8>>("<html>").unwrap_err();
        assert!(!is_retriable(&PlacesError::Deserialize {
            context: "Suggest".to_string(),
            source,
        }));
    }

    #[test]
    fn delay_doubles_and_caps() {
        let err = api(500);
        assert_eq!(backoff_delay(1, 500, 1.0, &err), Duration::from_millis(500));
        assert_eq!(backoff_delay(2, 500, 1.0, &err), Duration::from_millis(1000));
        assert_eq!(backoff_delay(3, 500, 1.0, &err), Duration::from_millis(2000));
        assert_eq!(backoff_delay(30, 500, 1.0, &err), Duration::from_millis(10_000));
    }

    #[test]
    fn retry_after_is_a_floor() {
        let throttled = PlacesError::Throttled { retry_after_secs: 3 };
        assert_eq!(backoff_delay(1, 100, 1.0, &throttled), Duration::from_secs(3));
        assert_eq!(backoff_delay(1, 0, 0.75, &throttled), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn first_success_is_returned_without_retrying() {
        let (result, attempts) = run_script(3, vec![Ok(7)]).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn client_error_is_returned_at_once() {
        let (result, attempts) = run_script(3, vec![Err(api(403))]).await;
        assert!(matches!(result, Err(PlacesError::Api { status: 403, .. })));
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn transient_errors_are_retried_until_success() {
        let script = vec![
            Err(api(502)),
            Err(PlacesError::Throttled { retry_after_secs: 0 }),
            Ok(11),
        ];
        let (result, attempts) = run_script(2, script).await;
        assert_eq!(result.unwrap(), 11);
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn last_error_is_returned_when_retries_run_out() {
        let script = vec![Err(api(500)), Err(api(503))];
        let (result, attempts) = run_script(1, script).await;
        assert!(matches!(result, Err(PlacesError::Api { status: 503, .. })));
        assert_eq!(attempts, 2);
    }
}
