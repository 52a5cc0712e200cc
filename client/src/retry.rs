//! Bounded retry for transient transport failures.

use std::future::Future;
use std::time::Duration;

use crate::api::ApiError;

/// Additional attempts after the first failure.
pub const DEFAULT_RETRY_LIMIT: u32 = 2;

const BASE_DELAY: Duration = Duration::from_millis(250);

/// Run `op`, retrying transient failures up to `limit` more times with a
/// doubling delay between attempts. Non-transient errors are returned
/// immediately.
pub(crate) async fn with_retries<T, F, Fut>(limit: u32, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < limit && err.is_transient() => {
                attempt += 1;
                let delay = BASE_DELAY * 2u32.pow(attempt - 1);
                tracing::debug!(attempt, limit, delay_ms = delay.as_millis() as u64, "retrying transient failure: {}", err);
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn transient() -> ApiError {
        ApiError::Api {
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_within_the_limit() {
        let calls = AtomicU32::new(0);
        let result = with_retries(2, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(transient())
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_the_limit() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;

        assert!(matches!(result, Err(ApiError::Api { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_transient_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiError::NotFound("hero:999".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_limit_means_single_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(0, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
