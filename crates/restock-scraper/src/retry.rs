//! Bounded fixed-delay retry for page retrieval.
//!
//! Retailer pages fail transiently all the time (bot-detection rejections,
//! connection resets, half-rendered documents), so every retrieval mode runs
//! under the same policy: a fixed number of total attempts with a constant
//! sleep between them. Exhaustion surfaces the last error as a value; nothing
//! here panics or escalates.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` if `err` is worth another attempt.
///
/// Non-2xx statuses count as transient: bot detection frequently answers
/// 403/503 and then relents. The one exception is a renderer binary that
/// could not be spawned at all; retrying cannot conjure the executable.
fn is_retriable(err: &FetchError) -> bool {
    !matches!(err, FetchError::RendererUnavailable { .. })
}

/// Executes `operation` up to `max_attempts` times total, sleeping a fixed
/// `delay_secs` between attempts.
///
/// On success the result is returned immediately. On a retriable error the
/// attempt is logged and the next one scheduled; once `max_attempts` have
/// been made the last error is returned. Non-retriable errors are returned
/// without sleeping.
pub(crate) async fn retry_with_delay<T, F, Fut>(
    max_attempts: u32,
    delay_secs: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_secs,
                    error = %err,
                    "transient fetch error, retrying"
                );
            }
        }

        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn status_err(status: u16) -> FetchError {
        FetchError::Status {
            status,
            url: "https://shop.example.com/p/1".to_owned(),
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_delay(5, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FetchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_on_status_error_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_delay(5, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(status_err(503))
                } else {
                    Ok::<u32, FetchError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_after_exactly_max_attempts() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_delay(5, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(status_err(500))
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 5);
        assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn single_attempt_when_max_is_one() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_delay(1, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(status_err(500))
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn does_not_retry_missing_renderer() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_delay(5, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FetchError>(FetchError::RendererUnavailable {
                    reason: "no such file".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(FetchError::RendererUnavailable { .. })
        ));
    }
}
