// Request deadlines: run the CPU-bound pipeline off the async runtime and
// stop waiting for it once the configured timeout passes.
//
// Dropping a tokio runtime joins its blocking pool, so the work runs on a
// detached std thread instead of `spawn_blocking`. Nothing ever joins it.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::oneshot;
use tracing::warn;

use super::{recommend, Recommendation, RecommendationRequest};
use crate::catalog::Catalog;
use crate::error::RecommendError;

/// Run `work` on its own thread and wait at most `timeout` for the result.
///
/// On timeout this returns `RecommendError::TimedOut` right away. The
/// worker keeps running in the background and its result is dropped.
pub async fn run_with_deadline<T, F>(timeout: Duration, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    thread::Builder::new()
        .name("savor-worker".to_string())
        .spawn(move || {
            // The receiver is gone if the deadline already passed
            let _ = tx.send(work());
        })
        .context("Failed to start recommendation worker")?;

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(anyhow!("Recommendation worker stopped without a result")),
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Deadline passed, worker abandoned");
            Err(RecommendError::TimedOut(timeout).into())
        }
    }
}

/// Run one request against a shared catalog snapshot under a deadline.
pub async fn recommend_within(
    catalog: Arc<Catalog>,
    request: RecommendationRequest,
    timeout: Duration,
) -> Result<Vec<Recommendation>> {
    run_with_deadline(timeout, move || recommend(&catalog, &request)).await
}
