//! Fixed operation deadline applied to every driven-port call.
//!
//! A timed-out call surfaces as ServiceUnavailable to the caller; partial
//! writes are never reported as success. There is no internal retry.

use std::future::Future;
use std::time::Duration;

use crate::domain::Error;

/// Upper bound on any single storage operation.
pub(crate) const STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `fut` under [`STORAGE_TIMEOUT`], mapping elapse to
/// ServiceUnavailable.
pub(crate) async fn bounded<F>(fut: F) -> Result<F::Output, Error>
where
    F: Future,
{
    tokio::time::timeout(STORAGE_TIMEOUT, fut)
        .await
        .map_err(|_| Error::service_unavailable("storage operation timed out"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn completed_futures_pass_through() {
        let value = bounded(async { 7_u32 }).await.expect("future completes");
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_deadline_maps_to_service_unavailable() {
        let err = bounded(async {
            tokio::time::sleep(STORAGE_TIMEOUT * 2).await;
        })
        .await
        .expect_err("deadline must elapse");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
