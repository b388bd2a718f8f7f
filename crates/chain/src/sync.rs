use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("pinning endpoint returned status {0}")]
    Status(u16),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sync failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

/// One attempt at mirroring a batch of content hashes to the secondary
/// pinning/indexing service.
#[async_trait]
pub trait SyncTransport: Send + Sync {
    async fn submit(&self, hashes: &[String]) -> Result<(), SyncError>;
}

/// [`SyncTransport`] posting hash batches to an HTTP pinning endpoint.
pub struct HttpPinner {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPinner {
    pub fn new(endpoint: &str, api_key: Option<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl SyncTransport for HttpPinner {
    async fn submit(&self, hashes: &[String]) -> Result<(), SyncError> {
        let mut request = self.client.post(&self.endpoint).json(&json!({ "hashes": hashes }));
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(SyncError::Status(response.status().as_u16()))
        }
    }
}

/// Mirrors newly observed content hashes out of band.
///
/// Decoupled from entity persistence: a final failure is logged and
/// surfaced, never rolled back into projection state.
pub struct PinningService<T> {
    transport: T,
    max_attempts: u32,
    base_delay: Duration,
}

impl<T: SyncTransport> PinningService<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }

    pub fn with_backoff(mut self, max_attempts: u32, base_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.base_delay = base_delay;
        self
    }

    /// Delay before the retry following `attempt` (1-based): base × 2^(n−1).
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Sync a batch of content hashes, retrying the whole batch on failure.
    ///
    /// An empty batch short-circuits as success.
    pub async fn sync_hashes(&self, hashes: &[String]) -> Result<(), SyncError> {
        if hashes.is_empty() {
            tracing::debug!("No content hashes to sync");
            return Ok(());
        }

        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            match self.transport.submit(hashes).await {
                Ok(()) => {
                    tracing::info!(count = hashes.len(), attempt, "Content hashes synced");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Hash sync attempt failed");
                    last_error = e.to_string();
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.delay_for_attempt(attempt)).await;
                    }
                }
            }
        }

        let err = SyncError::RetriesExhausted {
            attempts: self.max_attempts,
            last_error,
        };
        tracing::error!(error = %err, "Hash sync gave up");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Transport that fails the first `failures` submissions, then succeeds.
    struct FlakyTransport {
        calls: AtomicU32,
        failures: u32,
    }

    impl FlakyTransport {
        fn new(failures: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures,
            }
        }
    }

    #[async_trait]
    impl SyncTransport for FlakyTransport {
        async fn submit(&self, _hashes: &[String]) -> Result<(), SyncError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(SyncError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    fn service(failures: u32) -> PinningService<FlakyTransport> {
        PinningService::new(FlakyTransport::new(failures))
            .with_backoff(3, Duration::from_millis(1))
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let svc = PinningService::new(FlakyTransport::new(0))
            .with_backoff(3, Duration::from_secs(1));
        assert_eq!(svc.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(svc.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(svc.delay_for_attempt(3), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn empty_batch_short_circuits_without_submitting() {
        let svc = service(0);
        svc.sync_hashes(&[]).await.unwrap();
        assert_eq!(svc.transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn succeeds_on_third_attempt_after_two_failures() {
        let svc = service(2);
        let hashes = vec!["QmA".to_string()];

        svc.sync_hashes(&hashes).await.unwrap();
        assert_eq!(svc.transport.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn surfaces_failure_after_exactly_three_attempts() {
        let svc = service(u32::MAX);
        let hashes = vec!["QmA".to_string()];

        let err = svc.sync_hashes(&hashes).await.unwrap_err();
        assert_eq!(svc.transport.calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            err,
            SyncError::RetriesExhausted { attempts: 3, .. }
        ));
    }
}
