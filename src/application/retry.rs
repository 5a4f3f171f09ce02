use crate::domain::error::DomainError;
use crate::domain::ports::http_transport::HttpTransport;
use crate::domain::values::request_options::RequestOptions;
use crate::domain::values::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Runs one logical HTTP call with bounded retries on transient failures.
///
/// Every attempt, retries included, first waits until `min_interval` has
/// passed since the previous dispatch of any request through this executor.
pub struct RetryExecutor {
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RetryExecutor {
    pub fn new(transport: Arc<dyn HttpTransport>, policy: RetryPolicy, min_interval: Duration) -> Self {
        Self {
            transport,
            policy,
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Returns the payload, or the last error once a non-transient failure
    /// occurs or the attempt budget is spent.
    pub async fn execute(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, DomainError> {
        let mut attempt = 0;
        loop {
            self.pace().await;
            tracing::debug!(url, attempt = attempt + 1, "dispatching request");

            let err = match self.transport.get_json(url, options).await {
                Ok(payload) => return Ok(payload),
                Err(err) => err,
            };

            if !err.is_transient() {
                tracing::debug!(url, error = %err, "non-retryable failure");
                return Err(err);
            }
            if attempt + 1 >= self.policy.max_attempts {
                tracing::warn!(
                    url,
                    attempts = attempt + 1,
                    error = %err,
                    "retries exhausted"
                );
                return Err(err);
            }

            let delay = self.policy.delay_for_attempt(attempt);
            tracing::debug!(
                url,
                attempt = attempt + 1,
                max_attempts = self.policy.max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "retrying after transient failure"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn pace(&self) {
        let mut last = self.last_dispatch.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
