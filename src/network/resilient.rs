use crate::network::endpoint::EndpointConfig;
use crate::network::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Backoff unit; the wait before retry `n` is `n * BACKOFF_STEP`
pub const BACKOFF_STEP: Duration = Duration::from_millis(500);

/// Linear backoff after `attempts_used` failed attempts
pub fn backoff_delay(attempts_used: u32) -> Duration {
    BACKOFF_STEP * attempts_used
}

/// Runs requests under a per-attempt deadline with bounded, linearly backed-off retry
#[derive(Clone)]
pub struct ResilientTransport {
    transport: Arc<dyn HttpTransport>,
    config: EndpointConfig,
}

impl ResilientTransport {
    pub fn new(transport: Arc<dyn HttpTransport>, config: EndpointConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Execute with the configured retry budget
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.execute_with_retries(request, self.config.max_retries())
            .await
    }

    /// Execute with an explicit retry budget.
    ///
    /// Timeouts and network failures are retried while budget remains; any other
    /// failure, or the last retryable one, is returned unchanged.
    pub async fn execute_with_retries(
        &self,
        request: HttpRequest,
        retries: u32,
    ) -> Result<HttpResponse, TransportError> {
        let timeout = self.config.timeout();
        let mut retries_remaining = retries;
        let mut attempt: u32 = 1;

        loop {
            debug!(
                "{} {} (attempt {}, {} retries left)",
                request.method, request.url, attempt, retries_remaining
            );

            // Dropping the send future on deadline cancels the in-flight attempt
            let outcome = match tokio::time::timeout(timeout, self.transport.send(request.clone()))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(TransportError::DeadlineExceeded { timeout }),
            };

            match outcome {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && retries_remaining > 0 => {
                    let delay = backoff_delay(attempt);
                    warn!(
                        "{} {} failed (attempt {}): {}; retrying in {}ms",
                        request.method,
                        request.url,
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    retries_remaining -= 1;
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_retryable() {
                        error!(
                            "{} {} failed after {} attempts: {}",
                            request.method, request.url, attempt, e
                        );
                    } else {
                        debug!("{} {} failed, not retrying: {}", request.method, request.url, e);
                    }
                    return Err(e);
                }
            }
        }
    }
}
