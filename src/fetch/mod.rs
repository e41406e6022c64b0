//! Resilient fetch layer: request-with-retry over HTTP.
//!
//! [`Fetcher::fetch`] performs one logical request as a bounded loop of
//! sequential attempts. Each failed attempt is classified into an
//! [`AttemptFailure`] and handed to the configured [`RetryPolicy`]; transient
//! failures are logged and retried after the request's inter-retry delay.
//! Only the aggregate exhaustion surfaces to the caller, as
//! [`FetchError::Exhausted`].
//!
//! # Example
//!
//! ```no_run
//! use bulkfetch::{FetchRequest, Fetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new()?;
//! let request = FetchRequest::get("https://api.example.com/items")
//!     .with_param("page", "1")
//!     .with_max_retries(3);
//! let response = fetcher.fetch(&request).await?;
//! println!("{} bytes", response.bytes().len());
//! # Ok(())
//! # }
//! ```

mod error;
mod policy;
mod request;
mod response;

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::logging::Logger;
use crate::session::{self, SessionError};
use crate::settings::Settings;

pub use error::FetchError;
pub use policy::{AttemptFailure, RetryOnAnyNonSuccess, RetryPolicy, RetryServerErrorsOnly};
pub use request::{FetchRequest, Method};
pub use response::FetchResponse;

/// Result of one whole fetch: a complete response or terminal exhaustion.
pub type FetchOutcome = Result<FetchResponse, FetchError>;

/// Retrying HTTP fetcher.
///
/// Holds a shared session ([`reqwest::Client`]) for connection pooling, a
/// retry policy, and the operator logger. Cheap to clone; clones share the
/// session. Attempts within one [`fetch`](Self::fetch) call are strictly
/// sequential; separate calls may run concurrently against the same session.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    policy: Arc<dyn RetryPolicy>,
    logger: Logger,
}

impl Fetcher {
    /// Fetcher with default settings, policy, and stdout logging.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the HTTP session fails to build.
    pub fn new() -> Result<Self, SessionError> {
        Self::from_settings(&Settings::default())
    }

    /// Fetcher whose session is built from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the HTTP session fails to build.
    pub fn from_settings(settings: &Settings) -> Result<Self, SessionError> {
        Ok(Self::with_client(session::build_client(settings)?))
    }

    /// Fetcher reusing an existing session.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            policy: Arc::new(RetryOnAnyNonSuccess),
            logger: Logger::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the operator logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Performs the request, retrying transient failures.
    ///
    /// Makes up to `max(max_retries, 1)` sequential attempts. After a
    /// successful attempt the request's post-success delay (rate limiting)
    /// is applied before returning; after a failed attempt the inter-retry
    /// delay is applied before the next one. A failure the policy deems
    /// non-transient ends the loop early.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Exhausted`] when no attempt succeeds. The error
    /// carries verb, target, and parameters but not the root cause; consult
    /// the attempt log for that.
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        let budget = request.attempt_budget();

        for attempt in 1..=budget {
            if request.log_attempts() {
                self.logger.standard(&format!(
                    "{} {} params={:?}",
                    request.method(),
                    request.url(),
                    request.params()
                ));
            }

            let failure = match self.attempt(request).await {
                Ok(response) => {
                    debug!(attempt, status = response.status(), "fetch succeeded");
                    if request.log_attempts() {
                        self.logger.standard(&response.status().to_string());
                    }
                    if let Some(delay) = request.delay_after_success() {
                        tokio::time::sleep(delay).await;
                    }
                    return Ok(response);
                }
                Err(failure) => failure,
            };

            debug!(attempt, budget, %failure, "attempt failed");
            if request.log_attempts() {
                self.logger
                    .save(&format!("attempt {attempt}/{budget} failed: {failure}"));
                if let Some(context) = request.context() {
                    self.logger.inform(context);
                }
            }

            if !self.policy.is_transient(&failure) {
                warn!(attempt, %failure, "failure not retryable under policy");
                return Err(FetchError::exhausted(request, attempt));
            }

            if attempt < budget
                && let Some(delay) = request.retry_delay()
            {
                tokio::time::sleep(delay).await;
            }
        }

        Err(FetchError::exhausted(request, budget))
    }

    /// One attempt: send, read the whole body, classify.
    async fn attempt(&self, request: &FetchRequest) -> Result<FetchResponse, AttemptFailure> {
        let mut builder = match request.method() {
            Method::Get => self.client.get(request.url()),
            Method::Post => self.client.post(request.url()),
        };
        builder = builder.timeout(request.timeout());
        if !request.params().is_empty() {
            builder = builder.query(request.params());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(classify_transport_error)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(classify_transport_error)?
            .to_vec();

        if status >= 400 {
            // 4xx and 5xx are classified identically; the policy decides.
            return Err(AttemptFailure::BadStatus(status));
        }
        if body.is_empty() {
            return Err(AttemptFailure::EmptyResponse);
        }
        Ok(FetchResponse::new(status, headers, body))
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

fn classify_transport_error(error: reqwest::Error) -> AttemptFailure {
    if error.is_timeout() {
        AttemptFailure::Timeout
    } else {
        AttemptFailure::Network(error.to_string())
    }
}
