//! Per-attempt failure classification and the pluggable retry predicate.
//!
//! Each failed attempt is classified into an [`AttemptFailure`]; a
//! [`RetryPolicy`] then decides whether the failure is transient. The loop in
//! [`Fetcher::fetch`](crate::Fetcher::fetch) never inspects failure kinds
//! itself, so a stricter policy can be swapped in without touching the loop.

use std::fmt;

/// Why a single attempt failed. Never surfaced to callers; consumed by the
/// retry policy and attempt logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The attempt timed out.
    Timeout,
    /// Transport-level error (DNS, connection refused, TLS, malformed URL).
    Network(String),
    /// The server answered with status >= 400.
    BadStatus(u16),
    /// The server answered below 400 but returned nothing usable.
    EmptyResponse,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out"),
            Self::Network(reason) => write!(f, "network error: {reason}"),
            Self::BadStatus(status) => write!(f, "bad status {status}"),
            Self::EmptyResponse => f.write_str("empty response"),
        }
    }
}

/// Predicate deciding whether a failed attempt is worth retrying.
pub trait RetryPolicy: Send + Sync {
    /// `true` when the failure is expected to succeed on retry.
    fn is_transient(&self, failure: &AttemptFailure) -> bool;
}

/// Compatibility policy: every non-success is transient.
///
/// This retries 4xx and 5xx identically and also retries empty responses.
/// Conflating client and server errors is deliberate; existing callers
/// depend on 4xx being retried.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryOnAnyNonSuccess;

impl RetryPolicy for RetryOnAnyNonSuccess {
    fn is_transient(&self, _failure: &AttemptFailure) -> bool {
        true
    }
}

/// Stricter policy: retries timeouts, transport errors, and 5xx only.
///
/// 4xx and empty responses end the loop immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryServerErrorsOnly;

impl RetryPolicy for RetryServerErrorsOnly {
    fn is_transient(&self, failure: &AttemptFailure) -> bool {
        match failure {
            AttemptFailure::Timeout | AttemptFailure::Network(_) => true,
            AttemptFailure::BadStatus(status) => *status >= 500,
            AttemptFailure::EmptyResponse => false,
        }
    }
}
