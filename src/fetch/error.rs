//! Terminal fetch errors.

use thiserror::Error;

use super::request::{FetchRequest, Method};

/// Errors surfaced by [`Fetcher::fetch`](crate::Fetcher::fetch).
///
/// Individual attempt failures are swallowed and logged; only the aggregate
/// exhaustion is surfaced, and it deliberately does not say whether the
/// attempts died to timeouts, bad statuses, or transport errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt in the retry budget failed.
    #[error("all {attempts} attempt(s) failed: {method} {url} params={params:?}")]
    Exhausted {
        /// Verb of the failed request.
        method: Method,
        /// Target address.
        url: String,
        /// Query parameters, for diagnostics.
        params: Vec<(String, String)>,
        /// How many attempts were made.
        attempts: u32,
    },
}

impl FetchError {
    /// Builds the exhaustion error for a request.
    pub(crate) fn exhausted(request: &FetchRequest, attempts: u32) -> Self {
        Self::Exhausted {
            method: request.method(),
            url: request.url().to_string(),
            params: request.params().to_vec(),
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_display_carries_diagnostics() {
        let request = FetchRequest::get("https://api.example.com/items")
            .with_param("page", "3")
            .with_max_retries(2);
        let error = FetchError::exhausted(&request, 2);
        let msg = error.to_string();
        assert!(msg.contains("GET"), "expected verb in: {msg}");
        assert!(
            msg.contains("https://api.example.com/items"),
            "expected target in: {msg}"
        );
        assert!(msg.contains("page"), "expected params in: {msg}");
        assert!(msg.contains('2'), "expected attempt count in: {msg}");
    }
}
