//! Fetch request value object.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::settings::Settings;

/// HTTP verb with read or write semantics.
///
/// Only two verbs are supported. [`Method::parse`] resolves any string other
/// than a case-insensitive `"GET"` to [`Method::Post`]; callers depend on
/// this fallback, so it is a documented quirk rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read semantics.
    Get,
    /// Write semantics. Also the fallback for unrecognized verb strings.
    Post,
}

impl Method {
    /// Resolves a verb string. `"GET"` (any case) maps to [`Method::Get`];
    /// everything else maps to [`Method::Post`].
    #[must_use]
    pub fn parse(verb: &str) -> Self {
        if verb.eq_ignore_ascii_case("GET") {
            Self::Get
        } else {
            Self::Post
        }
    }

    /// Canonical verb name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One whole request to a remote endpoint, immutable once built.
///
/// Carries everything a single [`Fetcher::fetch`](crate::Fetcher::fetch) call
/// needs: target, verb, query parameters, optional body, headers, per-attempt
/// timeout, and the retry budget. Construct with [`FetchRequest::get`] /
/// [`FetchRequest::post`] and the consuming `with_*` methods, or derive the
/// numeric fields from [`Settings`] via [`FetchRequest::from_settings`].
#[derive(Debug, Clone)]
pub struct FetchRequest {
    url: String,
    method: Method,
    params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    headers: BTreeMap<String, String>,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Option<Duration>,
    delay_after_success: Option<Duration>,
    log_attempts: bool,
    context: Option<String>,
}

impl FetchRequest {
    /// New request with crate defaults for the numeric fields.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self::from_settings(&Settings::default(), method, url)
    }

    /// New GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// New POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// New request taking timeout, retry budget, delays, and the attempt
    /// logging flag from `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings, method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            params: Vec::new(),
            body: None,
            headers: settings.default_headers.clone(),
            timeout: settings.timeout(),
            max_retries: settings.max_retries,
            retry_delay: settings.retry_delay(),
            delay_after_success: settings.delay_per_request(),
            log_attempts: settings.log_requests,
            context: None,
        }
    }

    /// Appends one query parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Appends query parameters from an iterator.
    #[must_use]
    pub fn with_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the body payload.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets one header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the attempt budget, inclusive of the first attempt.
    /// `0` still performs a single attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the pause between attempts; `None` disables it.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Option<Duration>) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the pause after a successful request; `None` disables it.
    #[must_use]
    pub fn with_delay_after_success(mut self, delay: Option<Duration>) -> Self {
        self.delay_after_success = delay;
        self
    }

    /// Enables or disables per-attempt logging for this request.
    #[must_use]
    pub fn with_attempt_logging(mut self, enabled: bool) -> Self {
        self.log_attempts = enabled;
        self
    }

    /// Attaches a diagnostic note logged when an attempt fails.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub fn retry_delay(&self) -> Option<Duration> {
        self.retry_delay
    }

    #[must_use]
    pub fn delay_after_success(&self) -> Option<Duration> {
        self.delay_after_success
    }

    #[must_use]
    pub fn log_attempts(&self) -> bool {
        self.log_attempts
    }

    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Attempt budget actually executed: at least one attempt.
    #[must_use]
    pub(crate) fn attempt_budget(&self) -> u32 {
        self.max_retries.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_get_any_case() {
        assert_eq!(Method::parse("GET"), Method::Get);
        assert_eq!(Method::parse("get"), Method::Get);
        assert_eq!(Method::parse("GeT"), Method::Get);
    }

    #[test]
    fn test_method_parse_falls_back_to_post() {
        // Anything other than GET resolves to POST, including typos and
        // verbs this client does not support. Callers rely on this.
        assert_eq!(Method::parse("POST"), Method::Post);
        assert_eq!(Method::parse("DELETE"), Method::Post);
        assert_eq!(Method::parse("PUT"), Method::Post);
        assert_eq!(Method::parse(""), Method::Post);
        assert_eq!(Method::parse("fetch"), Method::Post);
    }

    #[test]
    fn test_builder_accumulates_params_in_order() {
        let request = FetchRequest::get("https://api.example.com/items")
            .with_param("page", "1")
            .with_params([("limit", "50"), ("sort", "desc")]);
        assert_eq!(
            request.params(),
            &[
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("sort".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_settings_applies_defaults() {
        let settings = Settings {
            timeout_secs: 42,
            max_retries: 9,
            log_requests: false,
            ..Settings::default()
        };
        let request = FetchRequest::from_settings(&settings, Method::Get, "https://example.com");
        assert_eq!(request.timeout(), Duration::from_secs(42));
        assert_eq!(request.max_retries(), 9);
        assert!(!request.log_attempts());
    }

    #[test]
    fn test_attempt_budget_zero_retries_means_one_attempt() {
        let request = FetchRequest::get("https://example.com").with_max_retries(0);
        assert_eq!(request.attempt_budget(), 1);
    }

    #[test]
    fn test_attempt_budget_matches_positive_retries() {
        let request = FetchRequest::get("https://example.com").with_max_retries(4);
        assert_eq!(request.attempt_budget(), 4);
    }

    #[test]
    fn test_absent_body_and_empty_params_are_valid() {
        let request = FetchRequest::post("https://example.com");
        assert!(request.body().is_none());
        assert!(request.params().is_empty());
    }
}
