//! Fetch defaults loaded from configuration.
//!
//! [`Settings`] is the explicit configuration value callers build a session
//! and default requests from. Every field has a serde default, so a partial
//! JSON document is valid; numeric delay fields are validated up front and
//! reject NaN, infinities, and negatives instead of letting a bad value reach
//! the retry loop.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default per-attempt timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default attempt budget, inclusive of the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default pause between attempts in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 0.5;

/// Errors raised while loading or validating settings.
///
/// These are caller errors and fail fast; nothing here is retried.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A delay field is NaN, infinite, or negative.
    #[error("invalid {field}: {value} (must be a finite number >= 0)")]
    InvalidDelay {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A proxy entry is not a parseable URL.
    #[error("invalid proxy URL for scheme {scheme}: {url}")]
    InvalidProxyUrl {
        /// Proxy map key (`http` / `https`).
        scheme: String,
        /// The rejected URL string.
        url: String,
    },

    /// The settings document is not valid JSON.
    #[error("failed to parse settings: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Defaults applied to sessions and requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,

    /// Attempt budget per fetch, inclusive of the first attempt.
    /// `0` still performs a single attempt.
    pub max_retries: u32,

    /// Pause between attempts in seconds. `None` disables the pause.
    pub retry_delay_secs: Option<f64>,

    /// Pause after each successful request (rate limiting). `None` disables.
    pub delay_per_request_secs: Option<f64>,

    /// Proxy URLs keyed by scheme (`http` / `https`). Empty means direct.
    pub proxies: BTreeMap<String, String>,

    /// Whether to verify transport-layer certificates.
    pub verify_certificates: bool,

    /// Headers attached to every request built from these settings.
    pub default_headers: BTreeMap<String, String>,

    /// Whether fetches log each attempt by default.
    pub log_requests: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_secs: Some(DEFAULT_RETRY_DELAY_SECS),
            delay_per_request_secs: None,
            proxies: BTreeMap::new(),
            verify_certificates: true,
            default_headers: BTreeMap::new(),
            log_requests: true,
        }
    }
}

impl Settings {
    /// Parses settings from a JSON document and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] on malformed JSON or invalid field values.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|source| SettingsError::Parse { source })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Validates numeric fields and proxy URLs.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] on the first invalid field found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_delay("retry_delay_secs", self.retry_delay_secs)?;
        validate_delay("delay_per_request_secs", self.delay_per_request_secs)?;
        for (scheme, proxy_url) in &self.proxies {
            if url::Url::parse(proxy_url).is_err() {
                return Err(SettingsError::InvalidProxyUrl {
                    scheme: scheme.clone(),
                    url: proxy_url.clone(),
                });
            }
        }
        Ok(())
    }

    /// Per-attempt timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Inter-retry delay as a [`Duration`], if enabled.
    ///
    /// A value that would not survive [`validate`](Self::validate) (NaN,
    /// negative, overflow) yields `None` rather than panicking; the fields
    /// are public, so the accessor cannot assume validation ran.
    #[must_use]
    pub fn retry_delay(&self) -> Option<Duration> {
        self.retry_delay_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Post-success delay as a [`Duration`], if enabled.
    ///
    /// Same non-panicking contract as [`retry_delay`](Self::retry_delay).
    #[must_use]
    pub fn delay_per_request(&self) -> Option<Duration> {
        self.delay_per_request_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

fn validate_delay(field: &'static str, value: Option<f64>) -> Result<(), SettingsError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(SettingsError::InvalidDelay { field, value: v }),
        _ => Ok(()),
    }
}
