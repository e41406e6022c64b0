//! Shared HTTP session construction.
//!
//! Centralizes `reqwest::Client` construction so every fetcher built from the
//! same [`Settings`] agrees on timeout, compression, cookies, proxies, and
//! certificate verification. The client pools connections internally and is
//! cheap to clone, so one session is typically shared across an entire bulk
//! operation.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use thiserror::Error;
use tracing::debug;

use crate::settings::Settings;

/// Default User-Agent sent when callers do not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("bulkfetch/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building the shared session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A proxy entry uses a scheme the session does not support.
    #[error("unsupported proxy scheme: {scheme}")]
    UnsupportedProxyScheme {
        /// The offending proxy map key.
        scheme: String,
    },

    /// A proxy URL was rejected by the HTTP stack.
    #[error("invalid proxy URL for scheme {scheme}: {source}")]
    InvalidProxy {
        /// Proxy map key (`http` / `https`).
        scheme: String,
        #[source]
        source: reqwest::Error,
    },

    /// Client construction failed.
    #[error("failed to build HTTP session: {source}")]
    Build {
        #[source]
        source: reqwest::Error,
    },
}

/// Builds the shared network session from settings.
///
/// Applied policy: per-attempt timeout (overridable per request), gzip
/// decompression, an in-memory cookie store, per-scheme proxies, and the
/// certificate verification toggle.
///
/// # Errors
///
/// Returns [`SessionError`] when a proxy entry is unusable or the underlying
/// client fails to build.
pub fn build_client(settings: &Settings) -> Result<Client, SessionError> {
    builder_from_settings(settings)?
        .build()
        .map_err(|source| SessionError::Build { source })
}

fn builder_from_settings(settings: &Settings) -> Result<ClientBuilder, SessionError> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(DEFAULT_USER_AGENT)
        .gzip(true)
        .cookie_store(true);

    if !settings.verify_certificates {
        debug!("certificate verification disabled for this session");
        builder = builder.danger_accept_invalid_certs(true);
    }

    for (scheme, proxy_url) in &settings.proxies {
        let proxy = match scheme.as_str() {
            "http" => Proxy::http(proxy_url),
            "https" => Proxy::https(proxy_url),
            _ => {
                return Err(SessionError::UnsupportedProxyScheme {
                    scheme: scheme.clone(),
                });
            }
        };
        let proxy = proxy.map_err(|source| SessionError::InvalidProxy {
            scheme: scheme.clone(),
            source,
        })?;
        debug!(scheme = %scheme, "session proxy configured");
        builder = builder.proxy(proxy);
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_build_client_with_defaults() {
        let settings = Settings::default();
        assert!(build_client(&settings).is_ok());
    }

    #[test]
    fn test_build_client_with_proxies() {
        let mut proxies = BTreeMap::new();
        proxies.insert("http".to_string(), "http://127.0.0.1:8080".to_string());
        proxies.insert("https".to_string(), "http://127.0.0.1:8080".to_string());
        let settings = Settings {
            proxies,
            ..Settings::default()
        };
        assert!(build_client(&settings).is_ok());
    }

    #[test]
    fn test_unsupported_proxy_scheme_rejected() {
        let mut proxies = BTreeMap::new();
        proxies.insert("ftp".to_string(), "http://127.0.0.1:8080".to_string());
        let settings = Settings {
            proxies,
            ..Settings::default()
        };
        assert!(matches!(
            build_client(&settings),
            Err(SessionError::UnsupportedProxyScheme { .. })
        ));
    }

    #[test]
    fn test_build_client_without_cert_verification() {
        let settings = Settings {
            verify_certificates: false,
            ..Settings::default()
        };
        assert!(build_client(&settings).is_ok());
    }

    #[test]
    fn test_default_user_agent_names_the_tool() {
        assert!(DEFAULT_USER_AGENT.starts_with("bulkfetch/"));
    }
}
