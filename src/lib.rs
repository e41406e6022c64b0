//! Bulkfetch Core Library
//!
//! Client-side toolkit for pulling large batches of items from a remote,
//! rate-sensitive web API: it sends requests with bounded retries, tolerates
//! transient network failures, and reports progress with a smoothed
//! time-remaining estimate during long-running bulk transfers.
//!
//! # Architecture
//!
//! - [`fetch`] - Resilient fetcher: request-with-retry, pluggable retry policy
//! - [`progress`] - Progress/ETA estimator for multi-item loops
//! - [`logging`] - Five-channel operator log surface with injectable sinks
//! - [`settings`] - Validated configuration defaults
//! - [`session`] - Shared HTTP session construction
//! - [`util`] - List-trimming and filename helpers
//!
//! The fetcher and the estimator never call each other; an external
//! orchestrator drives many fetches and feeds `(completed, total)` updates to
//! the estimator after each item.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod fetch;
pub mod logging;
pub mod progress;
pub mod session;
pub mod settings;
pub mod util;

// Re-export commonly used types
pub use fetch::{
    AttemptFailure, FetchError, FetchOutcome, FetchRequest, FetchResponse, Fetcher, Method,
    RetryOnAnyNonSuccess, RetryPolicy, RetryServerErrorsOnly,
};
pub use logging::{FileSink, LogChannel, LogConfig, LogSink, Logger, StdoutSink};
pub use progress::ProgressEstimator;
pub use session::{SessionError, build_client};
pub use settings::{Settings, SettingsError};
pub use util::{clean_filename, trim_to_limit};
