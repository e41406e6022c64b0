//! Operator-facing log surface with five independent channels.
//!
//! The fetcher and the progress estimator report to a human operator through
//! this module rather than printing directly. A [`Logger`] couples a
//! [`LogConfig`] (one on/off flag per channel) with an injected [`LogSink`],
//! so callers control both what is emitted and where it lands, and tests can
//! capture output without touching stdout.
//!
//! The five channels match the tool's historical categories: `Standard` for
//! plain lines, `Inform` for operator notices and progress, `Warn` and
//! `Error` for problems, and `Save` for lines persisted to a log file.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Log channel a line is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogChannel {
    /// Plain output lines.
    Standard,
    /// Operator notices, including progress refresh lines.
    Inform,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
    /// Lines that should be persisted to a log file.
    Save,
}

impl fmt::Display for LogChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standard => "standard",
            Self::Inform => "inform",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Save => "save",
        };
        f.write_str(name)
    }
}

/// Per-channel enablement flags.
///
/// An explicit value passed at construction, not process-wide state; two
/// components may run with different configurations in the same process.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    pub standard: bool,
    pub inform: bool,
    pub warn: bool,
    pub error: bool,
    pub save: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            standard: true,
            inform: true,
            warn: true,
            error: true,
            save: true,
        }
    }
}

impl LogConfig {
    /// All channels off.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            standard: false,
            inform: false,
            warn: false,
            error: false,
            save: false,
        }
    }

    fn enabled(&self, channel: LogChannel) -> bool {
        match channel {
            LogChannel::Standard => self.standard,
            LogChannel::Inform => self.inform,
            LogChannel::Warn => self.warn,
            LogChannel::Error => self.error,
            LogChannel::Save => self.save,
        }
    }
}

/// Destination for operator-facing lines.
///
/// Implementations must be infallible from the caller's point of view:
/// logging is best-effort and must never propagate an error into the
/// component that emitted the line.
pub trait LogSink: Send + Sync {
    /// Writes one complete line on the given channel.
    fn write_line(&self, channel: LogChannel, line: &str);

    /// Writes an in-place progress line (carriage-return refresh).
    ///
    /// Default falls back to a regular inform line for sinks that have no
    /// notion of overwriting, such as capture sinks in tests.
    fn write_progress(&self, line: &str) {
        self.write_line(LogChannel::Inform, line);
    }
}

/// Sink that prints to stdout.
///
/// Progress lines are rewritten in place with a leading `\r` and no newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, _channel: LogChannel, line: &str) {
        println!("{line}");
    }

    fn write_progress(&self, line: &str) {
        print!("\r{line}");
        let _ = std::io::stdout().flush();
    }
}

/// Sink that appends every line to a file.
///
/// Intended for the `Save` channel. Append failures are swallowed; a broken
/// log file must not take down a bulk transfer.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSink for FileSink {
    fn write_line(&self, _channel: LogChannel, line: &str) {
        let opened = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path);
        if let Ok(mut file) = opened {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Channel-gated logger handed to the fetcher and the estimator.
///
/// Cheap to clone; clones share the underlying sink.
#[derive(Clone)]
pub struct Logger {
    config: LogConfig,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogConfig::default(), Arc::new(StdoutSink))
    }
}

impl Logger {
    #[must_use]
    pub fn new(config: LogConfig, sink: Arc<dyn LogSink>) -> Self {
        Self { config, sink }
    }

    /// Logger that drops everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(LogConfig::silent(), Arc::new(StdoutSink))
    }

    #[must_use]
    pub fn config(&self) -> LogConfig {
        self.config
    }

    pub fn standard(&self, line: &str) {
        self.emit(LogChannel::Standard, line);
    }

    pub fn inform(&self, line: &str) {
        self.emit(LogChannel::Inform, line);
    }

    pub fn warn(&self, line: &str) {
        self.emit(LogChannel::Warn, line);
    }

    pub fn error(&self, line: &str) {
        self.emit(LogChannel::Error, line);
    }

    pub fn save(&self, line: &str) {
        self.emit(LogChannel::Save, line);
    }

    /// In-place progress refresh; gated by the inform channel.
    pub fn progress(&self, line: &str) {
        if self.config.inform {
            self.sink.write_progress(line);
        }
    }

    fn emit(&self, channel: LogChannel, line: &str) {
        if self.config.enabled(channel) {
            self.sink.write_line(channel, line);
        }
    }
}
