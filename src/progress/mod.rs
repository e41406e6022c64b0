//! Progress and time-remaining estimation for bulk operations.
//!
//! A [`ProgressEstimator`] is driven by one sequential loop reporting
//! `(completed, total)` after each item. It converts those updates into a
//! percent-complete figure and a smoothed time-left estimate, rendered as a
//! single status line that overwrites itself in place.
//!
//! Smoothing: every time the percent advances, a raw estimate is produced by
//! linear extrapolation over the time the last percent step took, and pushed
//! into a fixed five-slot window. How much of the window is averaged depends
//! on how many percent steps of the current size remain: near the end only
//! the newest samples count, far from the end the whole window does. This
//! keeps the display stable against noisy early samples while staying
//! responsive as the operation closes out.
//!
//! One instance serves one bulk operation at a time.
//! [`finish`](ProgressEstimator::finish) resets all state; reusing an
//! instance for a new operation without finishing the previous one produces
//! meaningless estimates.

mod window;

use std::time::Instant;

use tracing::debug;

use crate::logging::Logger;

use window::{EtaWindow, WINDOW_SIZE};

/// Smoothed progress reporter for one bulk operation.
///
/// Not internally synchronized; drive it from a single sequential loop.
#[derive(Debug)]
pub struct ProgressEstimator {
    logger: Logger,
    first_update: bool,
    last_percent: Option<i64>,
    last_estimate: f64,
    last_change: Instant,
    window: EtaWindow,
    started: Instant,
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new(Logger::default())
    }
}

impl ProgressEstimator {
    /// Estimator emitting status lines through `logger`.
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        let now = Instant::now();
        Self {
            logger,
            first_update: true,
            last_percent: None,
            last_estimate: f64::INFINITY,
            last_change: now,
            window: EtaWindow::new(),
            started: now,
        }
    }

    /// Records progress and returns the rendered status line.
    ///
    /// The line is also emitted through the logger as an in-place progress
    /// refresh on the inform channel. Three forms exist: with a `~Ns left`
    /// clause for a finite nonzero estimate, with `time left unknown` before
    /// the first percent advance, and with no time clause at all when the
    /// estimate is exactly zero. An optional `message` is appended after
    /// ` | `.
    ///
    /// # Panics
    ///
    /// `total` must be greater than zero; this is a caller precondition,
    /// checked with `debug_assert!`. Behavior on `total = 0` in release
    /// builds is unspecified.
    pub fn update(&mut self, completed: u64, total: u64, message: Option<&str>) -> String {
        debug_assert!(total > 0, "progress total must be > 0");
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let percent = ((completed as f64 / total as f64) * 100.0).floor() as i64;
        let now = Instant::now();

        let estimate = if self.first_update {
            self.first_update = false;
            self.started = now;
            self.last_change = now;
            f64::INFINITY
        } else {
            match self.last_percent {
                Some(last) if percent > last => self.advance(last, percent, now),
                // Same percent: reuse the previous estimate verbatim. Also
                // covers a percent that moved backwards, which violates the
                // monotonicity precondition.
                _ => self.last_estimate,
            }
        };

        self.last_estimate = estimate;
        self.last_percent = Some(percent);

        let text = render_status(completed, total, percent, estimate, message);
        self.logger.progress(&text);
        text
    }

    /// Ends the operation, emits the completion line, and resets all state.
    ///
    /// With a `message`, the line is `done: <message>`. Without one, the
    /// line is a bare `done` when no update was ever recorded, otherwise
    /// `done, took <elapsed>s`. Safe to call repeatedly; each call resets
    /// the estimator for a fresh operation.
    pub fn finish(&mut self, message: Option<&str>) -> String {
        let text = match message {
            Some(msg) => format!("done: {msg}"),
            None if self.first_update => "done".to_string(),
            None => format!("done, took {:.2}s", self.started.elapsed().as_secs_f64()),
        };

        self.first_update = true;
        self.last_percent = None;
        self.last_estimate = f64::INFINITY;
        self.window.reset();
        let now = Instant::now();
        self.last_change = now;
        self.started = now;

        self.logger.standard(&text);
        text
    }

    /// New raw sample from a percent advance, smoothed over the window.
    fn advance(&mut self, last_percent: i64, percent: i64, now: Instant) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let diff = (percent - last_percent) as f64;
        #[allow(clippy::cast_precision_loss)]
        let percent_left = (100 - percent) as f64;

        let raw = now.duration_since(self.last_change).as_secs_f64() / diff * percent_left;
        self.window.push(raw);

        // Self-adjusting horizon: with few percent steps of this size left,
        // average only the newest samples; otherwise the whole window.
        // Ties round to even, so exactly half a step left counts as done.
        #[allow(clippy::cast_possible_truncation)]
        let chunk_left = (percent_left / diff).round_ties_even() as i64;
        let estimate = if chunk_left <= 0 {
            0.0
        } else if (chunk_left as usize) < WINDOW_SIZE {
            #[allow(clippy::cast_sign_loss)]
            self.window.recent_average(chunk_left as usize)
        } else {
            self.window.average()
        };

        debug!(percent, raw, estimate, "progress advanced");
        self.last_change = now;
        estimate
    }
}

fn render_status(
    completed: u64,
    total: u64,
    percent: i64,
    estimate: f64,
    message: Option<&str>,
) -> String {
    let mut text = format!("{completed}/{total} ({percent}%)");
    if estimate.is_infinite() {
        text.push_str(" time left unknown");
    } else if estimate != 0.0 {
        text.push_str(&format!(" ~{estimate:.2}s left"));
    }
    if let Some(msg) = message {
        text.push_str(" | ");
        text.push_str(msg);
    }
    text
}
