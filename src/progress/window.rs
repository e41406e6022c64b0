//! Fixed-size smoothing window for ETA samples.

/// Number of raw per-percent estimates kept.
pub(crate) const WINDOW_SIZE: usize = 5;

/// Bounded ring of the most recent raw time-left samples.
///
/// Explicit array-plus-index ring: pushing overwrites the oldest slot. The
/// window starts zero-filled, so early full-window averages are pulled down
/// by the untouched slots; that damping is part of the estimator's observed
/// behavior and is kept as is.
#[derive(Debug, Clone)]
pub(crate) struct EtaWindow {
    slots: [f64; WINDOW_SIZE],
    next: usize,
}

impl EtaWindow {
    pub(crate) fn new() -> Self {
        Self {
            slots: [0.0; WINDOW_SIZE],
            next: 0,
        }
    }

    /// Drops the oldest sample and records `sample` as the newest.
    pub(crate) fn push(&mut self, sample: f64) {
        self.slots[self.next] = sample;
        self.next = (self.next + 1) % WINDOW_SIZE;
    }

    /// Mean of every slot.
    pub(crate) fn average(&self) -> f64 {
        self.slots.iter().sum::<f64>() / WINDOW_SIZE as f64
    }

    /// Mean of the `count` most recently pushed samples.
    ///
    /// `count` must be in `1..=WINDOW_SIZE`.
    pub(crate) fn recent_average(&self, count: usize) -> f64 {
        debug_assert!((1..=WINDOW_SIZE).contains(&count));
        let count = count.clamp(1, WINDOW_SIZE);
        let sum: f64 = (1..=count)
            .map(|back| self.slots[(self.next + WINDOW_SIZE - back) % WINDOW_SIZE])
            .sum();
        sum / count as f64
    }

    /// Zero-fills every slot.
    pub(crate) fn reset(&mut self) {
        self.slots = [0.0; WINDOW_SIZE];
        self.next = 0;
    }
}
