//! Debounced auto-save of the current color.
//!
//! Slider drags produce a burst of edits; saving on each one would rewrite
//! the file dozens of times per second. The scheduler waits until edits
//! settle, and never saves more often than a minimum interval.

use std::time::Duration;
use web_time::Instant;

use crate::constants::{AUTO_SAVE_DEBOUNCE, AUTO_SAVE_MIN_INTERVAL};

/// Decides when pending changes should be written.
///
/// Callers pass the current time explicitly so the policy can be driven
/// from an event loop tick or a test clock.
#[derive(Debug, Clone)]
pub struct AutoSave {
    /// Quiet period required after the last change.
    debounce: Duration,

    /// Minimum time between two saves.
    min_interval: Duration,

    /// When the last save was attempted.
    last_save: Option<Instant>,

    /// When the most recent unsaved change happened.
    last_change: Option<Instant>,

    /// Changes since the last successful save.
    pending: usize,

    enabled: bool,
}

impl AutoSave {
    /// Scheduler with the default debounce and interval.
    pub fn new() -> Self {
        Self {
            debounce: AUTO_SAVE_DEBOUNCE,
            min_interval: AUTO_SAVE_MIN_INTERVAL,
            last_save: None,
            last_change: None,
            pending: 0,
            enabled: true,
        }
    }

    /// Scheduler that never reports a save as due.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Set the quiet period after the last change.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the minimum interval between saves.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Record a change at `now`.
    pub fn note_change(&mut self, now: Instant) {
        self.pending += 1;
        self.last_change = Some(now);
        log::trace!("Auto-save: {} pending change(s)", self.pending);
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.pending > 0
    }

    /// Number of changes since the last successful save.
    pub fn pending_changes(&self) -> usize {
        self.pending
    }

    /// Whether a save should happen at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        if !self.enabled || self.pending == 0 {
            return false;
        }

        let Some(last_change) = self.last_change else {
            return false;
        };
        if now.saturating_duration_since(last_change) < self.debounce {
            return false;
        }

        match self.last_save {
            Some(last_save) => now.saturating_duration_since(last_save) >= self.min_interval,
            None => true,
        }
    }

    /// Record a successful save at `now`.
    pub fn saved(&mut self, now: Instant) {
        self.last_save = Some(now);
        self.last_change = None;
        self.pending = 0;
        log::trace!("Auto-save: saved");
    }

    /// Record a failed save at `now`. Changes stay pending and the next
    /// attempt waits for the minimum interval.
    pub fn failed(&mut self, now: Instant) {
        self.last_save = Some(now);
        log::trace!("Auto-save: save failed, {} change(s) still pending", self.pending);
    }

    /// Check if auto-save is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new()
    }
}
