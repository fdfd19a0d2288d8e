//! Double-tap / double-click recognition.
//!
//! Two presses on the same target within a short window count as one
//! "activate" gesture.  The detector carries its own state and is handed to
//! the widgets that need it, so two views never share a tap history.

use std::time::{Duration, Instant};

/// Window used when nothing else is configured.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Is `now` close enough to `last` to complete a double tap?
pub fn is_double_tap(last: Option<Instant>, now: Instant, window: Duration) -> bool {
    match last {
        Some(prev) => now
            .checked_duration_since(prev)
            .is_some_and(|elapsed| elapsed <= window),
        None => false,
    }
}

/// Stateful detector keyed by target (entry index, cell position, ...).
#[derive(Debug, Clone)]
pub struct DoubleTap<K = usize> {
    window: Duration,
    last: Option<(K, Instant)>,
}

impl<K: PartialEq> DoubleTap<K> {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a tap on `key` at `at`.  Returns `true` when it completes a
    /// double tap; the history is then cleared so a third tap starts over.
    pub fn tap(&mut self, key: K, at: Instant) -> bool {
        let last_at = match &self.last {
            Some((last_key, t)) if *last_key == key => Some(*t),
            _ => None,
        };
        if is_double_tap(last_at, at, self.window) {
            self.last = None;
            true
        } else {
            self.last = Some((key, at));
            false
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl<K: PartialEq> Default for DoubleTap<K> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
