use std::time::{Duration, Instant};

/// Coalescing timer: every `schedule` replaces the pending deadline, and `poll` fires once
/// the quiet window has elapsed.
///
/// Time is passed in explicitly, so nothing runs in the background.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Arm (or re-arm) the timer at `now + window`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Returns `true` exactly once per burst, when `now` has reached the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/debounce.rs"]
mod tests;
