//! Cancellable debounce deadline.

use std::time::{Duration, Instant};

/// Collapses bursts of changes into one notification after a quiet window.
///
/// This is a deadline, not a timer thread: each change re-arms the deadline,
/// and the owner polls it cooperatively. At most one deadline is ever
/// pending; re-arming supersedes the previous one.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The quiet window between the last change and the notification.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Start (or restart) the quiet window from now.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Drop any pending deadline without firing.
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Whether a notification is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once the quiet window has elapsed since the last `arm`.
    /// Firing disarms; a fresh `arm` is needed before the next fire.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
