#![forbid(unsafe_code)]

//! Viewport scroll offset and the transient scroll lock.
//!
//! Every scene change resets the viewport to the top and locks scrolling
//! until the enter/exit motion has settled. The lock is a single deadline:
//! locking again while locked pushes the deadline out, it never stacks.

use std::time::{Duration, Instant};

/// Scroll offset plus lock deadline.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: u16,
    release_at: Option<Instant>,
    settle: Duration,
}

impl ScrollState {
    /// Unlocked, at the top, with the given settle duration.
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self {
            offset: 0,
            release_at: None,
            settle,
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.release_at.is_some()
    }

    /// When the current lock will be released.
    #[inline]
    #[must_use]
    pub fn release_at(&self) -> Option<Instant> {
        self.release_at
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Lock scrolling until `now + settle`.
    pub fn lock(&mut self, now: Instant) {
        let release_at = now + self.settle;
        self.release_at = Some(release_at);
        tracing::trace!(settle_ms = self.settle.as_millis() as u64, "scroll locked");
    }

    /// Release the lock once its deadline is reached.
    ///
    /// Returns `true` on the call that released it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(deadline) if now >= deadline => {
                self.release_at = None;
                tracing::trace!("scroll unlocked");
                true
            }
            _ => false,
        }
    }

    /// Scroll by `delta` rows within `0..=max`. Ignored while locked.
    ///
    /// Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: i32, max: u16) -> bool {
        if self.is_locked() {
            return false;
        }
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(max)) as u16;
        let changed = next != self.offset;
        self.offset = next;
        changed
    }
}
