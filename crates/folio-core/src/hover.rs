#![forbid(unsafe_code)]

//! Hover tracking over raw hit-test results.
//!
//! Terminals only report pointer positions. The host hit-tests each
//! position and feeds the result to a [`HoverTracker`], which turns changes
//! of the element under the pointer into `Leave`/`Enter` pairs, the way a
//! browser emits `mouseout`/`mouseover`.
//!
//! # Invariants
//!
//! 1. At most one element is hovered at a time.
//! 2. A `Leave` for the previous element is always emitted before the
//!    `Enter` for the next one.
//! 3. Repeated hits on the same element emit nothing.
//! 4. [`HoverTracker::clear`] emits a `Leave` for any hovered element, so
//!    no `Enter` is left unmatched when the surface is torn down.

use crate::event::HoverEvent;
use crate::hit::HitTarget;

/// Converts hit-test results into hover transitions.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<HitTarget>,
    transitions: u64,
}

impl HoverTracker {
    /// Create a tracker with nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest hit-test result.
    ///
    /// Returns the hover events to dispatch, in order.
    pub fn update(&mut self, hit: Option<HitTarget>) -> Vec<HoverEvent> {
        let unchanged = match (&self.current, &hit) {
            (Some(current), Some(next)) => current.id() == next.id(),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.current.take() {
            events.push(HoverEvent::Leave(previous));
        }
        if let Some(next) = hit {
            self.current = Some(next.clone());
            events.push(HoverEvent::Enter(next));
        }
        self.transitions += 1;
        events
    }

    /// Forget the hovered element, emitting its `Leave` if there was one.
    pub fn clear(&mut self) -> Option<HoverEvent> {
        self.current.take().map(HoverEvent::Leave)
    }

    /// The element currently under the pointer.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&HitTarget> {
        self.current.as_ref()
    }

    /// Number of hover changes observed (diagnostic).
    #[inline]
    #[must_use]
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::{ElementId, ElementKind};

    fn button(id: u64) -> HitTarget {
        HitTarget::new(ElementId(id), ElementKind::Button)
    }

    fn text(id: u64) -> HitTarget {
        HitTarget::new(ElementId(id), ElementKind::Other)
    }

    #[test]
    fn first_hit_emits_enter_only() {
        let mut tracker = HoverTracker::new();
        let events = tracker.update(Some(button(1)));
        assert_eq!(events, vec![HoverEvent::Enter(button(1))]);
        assert_eq!(tracker.current().map(HitTarget::id), Some(ElementId(1)));
    }

    #[test]
    fn same_element_is_silent() {
        let mut tracker = HoverTracker::new();
        tracker.update(Some(button(1)));
        assert!(tracker.update(Some(button(1))).is_empty());
        assert_eq!(tracker.transition_count(), 1);
    }

    #[test]
    fn switching_emits_leave_then_enter() {
        let mut tracker = HoverTracker::new();
        tracker.update(Some(button(1)));
        let events = tracker.update(Some(text(2)));
        assert_eq!(
            events,
            vec![HoverEvent::Leave(button(1)), HoverEvent::Enter(text(2))]
        );
    }

    #[test]
    fn leaving_to_nothing_emits_leave() {
        let mut tracker = HoverTracker::new();
        tracker.update(Some(text(3)));
        assert_eq!(tracker.update(None), vec![HoverEvent::Leave(text(3))]);
        assert!(tracker.current().is_none());
        assert!(tracker.update(None).is_empty());
    }

    #[test]
    fn clear_releases_hovered_element() {
        let mut tracker = HoverTracker::new();
        assert_eq!(tracker.clear(), None);
        tracker.update(Some(button(4)));
        assert_eq!(tracker.clear(), Some(HoverEvent::Leave(button(4))));
        assert!(tracker.current().is_none());
    }
}
