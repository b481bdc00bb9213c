//! Hover tracking over sequences of hit-test results.

use folio_core::event::HoverEvent;
use folio_core::hit::{ElementId, ElementKind, HitTarget};
use folio_core::hover::HoverTracker;
use proptest::prelude::*;

fn target(id: u64) -> HitTarget {
    let kind = match id % 3 {
        0 => ElementKind::Button,
        1 => ElementKind::Link,
        _ => ElementKind::Other,
    };
    HitTarget::new(ElementId(id), kind)
}

#[test]
fn moving_between_siblings_emits_leave_then_enter() {
    let mut tracker = HoverTracker::new();
    tracker.update(Some(target(1)));
    let events = tracker.update(Some(target(2)));
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], HoverEvent::Leave(t) if t.id() == ElementId(1)));
    assert!(matches!(&events[1], HoverEvent::Enter(t) if t.id() == ElementId(2)));
}

#[test]
fn nested_text_inside_a_button_is_interactive() {
    let label = HitTarget::new(ElementId(9), ElementKind::Other).within(ElementKind::Button);
    assert!(label.is_interactive());
    let plain = HitTarget::new(ElementId(10), ElementKind::Other);
    assert!(!plain.is_interactive());
}

proptest! {
    /// Enters and leaves always alternate, and the tracker's current element
    /// matches the last hit.
    #[test]
    fn enter_leave_alternate(hits in prop::collection::vec(prop::option::of(0u64..5), 1..60)) {
        let mut tracker = HoverTracker::new();
        let mut inside: Option<ElementId> = None;
        for hit in hits {
            for event in tracker.update(hit.map(target)) {
                match event {
                    HoverEvent::Enter(t) => {
                        prop_assert!(inside.is_none());
                        inside = Some(t.id());
                    }
                    HoverEvent::Leave(t) => {
                        prop_assert_eq!(inside, Some(t.id()));
                        inside = None;
                    }
                }
            }
            prop_assert_eq!(inside, hit.map(ElementId));
            prop_assert_eq!(tracker.current().map(HitTarget::id), inside);
        }
    }
}
