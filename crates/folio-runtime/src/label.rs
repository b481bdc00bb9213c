#![forbid(unsafe_code)]

//! Shared pointer label slot.
//!
//! A single last-writer-wins slot read by the ghost cursor and written by
//! scenes and controls. Writers that want their text removed when they go
//! away take a [`LabelGuard`] (scene lifetime) or a [`HoverLabel`] (pointer
//! enter/leave). Both remember a writer token, so removing a writer only
//! clears the slot if no later writer has taken it over.

use std::cell::RefCell;
use std::rc::Rc;

/// Token for writes made through [`LabelChannel::set`].
const ANONYMOUS: u64 = 0;

#[derive(Debug, Default)]
struct Slot {
    text: Option<String>,
    owner: u64,
    next_token: u64,
    revision: u64,
}

impl Slot {
    fn write(&mut self, owner: u64, text: Option<&str>) {
        self.text = text.filter(|t| !t.is_empty()).map(str::to_owned);
        self.owner = owner;
        self.revision += 1;
    }

    fn token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }
}

/// Cloneable handle to the label slot.
#[derive(Debug, Clone, Default)]
pub struct LabelChannel {
    slot: Rc<RefCell<Slot>>,
}

impl LabelChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current label. Empty text reads as `None`.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.slot.borrow().text.clone()
    }

    /// Whether a label should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.slot.borrow().text.is_some()
    }

    /// Replace the label. `None` and `Some("")` both clear it.
    pub fn set(&self, text: Option<&str>) {
        tracing::trace!(label = ?text, "label set");
        self.slot.borrow_mut().write(ANONYMOUS, text);
    }

    pub fn clear(&self) {
        self.set(None);
    }

    /// Write counter, bumped on every write including clears.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.slot.borrow().revision
    }

    /// Write `text` now and clear it when the guard drops, unless another
    /// writer replaced it in the meantime.
    #[must_use]
    pub fn guard(&self, text: &str) -> LabelGuard {
        let token = self.slot.borrow_mut().token();
        self.write_owned(token, Some(text));
        LabelGuard {
            channel: self.clone(),
            token,
        }
    }

    /// A writer that shows `text` while the pointer is over its control.
    #[must_use]
    pub fn hover_label(&self, text: impl Into<String>) -> HoverLabel {
        let token = self.slot.borrow_mut().token();
        HoverLabel {
            channel: self.clone(),
            token,
            text: text.into(),
        }
    }

    fn write_owned(&self, token: u64, text: Option<&str>) {
        tracing::trace!(label = ?text, token, "label set");
        self.slot.borrow_mut().write(token, text);
    }

    fn owned_by(&self, token: u64) -> bool {
        let slot = self.slot.borrow();
        slot.owner == token && slot.text.is_some()
    }

    fn clear_if_owner(&self, token: u64) -> bool {
        if self.owned_by(token) {
            self.write_owned(token, None);
            true
        } else {
            false
        }
    }
}

/// Keeps a label written for as long as the guard lives.
#[derive(Debug)]
pub struct LabelGuard {
    channel: LabelChannel,
    token: u64,
}

impl LabelGuard {
    /// Whether the guard's text is still the one on display.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.channel.owned_by(self.token)
    }
}

impl Drop for LabelGuard {
    fn drop(&mut self) {
        self.channel.clear_if_owner(self.token);
    }
}

/// Enter/leave label writer for an interactive control.
#[derive(Debug)]
pub struct HoverLabel {
    channel: LabelChannel,
    token: u64,
    text: String,
}

impl HoverLabel {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pointer entered the control.
    pub fn enter(&self) {
        self.channel.write_owned(self.token, Some(&self.text));
    }

    /// Pointer left the control. Clears only this writer's text.
    pub fn leave(&self) -> bool {
        self.channel.clear_if_owner(self.token)
    }
}

impl Drop for HoverLabel {
    fn drop(&mut self) {
        self.channel.clear_if_owner(self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_clear() {
        let channel = LabelChannel::new();
        channel.set(Some("X"));
        assert_eq!(channel.get().as_deref(), Some("X"));
        assert!(channel.is_visible());
        channel.set(None);
        assert_eq!(channel.get(), None);
        assert!(!channel.is_visible());
    }

    #[test]
    fn empty_string_means_no_label() {
        let channel = LabelChannel::new();
        channel.set(Some(""));
        assert_eq!(channel.get(), None);
        assert!(!channel.is_visible());
    }

    #[test]
    fn last_writer_wins() {
        let channel = LabelChannel::new();
        channel.set(Some("Close"));
        channel.set(Some("Prev"));
        assert_eq!(channel.get().as_deref(), Some("Prev"));
    }

    #[test]
    fn clones_share_the_slot() {
        let channel = LabelChannel::new();
        let other = channel.clone();
        other.set(Some("Shared"));
        assert_eq!(channel.get().as_deref(), Some("Shared"));
    }

    #[test]
    fn revision_counts_writes() {
        let channel = LabelChannel::new();
        let r0 = channel.revision();
        channel.set(Some("a"));
        channel.clear();
        assert_eq!(channel.revision(), r0 + 2);
    }

    #[test]
    fn guard_clears_on_drop() {
        let channel = LabelChannel::new();
        {
            let guard = channel.guard("Click to Enter");
            assert!(guard.is_current());
            assert_eq!(channel.get().as_deref(), Some("Click to Enter"));
        }
        assert_eq!(channel.get(), None);
    }

    #[test]
    fn guard_drop_keeps_later_writer() {
        let channel = LabelChannel::new();
        let guard = channel.guard("Get in Touch");
        channel.set(Some("Copy email"));
        assert!(!guard.is_current());
        drop(guard);
        assert_eq!(channel.get().as_deref(), Some("Copy email"));
    }

    #[test]
    fn hover_label_enter_leave() {
        let channel = LabelChannel::new();
        let prev = channel.hover_label("Prev");
        prev.enter();
        assert_eq!(channel.get().as_deref(), Some("Prev"));
        assert!(prev.leave());
        assert_eq!(channel.get(), None);
    }

    #[test]
    fn hover_leave_does_not_clear_newer_label() {
        let channel = LabelChannel::new();
        let prev = channel.hover_label("Prev");
        let close = channel.hover_label("Close");
        prev.enter();
        close.enter();
        assert!(!prev.leave());
        assert_eq!(channel.get().as_deref(), Some("Close"));
    }

    #[test]
    fn hover_label_drop_while_hovered_clears() {
        let channel = LabelChannel::new();
        {
            let close = channel.hover_label("Close");
            close.enter();
        }
        assert_eq!(channel.get(), None);
    }

    #[test]
    fn hover_leave_does_not_restore_ambient_label() {
        // Last writer wins: leaving a control clears, it does not restore
        // the scene's ambient label.
        let channel = LabelChannel::new();
        let _scene = channel.guard("Get in Touch");
        let button = channel.hover_label("Copy");
        button.enter();
        button.leave();
        assert_eq!(channel.get(), None);
    }
}
