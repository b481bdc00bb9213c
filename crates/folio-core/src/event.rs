#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! These are the events the session consumes, independent of where they came
//! from. All derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are 0-indexed cells.
//! - `KeyEventKind` defaults to `Press` when not available from the terminal.
//! - Hover events are not produced by the terminal; the host derives them from
//!   hit-test results via [`HoverTracker`](crate::hover::HoverTracker).

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

use crate::hit::HitTarget;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A positional pointer event.
    Pointer(PointerEvent),

    /// The element under the pointer changed.
    Hover(HoverEvent),

    /// Surface was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),

    /// A frame tick from the host loop.
    Tick,
}

impl Event {
    /// Convert a Crossterm event into a folio [`Event`].
    ///
    /// Returns `None` for events with no folio counterpart (paste, unknown
    /// keys).
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Whether the key went down (press or auto-repeat).
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key (F1-F24).
    F(u8),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held (repeat event).
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A positional pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What the pointer did.
    pub kind: PointerEventKind,
    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,
    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shorthand for a plain move.
    #[must_use]
    pub const fn moved(x: u16, y: u16) -> Self {
        Self::new(PointerEventKind::Moved, x, y)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Whether this event changes the pointer position (move or drag).
    #[must_use]
    pub const fn is_motion(&self) -> bool {
        matches!(
            self.kind,
            PointerEventKind::Moved | PointerEventKind::Drag(_)
        )
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),
    /// Button released.
    Up(PointerButton),
    /// Moved while a button is held.
    Drag(PointerButton),
    /// Moved with no button held.
    Moved,
    /// Wheel scrolled up.
    ScrollUp,
    /// Wheel scrolled down.
    ScrollDown,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button (wheel click).
    Middle,
}

/// The element under the pointer changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HoverEvent {
    /// The pointer entered this element.
    Enter(HitTarget),
    /// The pointer left this element.
    Leave(HitTarget),
}

impl HoverEvent {
    /// The element this event refers to.
    #[must_use]
    pub fn target(&self) -> &HitTarget {
        match self {
            Self::Enter(target) | Self::Leave(target) => target,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key_event(key).map(Event::Key),
        cte::Event::Mouse(mouse) => map_mouse_event(mouse).map(Event::Pointer),
        cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        cte::Event::FocusGained => Some(Event::Focus(true)),
        cte::Event::FocusLost => Some(Event::Focus(false)),
        cte::Event::Paste(_) => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    let modifiers = map_modifiers(event.modifiers);
    let kind = map_key_kind(event.kind);
    Some(KeyEvent {
        code,
        modifiers,
        kind,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_kind(kind: cte::KeyEventKind) -> KeyEventKind {
    match kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::PageUp => Some(KeyCode::PageUp),
        cte::KeyCode::PageDown => Some(KeyCode::PageDown),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::F(n) => Some(KeyCode::F(n)),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_event(event: cte::MouseEvent) -> Option<PointerEvent> {
    let kind = match event.kind {
        cte::MouseEventKind::Down(button) => PointerEventKind::Down(map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => PointerEventKind::Up(map_mouse_button(button)),
        cte::MouseEventKind::Drag(button) => PointerEventKind::Drag(map_mouse_button(button)),
        cte::MouseEventKind::Moved => PointerEventKind::Moved,
        cte::MouseEventKind::ScrollUp => PointerEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown => PointerEventKind::ScrollDown,
        cte::MouseEventKind::ScrollLeft | cte::MouseEventKind::ScrollRight => return None,
    };

    Some(
        PointerEvent::new(kind, event.column, event.row)
            .with_modifiers(map_modifiers(event.modifiers)),
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_button(button: cte::MouseButton) -> PointerButton {
    match button {
        cte::MouseButton::Left => PointerButton::Left,
        cte::MouseButton::Right => PointerButton::Right,
        cte::MouseButton::Middle => PointerButton::Middle,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::hit::{ElementId, ElementKind};
    use crossterm::event as ct_event;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('q'));
        assert!(event.is_char('q'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn key_event_down_kinds() {
        assert!(KeyEvent::new(KeyCode::Escape).is_down());
        assert!(
            KeyEvent::new(KeyCode::Escape)
                .with_kind(KeyEventKind::Repeat)
                .is_down()
        );
        assert!(
            !KeyEvent::new(KeyCode::Escape)
                .with_kind(KeyEventKind::Release)
                .is_down()
        );
    }

    #[test]
    fn key_event_ctrl() {
        let event = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(event.ctrl());
        assert!(!KeyEvent::new(KeyCode::Char('c')).ctrl());
    }

    #[test]
    fn pointer_event_motion() {
        assert!(PointerEvent::moved(1, 2).is_motion());
        assert!(PointerEvent::new(PointerEventKind::Drag(PointerButton::Left), 0, 0).is_motion());
        assert!(!PointerEvent::new(PointerEventKind::Down(PointerButton::Left), 0, 0).is_motion());
        assert_eq!(PointerEvent::moved(3, 4).position(), (3, 4));
    }

    #[test]
    fn hover_event_target() {
        let target = HitTarget::new(ElementId(5), ElementKind::Link);
        assert_eq!(HoverEvent::Enter(target.clone()).target(), &target);
        assert_eq!(HoverEvent::Leave(target.clone()).target(), &target);
    }

    #[test]
    fn map_modifiers_super_variants() {
        for m in [
            ct_event::KeyModifiers::SUPER,
            ct_event::KeyModifiers::HYPER,
            ct_event::KeyModifiers::META,
        ] {
            assert_eq!(map_modifiers(m), Modifiers::SUPER);
        }
        let combined = ct_event::KeyModifiers::SHIFT | ct_event::KeyModifiers::CONTROL;
        assert_eq!(map_modifiers(combined), Modifiers::SHIFT | Modifiers::CTRL);
    }

    #[test]
    fn map_crossterm_escape_key() {
        let ct = ct_event::Event::Key(ct_event::KeyEvent::new(
            ct_event::KeyCode::Esc,
            ct_event::KeyModifiers::NONE,
        ));
        assert_eq!(
            Event::from_crossterm(ct),
            Some(Event::Key(KeyEvent::new(KeyCode::Escape)))
        );
    }

    #[test]
    fn map_crossterm_mouse_moved() {
        let ct = ct_event::Event::Mouse(ct_event::MouseEvent {
            kind: ct_event::MouseEventKind::Moved,
            column: 12,
            row: 7,
            modifiers: ct_event::KeyModifiers::NONE,
        });
        assert_eq!(
            Event::from_crossterm(ct),
            Some(Event::Pointer(PointerEvent::moved(12, 7)))
        );
    }

    #[test]
    fn map_crossterm_mouse_down() {
        let ct = ct_event::Event::Mouse(ct_event::MouseEvent {
            kind: ct_event::MouseEventKind::Down(ct_event::MouseButton::Left),
            column: 1,
            row: 2,
            modifiers: ct_event::KeyModifiers::ALT,
        });
        let expected = PointerEvent::new(PointerEventKind::Down(PointerButton::Left), 1, 2)
            .with_modifiers(Modifiers::ALT);
        assert_eq!(Event::from_crossterm(ct), Some(Event::Pointer(expected)));
    }

    #[test]
    fn map_crossterm_horizontal_scroll_is_dropped() {
        let ct = ct_event::Event::Mouse(ct_event::MouseEvent {
            kind: ct_event::MouseEventKind::ScrollLeft,
            column: 0,
            row: 0,
            modifiers: ct_event::KeyModifiers::NONE,
        });
        assert_eq!(Event::from_crossterm(ct), None);
    }

    #[test]
    fn map_crossterm_resize_and_focus() {
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Resize(80, 24)),
            Some(Event::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(
            Event::from_crossterm(ct_event::Event::FocusLost),
            Some(Event::Focus(false))
        );
    }

    #[test]
    fn map_crossterm_paste_is_dropped() {
        assert_eq!(
            Event::from_crossterm(ct_event::Event::Paste("hello".into())),
            None
        );
    }
}
