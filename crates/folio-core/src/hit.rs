#![forbid(unsafe_code)]

//! Hit-test results and interactive-element classification.
//!
//! A [`HitTarget`] describes the element under the pointer as an ancestry
//! path, innermost element first. Classification mirrors `closest()`
//! semantics: a target is interactive when it, or any element enclosing it,
//! is a button or a link.

use std::fmt;

/// Stable identity of a hit-testable element on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element role relevant to pointer presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// A push button.
    Button,
    /// A hyperlink.
    Link,
    /// Anything else (text, containers, decoration).
    #[default]
    Other,
}

impl ElementKind {
    /// Whether this element kind is interactive on its own.
    #[inline]
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::Link)
    }
}

/// The element under the pointer together with its ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HitTarget {
    id: ElementId,
    /// Innermost first. Never empty.
    path: Vec<ElementKind>,
}

impl HitTarget {
    /// A target with no enclosing elements.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            path: vec![kind],
        }
    }

    /// Add an enclosing element (builder pattern).
    #[must_use]
    pub fn within(mut self, ancestor: ElementKind) -> Self {
        self.path.push(ancestor);
        self
    }

    /// Identity of the innermost element.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Kind of the innermost element.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.path[0]
    }

    /// Ancestry path, innermost first.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &[ElementKind] {
        &self.path
    }

    /// Whether the target or any of its ancestors is a button or link.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.path.iter().any(|kind| kind.is_interactive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_and_link_are_interactive() {
        assert!(HitTarget::new(ElementId(1), ElementKind::Button).is_interactive());
        assert!(HitTarget::new(ElementId(2), ElementKind::Link).is_interactive());
        assert!(!HitTarget::new(ElementId(3), ElementKind::Other).is_interactive());
    }

    #[test]
    fn descendant_of_button_is_interactive() {
        let icon = HitTarget::new(ElementId(7), ElementKind::Other)
            .within(ElementKind::Other)
            .within(ElementKind::Button);
        assert_eq!(icon.kind(), ElementKind::Other);
        assert!(icon.is_interactive());
    }

    #[test]
    fn plain_nesting_is_not_interactive() {
        let text = HitTarget::new(ElementId(9), ElementKind::Other)
            .within(ElementKind::Other)
            .within(ElementKind::Other);
        assert_eq!(text.path().len(), 3);
        assert!(!text.is_interactive());
    }

    #[test]
    fn element_id_display() {
        assert_eq!(ElementId(42).to_string(), "#42");
    }
}
