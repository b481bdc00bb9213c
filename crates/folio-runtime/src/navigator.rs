#![forbid(unsafe_code)]

//! Linear scene navigation.
//!
//! [`SceneNavigator`] is pure state: it records the current scene and the
//! direction of the last move and reports each move as a [`Transition`]. The
//! side effects of a transition (scroll reset, scroll lock, sound) belong to
//! the session that drives it.
//!
//! [`BackShortcut`] is the global Escape/Backspace binding. It is bound to
//! one scene position and one version; the session re-syncs it after every
//! move so a binding made for an old position never fires.

use folio_core::event::{KeyCode, KeyEvent};

use crate::scene::{Direction, SCENE_ORDER, Scene};

/// Current scene plus the direction that reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current: Scene,
    pub direction: Direction,
}

/// One navigator move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Scene,
    pub to: Scene,
    pub direction: Direction,
}

impl Transition {
    /// Whether the move actually changed the rendered scene.
    #[must_use]
    pub fn changes_scene(&self) -> bool {
        self.from != self.to
    }
}

/// Owner of the [`NavigationState`].
#[derive(Debug, Clone, Default)]
pub struct SceneNavigator {
    state: NavigationState,
}

impl SceneNavigator {
    /// Start on the first scene with no direction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on `scene` with no direction (deep start from the command line).
    #[must_use]
    pub fn starting_at(scene: Scene) -> Self {
        Self {
            state: NavigationState {
                current: scene,
                direction: Direction::Still,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Scene {
        self.state.current
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Index of the current scene in [`SCENE_ORDER`].
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.state.current.index()
    }

    /// Jump to any scene. Order is not validated.
    pub fn go_to(&mut self, scene: Scene, direction: Direction) -> Transition {
        let from = self.state.current;
        self.state = NavigationState {
            current: scene,
            direction,
        };
        tracing::debug!(
            from = from.name(),
            to = scene.name(),
            direction = direction.as_i8(),
            "scene transition"
        );
        Transition {
            from,
            to: scene,
            direction,
        }
    }

    /// Step back one scene. A no-op on the first scene.
    pub fn go_back(&mut self) -> Option<Transition> {
        let previous = self.state.current.previous()?;
        Some(self.go_to(previous, Direction::Backward))
    }

    /// Follow the current scene's forward link. A no-op on the last scene.
    pub fn advance(&mut self) -> Option<Transition> {
        let next = self.state.current.next()?;
        Some(self.go_to(next, Direction::Forward))
    }

    /// Start the story over.
    pub fn reset(&mut self) -> Transition {
        self.go_to(SCENE_ORDER[0], Direction::Forward)
    }
}

// ---------------------------------------------------------------------------
// Back shortcut
// ---------------------------------------------------------------------------

/// An installed Escape/Backspace binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutBinding {
    /// Scene index the binding was installed for.
    pub index: usize,
    /// Install counter; every re-install gets a fresh version.
    pub version: u64,
}

/// Global "go back" keyboard shortcut.
#[derive(Debug, Default)]
pub struct BackShortcut {
    binding: Option<ShortcutBinding>,
    next_version: u64,
}

impl BackShortcut {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-install the binding for the navigator's current position.
    ///
    /// Installs when the position changed, removes it on the first scene,
    /// and leaves an up-to-date binding alone.
    pub fn sync(&mut self, navigator: &SceneNavigator) {
        let index = navigator.index();
        if index == 0 {
            if self.binding.take().is_some() {
                tracing::trace!("back shortcut removed on first scene");
            }
            return;
        }
        if self.binding.is_some_and(|b| b.index == index) {
            return;
        }
        self.next_version += 1;
        let binding = ShortcutBinding {
            index,
            version: self.next_version,
        };
        tracing::trace!(index, version = binding.version, "back shortcut installed");
        self.binding = Some(binding);
    }

    /// Handle a key. Returns the transition when the shortcut fired.
    ///
    /// A binding whose position no longer matches the navigator is stale and
    /// never acts.
    pub fn handle(&self, key: &KeyEvent, navigator: &mut SceneNavigator) -> Option<Transition> {
        if !key.is_down() || !matches!(key.code, KeyCode::Escape | KeyCode::Backspace) {
            return None;
        }
        let binding = self.binding?;
        if binding.index != navigator.index() {
            tracing::debug!(
                bound = binding.index,
                current = navigator.index(),
                "stale back shortcut ignored"
            );
            return None;
        }
        navigator.go_back()
    }

    /// Remove the binding (session teardown).
    pub fn teardown(&mut self) {
        self.binding = None;
    }

    #[must_use]
    pub fn binding(&self) -> Option<ShortcutBinding> {
        self.binding
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.binding.is_some()
    }
}
