#![forbid(unsafe_code)]

//! Scene identities, traversal order, and presentation track.

use std::fmt;
use std::str::FromStr;

/// One full-screen chapter of the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Scene {
    #[default]
    Intro,
    AboutMe,
    Core,
    Proof,
    Tools,
    Resolution,
}

/// Fixed, total traversal order.
pub const SCENE_ORDER: [Scene; 6] = [
    Scene::Intro,
    Scene::AboutMe,
    Scene::Core,
    Scene::Proof,
    Scene::Tools,
    Scene::Resolution,
];

impl Scene {
    /// First scene of the story.
    pub const FIRST: Scene = SCENE_ORDER[0];

    /// Position in [`SCENE_ORDER`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Intro => 0,
            Self::AboutMe => 1,
            Self::Core => 2,
            Self::Proof => 3,
            Self::Tools => 4,
            Self::Resolution => 5,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        SCENE_ORDER.get(index).copied()
    }

    /// The scene before this one, or `None` on the first scene.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// The scene this one links forward to, or `None` at the end.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub const fn is_first(self) -> bool {
        self.index() == 0
    }

    /// Upper-case identifier used in logs and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Intro => "INTRO",
            Self::AboutMe => "ABOUTME",
            Self::Core => "CORE",
            Self::Proof => "PROOF",
            Self::Tools => "TOOLS",
            Self::Resolution => "RESOLUTION",
        }
    }

    /// Whether the scene draws its own back control next to its content.
    #[must_use]
    pub const fn has_inline_back(self) -> bool {
        matches!(
            self,
            Self::AboutMe | Self::Core | Self::Proof | Self::Tools
        )
    }

    /// Whether the floating back control is shown over this scene.
    #[must_use]
    pub const fn shows_back_control(self) -> bool {
        !self.is_first() && !self.has_inline_back()
    }

    /// Pointer label written to the label channel while the scene is mounted.
    #[must_use]
    pub const fn ambient_label(self) -> Option<&'static str> {
        match self {
            Self::Intro => Some("Click to Enter"),
            Self::Resolution => Some("Get in Touch"),
            _ => None,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scene name that is not part of the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScene {
    pub name: String,
}

impl fmt::Display for UnknownScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scene '{}' (expected intro|aboutme|core|proof|tools|resolution)",
            self.name
        )
    }
}

impl std::error::Error for UnknownScene {}

impl FromStr for Scene {
    type Err = UnknownScene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SCENE_ORDER
            .iter()
            .copied()
            .find(|scene| scene.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownScene {
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which way the last transition moved. Only selects enter/exit motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Backward,
    #[default]
    Still,
    Forward,
}

impl Direction {
    /// Signed form: -1, 0 or 1.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Backward => -1,
            Self::Still => 0,
            Self::Forward => 1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.as_i8()
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

/// Presentation mode: the same content, recolored and re-copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Track {
    #[default]
    Design,
    Logic,
}

impl Track {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Design => Self::Logic,
            Self::Logic => Self::Design,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Logic => "logic",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track name other than `design` or `logic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrack {
    pub name: String,
}

impl fmt::Display for UnknownTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown track '{}' (expected design|logic)", self.name)
    }
}

impl std::error::Error for UnknownTrack {}

impl FromStr for Track {
    type Err = UnknownTrack;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "design" => Ok(Self::Design),
            "logic" => Ok(Self::Logic),
            _ => Err(UnknownTrack {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_indices() {
        for (i, scene) in SCENE_ORDER.iter().enumerate() {
            assert_eq!(scene.index(), i);
            assert_eq!(Scene::from_index(i), Some(*scene));
        }
        assert_eq!(Scene::from_index(SCENE_ORDER.len()), None);
    }

    #[test]
    fn previous_and_next_at_the_edges() {
        assert_eq!(Scene::Intro.previous(), None);
        assert_eq!(Scene::AboutMe.previous(), Some(Scene::Intro));
        assert_eq!(Scene::Tools.next(), Some(Scene::Resolution));
        assert_eq!(Scene::Resolution.next(), None);
    }

    #[test]
    fn floating_back_control_only_on_resolution() {
        let shown: Vec<_> = SCENE_ORDER
            .iter()
            .copied()
            .filter(|s| s.shows_back_control())
            .collect();
        assert_eq!(shown, vec![Scene::Resolution]);
    }

    #[test]
    fn ambient_labels() {
        assert_eq!(Scene::Intro.ambient_label(), Some("Click to Enter"));
        assert_eq!(Scene::Resolution.ambient_label(), Some("Get in Touch"));
        assert_eq!(Scene::Core.ambient_label(), None);
    }

    #[test]
    fn parse_scene_names_case_insensitively() {
        assert_eq!("proof".parse::<Scene>(), Ok(Scene::Proof));
        assert_eq!(" AboutMe ".parse::<Scene>(), Ok(Scene::AboutMe));
        assert_eq!("RESOLUTION".parse::<Scene>(), Ok(Scene::Resolution));
    }

    #[test]
    fn unknown_scene_is_an_error_not_a_default() {
        let err = "epilogue".parse::<Scene>().unwrap_err();
        assert_eq!(err.name, "epilogue");
        assert!(err.to_string().contains("epilogue"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for scene in SCENE_ORDER {
            assert_eq!(scene.to_string().parse::<Scene>(), Ok(scene));
        }
    }

    #[test]
    fn direction_signs() {
        assert_eq!(Direction::Backward.as_i8(), -1);
        assert_eq!(Direction::default().as_i8(), 0);
        assert_eq!(i8::from(Direction::Forward), 1);
    }

    #[test]
    fn track_toggle_and_parse() {
        assert_eq!(Track::default(), Track::Design);
        assert_eq!(Track::Design.toggled(), Track::Logic);
        assert_eq!(Track::Logic.toggled(), Track::Design);
        assert_eq!("LOGIC".parse::<Track>(), Ok(Track::Logic));
        assert!("blueprint".parse::<Track>().is_err());
    }
}
