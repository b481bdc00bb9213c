#![forbid(unsafe_code)]

//! Runtime: scene navigation, pointer presence, and session orchestration.
//!
//! # Key Components
//!
//! - [`Session`] - Owns all presentation state and routes input
//! - [`SceneNavigator`] - Linear scene state machine
//! - [`GhostCursor`] - Pointer-following cursor with idle and hover states
//! - [`LabelChannel`] - Shared pointer label slot
//! - [`SessionSimulator`] - Deterministic virtual-clock test harness

pub mod config;
pub mod ghost_cursor;
pub mod label;
pub mod magnet;
pub mod navigator;
pub mod scene;
pub mod scroll;
pub mod session;
pub mod simulator;
pub mod sound;

pub use config::{ConfigError, FolioConfig, FolioConfigParse};
pub use ghost_cursor::{CursorFrame, CursorState, GhostCursor};
pub use label::{HoverLabel, LabelChannel, LabelGuard};
pub use magnet::MagneticAnchor;
pub use navigator::{BackShortcut, NavigationState, SceneNavigator, Transition};
pub use scene::{Direction, SCENE_ORDER, Scene, Track, UnknownScene, UnknownTrack};
pub use scroll::ScrollState;
pub use session::{Command, Hit, SceneSurface, Session, SessionView};
pub use simulator::{ScriptedSurface, SessionSimulator};
pub use sound::{SoundBackend, SoundCue, SoundError, SoundPlayer};
