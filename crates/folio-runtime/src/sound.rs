#![forbid(unsafe_code)]

//! Fire-and-forget sound cues.
//!
//! The presentation plays short cues on transitions and actions. Playback
//! itself belongs to a [`SoundBackend`]; the [`SoundPlayer`] in front of it
//! swallows every failure (a blocked or missing audio device must never
//! interrupt navigation) and logs it at debug level.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Default playback volume for every cue.
pub const DEFAULT_VOLUME: f32 = 0.2;

/// A named sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Short click for entering the story and the contact action.
    Pop,
    /// Swoosh for scene changes.
    Whoosh,
}

impl SoundCue {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pop => "pop",
            Self::Whoosh => "whoosh",
        }
    }

    /// Asset path the cue is loaded from.
    #[must_use]
    pub const fn asset_path(self) -> &'static str {
        match self {
            Self::Pop => "/sounds/pop.mp3",
            Self::Whoosh => "/sounds/whoosh.mp3",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a backend could not play a cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// No output device, or playback is not permitted yet.
    Unavailable,
    /// The cue's asset could not be loaded.
    MissingAsset(&'static str),
    /// Backend-specific failure.
    Backend(String),
}

impl fmt::Display for SoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "audio output unavailable"),
            Self::MissingAsset(path) => write!(f, "sound asset not found: {path}"),
            Self::Backend(msg) => write!(f, "audio backend error: {msg}"),
        }
    }
}

impl std::error::Error for SoundError {}

/// Something that can play a cue.
pub trait SoundBackend {
    fn try_play(&mut self, cue: SoundCue, volume: f32) -> Result<(), SoundError>;
}

/// Backend that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundBackend for Silent {
    fn try_play(&mut self, _cue: SoundCue, _volume: f32) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Shared, readable log of cues that reached a [`Recording`] backend.
#[derive(Debug, Clone, Default)]
pub struct SoundLog {
    cues: Rc<RefCell<Vec<SoundCue>>>,
}

impl SoundLog {
    #[must_use]
    pub fn cues(&self) -> Vec<SoundCue> {
        self.cues.borrow().clone()
    }

    #[must_use]
    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.borrow().iter().filter(|c| **c == cue).count()
    }

    #[must_use]
    pub fn last(&self) -> Option<SoundCue> {
        self.cues.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.cues.borrow_mut().clear();
    }
}

/// Backend that records cue requests and optionally fails them.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    log: SoundLog,
    failure: Option<SoundError>,
}

impl Recording {
    /// A recording backend and the log it writes to.
    #[must_use]
    pub fn new() -> (Self, SoundLog) {
        let log = SoundLog::default();
        (
            Self {
                log: log.clone(),
                failure: None,
            },
            log,
        )
    }

    /// Record every request, then fail it with `error` (builder).
    #[must_use]
    pub fn failing(mut self, error: SoundError) -> Self {
        self.failure = Some(error);
        self
    }
}

impl SoundBackend for Recording {
    fn try_play(&mut self, cue: SoundCue, _volume: f32) -> Result<(), SoundError> {
        self.log.cues.borrow_mut().push(cue);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Plays cues through a backend, never surfacing failures.
pub struct SoundPlayer {
    backend: Box<dyn SoundBackend>,
    volume: f32,
    failures: u64,
}

impl fmt::Debug for SoundPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundPlayer")
            .field("volume", &self.volume)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}

impl Default for SoundPlayer {
    fn default() -> Self {
        Self::silent()
    }
}

impl SoundPlayer {
    #[must_use]
    pub fn new(backend: impl SoundBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            volume: DEFAULT_VOLUME,
            failures: 0,
        }
    }

    #[must_use]
    pub fn silent() -> Self {
        Self::new(Silent)
    }

    /// Set playback volume, clamped to [0, 1] (builder).
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play `cue`. Failures are logged and counted, never returned.
    pub fn play(&mut self, cue: SoundCue) {
        match self.backend.try_play(cue, self.volume) {
            Ok(()) => tracing::trace!(cue = cue.name(), "sound played"),
            Err(error) => {
                self.failures += 1;
                tracing::debug!(cue = cue.name(), %error, "sound playback failed");
            }
        }
    }

    /// Number of swallowed playback failures (diagnostic).
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_assets() {
        assert_eq!(SoundCue::Pop.asset_path(), "/sounds/pop.mp3");
        assert_eq!(SoundCue::Whoosh.asset_path(), "/sounds/whoosh.mp3");
    }

    #[test]
    fn default_volume_is_low() {
        let player = SoundPlayer::silent();
        assert!((player.volume() - 0.2).abs() < f32::EPSILON);
        assert!((player.with_volume(3.0).volume() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn recording_backend_logs_cues() {
        let (backend, log) = Recording::new();
        let mut player = SoundPlayer::new(backend);
        player.play(SoundCue::Whoosh);
        player.play(SoundCue::Pop);
        assert_eq!(log.cues(), vec![SoundCue::Whoosh, SoundCue::Pop]);
        assert_eq!(log.count(SoundCue::Pop), 1);
        assert_eq!(log.last(), Some(SoundCue::Pop));
        assert_eq!(player.failures(), 0);
    }

    #[test]
    fn failures_are_swallowed_and_counted() {
        let (backend, log) = Recording::new();
        let mut player = SoundPlayer::new(backend.failing(SoundError::Unavailable));
        player.play(SoundCue::Whoosh);
        player.play(SoundCue::Whoosh);
        assert_eq!(player.failures(), 2);
        assert_eq!(log.count(SoundCue::Whoosh), 2);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SoundError::MissingAsset("/sounds/pop.mp3").to_string(),
            "sound asset not found: /sounds/pop.mp3"
        );
    }
}
