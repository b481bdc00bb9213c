#![forbid(unsafe_code)]

//! Sound backend for terminals: cues become a status-line indicator and,
//! optionally, the terminal bell.

use std::cell::Cell;
use std::rc::Rc;

use folio_runtime::sound::{SoundBackend, SoundCue, SoundError};

/// Shared view of the most recent cue a [`Chime`] accepted.
#[derive(Debug, Clone, Default)]
pub struct ChimeIndicator {
    last: Rc<Cell<Option<SoundCue>>>,
    played: Rc<Cell<u64>>,
}

impl ChimeIndicator {
    #[must_use]
    pub fn last(&self) -> Option<SoundCue> {
        self.last.get()
    }

    #[must_use]
    pub fn played(&self) -> u64 {
        self.played.get()
    }
}

/// Backend that records cues for display.
///
/// With the bell enabled, `pop` also rings BEL on the next render. Volume
/// below the audible floor mutes the bell but still records the cue.
#[derive(Debug)]
pub struct Chime {
    indicator: ChimeIndicator,
    bell: bool,
    pending_bell: Rc<Cell<bool>>,
}

impl Chime {
    pub fn new(bell: bool) -> (Self, ChimeIndicator) {
        let indicator = ChimeIndicator::default();
        let chime = Self {
            indicator: indicator.clone(),
            bell,
            pending_bell: Rc::new(Cell::new(false)),
        };
        (chime, indicator)
    }

    /// Handle the renderer polls to ring the bell once.
    #[must_use]
    pub fn bell_handle(&self) -> BellHandle {
        BellHandle(Rc::clone(&self.pending_bell))
    }
}

impl SoundBackend for Chime {
    fn try_play(&mut self, cue: SoundCue, volume: f32) -> Result<(), SoundError> {
        self.indicator.last.set(Some(cue));
        self.indicator.played.set(self.indicator.played.get() + 1);
        if self.bell && cue == SoundCue::Pop && volume > 0.0 {
            self.pending_bell.set(true);
        }
        Ok(())
    }
}

/// One-shot bell request shared between [`Chime`] and the renderer.
#[derive(Debug, Clone, Default)]
pub struct BellHandle(Rc<Cell<bool>>);

impl BellHandle {
    /// Returns `true` once per requested bell.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}
