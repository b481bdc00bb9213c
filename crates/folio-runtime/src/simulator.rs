#![forbid(unsafe_code)]

//! Deterministic session simulator for testing.
//!
//! `SessionSimulator` drives a [`Session`] without a terminal and with a
//! virtual clock, so timer behavior can be asserted at exact millisecond
//! offsets. Pointer input is hit-tested against a [`ScriptedSurface`] whose
//! regions the test declares up front. Sound cues land in a [`SoundLog`].
//!
//! # Example
//!
//! ```
//! use folio_runtime::scene::Scene;
//! use folio_runtime::simulator::SessionSimulator;
//!
//! let mut sim = SessionSimulator::new();
//! sim.start();
//! sim.press_enter();
//! assert_eq!(sim.session().scene(), Scene::AboutMe);
//! ```

use std::convert::Infallible;
use std::time::{Duration, Instant};

use folio_core::event::{Event, KeyCode, KeyEvent, PointerButton, PointerEvent, PointerEventKind};
use folio_core::geometry::{Point, Rect};

use crate::config::FolioConfig;
use crate::ghost_cursor::CursorFrame;
use crate::navigator::NavigationState;
use crate::scene::{Scene, Track};
use crate::session::{Hit, SceneSurface, Session, SessionView};
use crate::sound::{Recording, SoundError, SoundLog, SoundPlayer};

/// Default virtual frame step used by [`SessionSimulator::advance`].
pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
struct Region {
    scene: Option<Scene>,
    area: Rect,
    hit: Hit,
}

/// A surface made of declared rectangles.
///
/// Later regions sit on top of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSurface {
    regions: Vec<Region>,
    anchors: Vec<(Scene, Point)>,
    scroll_limit: u16,
    frames: Vec<FrameRecord>,
}

impl ScriptedSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region present on `scene` only.
    #[must_use]
    pub fn region(mut self, scene: Scene, area: Rect, hit: Hit) -> Self {
        self.regions.push(Region {
            scene: Some(scene),
            area,
            hit,
        });
        self
    }

    /// Add a region present on every scene (headers, toggles).
    #[must_use]
    pub fn global_region(mut self, area: Rect, hit: Hit) -> Self {
        self.regions.push(Region {
            scene: None,
            area,
            hit,
        });
        self
    }

    /// Give `scene` a magnetic anchor resting at `center`.
    #[must_use]
    pub fn anchor_at(mut self, scene: Scene, center: Point) -> Self {
        self.anchors.push((scene, center));
        self
    }

    #[must_use]
    pub fn with_scroll_limit(mut self, limit: u16) -> Self {
        self.scroll_limit = limit;
        self
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }
}

impl SceneSurface for ScriptedSurface {
    type Error = Infallible;

    fn hit_test(&self, scene: Scene, _track: Track, x: u16, y: u16) -> Option<Hit> {
        self.regions
            .iter()
            .rev()
            .find(|r| r.scene.is_none_or(|s| s == scene) && r.area.contains(x, y))
            .map(|r| r.hit.clone())
    }

    fn anchor(&self, scene: Scene, _track: Track) -> Option<Point> {
        self.anchors
            .iter()
            .find(|(s, _)| *s == scene)
            .map(|(_, center)| *center)
    }

    fn scroll_limit(&self, _scene: Scene, _track: Track) -> u16 {
        self.scroll_limit
    }

    fn render(&mut self, view: &SessionView<'_>) -> Result<(), Self::Error> {
        self.frames.push(FrameRecord::from(view));
        Ok(())
    }
}

/// Owned snapshot of one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub navigation: NavigationState,
    pub track: Track,
    pub cursor: Option<CursorFrame>,
    pub magnet: Option<Point>,
    pub scroll_offset: u16,
    pub scroll_locked: bool,
    pub show_back_control: bool,
    pub contact_copied: bool,
}

impl From<&SessionView<'_>> for FrameRecord {
    fn from(view: &SessionView<'_>) -> Self {
        Self {
            navigation: view.navigation,
            track: view.track,
            cursor: view.cursor.clone(),
            magnet: view.magnet,
            scroll_offset: view.scroll_offset,
            scroll_locked: view.scroll_locked,
            show_back_control: view.show_back_control,
            contact_copied: view.contact_copied,
        }
    }
}

/// Deterministic simulator for [`Session`] testing.
#[derive(Debug)]
pub struct SessionSimulator {
    session: Session,
    surface: ScriptedSurface,
    sounds: SoundLog,
    epoch: Instant,
    now: Instant,
}

impl Default for SessionSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSimulator {
    /// Default config, empty surface, recording sound backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FolioConfig::default())
    }

    #[must_use]
    pub fn with_config(config: FolioConfig) -> Self {
        let (backend, sounds) = Recording::new();
        Self::build(Session::new(config, SoundPlayer::new(backend)), sounds)
    }

    /// A simulator whose sound backend fails every cue with `error`.
    #[must_use]
    pub fn with_failing_sound(error: SoundError) -> Self {
        let (backend, sounds) = Recording::new();
        let player = SoundPlayer::new(backend.failing(error));
        Self::build(Session::new(FolioConfig::default(), player), sounds)
    }

    fn build(session: Session, sounds: SoundLog) -> Self {
        let epoch = Instant::now();
        Self {
            session,
            surface: ScriptedSurface::new(),
            sounds,
            epoch,
            now: epoch,
        }
    }

    /// Replace the surface (builder).
    #[must_use]
    pub fn with_surface(mut self, surface: ScriptedSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Begin on `scene` (builder; call before [`start`](Self::start)).
    #[must_use]
    pub fn starting_at(mut self, scene: Scene) -> Self {
        self.session = self.session.starting_at(scene);
        self
    }

    /// Start the session at virtual time zero.
    pub fn start(&mut self) {
        self.session.start(self.now);
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Virtual time since the simulator was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now.duration_since(self.epoch)
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Jump the clock to `ms` after the epoch and tick once.
    ///
    /// The clock never runs backwards; earlier targets only tick.
    pub fn at_ms(&mut self, ms: u64) {
        let target = self.epoch + Duration::from_millis(ms);
        if target > self.now {
            self.now = target;
        }
        self.session.tick(self.now);
    }

    /// Advance by `duration` in [`FRAME`] steps, ticking at each step and
    /// landing exactly on the end time.
    pub fn advance(&mut self, duration: Duration) {
        let end = self.now + duration;
        while self.now < end {
            self.now = (self.now + FRAME).min(end);
            self.session.tick(self.now);
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Inject an event at the current virtual time.
    pub fn inject(&mut self, event: Event) {
        self.session.handle_event(&event, self.now, &self.surface);
    }

    /// Move the clock to `ms` after the epoch and inject `event` without
    /// ticking first, as a host would when input arrives between frames.
    pub fn inject_at_ms(&mut self, ms: u64, event: Event) {
        let target = self.epoch + Duration::from_millis(ms);
        if target > self.now {
            self.now = target;
        }
        self.inject(event);
    }

    pub fn key(&mut self, code: KeyCode) {
        self.inject(Event::Key(KeyEvent::new(code)));
    }

    pub fn press_escape(&mut self) {
        self.key(KeyCode::Escape);
    }

    pub fn press_enter(&mut self) {
        self.key(KeyCode::Enter);
    }

    pub fn move_pointer(&mut self, x: u16, y: u16) {
        self.inject(Event::Pointer(PointerEvent::moved(x, y)));
    }

    pub fn click(&mut self, x: u16, y: u16) {
        self.inject(Event::Pointer(PointerEvent::new(
            PointerEventKind::Down(PointerButton::Left),
            x,
            y,
        )));
        self.inject(Event::Pointer(PointerEvent::new(
            PointerEventKind::Up(PointerButton::Left),
            x,
            y,
        )));
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub fn sounds(&self) -> &SoundLog {
        &self.sounds
    }

    /// Snapshot the current state as a frame without rendering it.
    #[must_use]
    pub fn capture_frame(&self) -> FrameRecord {
        let view = self.session.view();
        FrameRecord::from(&view)
    }

    /// Render through the surface, recording the frame there.
    pub fn render(&mut self) {
        match self.session.render(&mut self.surface) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    #[must_use]
    pub fn surface(&self) -> &ScriptedSurface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::hit::{ElementId, ElementKind, HitTarget};

    #[test]
    fn clock_starts_at_zero_and_advances_exactly() {
        let mut sim = SessionSimulator::new();
        sim.start();
        assert_eq!(sim.elapsed(), Duration::ZERO);
        sim.advance(Duration::from_millis(50));
        assert_eq!(sim.elapsed(), Duration::from_millis(50));
        sim.at_ms(20);
        assert_eq!(sim.elapsed(), Duration::from_millis(50), "clock never rewinds");
        sim.at_ms(1201);
        assert_eq!(sim.elapsed(), Duration::from_millis(1201));
    }

    #[test]
    fn scripted_surface_topmost_region_wins() {
        let below = Hit::new(HitTarget::new(ElementId(1), ElementKind::Other));
        let above = Hit::new(HitTarget::new(ElementId(2), ElementKind::Button));
        let surface = ScriptedSurface::new()
            .global_region(Rect::new(0, 0, 10, 10), below)
            .region(Scene::Intro, Rect::new(2, 2, 2, 2), above);
        let hit = surface.hit_test(Scene::Intro, Track::Design, 3, 3).unwrap();
        assert_eq!(hit.target.id(), ElementId(2));
        let hit = surface.hit_test(Scene::Core, Track::Design, 3, 3).unwrap();
        assert_eq!(hit.target.id(), ElementId(1));
        assert!(surface.hit_test(Scene::Core, Track::Design, 20, 3).is_none());
    }

    #[test]
    fn render_records_frames() {
        let mut sim = SessionSimulator::new();
        sim.start();
        sim.render();
        sim.press_enter();
        sim.render();
        let frames = sim.surface().frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].navigation.current, Scene::Intro);
        assert_eq!(frames[1].navigation.current, Scene::AboutMe);
        assert_eq!(sim.capture_frame(), frames[1]);
    }
}
