#![forbid(unsafe_code)]

//! Session orchestration.
//!
//! [`Session`] owns every piece of presentation state and routes input to it:
//! keys to the back shortcut and navigation, pointer motion to the ghost
//! cursor, the hover tracker and the magnetic anchor, clicks to the command
//! under the pointer. Scene transitions run their side effects inside the
//! call that caused them:
//!
//! 1. the outgoing scene is unmounted (its ambient label guard and any hover
//!    label are dropped, hover is cleared);
//! 2. the viewport scrolls to the top and scrolling locks for the settle
//!    duration;
//! 3. the `whoosh` cue plays;
//! 4. the incoming scene is mounted (its ambient label is written);
//! 5. the back shortcut is re-synced to the new position.
//!
//! The host owns the clock. Every entry point takes `now`, and timers fire
//! from [`Session::tick`] once `now` reaches their deadline.

use std::time::{Duration, Instant};

use folio_core::event::{
    Event, HoverEvent, KeyCode, KeyEvent, PointerButton, PointerEvent, PointerEventKind,
};
use folio_core::geometry::Point;
use folio_core::hit::{ElementId, HitTarget};
use folio_core::hover::HoverTracker;

use crate::config::FolioConfig;
use crate::ghost_cursor::{CursorFrame, GhostCursor};
use crate::label::{HoverLabel, LabelChannel, LabelGuard};
use crate::magnet::MagneticAnchor;
use crate::navigator::{BackShortcut, NavigationState, SceneNavigator, Transition};
use crate::scene::{Direction, Scene, Track};
use crate::scroll::ScrollState;
use crate::sound::{SoundCue, SoundPlayer};

/// How long the contact confirmation stays visible.
pub const CONTACT_CONFIRMATION: Duration = Duration::from_millis(2000);

/// Something a control can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Follow the current scene's forward link.
    Advance,
    Back,
    /// Start over from the first scene.
    Reset,
    /// Cross-link to any scene.
    GoTo(Scene),
    ToggleTrack,
    SetTrack(Track),
    /// The closing call-to-action.
    Contact,
    Quit,
}

/// Result of hit-testing one pointer position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub target: HitTarget,
    /// What a click here does.
    pub command: Option<Command>,
    /// Pointer label shown while hovering here.
    pub hover_label: Option<String>,
}

impl Hit {
    #[must_use]
    pub fn new(target: HitTarget) -> Self {
        Self {
            target,
            command: None,
            hover_label: None,
        }
    }

    #[must_use]
    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    #[must_use]
    pub fn with_hover_label(mut self, label: impl Into<String>) -> Self {
        self.hover_label = Some(label.into());
        self
    }
}

/// The rendering surface: lays scenes out, hit-tests, and draws.
pub trait SceneSurface {
    type Error;

    /// The element at `(x, y)` in `scene`, if any.
    fn hit_test(&self, scene: Scene, track: Track, x: u16, y: u16) -> Option<Hit>;

    /// Resting center of the scene's magnetic anchor, if it has one.
    fn anchor(&self, _scene: Scene, _track: Track) -> Option<Point> {
        None
    }

    /// How far the scene's content can scroll.
    fn scroll_limit(&self, _scene: Scene, _track: Track) -> u16 {
        0
    }

    fn render(&mut self, view: &SessionView<'_>) -> Result<(), Self::Error>;
}

/// Everything a surface needs to draw one frame.
#[derive(Debug, Clone)]
pub struct SessionView<'a> {
    pub navigation: NavigationState,
    pub track: Track,
    pub cursor: Option<CursorFrame>,
    /// Current position of the magnetic anchor.
    pub magnet: Option<Point>,
    pub scroll_offset: u16,
    pub scroll_locked: bool,
    pub show_back_control: bool,
    pub contact_copied: bool,
    pub hovered: Option<ElementId>,
    pub config: &'a FolioConfig,
}

/// One visitor session.
#[derive(Debug)]
pub struct Session {
    config: FolioConfig,
    navigator: SceneNavigator,
    shortcut: BackShortcut,
    track: Track,
    scroll: ScrollState,
    labels: LabelChannel,
    cursor: GhostCursor,
    sound: SoundPlayer,
    hover: HoverTracker,
    hover_label: Option<HoverLabel>,
    scene_label: Option<LabelGuard>,
    magnet: Option<MagneticAnchor>,
    contact_until: Option<Instant>,
    running: bool,
}

impl Session {
    /// A session that has not started yet.
    #[must_use]
    pub fn new(config: FolioConfig, sound: SoundPlayer) -> Self {
        let labels = LabelChannel::new();
        Self {
            navigator: SceneNavigator::new(),
            shortcut: BackShortcut::new(),
            track: Track::default(),
            scroll: ScrollState::new(config.settle),
            cursor: GhostCursor::new(&config, labels.clone()),
            labels,
            sound,
            hover: HoverTracker::new(),
            hover_label: None,
            scene_label: None,
            magnet: None,
            contact_until: None,
            running: false,
            config,
        }
    }

    /// Begin on `scene` instead of the first scene (builder).
    #[must_use]
    pub fn starting_at(mut self, scene: Scene) -> Self {
        self.navigator = SceneNavigator::starting_at(scene);
        self
    }

    #[must_use]
    pub fn with_track(mut self, track: Track) -> Self {
        self.track = track;
        self
    }

    /// Mount the cursor and the initial scene. The initial scene is silent.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.cursor.mount(now);
        self.scroll.scroll_to_top();
        self.scroll.lock(now);
        self.mount_scene();
        self.shortcut.sync(&self.navigator);
        tracing::info!(
            scene = self.navigator.current().name(),
            track = self.track.as_str(),
            "session started"
        );
    }

    /// Unmount everything and remove the back shortcut.
    pub fn teardown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.shortcut.teardown();
        self.hover.clear();
        self.hover_label = None;
        self.scene_label = None;
        self.magnet = None;
        self.cursor.unmount();
        tracing::info!("session torn down");
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        self.navigator.state()
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.navigator.current()
    }

    #[inline]
    #[must_use]
    pub fn track(&self) -> Track {
        self.track
    }

    #[must_use]
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    #[must_use]
    pub fn labels(&self) -> &LabelChannel {
        &self.labels
    }

    #[must_use]
    pub fn cursor(&self) -> &GhostCursor {
        &self.cursor
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    #[must_use]
    pub fn shortcut(&self) -> &BackShortcut {
        &self.shortcut
    }

    #[must_use]
    pub fn magnet(&self) -> Option<&MagneticAnchor> {
        self.magnet.as_ref()
    }

    #[must_use]
    pub fn sound(&self) -> &SoundPlayer {
        &self.sound
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&HitTarget> {
        self.hover.current()
    }

    /// Whether the contact confirmation is showing.
    #[must_use]
    pub fn contact_copied(&self) -> bool {
        self.contact_until.is_some()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Route one input event.
    pub fn handle_event<S>(&mut self, event: &Event, now: Instant, surface: &S)
    where
        S: SceneSurface + ?Sized,
    {
        if !self.running {
            return;
        }
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Pointer(pointer) => self.handle_pointer(pointer, now, surface),
            Event::Hover(hover) => self.cursor.on_hover(hover, now),
            Event::Focus(false) => self.clear_hover(now),
            Event::Focus(true) | Event::Resize { .. } => {}
            Event::Tick => self.tick(now),
        }
    }

    /// Fire due timers and advance animations.
    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        self.cursor.tick(now);
        self.scroll.tick(now);
        if let Some(magnet) = &mut self.magnet {
            magnet.tick(now);
        }
        if self.contact_until.is_some_and(|until| now >= until) {
            self.contact_until = None;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        if !key.is_down() {
            return;
        }
        if let Some(transition) = self.shortcut.handle(key, &mut self.navigator) {
            self.apply(transition, now);
            return;
        }
        let command = match key.code {
            KeyCode::Char('c') if key.ctrl() => Command::Quit,
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Char('t') => Command::ToggleTrack,
            KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') => {
                if self.navigator.current() == Scene::Resolution {
                    Command::Contact
                } else {
                    Command::Advance
                }
            }
            _ => return,
        };
        self.execute(command, now);
    }

    fn handle_pointer<S>(&mut self, pointer: &PointerEvent, now: Instant, surface: &S)
    where
        S: SceneSurface + ?Sized,
    {
        let (x, y) = pointer.position();
        let scene = self.navigator.current();
        let track = self.track;
        match pointer.kind {
            PointerEventKind::Moved | PointerEventKind::Drag(_) => {
                self.cursor.on_pointer_move(x, y, now);
                self.update_magnet(Point::from((x, y)), now, surface);
                self.update_hover(surface.hit_test(scene, track, x, y), now);
            }
            PointerEventKind::Down(PointerButton::Left) => {
                self.cursor.on_pointer_move(x, y, now);
                let hit = surface.hit_test(scene, track, x, y);
                let command = hit.as_ref().and_then(|h| h.command);
                self.update_hover(hit, now);
                if let Some(command) = command {
                    self.execute(command, now);
                }
            }
            PointerEventKind::ScrollUp => {
                self.scroll.tick(now);
                self.scroll.scroll_by(-1, surface.scroll_limit(scene, track));
            }
            PointerEventKind::ScrollDown => {
                self.scroll.tick(now);
                self.scroll.scroll_by(1, surface.scroll_limit(scene, track));
            }
            PointerEventKind::Down(_) | PointerEventKind::Up(_) => {}
        }
    }

    fn update_magnet<S>(&mut self, pointer: Point, now: Instant, surface: &S)
    where
        S: SceneSurface + ?Sized,
    {
        match surface.anchor(self.navigator.current(), self.track) {
            Some(center) => {
                let magnet = self
                    .magnet
                    .get_or_insert_with(|| MagneticAnchor::new(center, &self.config));
                magnet.set_center(center);
                magnet.on_pointer(pointer, now);
            }
            None => self.magnet = None,
        }
    }

    fn update_hover(&mut self, hit: Option<Hit>, now: Instant) {
        let label_text = hit.as_ref().and_then(|h| h.hover_label.clone());
        let events = self.hover.update(hit.map(|h| h.target));
        for event in &events {
            match event {
                HoverEvent::Leave(_) => {
                    if let Some(label) = self.hover_label.take() {
                        label.leave();
                    }
                }
                HoverEvent::Enter(_) => {
                    if let Some(text) = &label_text {
                        let label = self.labels.hover_label(text.as_str());
                        label.enter();
                        self.hover_label = Some(label);
                    }
                }
            }
            self.cursor.on_hover(event, now);
        }
    }

    fn clear_hover(&mut self, now: Instant) {
        if let Some(event) = self.hover.clear() {
            self.hover_label = None;
            self.cursor.on_hover(&event, now);
        }
    }

    // -----------------------------------------------------------------------
    // Commands and navigation
    // -----------------------------------------------------------------------

    /// Run a control's command.
    pub fn execute(&mut self, command: Command, now: Instant) {
        tracing::debug!(?command, scene = self.navigator.current().name(), "command");
        match command {
            Command::Advance => {
                self.advance(now);
            }
            Command::Back => {
                self.go_back(now);
            }
            Command::Reset => {
                self.reset(now);
            }
            Command::GoTo(scene) => {
                let direction = if scene.index() < self.navigator.index() {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                self.go_to(scene, direction, now);
            }
            Command::ToggleTrack => {
                self.toggle_track();
            }
            Command::SetTrack(track) => self.set_track(track),
            Command::Contact => self.contact(now),
            Command::Quit => self.teardown(),
        }
    }

    /// Move to `scene`. The viewport always returns to the top; the remaining
    /// transition side effects run only if the scene changes.
    pub fn go_to(&mut self, scene: Scene, direction: Direction, now: Instant) -> Transition {
        let transition = self.navigator.go_to(scene, direction);
        self.apply(transition, now);
        transition
    }

    pub fn go_back(&mut self, now: Instant) -> Option<Transition> {
        let transition = self.navigator.go_back()?;
        self.apply(transition, now);
        Some(transition)
    }

    /// Follow the forward link. Leaving the first scene also plays `pop`.
    pub fn advance(&mut self, now: Instant) -> Option<Transition> {
        let from = self.navigator.current();
        let transition = self.navigator.advance()?;
        if from.is_first() {
            self.sound.play(SoundCue::Pop);
        }
        self.apply(transition, now);
        Some(transition)
    }

    pub fn reset(&mut self, now: Instant) -> Transition {
        let transition = self.navigator.reset();
        self.apply(transition, now);
        transition
    }

    pub fn toggle_track(&mut self) -> Track {
        self.set_track(self.track.toggled());
        self.track
    }

    pub fn set_track(&mut self, track: Track) {
        if self.track != track {
            tracing::debug!(track = track.as_str(), "track changed");
            self.track = track;
        }
    }

    fn contact(&mut self, now: Instant) {
        if self.navigator.current() != Scene::Resolution {
            return;
        }
        self.sound.play(SoundCue::Pop);
        self.contact_until = Some(now + CONTACT_CONFIRMATION);
        tracing::info!("contact action");
    }

    fn apply(&mut self, transition: Transition, now: Instant) {
        if !self.running {
            self.shortcut.sync(&self.navigator);
            return;
        }
        // Every navigation request returns to the top, even to the same scene.
        self.scroll.scroll_to_top();
        if transition.changes_scene() {
            self.unmount_scene(now);
            self.scroll.lock(now);
            self.sound.play(SoundCue::Whoosh);
            self.mount_scene();
        }
        self.shortcut.sync(&self.navigator);
    }

    fn unmount_scene(&mut self, now: Instant) {
        self.clear_hover(now);
        self.scene_label = None;
        self.magnet = None;
        self.contact_until = None;
    }

    fn mount_scene(&mut self) {
        self.scene_label = self
            .navigator
            .current()
            .ambient_label()
            .map(|text| self.labels.guard(text));
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        let navigation = self.navigator.state();
        SessionView {
            navigation,
            track: self.track,
            cursor: self.cursor.frame(),
            magnet: self.magnet.as_ref().map(MagneticAnchor::position),
            scroll_offset: self.scroll.offset(),
            scroll_locked: self.scroll.is_locked(),
            show_back_control: navigation.current.shows_back_control(),
            contact_copied: self.contact_copied(),
            hovered: self.hover.current().map(HitTarget::id),
            config: &self.config,
        }
    }

    pub fn render<S>(&self, surface: &mut S) -> Result<(), S::Error>
    where
        S: SceneSurface + ?Sized,
    {
        surface.render(&self.view())
    }
}
