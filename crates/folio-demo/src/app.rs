#![forbid(unsafe_code)]

//! Wiring between the terminal, the session and the surface.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use folio_core::event::Event;
use folio_core::terminal_session::{SessionOptions, TerminalSession};
use folio_runtime::config::{FolioConfig, FolioConfigParse};
use folio_runtime::session::Session;
use folio_runtime::sound::SoundPlayer;

use crate::chime::Chime;
use crate::cli::Opts;
use crate::surface::TerminalSurface;

/// Input poll timeout; one frame at roughly 60 Hz.
pub const FRAME: Duration = Duration::from_millis(16);

/// A session bound to a surface.
pub struct App<W: Write> {
    session: Session,
    surface: TerminalSurface<W>,
    started: Instant,
    exit_after: Option<Duration>,
}

impl<W: Write> App<W> {
    /// Build the session described by `opts` and start it at `now`.
    pub fn new(opts: &Opts, config: FolioConfig, out: W, size: (u16, u16), now: Instant) -> Self {
        let (chime, indicator) = Chime::new(opts.bell);
        let bell = chime.bell_handle();
        let player = SoundPlayer::new(chime).with_volume(config.sound_volume);
        let mut session = Session::new(config, player)
            .starting_at(opts.scene)
            .with_track(opts.track);
        session.start(now);
        let surface = TerminalSurface::new(out, size.0, size.1).with_chime(indicator, bell);
        Self {
            session,
            surface,
            started: now,
            exit_after: (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms)),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn surface(&self) -> &TerminalSurface<W> {
        &self.surface
    }

    /// Whether the loop should keep going at `now`.
    #[must_use]
    pub fn is_running(&self, now: Instant) -> bool {
        let expired = self
            .exit_after
            .is_some_and(|limit| now.saturating_duration_since(self.started) >= limit);
        self.session.is_running() && !expired
    }

    pub fn handle(&mut self, event: &Event, now: Instant) {
        if let Event::Resize { width, height } = *event {
            self.surface.resize(width, height);
        }
        self.session.handle_event(event, now, &self.surface);
    }

    /// Advance timers to `now` and draw one frame.
    pub fn frame(&mut self, now: Instant) -> io::Result<()> {
        self.session.tick(now);
        if self.session.is_running() {
            self.session.render(&mut self.surface)?;
        }
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.session.teardown();
    }
}

/// Route JSON logs to `path`. Returns whether a subscriber was installed.
pub fn init_logging(path: &Path) -> io::Result<bool> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(folio_core::logging::install_json_subscriber(Mutex::new(file)))
}

/// Read configuration overrides, logging every rejected value.
pub fn load_config() -> FolioConfig {
    let FolioConfigParse { config, errors } = FolioConfig::from_env_with_diagnostics();
    for error in &errors {
        tracing::warn!(%error, "config override rejected");
    }
    config
}

/// Run the interactive loop until the visitor quits.
pub fn run(opts: &Opts) -> io::Result<()> {
    if let Some(path) = &opts.log_path {
        init_logging(path)?;
    }
    let config = load_config();
    tracing::info!(config = %config.summary_short(), "starting folio");

    let terminal = TerminalSession::new(SessionOptions::presentation(opts.mouse))?;
    terminal.hide_cursor()?;
    let size = terminal.size()?;
    let mut app = App::new(opts, config, io::stdout(), size, Instant::now());

    while app.is_running(Instant::now()) {
        app.frame(Instant::now())?;
        if terminal.poll_event(FRAME)?
            && let Some(event) = terminal.read_event()?
        {
            app.handle(&event, Instant::now());
        }
    }

    app.shutdown();
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::event::{KeyCode, KeyEvent, PointerButton, PointerEvent, PointerEventKind};
    use folio_runtime::scene::{Scene, Track};
    use folio_runtime::sound::SoundCue;

    use crate::surface::{CONTACT, PREV, TRACK_TOGGLE};

    fn app(opts: &Opts, now: Instant) -> App<Vec<u8>> {
        App::new(opts, FolioConfig::default(), Vec::new(), (80, 24), now)
    }

    fn click(x: u16, y: u16) -> Event {
        Event::Pointer(PointerEvent::new(
            PointerEventKind::Down(PointerButton::Left),
            x,
            y,
        ))
    }

    fn output(app: &App<Vec<u8>>) -> String {
        String::from_utf8_lossy(app.surface().writer()).into_owned()
    }

    #[test]
    fn starts_on_requested_scene_and_track() {
        let opts = Opts {
            scene: Scene::Proof,
            track: Track::Logic,
            ..Opts::default()
        };
        let t0 = Instant::now();
        let app = app(&opts, t0);
        assert_eq!(app.session().scene(), Scene::Proof);
        assert_eq!(app.session().track(), Track::Logic);
        assert!(app.is_running(t0));
    }

    #[test]
    fn clicking_the_intro_enters_the_story() {
        let t0 = Instant::now();
        let mut app = app(&Opts::default(), t0);
        app.handle(&click(10, 10), t0);
        assert_eq!(app.session().scene(), Scene::AboutMe);
        assert_eq!(app.session().sound().failures(), 0);
        app.frame(t0).unwrap();
        let out = output(&app);
        assert!(out.contains("About me"));
        assert!(out.contains("♪ whoosh"));
    }

    #[test]
    fn prev_button_goes_back() {
        let opts = Opts {
            scene: Scene::Core,
            ..Opts::default()
        };
        let t0 = Instant::now();
        let mut app = app(&opts, t0);
        let prev = app
            .surface()
            .layout(Scene::Core, Track::Design)
            .control(PREV)
            .unwrap()
            .area;
        app.handle(&click(prev.x, prev.y), t0);
        assert_eq!(app.session().scene(), Scene::AboutMe);
    }

    #[test]
    fn toggle_switches_track() {
        let t0 = Instant::now();
        let mut app = app(&Opts::default(), t0);
        let toggle = app
            .surface()
            .layout(Scene::Intro, Track::Design)
            .control(TRACK_TOGGLE)
            .unwrap()
            .area;
        app.handle(&click(toggle.x, toggle.y), t0);
        assert_eq!(app.session().track(), Track::Logic);
        assert_eq!(app.session().scene(), Scene::Intro);
    }

    #[test]
    fn contact_shows_confirmation_and_pops() {
        let opts = Opts {
            scene: Scene::Resolution,
            bell: true,
            ..Opts::default()
        };
        let t0 = Instant::now();
        let mut app = app(&opts, t0);
        let contact = app
            .surface()
            .layout(Scene::Resolution, Track::Design)
            .control(CONTACT)
            .unwrap()
            .area;
        app.handle(&click(contact.x + 1, contact.y), t0);
        assert!(app.session().contact_copied());
        app.frame(t0).unwrap();
        let out = output(&app);
        assert!(out.contains("Copied!"));
        assert!(out.contains(SoundCue::Pop.name()));
        assert!(out.contains('\u{7}'));
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let t0 = Instant::now();
        let mut app = app(&Opts::default(), t0);
        app.handle(&Event::Key(KeyEvent::new(KeyCode::Char('q'))), t0);
        assert!(!app.is_running(t0));
    }

    #[test]
    fn exit_after_expires() {
        let opts = Opts {
            exit_after_ms: 100,
            ..Opts::default()
        };
        let t0 = Instant::now();
        let app = app(&opts, t0);
        assert!(app.is_running(t0 + Duration::from_millis(99)));
        assert!(!app.is_running(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn resize_updates_surface() {
        let t0 = Instant::now();
        let mut app = app(&Opts::default(), t0);
        app.handle(
            &Event::Resize {
                width: 120,
                height: 40,
            },
            t0,
        );
        assert_eq!(app.surface().size(), (120, 40));
    }

    #[test]
    fn frame_counts_renders() {
        let t0 = Instant::now();
        let mut app = app(&Opts::default(), t0);
        app.frame(t0).unwrap();
        app.frame(t0 + FRAME).unwrap();
        assert_eq!(app.surface().frames(), 2);
        app.shutdown();
        app.frame(t0 + FRAME * 2).unwrap();
        assert_eq!(app.surface().frames(), 2);
    }
}
