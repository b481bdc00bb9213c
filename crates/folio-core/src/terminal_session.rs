#![forbid(unsafe_code)]

//! Terminal session guard.
//!
//! [`TerminalSession`] puts the terminal into the state the presentation
//! needs (raw mode, optionally the alternate screen, mouse capture and focus
//! reporting) and restores it on every exit path:
//!
//! - normal return and early `?` exits, via `Drop`;
//! - panics, via a process-wide panic hook installed once;
//! - SIGINT/SIGTERM on Unix, via a signal-hook thread that cleans up and
//!   exits with `128 + signal`.
//!
//! Modes are disabled in reverse order of enabling, and raw mode is always
//! left last.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::event::Event;

/// Which terminal modes a session enables. Everything is off by default.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, restoring scrollback on exit.
    pub alternate_screen: bool,
    /// Report pointer presses, drags and plain motion.
    ///
    /// The ghost cursor needs motion reports; without capture the
    /// presentation still works from the keyboard.
    pub mouse_capture: bool,
    /// Report focus gained/lost.
    pub focus_events: bool,
}

impl SessionOptions {
    /// Full-screen presentation with pointer tracking.
    #[must_use]
    pub fn presentation(mouse: bool) -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: mouse,
            focus_events: true,
        }
    }
}

/// RAII owner of the terminal configuration.
///
/// ```no_run
/// use folio_core::terminal_session::{SessionOptions, TerminalSession};
///
/// fn run() -> std::io::Result<()> {
///     let session = TerminalSession::new(SessionOptions::presentation(true))?;
///     let (cols, rows) = session.size()?;
///     let _ = (cols, rows);
///     Ok(())
/// } // terminal restored here
/// ```
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
    focus_events_enabled: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested modes.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or any requested mode cannot be enabled.
    /// Modes enabled before the failure are rolled back by `Drop`.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();
        let span = crate::debug_span!("terminal_session_new");
        let _guard = span.enter();

        crossterm::terminal::enable_raw_mode()?;
        crate::info!("terminal raw mode enabled");

        let mut session = Self {
            options: options.clone(),
            alternate_screen_enabled: false,
            mouse_enabled: false,
            focus_events_enabled: false,
            #[cfg(unix)]
            signal_guard: None,
        };

        #[cfg(unix)]
        {
            session.signal_guard = Some(SignalGuard::new()?);
        }

        let mut stdout = io::stdout();

        if options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
            crate::info!("alternate screen enabled");
        }

        if options.mouse_capture {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
            session.mouse_enabled = true;
            crate::info!("mouse capture enabled");
        }

        if options.focus_events {
            crossterm::execute!(stdout, crossterm::event::EnableFocusChange)?;
            session.focus_events_enabled = true;
            crate::info!("focus events enabled");
        }

        Ok(session)
    }

    /// Current terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for input. `Ok(false)` means the wait timed out.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event, blocking.
    ///
    /// Returns `Ok(None)` for input with no canonical mapping (pastes,
    /// unsupported keys, horizontal scroll).
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        let raw = crossterm::event::read()?;
        let event = Event::from_crossterm(raw);
        if event.is_none() {
            crate::debug!("ignored terminal input with no canonical mapping");
        }
        Ok(event)
    }

    pub fn show_cursor(&self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::cursor::Show)
    }

    pub fn hide_cursor(&self) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::cursor::Hide)
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();

        if self.focus_events_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableFocusChange);
            self.focus_events_enabled = false;
            crate::info!("focus events disabled");
        }

        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
            crate::info!("mouse capture disabled");
        }

        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            crate::info!("alternate screen disabled");
        }

        let _ = crossterm::terminal::disable_raw_mode();
        crate::info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

/// Undo every mode unconditionally. Used where the session value is out of
/// reach (panic hook, signal thread).
fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::event::DisableFocusChange);
    let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                crate::warn!(signal, "termination signal received, restoring terminal");
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_enable_nothing() {
        let opts = SessionOptions::default();
        assert!(!opts.alternate_screen);
        assert!(!opts.mouse_capture);
        assert!(!opts.focus_events);
    }

    #[test]
    fn presentation_options() {
        let opts = SessionOptions::presentation(true);
        assert!(opts.alternate_screen);
        assert!(opts.mouse_capture);
        assert!(opts.focus_events);

        let keyboard_only = SessionOptions::presentation(false);
        assert!(keyboard_only.alternate_screen);
        assert!(!keyboard_only.mouse_capture);
    }

    // Entering raw mode here would disturb the test runner's terminal; the
    // demo binary exercises the live path.
}
