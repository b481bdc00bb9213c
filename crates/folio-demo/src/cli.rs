#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args by hand to keep the binary lean. `FOLIO_*` environment
//! variables supply defaults; explicit flags override them.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use folio_runtime::scene::{Scene, Track};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Folio: a scene-by-scene portfolio story in your terminal

USAGE:
    folio [OPTIONS]

OPTIONS:
    --scene=NAME         Start on scene NAME (default: intro)
    --track=TRACK        Presentation track: 'design' (default) or 'logic'
    --no-mouse           Disable mouse capture (keyboard only)
    --bell               Ring the terminal bell for the pop cue
    --exit-after-ms=N    Quit automatically after N milliseconds
    --help, -h           Show this help message
    --version, -V        Show version

SCENES:
    intro  aboutme  core  proof  tools  resolution

KEYBINDINGS:
    Enter / Right / Space   Next scene (contact on the last scene)
    Esc / Backspace         Previous scene
    t                       Toggle design/logic track
    q / Ctrl+C              Quit

ENVIRONMENT VARIABLES:
    FOLIO_SCENE            Override --scene
    FOLIO_TRACK            Override --track
    FOLIO_NO_MOUSE         Disable mouse capture when set to 1/true
    FOLIO_BELL             Enable the bell when set to 1/true
    FOLIO_EXIT_AFTER_MS    Override --exit-after-ms
    FOLIO_LOG              Write JSON logs to this file
    FOLIO_LOG_FILTER       Log filter directives (default: debug)
    FOLIO_QUIET_MS, FOLIO_SETTLE_MS, ...  Timing overrides (see docs)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Scene to open on.
    pub scene: Scene,
    pub track: Track,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Ring BEL when the pop cue plays.
    pub bell: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// JSON log destination.
    pub log_path: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            scene: Scene::Intro,
            track: Track::Design,
            mouse: true,
            bell: false,
            exit_after_ms: 0,
            log_path: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Opts),
    Help,
    Version,
}

/// A rejected argument or environment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    pub message: String,
}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version` or invalid input.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Invocation::Run(opts)) => opts,
            Ok(Invocation::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Invocation::Version) => {
                println!("folio {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with `get` as the environment lookup.
    pub fn parse_from<I, F>(args: I, mut get: F) -> Result<Invocation, CliError>
    where
        I: IntoIterator<Item = String>,
        F: FnMut(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get("FOLIO_SCENE") {
            opts.scene = val
                .parse()
                .map_err(|err| CliError::new(format!("FOLIO_SCENE: {err}")))?;
        }
        if let Some(val) = get("FOLIO_TRACK") {
            opts.track = val
                .parse()
                .map_err(|err| CliError::new(format!("FOLIO_TRACK: {err}")))?;
        }
        if let Some(val) = get("FOLIO_NO_MOUSE")
            && matches!(val.trim(), "1" | "true" | "yes")
        {
            opts.mouse = false;
        }
        if let Some(val) = get("FOLIO_BELL")
            && matches!(val.trim(), "1" | "true" | "yes")
        {
            opts.bell = true;
        }
        if let Some(val) = get("FOLIO_EXIT_AFTER_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = get("FOLIO_LOG")
            && !val.is_empty()
        {
            opts.log_path = Some(PathBuf::from(val));
        }

        // Command-line args override env vars
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Invocation::Help),
                "--version" | "-V" => return Ok(Invocation::Version),
                "--no-mouse" => opts.mouse = false,
                "--bell" => opts.bell = true,
                other => {
                    if let Some(val) = other.strip_prefix("--scene=") {
                        opts.scene = val
                            .parse()
                            .map_err(|err| CliError::new(format!("--scene: {err}")))?;
                    } else if let Some(val) = other.strip_prefix("--track=") {
                        opts.track = val
                            .parse()
                            .map_err(|err| CliError::new(format!("--track: {err}")))?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val.parse().map_err(|_| {
                            CliError::new(format!("Invalid --exit-after-ms value: {val}"))
                        })?;
                    } else {
                        return Err(CliError::new(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        Ok(Invocation::Run(opts))
    }
}
