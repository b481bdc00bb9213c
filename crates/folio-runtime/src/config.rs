#![forbid(unsafe_code)]

//! Timing and visual constants, with environment overrides.
//!
//! Every knob has a default matching the shipped presentation. Overrides
//! come from `FOLIO_*` variables; a value that fails to parse or validate is
//! reported as a [`ConfigError`] and the default is kept.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `FOLIO_QUIET_MS` | `quiet_window` | 500 |
//! | `FOLIO_SETTLE_MS` | `settle` | 1200 |
//! | `FOLIO_DOT_GLIDE_MS` | `dot_glide` | 100 |
//! | `FOLIO_LABEL_GLIDE_MS` | `label_glide` | 150 |
//! | `FOLIO_HOVER_MS` | `hover_transition` | 300 |
//! | `FOLIO_IDLE_HALF_CYCLE_MS` | `idle_half_cycle` | 800 |
//! | `FOLIO_IDLE_SCALE` | `idle_peak_scale` | 1.2 |
//! | `FOLIO_HOVER_SCALE` | `hover_scale` | 4.0 |
//! | `FOLIO_HOVER_OPACITY` | `hover_opacity` | 0.5 |
//! | `FOLIO_MAGNET_RADIUS` | `magnet_radius` | 12 |
//! | `FOLIO_MAGNET_STRENGTH` | `magnet_strength` | 0.4 |
//! | `FOLIO_MAGNET_PULL_MS` | `magnet_pull` | 500 |
//! | `FOLIO_VOLUME` | `sound_volume` | 0.2 |

use std::env;
use std::fmt;
use std::time::Duration;

const ENV_QUIET_MS: &str = "FOLIO_QUIET_MS";
const ENV_SETTLE_MS: &str = "FOLIO_SETTLE_MS";
const ENV_DOT_GLIDE_MS: &str = "FOLIO_DOT_GLIDE_MS";
const ENV_LABEL_GLIDE_MS: &str = "FOLIO_LABEL_GLIDE_MS";
const ENV_HOVER_MS: &str = "FOLIO_HOVER_MS";
const ENV_IDLE_HALF_CYCLE_MS: &str = "FOLIO_IDLE_HALF_CYCLE_MS";
const ENV_IDLE_SCALE: &str = "FOLIO_IDLE_SCALE";
const ENV_HOVER_SCALE: &str = "FOLIO_HOVER_SCALE";
const ENV_HOVER_OPACITY: &str = "FOLIO_HOVER_OPACITY";
const ENV_MAGNET_RADIUS: &str = "FOLIO_MAGNET_RADIUS";
const ENV_MAGNET_STRENGTH: &str = "FOLIO_MAGNET_STRENGTH";
const ENV_MAGNET_PULL_MS: &str = "FOLIO_MAGNET_PULL_MS";
const ENV_VOLUME: &str = "FOLIO_VOLUME";

/// Presentation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FolioConfig {
    /// Pointer inactivity before the cursor goes idle.
    pub quiet_window: Duration,
    /// How long scrolling stays locked after a scene change.
    pub settle: Duration,
    /// Dot follow lag.
    pub dot_glide: Duration,
    /// Label follow lag (longer than the dot's).
    pub label_glide: Duration,
    /// Hover grow/shrink and idle cancel duration.
    pub hover_transition: Duration,
    /// One half of the idle breathing cycle.
    pub idle_half_cycle: Duration,
    /// Scale at the top of the idle breath.
    pub idle_peak_scale: f32,
    pub hover_scale: f32,
    pub hover_opacity: f32,
    /// Pointer distance, in cells, within which the magnetic anchor pulls.
    pub magnet_radius: f32,
    /// Fraction of the pointer offset the anchor follows.
    pub magnet_strength: f32,
    pub magnet_pull: Duration,
    pub sound_volume: f32,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            quiet_window: Duration::from_millis(500),
            settle: Duration::from_millis(1200),
            dot_glide: Duration::from_millis(100),
            label_glide: Duration::from_millis(150),
            hover_transition: Duration::from_millis(300),
            idle_half_cycle: Duration::from_millis(800),
            idle_peak_scale: 1.2,
            hover_scale: 4.0,
            hover_opacity: 0.5,
            magnet_radius: 12.0,
            magnet_strength: 0.4,
            magnet_pull: Duration::from_millis(500),
            sound_volume: 0.2,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct FolioConfigParse {
    pub config: FolioConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl FolioConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> FolioConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> FolioConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config from an arbitrary variable lookup.
    ///
    /// Overrides that parse but break a constraint are reported and rolled
    /// back to their defaults, so the returned config always validates.
    pub fn from_env_with<F>(mut get: F) -> FolioConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = FolioConfig::default();
        let mut config = defaults.clone();
        let mut errors = Vec::new();

        let mut ms = |key: &str, field: &'static str, slot: &mut Duration| {
            if let Some(value) = get(key) {
                match parse_millis(&value) {
                    Some(parsed) => *slot = parsed,
                    None => errors.push(ConfigError::new(
                        field,
                        value,
                        "expected milliseconds (non-negative integer)",
                    )),
                }
            }
        };
        ms(ENV_QUIET_MS, "quiet_window", &mut config.quiet_window);
        ms(ENV_SETTLE_MS, "settle", &mut config.settle);
        ms(ENV_DOT_GLIDE_MS, "dot_glide", &mut config.dot_glide);
        ms(ENV_LABEL_GLIDE_MS, "label_glide", &mut config.label_glide);
        ms(ENV_HOVER_MS, "hover_transition", &mut config.hover_transition);
        ms(ENV_IDLE_HALF_CYCLE_MS, "idle_half_cycle", &mut config.idle_half_cycle);
        ms(ENV_MAGNET_PULL_MS, "magnet_pull", &mut config.magnet_pull);

        let mut real = |key: &str, field: &'static str, slot: &mut f32| {
            if let Some(value) = get(key) {
                match parse_f32(&value) {
                    Some(parsed) => *slot = parsed,
                    None => errors.push(ConfigError::new(field, value, "expected a finite number")),
                }
            }
        };
        real(ENV_IDLE_SCALE, "idle_peak_scale", &mut config.idle_peak_scale);
        real(ENV_HOVER_SCALE, "hover_scale", &mut config.hover_scale);
        real(ENV_HOVER_OPACITY, "hover_opacity", &mut config.hover_opacity);
        real(ENV_MAGNET_RADIUS, "magnet_radius", &mut config.magnet_radius);
        real(ENV_MAGNET_STRENGTH, "magnet_strength", &mut config.magnet_strength);
        real(ENV_VOLUME, "sound_volume", &mut config.sound_volume);

        if let Err(mut violations) = config.validate() {
            for violation in &violations {
                config.restore_default(violation.field, &defaults);
            }
            errors.append(&mut violations);
        }

        FolioConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_nonzero("quiet_window", self.quiet_window, &mut errors);
        validate_nonzero("idle_half_cycle", self.idle_half_cycle, &mut errors);
        if self.idle_peak_scale < 1.0 {
            errors.push(ConfigError::new(
                "idle_peak_scale",
                self.idle_peak_scale.to_string(),
                "must be at least 1.0",
            ));
        }
        if self.hover_scale <= 0.0 {
            errors.push(ConfigError::new(
                "hover_scale",
                self.hover_scale.to_string(),
                "must be positive",
            ));
        }
        validate_unit("hover_opacity", self.hover_opacity, &mut errors);
        if self.magnet_radius < 0.0 {
            errors.push(ConfigError::new(
                "magnet_radius",
                self.magnet_radius.to_string(),
                "must not be negative",
            ));
        }
        validate_unit("magnet_strength", self.magnet_strength, &mut errors);
        validate_unit("sound_volume", self.sound_volume, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Short human-readable summary for the status line.
    #[must_use]
    pub fn summary_short(&self) -> String {
        format!(
            "idle {}ms · settle {}ms · hover ×{}",
            self.quiet_window.as_millis(),
            self.settle.as_millis(),
            self.hover_scale
        )
    }

    fn restore_default(&mut self, field: &str, defaults: &FolioConfig) {
        match field {
            "quiet_window" => self.quiet_window = defaults.quiet_window,
            "idle_half_cycle" => self.idle_half_cycle = defaults.idle_half_cycle,
            "idle_peak_scale" => self.idle_peak_scale = defaults.idle_peak_scale,
            "hover_scale" => self.hover_scale = defaults.hover_scale,
            "hover_opacity" => self.hover_opacity = defaults.hover_opacity,
            "magnet_radius" => self.magnet_radius = defaults.magnet_radius,
            "magnet_strength" => self.magnet_strength = defaults.magnet_strength,
            "sound_volume" => self.sound_volume = defaults.sound_volume,
            _ => {}
        }
    }
}

fn validate_nonzero(field: &'static str, value: Duration, errors: &mut Vec<ConfigError>) {
    if value.is_zero() {
        errors.push(ConfigError::new(field, "0", "must be greater than 0ms"));
    }
}

fn validate_unit(field: &'static str, value: f32, errors: &mut Vec<ConfigError>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::new(
            field,
            value.to_string(),
            "must be within 0.0..=1.0",
        ));
    }
}

#[inline]
fn parse_millis(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[inline]
fn parse_f32(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}
