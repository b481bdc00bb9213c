#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Time-based animations advanced by an explicit `tick(dt)`, so a host loop
//! (or a test) controls time completely. Nothing here reads a clock.
//!
//! Every animated property owns exactly one animation value. Retargeting
//! ([`Tween::retarget`], [`Glide::retarget`]) restarts the motion from the
//! current value instead of queueing a second motion, which is what keeps
//! competing writers from stacking.

pub mod spring;

use std::time::Duration;

use crate::geometry::Point;

pub use spring::Spring;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out (slower end than quadratic).
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Sinusoidal ease-in-out.
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (std::f32::consts::PI * t).cos()) / 2.0
}

fn nonzero(duration: Duration) -> Duration {
    if duration.is_zero() {
        Duration::from_nanos(1)
    } else {
        duration
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    (t as f32).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    /// Returns [`Duration::ZERO`] for animations that never complete.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Eased interpolation of a scalar between two values.
///
/// [`Animation::value`] returns the eased progress; [`Tween::current`]
/// returns the interpolated scalar.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween from `from` to `to` over `duration` with ease-out.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: nonzero(duration),
            easing: ease_out,
        }
    }

    /// A tween already resting at `value`.
    #[must_use]
    pub fn settled(value: f32) -> Self {
        let mut tween = Self::new(value, value, Duration::from_nanos(1));
        tween.elapsed = tween.duration;
        tween
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Current interpolated value.
    #[must_use]
    pub fn current(&self) -> f32 {
        let t = (self.easing)(progress(self.elapsed, self.duration));
        self.from + (self.to - self.from) * t
    }

    /// Value the tween is heading toward.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Head toward `to` from wherever the tween is now.
    ///
    /// Any motion in flight is replaced, not queued.
    pub fn retarget(&mut self, to: f32, duration: Duration) {
        self.from = self.current();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = nonzero(duration);
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(progress(self.elapsed, self.duration))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Glide
// ---------------------------------------------------------------------------

/// Eased approach of a 2D point toward a target.
///
/// This is the follower motion: every new pointer coordinate calls
/// [`retarget`](Glide::retarget), which restarts the approach from the
/// current position. Targets never accumulate.
#[derive(Debug, Clone, Copy)]
pub struct Glide {
    from: Point,
    to: Point,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Glide {
    /// A glide resting at `at`, using `duration` for future retargets.
    #[must_use]
    pub fn new(at: Point, duration: Duration) -> Self {
        let duration = nonzero(duration);
        Self {
            from: at,
            to: at,
            elapsed: duration,
            duration,
            easing: ease_out_cubic,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Point {
        let t = (self.easing)(progress(self.elapsed, self.duration));
        self.from.lerp(self.to, t)
    }

    /// Position the glide is heading toward.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Point {
        self.to
    }

    /// Head toward `to` from the current position.
    pub fn retarget(&mut self, to: Point) {
        self.from = self.position();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    /// Jump to `at` with no motion.
    pub fn jump(&mut self, at: Point) {
        self.from = at;
        self.to = at;
        self.elapsed = self.duration;
    }
}

impl Animation for Glide {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(progress(self.elapsed, self.duration))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Yoyo
// ---------------------------------------------------------------------------

/// Endless back-and-forth between 0.0 and 1.0 with sine in-out easing.
///
/// One half cycle (0 → 1 or 1 → 0) takes `half_period`. Starts at 0.0.
/// Never completes.
#[derive(Debug, Clone, Copy)]
pub struct Yoyo {
    half_period: Duration,
    elapsed: Duration,
}

impl Yoyo {
    /// Create a yoyo with the given half cycle.
    #[must_use]
    pub fn new(half_period: Duration) -> Self {
        Self {
            half_period: nonzero(half_period),
            elapsed: Duration::ZERO,
        }
    }

    /// Half cycles completed within the current full cycle (0 or 1).
    #[must_use]
    pub fn half_cycles(&self) -> u64 {
        (self.elapsed.as_nanos() / self.half_period.as_nanos()) as u64
    }
}

impl Animation for Yoyo {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        // Keep elapsed bounded to one full cycle to avoid precision loss.
        let cycle = self.half_period.as_nanos() * 2;
        let wrapped = self.elapsed.as_nanos() % cycle;
        self.elapsed = Duration::from_nanos(wrapped as u64);
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn value(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.half_period.as_secs_f64();
        // t in [0, 2): rising on the first half, falling on the second.
        let t = if t <= 1.0 { t } else { 2.0 - t };
        ease_in_out_sine(t as f32)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
