#![forbid(unsafe_code)]

//! Damped spring used for elastic return motion.
//!
//! Models `a = -k (x - target) - c v` and integrates it with semi-implicit
//! Euler. Large frame deltas are split into steps of at most 4 ms so high
//! stiffness stays stable.
//!
//! With `c < 2√k` the spring is underdamped and overshoots its target before
//! settling, which is the "elastic" feel of the magnetic anchor's return.
//! The settle time is roughly `8 / c` seconds.

use std::time::Duration;

use super::Animation;

/// Upper bound on a single integration step, in seconds.
const MAX_STEP_SECS: f64 = 0.004;

const DEFAULT_REST_THRESHOLD: f64 = 0.001;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;
const MIN_STIFFNESS: f64 = 0.1;

/// A damped harmonic oscillator over a single scalar.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring at `initial` heading for `target`.
    ///
    /// Defaults to stiffness 170 and damping 26 (a subtle bounce).
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: (initial - target).abs() < DEFAULT_REST_THRESHOLD,
        }
    }

    /// Underdamped preset that overshoots visibly and settles in about 0.8 s.
    #[must_use]
    pub fn elastic(initial: f64, target: f64) -> Self {
        Self::new(initial, target)
            .with_stiffness(300.0)
            .with_damping(10.0)
    }

    /// Set stiffness (builder). Clamped to a small positive minimum.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder). Negative values clamp to zero.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Position and velocity thresholds below which the spring rests.
    #[must_use]
    pub fn with_rest_threshold(mut self, position: f64, velocity: f64) -> Self {
        self.rest_threshold = position.abs();
        self.velocity_threshold = velocity.abs();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Damping at which the spring stops overshooting.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }

    /// Change the target, keeping the current position and velocity.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        self.at_rest = false;
    }

    /// Teleport to `position` with zero velocity.
    ///
    /// Used when another animation owned the value and the spring takes over
    /// from wherever that animation left it.
    pub fn snap_to(&mut self, position: f64) {
        self.position = position;
        self.initial = position;
        self.velocity = 0.0;
        self.at_rest = false;
    }

    fn step(&mut self, dt: f64) {
        let acceleration =
            -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, splitting into stable sub-steps.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step);
            remaining -= step;
        }
        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Position clamped to [0.0, 1.0]; use [`Spring::position`] for raw values.
    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(FRAME);
        }
    }

    #[test]
    fn converges_to_target() {
        let mut spring = Spring::new(0.0, 1.0);
        run(&mut spring, 200);
        assert!(spring.is_at_rest());
        assert!((spring.position() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn starts_at_rest_when_already_on_target() {
        let spring = Spring::new(5.0, 5.0);
        assert!(spring.is_at_rest());
        assert!(spring.is_complete());
    }

    #[test]
    fn elastic_overshoots_before_settling() {
        let mut spring = Spring::elastic(40.0, 0.0).with_rest_threshold(0.05, 0.05);
        let mut min = f64::MAX;
        for _ in 0..200 {
            spring.tick(FRAME);
            min = min.min(spring.position());
        }
        assert!(min < 0.0, "elastic spring should cross its target");
        assert!(spring.is_at_rest());
        assert!((spring.position() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn elastic_is_mostly_settled_after_a_second() {
        let mut spring = Spring::elastic(40.0, 0.0);
        run(&mut spring, 63);
        assert!(spring.position().abs() < 1.0, "pos = {}", spring.position());
    }

    #[test]
    fn critical_damping_does_not_overshoot() {
        let k = 170.0;
        let mut spring = Spring::new(0.0, 1.0)
            .with_stiffness(k)
            .with_damping(2.0 * f64::sqrt(k));
        for _ in 0..200 {
            spring.tick(FRAME);
            assert!(spring.position() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn large_dt_is_subdivided() {
        let mut spring = Spring::new(0.0, 1.0).with_stiffness(1000.0);
        spring.tick(Duration::from_secs(2));
        assert!(spring.position().is_finite());
        assert!((spring.position() - 1.0).abs() < 0.01);
    }

    #[test]
    fn snap_to_takes_over_from_current_value() {
        let mut spring = Spring::new(0.0, 0.0);
        spring.snap_to(12.0);
        assert!(!spring.is_at_rest());
        assert!((spring.position() - 12.0).abs() < f64::EPSILON);
        assert!((spring.velocity() - 0.0).abs() < f64::EPSILON);
        run(&mut spring, 200);
        assert!(spring.position().abs() < 0.01);
    }

    #[test]
    fn set_target_wakes_a_resting_spring() {
        let mut spring = Spring::new(1.0, 1.0);
        spring.set_target(2.0);
        assert!(!spring.is_at_rest());
        run(&mut spring, 200);
        assert!((spring.position() - 2.0).abs() < 0.01);
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut spring = Spring::new(0.0, 1.0);
        run(&mut spring, 10);
        spring.reset();
        assert!((spring.position() - 0.0).abs() < f64::EPSILON);
        assert!(!spring.is_at_rest());
    }

    #[test]
    fn stiffness_and_damping_are_clamped() {
        let spring = Spring::new(0.0, 1.0).with_stiffness(-5.0).with_damping(-1.0);
        assert!(spring.critical_damping() > 0.0);
        let mut spring = spring;
        spring.tick(FRAME);
        assert!(spring.position().is_finite());
    }
}
