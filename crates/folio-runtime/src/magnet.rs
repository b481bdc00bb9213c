#![forbid(unsafe_code)]

//! Magnetic anchor for the closing call-to-action.
//!
//! While the pointer is within `radius` of the anchor's resting center, the
//! anchor is pulled toward it by `strength` times the offset with a short
//! ease-out. Once the pointer leaves the radius the anchor springs back to
//! rest with a visible overshoot.

use std::time::{Duration, Instant};

use folio_core::animation::{Animation, Spring, Tween, ease_out};
use folio_core::geometry::Point;

use crate::config::FolioConfig;

/// Return springs rest once within a tenth of a cell.
const REST_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone)]
enum Motion {
    Pull { x: Tween, y: Tween },
    Return { x: Spring, y: Spring },
}

impl Motion {
    fn offset(&self) -> (f32, f32) {
        match self {
            Self::Pull { x, y } => (x.current(), y.current()),
            Self::Return { x, y } => (x.position() as f32, y.position() as f32),
        }
    }

    fn tick(&mut self, dt: Duration) {
        match self {
            Self::Pull { x, y } => {
                x.tick(dt);
                y.tick(dt);
            }
            Self::Return { x, y } => {
                x.tick(dt);
                y.tick(dt);
            }
        }
    }
}

/// An element that leans toward a nearby pointer.
#[derive(Debug, Clone)]
pub struct MagneticAnchor {
    center: Point,
    radius: f32,
    strength: f32,
    pull: Duration,
    motion: Motion,
    last_tick: Option<Instant>,
}

impl MagneticAnchor {
    /// An anchor resting at `center`.
    #[must_use]
    pub fn new(center: Point, config: &FolioConfig) -> Self {
        Self {
            center,
            radius: config.magnet_radius,
            strength: config.magnet_strength,
            pull: config.magnet_pull,
            motion: Motion::Return {
                x: Self::spring(0.0),
                y: Self::spring(0.0),
            },
            last_tick: None,
        }
    }

    fn spring(from: f32) -> Spring {
        let mut spring =
            Spring::elastic(0.0, 0.0).with_rest_threshold(REST_THRESHOLD, REST_THRESHOLD);
        if from != 0.0 {
            spring.snap_to(f64::from(from));
        }
        spring
    }

    /// Resting center (moves when the surface is laid out again).
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Current displacement from the resting center.
    #[must_use]
    pub fn offset(&self) -> (f32, f32) {
        self.motion.offset()
    }

    /// Where to draw the anchor.
    #[must_use]
    pub fn position(&self) -> Point {
        let (dx, dy) = self.offset();
        Point::new(self.center.x + dx, self.center.y + dy)
    }

    /// Whether the pointer currently holds the anchor.
    #[must_use]
    pub fn is_attracted(&self) -> bool {
        matches!(self.motion, Motion::Pull { .. })
    }

    /// Whether the anchor is at rest at its center.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        match &self.motion {
            Motion::Pull { .. } => false,
            Motion::Return { x, y } => x.is_at_rest() && y.is_at_rest(),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            self.motion.tick(now.saturating_duration_since(last));
        }
        self.last_tick = Some(self.last_tick.map_or(now, |last| last.max(now)));
    }

    /// React to the pointer at `pointer`.
    pub fn on_pointer(&mut self, pointer: Point, now: Instant) {
        self.tick(now);
        let (dx, dy) = self.center.delta_to(pointer);
        if self.center.distance(pointer) < self.radius {
            let (tx, ty) = (dx * self.strength, dy * self.strength);
            if let Motion::Pull { x, y } = &mut self.motion {
                x.retarget(tx, self.pull);
                y.retarget(ty, self.pull);
            } else {
                let (cx, cy) = self.motion.offset();
                self.motion = Motion::Pull {
                    x: Tween::new(cx, tx, self.pull).easing(ease_out),
                    y: Tween::new(cy, ty, self.pull).easing(ease_out),
                };
                tracing::trace!("magnet engaged");
            }
        } else {
            self.release(now);
        }
    }

    /// Let go: spring back to the center from wherever the anchor is.
    pub fn release(&mut self, now: Instant) {
        self.tick(now);
        if let Motion::Pull { .. } = self.motion {
            let (cx, cy) = self.motion.offset();
            self.motion = Motion::Return {
                x: Self::spring(cx),
                y: Self::spring(cy),
            };
            tracing::trace!("magnet released");
        }
    }
}
