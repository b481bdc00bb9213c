#![forbid(unsafe_code)]

//! Pointer presence controller ("ghost cursor").
//!
//! A dot and a text label follow the pointer with a short lag. After a quiet
//! window with no pointer activity the dot starts breathing (an endless
//! scale oscillation). Hovering a button or link magnifies and fades it.
//!
//! ```text
//!            quiet window elapsed
//!   ACTIVE ─────────────────────────▶ IDLE
//!     ▲  ◀───────────────────────────  │
//!     │       move / hover event       │
//!     │                                │ enter interactive
//!     │ leave                          ▼
//!     └─────────────────────────────  HOVER ◀── enter interactive (from any)
//! ```
//!
//! Each animated property (dot position, label position, scale, opacity)
//! has exactly one motion slot. A new intent replaces the slot's motion,
//! starting from the property's current value, so follow, idle and hover
//! never fight over a property.
//!
//! All operations are no-ops until [`GhostCursor::mount`] and after
//! [`GhostCursor::unmount`]; an unmounted or not-yet-visible cursor renders
//! nothing.

use std::time::{Duration, Instant};

use folio_core::animation::{Animation, Glide, Tween, Yoyo, ease_in_out, ease_out};
use folio_core::event::HoverEvent;
use folio_core::geometry::Point;

use crate::config::FolioConfig;
use crate::label::LabelChannel;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorState {
    Active,
    Idle,
    Hover,
}

/// What to draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorFrame {
    pub state: CursorState,
    pub dot: Point,
    pub scale: f32,
    pub opacity: f32,
    pub label_position: Point,
    /// Label text; `None` hides the label.
    pub label: Option<String>,
}

/// The single motion slot for scale.
#[derive(Debug, Clone, Copy)]
enum ScaleMotion {
    Tween(Tween),
    Breathing { yoyo: Yoyo, peak: f32 },
}

impl ScaleMotion {
    fn current(&self) -> f32 {
        match self {
            Self::Tween(tween) => tween.current(),
            Self::Breathing { yoyo, peak } => 1.0 + (peak - 1.0) * yoyo.value(),
        }
    }

    fn tick(&mut self, dt: Duration) {
        match self {
            Self::Tween(tween) => tween.tick(dt),
            Self::Breathing { yoyo, .. } => yoyo.tick(dt),
        }
    }

    /// Replace whatever is running with a tween to `to`.
    fn tween_to(&mut self, to: f32, duration: Duration) {
        let from = self.current();
        *self = Self::Tween(Tween::new(from, to, duration).easing(ease_in_out));
    }
}

/// The ghost cursor.
#[derive(Debug)]
pub struct GhostCursor {
    quiet_window: Duration,
    hover_transition: Duration,
    idle_half_cycle: Duration,
    idle_peak_scale: f32,
    hover_scale: f32,
    hover_opacity: f32,

    labels: LabelChannel,
    mounted: bool,
    visible: bool,
    state: CursorState,
    idle_deadline: Option<Instant>,
    last_tick: Option<Instant>,

    dot: Glide,
    label: Glide,
    scale: ScaleMotion,
    opacity: Tween,
}

impl GhostCursor {
    /// An unmounted cursor reading labels from `labels`.
    #[must_use]
    pub fn new(config: &FolioConfig, labels: LabelChannel) -> Self {
        Self {
            quiet_window: config.quiet_window,
            hover_transition: config.hover_transition,
            idle_half_cycle: config.idle_half_cycle,
            idle_peak_scale: config.idle_peak_scale,
            hover_scale: config.hover_scale,
            hover_opacity: config.hover_opacity,
            labels,
            mounted: false,
            visible: false,
            state: CursorState::Active,
            idle_deadline: None,
            last_tick: None,
            dot: Glide::new(Point::ORIGIN, config.dot_glide).easing(ease_out),
            label: Glide::new(Point::ORIGIN, config.label_glide).easing(ease_out),
            scale: ScaleMotion::Tween(Tween::settled(1.0)),
            opacity: Tween::settled(1.0),
        }
    }

    /// Attach to the surface and arm the idle timer.
    pub fn mount(&mut self, now: Instant) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.last_tick = Some(now);
        self.restart_idle_timer(now);
        tracing::debug!("ghost cursor mounted");
    }

    /// Detach. Pending timers are dropped and nothing renders afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.visible = false;
        self.idle_deadline = None;
        self.last_tick = None;
        self.state = CursorState::Active;
        self.scale = ScaleMotion::Tween(Tween::settled(1.0));
        self.opacity = Tween::settled(1.0);
        tracing::debug!("ghost cursor unmounted");
    }

    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Whether the idle oscillation currently owns the scale.
    #[must_use]
    pub fn is_breathing(&self) -> bool {
        matches!(self.scale, ScaleMotion::Breathing { .. })
    }

    /// When the cursor will go idle if nothing else happens.
    #[must_use]
    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle_deadline
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale.current()
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.current()
    }

    /// Where the dot is heading.
    #[must_use]
    pub fn target(&self) -> Point {
        self.dot.target()
    }

    /// Advance animations to `now` and fire the idle timer if it is due.
    pub fn tick(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        if let Some(last) = self.last_tick {
            let dt = now.saturating_duration_since(last);
            self.dot.tick(dt);
            self.label.tick(dt);
            self.scale.tick(dt);
            self.opacity.tick(dt);
        }
        self.last_tick = Some(self.last_tick.map_or(now, |last| last.max(now)));

        if self.idle_deadline.is_some_and(|deadline| now >= deadline) {
            self.idle_deadline = None;
            self.go_idle();
        }
    }

    /// The pointer moved to `(x, y)`.
    pub fn on_pointer_move(&mut self, x: u16, y: u16, now: Instant) {
        if !self.mounted {
            return;
        }
        self.tick(now);
        let to = Point::from((x, y));
        if self.visible {
            self.dot.retarget(to);
            self.label.retarget(to);
        } else {
            self.dot.jump(to);
            self.label.jump(to);
            self.visible = true;
        }
        self.wake();
        self.restart_idle_timer(now);
    }

    /// The element under the pointer changed.
    pub fn on_hover(&mut self, event: &HoverEvent, now: Instant) {
        if !self.mounted {
            return;
        }
        self.tick(now);
        match event {
            HoverEvent::Enter(target) if target.is_interactive() => {
                self.state = CursorState::Hover;
                self.scale.tween_to(self.hover_scale, self.hover_transition);
                self.opacity.retarget(self.hover_opacity, self.hover_transition);
                tracing::trace!(element = %target.id(), "cursor hover start");
            }
            HoverEvent::Enter(_) => self.wake(),
            HoverEvent::Leave(target) => {
                if self.state == CursorState::Hover {
                    self.state = CursorState::Active;
                    self.scale.tween_to(1.0, self.hover_transition);
                    self.opacity.retarget(1.0, self.hover_transition);
                    tracing::trace!(element = %target.id(), "cursor hover end");
                } else {
                    self.wake();
                }
            }
        }
        self.restart_idle_timer(now);
    }

    /// What to draw, or `None` when nothing should be drawn.
    #[must_use]
    pub fn frame(&self) -> Option<CursorFrame> {
        if !self.mounted || !self.visible {
            return None;
        }
        Some(CursorFrame {
            state: self.state,
            dot: self.dot.position(),
            scale: self.scale.current(),
            opacity: self.opacity.current(),
            label_position: self.label.position(),
            label: self.labels.get(),
        })
    }

    fn restart_idle_timer(&mut self, now: Instant) {
        self.idle_deadline = Some(now + self.quiet_window);
    }

    /// Leave IDLE: stop breathing and settle back to normal size.
    fn wake(&mut self) {
        if self.state == CursorState::Idle {
            self.state = CursorState::Active;
            self.scale.tween_to(1.0, self.hover_transition);
            tracing::trace!("cursor active");
        }
    }

    fn go_idle(&mut self) {
        if self.state == CursorState::Hover {
            // Magnification outranks breathing.
            return;
        }
        self.state = CursorState::Idle;
        self.scale = ScaleMotion::Breathing {
            yoyo: Yoyo::new(self.idle_half_cycle),
            peak: self.idle_peak_scale,
        };
        tracing::trace!("cursor idle");
    }
}
