#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for layout bounds and hit testing.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Geometric center as a continuous point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            f32::from(self.x) + f32::from(self.width) / 2.0,
            f32::from(self.y) + f32::from(self.height) / 2.0,
        )
    }

    /// A rectangle of the given size centered horizontally in `self` at row `y`.
    ///
    /// The width is clamped to the available width.
    pub fn centered_row(&self, y: u16, width: u16) -> Rect {
        let width = width.min(self.width);
        let x = self.x + (self.width - width) / 2;
        Rect::new(x, y, width, 1)
    }
}

/// A continuous screen-space point.
///
/// Pointer followers interpolate in `f32` and only snap to cells when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation from `self` toward `other` by `t` (unclamped).
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Offset from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Point) -> (f32, f32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Nearest cell, clamped to the `u16` range.
    pub fn to_cell(self) -> (u16, u16) {
        let clamp = |v: f32| v.round().clamp(0.0, f32::from(u16::MAX)) as u16;
        (clamp(self.x), clamp(self.y))
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Point::new(f32::from(x), f32::from(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn rect_empty() {
        assert!(Rect::new(0, 0, 0, 5).is_empty());
        assert!(!Rect::from_size(1, 1).is_empty());
    }

    #[test]
    fn rect_center() {
        let c = Rect::new(10, 10, 4, 2).center();
        assert_eq!(c, Point::new(12.0, 11.0));
    }

    #[test]
    fn centered_row_clamps_width() {
        let area = Rect::from_size(20, 10);
        assert_eq!(area.centered_row(4, 6), Rect::new(7, 4, 6, 1));
        assert_eq!(area.centered_row(0, 50), Rect::new(0, 0, 20, 1));
    }

    #[test]
    fn point_lerp_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, -4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(5.0, -2.0));
    }

    #[test]
    fn point_distance() {
        let d = Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn point_to_cell_rounds_and_clamps() {
        assert_eq!(Point::new(1.4, 2.6).to_cell(), (1, 3));
        assert_eq!(Point::new(-5.0, 1.0e9).to_cell(), (0, u16::MAX));
    }
}
