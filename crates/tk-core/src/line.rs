//! Line segment primitive.

use crate::point::Point;

/// Tolerance used by [`Line::has_point`] when none is given explicitly.
pub const ON_SEGMENT_EPSILON: f64 = 1e-3;

/// A directed segment from `begin` to `end`.
///
/// `nearest` projects onto the *infinite* line through the two points; pair it
/// with [`Line::has_point`] to ask whether the projection falls on the segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub begin: Point,
    pub end:   Point,
}

impl Line {
    #[inline]
    pub const fn new(begin: Point, end: Point) -> Self {
        Self { begin, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.begin.distance(self.end)
    }

    /// Orthogonal projection of `point` onto the infinite line.  A degenerate
    /// segment projects everything onto `begin`.
    pub fn nearest(&self, point: Point) -> Point {
        let to_end = self.end - self.begin;
        let square = to_end.square_norm();
        if square == 0.0 {
            return self.begin;
        }
        let to_point = point - self.begin;
        self.begin + to_end * (to_point.dot(to_end) / square)
    }

    /// Distance from `point` to the infinite line, positive on the left of
    /// `begin → end`.
    pub fn signed_distance(&self, point: Point) -> f64 {
        let (b, e) = (self.begin, self.end);
        ((b.y - e.y) * point.x + (e.x - b.x) * point.y + (b.x * e.y - e.x * b.y)) / self.length()
    }

    #[inline]
    pub fn distance(&self, point: Point) -> f64 {
        self.signed_distance(point).abs()
    }

    /// `true` if a point already known to lie on the infinite line lies on the
    /// segment.  Endpoints are always on the segment.
    pub fn has_point(&self, point: Point) -> bool {
        self.has_point_within(point, ON_SEGMENT_EPSILON)
    }

    pub fn has_point_within(&self, point: Point, max_error: f64) -> bool {
        let to_end = self.end - point;
        if to_end.square_norm() == 0.0 {
            return true;
        }
        let to_begin = self.begin - point;
        if to_begin.square_norm() == 0.0 {
            return true;
        }
        (1.0 + to_begin.cos(to_end)).abs() <= max_error
    }

    /// Intersection of the two infinite lines, `None` when parallel.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let x_diff = Point::new(self.begin.x - self.end.x, other.begin.x - other.end.x);
        let y_diff = Point::new(self.begin.y - self.end.y, other.begin.y - other.end.y);
        let div = x_diff.det(y_diff);
        if div == 0.0 {
            return None;
        }
        let d = Point::new(self.begin.det(self.end), other.begin.det(other.end));
        Some(Point::new(d.det(x_diff) / div, d.det(y_diff) / div))
    }
}
