//! Circle primitive with static and swept intersection tests.
//!
//! "Swept" means a circle translated linearly from its current position to a
//! final one over the same time interval as the other participant.  The tests
//! are conservative: they may report a hit for two circles that pass the same
//! point at different moments, never the reverse.

use crate::line::{Line, ON_SEGMENT_EPSILON};
use crate::point::Point;

/// Slack added to every contact test.
pub const CONTACT_EPSILON: f64 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub position: Point,
    pub radius:   f64,
}

impl Circle {
    #[inline]
    pub const fn new(position: Point, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Same radius, different centre.
    #[inline]
    pub fn moved_to(&self, position: Point) -> Circle {
        Circle::new(position, self.radius)
    }

    /// Single time-slice overlap: `distance < r1 + r2 + ε`.
    #[inline]
    pub fn has_intersection(&self, other: &Circle) -> bool {
        self.position.distance(other.position) < self.radius + other.radius + CONTACT_EPSILON
    }

    /// `true` if the segment passes through this circle.
    pub fn has_intersection_with_line(&self, line: &Line) -> bool {
        let nearest = line.nearest(self.position);
        self.position.distance(nearest) - self.radius <= CONTACT_EPSILON
            && line.has_point_within(nearest, ON_SEGMENT_EPSILON)
    }

    /// `other` moves from its position to `other_final` while `self` stays put.
    pub fn has_intersection_moving(&self, other: &Circle, other_final: Point) -> bool {
        if self.has_intersection(other) {
            return true;
        }
        if other_final == other.position {
            return false;
        }
        if self.has_intersection(&other.moved_to(other_final)) {
            return true;
        }
        Circle::new(self.position, self.radius + other.radius)
            .has_intersection_with_line(&Line::new(other.position, other_final))
    }

    /// Both circles move over the same interval.
    pub fn has_intersection_both_moving(
        &self,
        self_final: Point,
        other: &Circle,
        other_final: Point,
    ) -> bool {
        let self_static = self.position == self_final;
        let other_static = other.position == other_final;
        match (self_static, other_static) {
            (true, true) => return self.has_intersection(other),
            (true, false) => return self.has_intersection_moving(other, other_final),
            (false, true) => return other.has_intersection_moving(self, self_final),
            (false, false) => {}
        }
        if self.closest_approach(self_final, other, other_final) < self.radius + other.radius + CONTACT_EPSILON {
            return true;
        }

        let own = Line::new(self.position, self_final);
        let theirs = Line::new(other.position, other_final);
        let Some(crossing) = own.intersection(&theirs) else {
            return self.has_intersection_moving(other, other_final);
        };

        let on_own = own.has_point(own.nearest(crossing));
        let on_theirs = theirs.has_point(theirs.nearest(crossing));
        match (on_own, on_theirs) {
            (true, true) => true,
            (true, false) => self.has_intersection_moving(other, other_final),
            (false, true) => other.has_intersection_moving(self, self_final),
            (false, false) => false,
        }
    }

    /// Smallest centre distance while both circles move linearly over the
    /// interval.
    pub fn closest_approach(&self, self_final: Point, other: &Circle, other_final: Point) -> f64 {
        let offset = other.position - self.position;
        let drift = (other_final - other.position) - (self_final - self.position);
        let square = drift.square_norm();
        let t = if square == 0.0 { 0.0 } else { (-offset.dot(drift) / square).clamp(0.0, 1.0) };
        (offset + drift * t).norm()
    }

    /// Map border test used by the planner: the circle comes within
    /// `10%` of its radius of any side of a `[0, map_size]²` square.
    pub fn touches_border(&self, map_size: f64) -> bool {
        let r = self.radius;
        let slack = r * 0.1;
        let p = self.position;
        p.x - r <= slack || p.y - r <= slack || p.x + r - map_size >= slack || p.y + r - map_size >= slack
    }
}
