//! Planar point/vector algebra.
//!
//! `Point` is used both as a position and as a displacement.  All arithmetic
//! is plain `f64`; `norm` deliberately computes `(x*x + y*y).sqrt()` rather
//! than `f64::hypot` so results are reproducible bit-for-bit across the
//! planner's distance comparisons.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Wrap an angle into `[-π, π]`.
#[inline]
pub fn normalize_angle(value: f64) -> f64 {
    if value > PI {
        value - (value * 0.5 / PI).round() * 2.0 * PI
    } else if value < -PI {
        value + (value.abs() * 0.5 / PI).round() * 2.0 * PI
    } else {
        value
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A 2-D point or vector in world coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, counter-clockwise from +x).
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Point::new(1.0, 0.0).rotated(angle)
    }

    #[inline]
    pub fn square_norm(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.square_norm().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).norm()
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (determinant of the 2×2 matrix `[self; other]`).
    #[inline]
    pub fn det(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Cosine of the angle between two vectors.  NaN if either is zero.
    #[inline]
    pub fn cos(self, other: Point) -> f64 {
        self.dot(other) / (self.norm() * other.norm())
    }

    pub fn rotated(self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Heading of this vector, `atan2(y, x)`.
    #[inline]
    pub fn absolute_rotation(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// The vector rotated by +90°.
    #[inline]
    pub fn left_orthogonal(self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Unit vector with the same heading.  NaN for the zero vector.
    #[inline]
    pub fn normalized(self) -> Point {
        self / self.norm()
    }

    /// Nearest integer lattice point (halfway cases round away from zero).
    #[inline]
    pub fn to_grid(self) -> GridPoint {
        GridPoint::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    #[inline]
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── GridPoint ─────────────────────────────────────────────────────────────────

/// Integer lattice coordinate used as the local planner's search key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Euclidean length of this lattice vector.
    #[inline]
    pub fn norm(self) -> f64 {
        self.to_point().norm()
    }
}

impl Add for GridPoint {
    type Output = GridPoint;
    #[inline]
    fn add(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPoint {
    type Output = GridPoint;
    #[inline]
    fn sub(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
