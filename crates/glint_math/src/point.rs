//! Point in 3D space.

use glam::DVec3;

use crate::{MathError, Vector};

/// A location in three-dimensional space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(DVec3);

impl Point {
    /// The coordinate origin.
    pub const ORIGIN: Point = Point(DVec3::ZERO);

    /// Create a point from its coordinates.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn from_dvec3(v: DVec3) -> Self {
        Point(v)
    }

    /// The raw coordinates.
    #[inline]
    pub fn as_dvec3(self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(self) -> f64 {
        self.0.z
    }

    /// The vector from `other` to `self`. Fails when the points coincide.
    pub fn subtract(self, other: Point) -> Result<Vector, MathError> {
        Vector::try_from(self.0 - other.0)
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        self.0.distance_squared(other.0)
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.0.distance(other.0)
    }
}

impl std::ops::Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.as_dvec3())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(1.0, 2.0, 1.0);
        let v = a.subtract(b).unwrap();
        assert_eq!(v, Vector::new(0.0, 0.0, 2.0).unwrap());
    }

    #[test]
    fn test_subtract_coincident_points_fails() {
        let a = Point::new(1.0, 2.0, 3.0);
        assert_eq!(a.subtract(a), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_add_vector() {
        let p = Point::new(1.0, 1.0, 1.0) + Vector::new(0.0, 0.0, -2.0).unwrap();
        assert_eq!(p, Point::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!((a.distance_squared(b) - 25.0).abs() < 1e-12);
    }
}
