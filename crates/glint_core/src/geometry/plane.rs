//! Infinite plane.

use glint_math::{align_zero, Point, Ray, Vector};

use super::GeometryError;

/// A plane given by a reference point and a unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    point: Point,
    normal: Vector,
}

impl Plane {
    /// Create a plane from a point and a normal (normalized on the way in).
    pub fn new(point: Point, normal: Vector) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Create a plane through three points.
    ///
    /// Fails when two of the points coincide or all three are collinear,
    /// since either case collapses the cross product to a zero vector.
    pub fn from_points(a: Point, b: Point, c: Point) -> Result<Self, GeometryError> {
        let v1 = b.subtract(a)?;
        let v2 = c.subtract(a)?;
        let normal = v1.cross(v2)?.normalize();
        Ok(Self { point: a, normal })
    }

    /// The plane's unit normal (the same everywhere on the surface).
    #[inline]
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// The reference point the plane was built from.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Intersection with a ray: at most one point.
    ///
    /// A ray parallel to the plane never intersects, even when its origin
    /// lies exactly in the plane. That is a policy, not a numerical accident:
    /// an in-plane ray would otherwise yield infinitely many hits.
    pub fn intersect(&self, ray: &Ray) -> Vec<Point> {
        if ray.head() == self.point {
            return Vec::new();
        }

        let denominator = align_zero(self.normal.dot(ray.direction()));
        if denominator == 0.0 {
            return Vec::new();
        }

        let to_plane = match self.point.subtract(ray.head()) {
            Ok(v) => v,
            Err(_) => return Vec::new(),
        };

        let t = align_zero(self.normal.dot(to_plane) / denominator);
        if t <= 0.0 {
            return Vec::new();
        }

        vec![ray.point_at(t)]
    }
}
