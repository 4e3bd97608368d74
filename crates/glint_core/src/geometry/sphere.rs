//! Sphere primitive.

use glint_math::{align_zero, Aabb, MathError, Point, Ray, Vector};

use super::GeometryError;

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Point, radius: f64) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius);
        }
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Unit normal at a surface point: parallel to (point - center).
    pub fn normal(&self, point: Point) -> Result<Vector, MathError> {
        Ok(point.subtract(self.center)?.normalize())
    }

    /// Analytic ray intersection: 0, 1 or 2 points, near-to-far.
    ///
    /// Classification by the perpendicular distance `d` from the center to
    /// the ray: `d >= radius` is a miss (a tangent ray does not count as a
    /// hit), otherwise the two quadratic roots are filtered to `t > 0`.
    pub fn intersect(&self, ray: &Ray) -> Vec<Point> {
        // A ray from the exact center hits once, straight ahead, at the
        // radius; going through the general path would subtract coincident
        // points.
        if ray.head() == self.center {
            return vec![ray.point_at(self.radius)];
        }

        let u = match self.center.subtract(ray.head()) {
            Ok(u) => u,
            Err(_) => return vec![ray.point_at(self.radius)],
        };

        let tm = ray.direction().dot(u);
        let d_squared = u.length_squared() - tm * tm;
        if d_squared >= self.radius * self.radius {
            return Vec::new();
        }

        let th = (self.radius * self.radius - d_squared).sqrt();
        let t0 = align_zero(tm - th);
        let t1 = align_zero(tm + th);

        if t0 > 0.0 && t1 > 0.0 {
            vec![ray.point_at(t0), ray.point_at(t1)]
        } else if t0 > 0.0 {
            vec![ray.point_at(t0)]
        } else if t1 > 0.0 {
            vec![ray.point_at(t1)]
        } else {
            Vec::new()
        }
    }

    /// The tight axis-aligned box around the sphere.
    pub fn bounding_box(&self) -> Aabb {
        let c = self.center.as_dvec3();
        Aabb::new(
            Point::from_dvec3(c - self.radius),
            Point::from_dvec3(c + self.radius),
        )
    }
}
