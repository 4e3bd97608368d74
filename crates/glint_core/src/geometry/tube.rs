//! Infinite tube and capped cylinder.
//!
//! The cylinder is composed of the tube's lateral-surface computation plus
//! two cap planes; there is no override chain.

use glint_math::{align_zero, MathError, Point, Ray, Vector};

use super::GeometryError;

/// An infinite tube around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    radius: f64,
    axis: Ray,
}

impl Tube {
    pub fn new(radius: f64, axis: Ray) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius);
        }
        Ok(Self { radius, axis })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    /// Lateral-surface normal: project the point onto the axis, then point
    /// away from the projection. A point level with the axis origin
    /// (projection parameter zero) falls back to the direct offset from the
    /// axis origin.
    pub fn normal(&self, point: Point) -> Result<Vector, MathError> {
        let to_point = point.subtract(self.axis.head())?;
        let t = align_zero(self.axis.direction().dot(to_point));
        if t == 0.0 {
            return Ok(to_point.normalize());
        }
        let projection = self.axis.point_at(t);
        Ok(point.subtract(projection)?.normalize())
    }

    /// Lateral intersection is not supported: tubes participate as
    /// normal-only geometry and never report hits.
    pub fn intersect(&self, _ray: &Ray) -> Vec<Point> {
        Vec::new()
    }
}

/// A finite cylinder: a tube section closed by two flat caps.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    pub fn new(height: f64, axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if height <= 0.0 {
            return Err(GeometryError::NonPositiveHeight);
        }
        Ok(Self {
            tube: Tube::new(radius, axis)?,
            height,
        })
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Normal at a surface point: outward cap normal when the point sits on
    /// either cap (its center or anywhere in the cap plane), otherwise the
    /// lateral tube normal.
    pub fn normal(&self, point: Point) -> Result<Vector, MathError> {
        let axis = self.tube.axis();
        let direction = axis.direction();
        let base = axis.head();
        let top = axis.point_at(self.height);

        if point == base {
            return Ok(-direction);
        }
        if point == top {
            return Ok(direction);
        }

        if align_zero(point.subtract(base)?.dot(direction)) == 0.0 {
            return Ok(-direction);
        }
        if align_zero(point.subtract(top)?.dot(direction)) == 0.0 {
            return Ok(direction);
        }

        self.tube.normal(point)
    }

    /// Delegates to the tube's (unsupported) lateral intersection.
    pub fn intersect(&self, ray: &Ray) -> Vec<Point> {
        self.tube.intersect(ray)
    }
}
