//! Axis-aligned bounding box.
//!
//! Used purely as a cheap, conservative pre-filter ahead of exact
//! intersection tests: [`Aabb::intersect`] may report true for rays that miss
//! the wrapped geometry, but never false for a ray that hits it.

use crate::{Point, Ray};

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point,
    max: Point,
}

impl Aabb {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::from_dvec3(a.as_dvec3().min(b.as_dvec3())),
            max: Point::from_dvec3(a.as_dvec3().max(b.as_dvec3())),
        }
    }

    /// The minimum corner.
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// The maximum corner.
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// The minimal box containing both inputs.
    pub fn combine(a: &Aabb, b: &Aabb) -> Aabb {
        Aabb {
            min: Point::from_dvec3(a.min.as_dvec3().min(b.min.as_dvec3())),
            max: Point::from_dvec3(a.max.as_dvec3().max(b.max.as_dvec3())),
        }
    }

    /// True when `p` lies inside the box or on its boundary.
    pub fn contains(&self, p: Point) -> bool {
        let p = p.as_dvec3();
        p.cmpge(self.min.as_dvec3()).all() && p.cmple(self.max.as_dvec3()).all()
    }

    /// Conservative slab test against a ray over t in [0, inf).
    ///
    /// Never returns false for a ray that hits geometry inside the box;
    /// axis-parallel rays fall out of the arithmetic (division by zero gives
    /// infinities that keep or reject the slab correctly).
    pub fn intersect(&self, ray: &Ray) -> bool {
        let orig = ray.head().as_dvec3();
        let dir = ray.direction().as_dvec3();
        let min = self.min.as_dvec3();
        let max = self.max.as_dvec3();

        let mut t_min = 0.0f64;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let inv = 1.0 / dir[axis];
            let mut t0 = (min[axis] - orig[axis]) * inv;
            let mut t1 = (max[axis] - orig[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max < t_min {
                return false;
            }
        }

        true
    }

    /// The center point of the box.
    pub fn centroid(&self) -> Point {
        Point::from_dvec3((self.min.as_dvec3() + self.max.as_dvec3()) * 0.5)
    }

    /// Index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let size = self.max.as_dvec3() - self.min.as_dvec3();
        if size.x > size.y && size.x > size.z {
            0
        } else if size.y > size.z {
            1
        } else {
            2
        }
    }
}
