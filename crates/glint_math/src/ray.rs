//! Ray type for tracing.

use crate::{is_zero, Point, Vector};

/// Origin offset applied by [`Ray::new_offset`] to keep secondary rays from
/// re-hitting the surface they were spawned on.
const DELTA: f64 = 0.1;

/// A ray with an origin and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    head: Point,
    direction: Vector,
}

impl Ray {
    /// Create a new ray. The direction is stored normalized.
    pub fn new(head: Point, direction: Vector) -> Self {
        Self {
            head,
            direction: direction.normalize(),
        }
    }

    /// Create a ray whose origin is nudged along `normal`, away from the
    /// surface on the side the ray departs to. The sign of the nudge follows
    /// the sign of `direction · normal`; an orthogonal direction gets no
    /// offset. Used for shadow, reflection and refraction rays.
    pub fn new_offset(head: Point, direction: Vector, normal: Vector) -> Self {
        let dn = direction.dot(normal);
        let head = if is_zero(dn) {
            head
        } else {
            // scale is safe: DELTA is non-zero and so is the sign
            head + Vector::new_unchecked(normal.as_dvec3() * if dn > 0.0 { DELTA } else { -DELTA })
        };
        Self::new(head, direction)
    }

    /// The ray's origin.
    #[inline]
    pub fn head(&self) -> Point {
        self.head
    }

    /// The ray's unit direction.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// The point at distance `t` from the origin along the direction.
    pub fn point_at(&self, t: f64) -> Point {
        if is_zero(t) {
            self.head
        } else {
            self.head + Vector::new_unchecked(self.direction.as_dvec3() * t)
        }
    }
}
