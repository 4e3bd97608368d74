//! Non-zero vector in 3D space.

use glam::DVec3;

use crate::{EPSILON, MathError};

/// A vector in three-dimensional space.
///
/// Invariant: never zero-length. Construction and every arithmetic operation
/// that could collapse to zero (`add`, `subtract`, `scale`, `cross`) are
/// fallible; `dot`, `normalize` and negation are not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector(DVec3);

impl Vector {
    /// Unit vector along +X.
    pub const AXIS_X: Vector = Vector(DVec3::X);
    /// Unit vector along +Y.
    pub const AXIS_Y: Vector = Vector(DVec3::Y);
    /// Unit vector along +Z.
    pub const AXIS_Z: Vector = Vector(DVec3::Z);

    /// Create a vector from its coordinates. Fails on a zero-length vector.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, MathError> {
        Self::try_from(DVec3::new(x, y, z))
    }

    /// Internal constructor for values already known to be non-zero.
    #[inline]
    pub(crate) fn new_unchecked(v: DVec3) -> Self {
        debug_assert!(v.abs().max_element() >= EPSILON);
        Vector(v)
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

    /// Vector addition. Fails when the operands cancel out.
    pub fn add(self, rhs: Vector) -> Result<Vector, MathError> {
        Self::try_from(self.0 + rhs.0)
    }

    /// Vector subtraction. Fails when the operands are equal.
    pub fn subtract(self, rhs: Vector) -> Result<Vector, MathError> {
        Self::try_from(self.0 - rhs.0)
    }

    /// Scale by a scalar. Fails when `scalar` is zero.
    pub fn scale(self, scalar: f64) -> Result<Vector, MathError> {
        Self::try_from(self.0 * scalar)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, rhs: Vector) -> f64 {
        self.0.dot(rhs.0)
    }

    /// Cross product. Fails when the vectors are parallel.
    pub fn cross(self, rhs: Vector) -> Result<Vector, MathError> {
        Self::try_from(self.0.cross(rhs.0))
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.0.length_squared()
    }

    /// Length.
    #[inline]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction. Always valid by the invariant.
    #[inline]
    pub fn normalize(self) -> Vector {
        Vector(self.0 / self.length())
    }
}

impl TryFrom<DVec3> for Vector {
    type Error = MathError;

    fn try_from(v: DVec3) -> Result<Self, MathError> {
        if v.abs().max_element() < EPSILON {
            Err(MathError::ZeroVector)
        } else {
            Ok(Vector(v))
        }
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}
