//! Math primitives for the GLINT ray tracer.
//!
//! Points, vectors, colors, rays and axis-aligned bounding boxes, all backed
//! by `glam::DVec3`. Vectors carry a non-zero-length invariant: any operation
//! that could produce a zero-length vector is fallible and returns
//! [`MathError::ZeroVector`], which trace-time callers catch locally and
//! treat as "no intersection" / "no contribution".

// Re-export glam for convenience
pub use glam::DVec3;

use thiserror::Error;

mod aabb;
mod color;
mod point;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use color::Color;
pub use point::Point;
pub use ray::Ray;
pub use vector::Vector;

/// Tolerance under which a scalar is considered zero.
pub const EPSILON: f64 = 1e-10;

/// Errors from degenerate math operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// The operation would produce (or was given) a zero-length vector.
    #[error("vector cannot have zero length")]
    ZeroVector,
}

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snaps near-zero values to exactly zero, leaving others untouched.
///
/// Used ahead of sign tests so that floating-point dust does not flip a
/// boundary case from "parallel" to "grazing hit".
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
