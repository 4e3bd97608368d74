//! Camera and primary-ray generation.

use glint_math::{is_zero, MathError, Point, Ray, Vector};
use thiserror::Error;

use crate::renderer::RenderStrategy;

/// Configuration failures caught before any pixel is traced.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera location was not set")]
    MissingLocation,
    #[error("camera direction was not set")]
    MissingDirection,
    #[error("forward and up vectors are not orthogonal")]
    NotOrthogonal,
    #[error("view-plane width and height must be positive")]
    NonPositiveViewPlane,
    #[error("view-plane distance must be positive")]
    NonPositiveDistance,
    #[error("resolution must be at least 1x1")]
    ZeroResolution,
    #[error(transparent)]
    Math(#[from] MathError),
}

/// A positioned camera with an orthonormal basis and a view plane.
///
/// Built once through [`CameraBuilder`]; immutable for the duration of a
/// render. The right vector is derived, never supplied.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    v_to: Vector,
    v_up: Vector,
    v_right: Vector,
    width: f64,
    height: f64,
    distance: f64,
    nx: u32,
    ny: u32,
    strategy: RenderStrategy,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    #[inline]
    pub fn location(&self) -> Point {
        self.location
    }

    /// Horizontal resolution (columns).
    #[inline]
    pub fn nx(&self) -> u32 {
        self.nx
    }

    /// Vertical resolution (rows).
    #[inline]
    pub fn ny(&self) -> u32 {
        self.ny
    }

    #[inline]
    pub fn strategy(&self) -> RenderStrategy {
        self.strategy
    }

    /// The primary ray through the center of pixel (column `j`, row `i`).
    ///
    /// Row 0 is the top of the image; the view-plane center sits `distance`
    /// along the forward vector.
    pub fn construct_ray(&self, j: u32, i: u32) -> Ray {
        let y_i = -(i as f64 - (self.ny - 1) as f64 / 2.0) * self.height / self.ny as f64;
        let x_j = (j as f64 - (self.nx - 1) as f64 / 2.0) * self.width / self.nx as f64;

        let mut direction = self.v_to.as_dvec3() * self.distance;
        if !is_zero(x_j) {
            direction += self.v_right.as_dvec3() * x_j;
        }
        if !is_zero(y_i) {
            direction += self.v_up.as_dvec3() * y_i;
        }

        // Positive view-plane distance keeps the pixel off the camera
        let direction = Vector::try_from(direction).expect("non-zero by construction");
        Ray::new(self.location, direction)
    }
}

/// Staged camera configuration, validated in [`build`](CameraBuilder::build).
#[derive(Debug, Default)]
pub struct CameraBuilder {
    location: Option<Point>,
    direction: Option<(Vector, Vector)>,
    width: f64,
    height: f64,
    distance: f64,
    nx: u32,
    ny: u32,
    strategy: RenderStrategy,
}

impl CameraBuilder {
    pub fn location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }

    /// Forward and up vectors; they must be orthogonal but need not be unit
    /// length (normalized at build time).
    pub fn direction(mut self, v_to: Vector, v_up: Vector) -> Self {
        self.direction = Some((v_to, v_up));
        self
    }

    /// View-plane width and height in world units.
    pub fn view_plane_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Distance from the camera to the view plane.
    pub fn view_plane_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Image resolution: `nx` columns by `ny` rows.
    pub fn resolution(mut self, nx: u32, ny: u32) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    pub fn strategy(mut self, strategy: RenderStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate the configuration and derive the right vector.
    pub fn build(self) -> Result<Camera, CameraError> {
        let location = self.location.ok_or(CameraError::MissingLocation)?;
        let (v_to, v_up) = self.direction.ok_or(CameraError::MissingDirection)?;

        if !is_zero(v_to.dot(v_up)) {
            return Err(CameraError::NotOrthogonal);
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CameraError::NonPositiveViewPlane);
        }
        if self.distance <= 0.0 {
            return Err(CameraError::NonPositiveDistance);
        }
        if self.nx == 0 || self.ny == 0 {
            return Err(CameraError::ZeroResolution);
        }

        let v_to = v_to.normalize();
        let v_up = v_up.normalize();
        let v_right = v_to.cross(v_up)?.normalize();

        Ok(Camera {
            location,
            v_to,
            v_up,
            v_right,
            width: self.width,
            height: self.height,
            distance: self.distance,
            nx: self.nx,
            ny: self.ny,
            strategy: self.strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_direction(ray: &Ray, expected: Vector) {
        let d = ray.direction();
        assert!(
            (d.as_dvec3() - expected.as_dvec3()).length() < 1e-12,
            "expected {:?}, got {:?}",
            expected,
            d
        );
    }

    fn basic_builder() -> CameraBuilder {
        Camera::builder()
            .location(Point::ORIGIN)
            .direction(-Vector::AXIS_Z, Vector::AXIS_Y)
            .view_plane_size(6.0, 6.0)
            .view_plane_distance(10.0)
            .resolution(3, 3)
    }

    #[test]
    fn test_non_orthogonal_direction_fails() {
        let result = basic_builder()
            .direction(
                Vector::new(0.0, 0.0, -1.0).unwrap(),
                Vector::new(0.0, 1.0, -1.0).unwrap(),
            )
            .build();
        assert!(matches!(result, Err(CameraError::NotOrthogonal)));
    }

    #[test]
    fn test_missing_fields_fail() {
        assert!(matches!(
            CameraBuilder::default().build(),
            Err(CameraError::MissingLocation)
        ));
        assert!(matches!(
            CameraBuilder::default().location(Point::ORIGIN).build(),
            Err(CameraError::MissingDirection)
        ));
    }

    #[test]
    fn test_invalid_view_plane_fails() {
        let result = basic_builder().view_plane_size(0.0, 6.0).build();
        assert!(matches!(result, Err(CameraError::NonPositiveViewPlane)));

        let result = basic_builder().view_plane_distance(-1.0).build();
        assert!(matches!(result, Err(CameraError::NonPositiveDistance)));

        let result = basic_builder().resolution(0, 3).build();
        assert!(matches!(result, Err(CameraError::ZeroResolution)));
    }

    #[test]
    fn test_center_pixel_ray() {
        let camera = basic_builder().build().unwrap();
        let ray = camera.construct_ray(1, 1);
        assert_eq!(ray.head(), Point::ORIGIN);
        assert_direction(&ray, -Vector::AXIS_Z);
    }

    #[test]
    fn test_corner_pixel_ray() {
        let camera = basic_builder().build().unwrap();
        // Top-left pixel: 2 left, 2 up, 10 forward
        // v_right = (-Z) x Y = X, so left is -X
        let ray = camera.construct_ray(0, 0);
        assert_direction(&ray, Vector::new(-2.0, 2.0, -10.0).unwrap().normalize());
    }

    #[test]
    fn test_even_resolution_offsets() {
        let camera = basic_builder().resolution(4, 4).build().unwrap();
        // Pixel (1,1) center sits half a pixel left of and above the axis:
        // offset -0.75 in x, +0.75 in y at pixel size 1.5
        let ray = camera.construct_ray(1, 1);
        assert_direction(
            &ray,
            Vector::new(-0.75, 0.75, -10.0).unwrap().normalize(),
        );
    }

    #[test]
    fn test_unnormalized_input_is_normalized() {
        let camera = basic_builder()
            .direction(
                Vector::new(0.0, 0.0, -7.0).unwrap(),
                Vector::new(0.0, 3.0, 0.0).unwrap(),
            )
            .build()
            .unwrap();
        let ray = camera.construct_ray(1, 1);
        assert_direction(&ray, -Vector::AXIS_Z);
    }
}
