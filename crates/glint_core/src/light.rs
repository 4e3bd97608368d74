//! Light sources.
//!
//! Lights answer three questions about a shaded point: how much light
//! arrives there, from which direction, and from how far away. A point
//! light can carry a disk radius, turning it into an area light for soft
//! shadows: the tracer asks it for a jittered bundle of directions instead
//! of a single one.

use glint_math::{Color, DVec3, MathError, Point, Vector, EPSILON};
use rand::{Rng, RngCore};

/// Uniform background illumination, folded with its coefficient up front.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    pub fn new(intensity: Color) -> Self {
        Self { intensity }
    }

    /// Intensity scaled by a scalar ambient coefficient.
    pub fn scaled(intensity: Color, ka: f64) -> Self {
        Self {
            intensity: intensity.scale(ka),
        }
    }

    /// Intensity scaled per channel.
    pub fn scaled_rgb(intensity: Color, ka: DVec3) -> Self {
        Self {
            intensity: intensity.scale_rgb(ka),
        }
    }

    #[inline]
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

/// A positional or directional light the shader iterates over.
pub trait LightSource: Send + Sync {
    /// Light arriving at `point`.
    fn intensity(&self, point: Point) -> Color;

    /// Unit direction from the light toward `point`. Fails when the point
    /// coincides with the light's position.
    fn l(&self, point: Point) -> Result<Vector, MathError>;

    /// Distance from the light to `point` (infinite for directional light).
    fn distance(&self, point: Point) -> f64;

    /// Directions for soft-shadow sampling: the exact direction plus
    /// `resolution * resolution` jittered ones for area lights. Lights with
    /// no area return just the exact direction.
    fn sample_ls(
        &self,
        point: Point,
        _resolution: u32,
        _rng: &mut dyn RngCore,
    ) -> Vec<Vector> {
        self.l(point).into_iter().collect()
    }
}

/// Parallel light from an infinitely distant source.
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity(&self, _point: Point) -> Color {
        self.intensity
    }

    fn l(&self, _point: Point) -> Result<Vector, MathError> {
        Ok(self.direction)
    }

    fn distance(&self, _point: Point) -> f64 {
        f64::INFINITY
    }
}

/// Omnidirectional light with distance attenuation
/// `1 / (kc + kl*d + kq*d^2)` and an optional disk radius for soft shadows.
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
    radius: f64,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            radius: 0.0,
        }
    }

    /// Constant attenuation factor.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Linear attenuation factor.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Disk radius for soft-shadow sampling; zero keeps shadows hard.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl LightSource for PointLight {
    fn intensity(&self, point: Point) -> Color {
        let d = self.position.distance(point);
        let factor = self.kc + self.kl * d + self.kq * d * d;
        // Guards the light sitting exactly on the shaded point
        self.intensity.scale(1.0 / factor.max(EPSILON))
    }

    fn l(&self, point: Point) -> Result<Vector, MathError> {
        Ok(point.subtract(self.position)?.normalize())
    }

    fn distance(&self, point: Point) -> f64 {
        self.position.distance(point)
    }

    fn sample_ls(&self, point: Point, resolution: u32, rng: &mut dyn RngCore) -> Vec<Vector> {
        let Ok(l) = self.l(point) else {
            return Vec::new();
        };

        let mut directions = vec![l];
        if self.radius <= 0.0 || resolution == 0 {
            return directions;
        }

        let Some((v_right, v_up)) = disk_basis(l) else {
            return directions;
        };

        // Uniform over the disk: sqrt transform on the radius, uniform angle
        for _ in 0..resolution * resolution {
            let r = self.radius * rng.gen::<f64>().sqrt();
            let theta = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
            let offset =
                v_right.as_dvec3() * (r * theta.cos()) + v_up.as_dvec3() * (r * theta.sin());
            let sample = Point::from_dvec3(self.position.as_dvec3() + offset);
            if let Ok(direction) = point.subtract(sample) {
                directions.push(direction.normalize());
            }
        }

        directions
    }
}

/// Orthonormal basis spanning the disk perpendicular to `l`.
fn disk_basis(l: Vector) -> Option<(Vector, Vector)> {
    let v_right = l
        .cross(Vector::AXIS_X)
        .or_else(|_| l.cross(Vector::AXIS_Y))
        .ok()?
        .normalize();
    let v_up = l.cross(v_right).ok()?.normalize();
    Some((v_right, v_up))
}

/// A point light narrowed by a beam direction.
pub struct SpotLight {
    point_light: PointLight,
    direction: Vector,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            point_light: PointLight::new(intensity, position),
            direction: direction.normalize(),
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point_light = self.point_light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point_light = self.point_light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point_light = self.point_light.with_kq(kq);
        self
    }
}

impl LightSource for SpotLight {
    fn intensity(&self, point: Point) -> Color {
        let base = self.point_light.intensity(point);
        match self.l(point) {
            Ok(l) => base.scale(self.direction.dot(l).max(0.0)),
            Err(_) => Color::BLACK,
        }
    }

    fn l(&self, point: Point) -> Result<Vector, MathError> {
        self.point_light.l(point)
    }

    fn distance(&self, point: Point) -> f64 {
        self.point_light.distance(point)
    }
}
