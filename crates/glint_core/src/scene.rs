//! Scene container.

use glint_math::Color;

use crate::collection::Geometries;
use crate::geometry::Intersectable;
use crate::light::{AmbientLight, LightSource};

/// Everything a tracer needs: geometry, lights, ambient term, and the
/// background color for rays that escape. Plain data with chainable
/// setters; no behavior of its own.
pub struct Scene {
    pub name: String,
    pub background: Color,
    pub ambient_light: AmbientLight,
    pub geometries: Box<dyn Intersectable>,
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            ambient_light: AmbientLight::NONE,
            geometries: Box::new(Geometries::new()),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Replace the geometry container wholesale, e.g. with a built [`crate::Bvh`].
    pub fn with_geometries(mut self, geometries: impl Intersectable + 'static) -> Self {
        self.geometries = Box::new(geometries);
        self
    }

    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }
}
