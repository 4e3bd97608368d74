//! Geometry primitives and the intersection contract.
//!
//! Shapes form a closed set dispatched through [`Shape`]; a [`Geometry`]
//! binds a shape to its emission color and material and carries an eagerly
//! computed bounding box so that nothing is lazily memoized once a parallel
//! render begins.

mod plane;
mod polygon;
mod sphere;
mod tube;

pub use plane::Plane;
pub use polygon::Polygon;
pub use sphere::Sphere;
pub use tube::{Cylinder, Tube};

use glint_math::{Aabb, Color, MathError, Point, Ray, Vector};
use thiserror::Error;

use crate::material::Material;

/// Construction-time validation failures for shapes.
///
/// These fire during scene assembly, before any ray is traced; trace-time
/// degeneracies surface as [`MathError`] and are caught where they occur.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("degenerate shape parameters: {0}")]
    Math(#[from] MathError),
    #[error("a polygon cannot have less than 3 vertices")]
    TooFewVertices,
    #[error("all vertices of a polygon must lie in the same plane")]
    NotCoplanar,
    #[error("vertices must be ordered and the polygon must be convex")]
    NotConvex,
    #[error("radius must be positive")]
    NonPositiveRadius,
    #[error("height must be positive")]
    NonPositiveHeight,
}

/// The closed set of shape variants.
///
/// Every variant answers the same two questions: the surface normal at a
/// point, and the intersection points with a ray.
#[derive(Debug, Clone)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Polygon),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    /// Unit surface normal at `point`, assumed to lie on the surface.
    pub fn normal(&self, point: Point) -> Result<Vector, MathError> {
        match self {
            Shape::Plane(p) => Ok(p.normal()),
            Shape::Sphere(s) => s.normal(point),
            Shape::Triangle(p) | Shape::Polygon(p) => Ok(p.normal()),
            Shape::Tube(t) => t.normal(point),
            Shape::Cylinder(c) => c.normal(point),
        }
    }

    /// Intersection points with `ray`, in no guaranteed order unless the
    /// shape documents one.
    pub fn intersect(&self, ray: &Ray) -> Vec<Point> {
        match self {
            Shape::Plane(p) => p.intersect(ray),
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Triangle(p) | Shape::Polygon(p) => p.intersect(ray),
            Shape::Tube(t) => t.intersect(ray),
            Shape::Cylinder(c) => c.intersect(ray),
        }
    }

    /// Bounding box, or `None` for unbounded shapes (planes, tubes).
    pub fn bounding_box(&self) -> Option<Aabb> {
        match self {
            Shape::Plane(_) | Shape::Tube(_) | Shape::Cylinder(_) => None,
            Shape::Sphere(s) => Some(s.bounding_box()),
            Shape::Triangle(p) | Shape::Polygon(p) => Some(p.bounding_box()),
        }
    }
}

/// A shape with its shading attributes.
#[derive(Debug, Clone)]
pub struct Geometry {
    shape: Shape,
    emission: Color,
    material: Material,
    // Resolved at construction; never recomputed during a render.
    bbox: Option<Aabb>,
}

impl Geometry {
    /// Wrap a shape with default (black emission, inert material) attributes.
    pub fn new(shape: Shape) -> Self {
        let bbox = shape.bounding_box();
        Self {
            shape,
            emission: Color::BLACK,
            material: Material::default(),
            bbox,
        }
    }

    pub fn sphere(center: Point, radius: f64) -> Result<Self, GeometryError> {
        Ok(Self::new(Shape::Sphere(Sphere::new(center, radius)?)))
    }

    pub fn plane(point: Point, normal: Vector) -> Self {
        Self::new(Shape::Plane(Plane::new(point, normal)))
    }

    pub fn plane_from_points(a: Point, b: Point, c: Point) -> Result<Self, GeometryError> {
        Ok(Self::new(Shape::Plane(Plane::from_points(a, b, c)?)))
    }

    pub fn triangle(a: Point, b: Point, c: Point) -> Result<Self, GeometryError> {
        Ok(Self::new(Shape::Triangle(Polygon::triangle(a, b, c)?)))
    }

    pub fn polygon(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        Ok(Self::new(Shape::Polygon(Polygon::new(vertices)?)))
    }

    pub fn tube(radius: f64, axis: Ray) -> Result<Self, GeometryError> {
        Ok(Self::new(Shape::Tube(Tube::new(radius, axis)?)))
    }

    pub fn cylinder(height: f64, axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        Ok(Self::new(Shape::Cylinder(Cylinder::new(height, axis, radius)?)))
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Unit surface normal at `point`.
    pub fn normal(&self, point: Point) -> Result<Vector, MathError> {
        self.shape.normal(point)
    }
}

/// A single ray/geometry intersection.
///
/// Lives for one trace call only; shading state derived from it (view
/// vector, normal, per-light terms) is computed by the tracer's preprocess
/// step and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// The geometry that was hit.
    pub geometry: &'a Geometry,
    /// The world-space intersection point.
    pub point: Point,
}

/// Anything a ray can be tested against.
pub trait Intersectable: Send + Sync {
    /// All intersections with `ray`. Order between children of a composite
    /// is not guaranteed; callers wanting the closest hit must search.
    fn intersections<'a>(&'a self, ray: &Ray) -> Vec<Intersection<'a>>;

    /// Bounding box, or `None` when unbounded (or empty).
    fn bounding_box(&self) -> Option<Aabb>;
}

impl Intersectable for Geometry {
    fn intersections<'a>(&'a self, ray: &Ray) -> Vec<Intersection<'a>> {
        // Conservative pre-filter: a box miss is a guaranteed shape miss.
        if let Some(bbox) = &self.bbox {
            if !bbox.intersect(ray) {
                return Vec::new();
            }
        }
        self.shape
            .intersect(ray)
            .into_iter()
            .map(|point| Intersection {
                geometry: self,
                point,
            })
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_defaults() {
        let g = Geometry::sphere(Point::ORIGIN, 1.0).unwrap();
        assert_eq!(g.emission(), Color::BLACK);
        assert_eq!(*g.material(), Material::default());
        assert!(g.bounding_box().is_some());
    }

    #[test]
    fn test_plane_is_unbounded() {
        let g = Geometry::plane(Point::ORIGIN, Vector::AXIS_Z);
        assert!(g.bounding_box().is_none());
    }

    #[test]
    fn test_box_prefilter_does_not_lose_hits() {
        let g = Geometry::sphere(Point::new(0.0, 0.0, -5.0), 1.0).unwrap();
        let ray = Ray::new(Point::ORIGIN, -Vector::AXIS_Z);
        let hits = g.intersections(&ray);
        assert_eq!(hits.len(), 2);
        assert!(std::ptr::eq(hits[0].geometry, &g));
    }

    #[test]
    fn test_box_prefilter_rejects_cleanly() {
        let g = Geometry::sphere(Point::new(0.0, 0.0, -5.0), 1.0).unwrap();
        let ray = Ray::new(Point::ORIGIN, Vector::AXIS_X);
        assert!(g.intersections(&ray).is_empty());
    }
}
