//! Scene model for the GLINT ray tracer.
//!
//! Geometry primitives behind a closed [`Shape`] set, the [`Intersectable`]
//! contract with flat ([`Geometries`]) and hierarchical ([`Bvh`]) composites,
//! materials, light sources and the read-only-at-render [`Scene`] aggregate.

mod bvh;
mod collection;
pub mod geometry;
mod light;
mod material;
mod scene;

pub use bvh::Bvh;
pub use collection::Geometries;
pub use geometry::{Geometry, GeometryError, Intersectable, Intersection, Shape};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use scene::Scene;
