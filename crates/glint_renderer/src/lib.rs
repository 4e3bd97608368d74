//! Rendering front end for GLINT: camera and primary-ray generation, the
//! recursive shader, and the concurrent render loop.

mod camera;
mod pixel;
mod renderer;
mod tracer;

pub use camera::{Camera, CameraBuilder, CameraError};
pub use pixel::PixelManager;
pub use renderer::{render, ImageBuffer, RenderStrategy};
pub use tracer::RayTracer;
