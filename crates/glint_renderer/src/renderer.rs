//! Render loop: pixels to image buffer under a concurrency strategy.
//!
//! Every pixel is traced independently with an rng seeded from its own
//! coordinates, so all three strategies produce bit-identical buffers for
//! the same scene.

use std::path::Path;
use std::sync::mpsc;

use glint_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::pixel::PixelManager;
use crate::tracer::RayTracer;

/// How the pixel grid is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStrategy {
    /// Plain double loop on the calling thread.
    #[default]
    Sequential,
    /// Data-parallel loop over the pixel buffer.
    DataParallel,
    /// Fixed pool of workers pulling pixels from a shared [`PixelManager`].
    WorkerPool(usize),
}

/// Render output: `nx * ny` colors in row-major order.
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Clamp and quantize to 8-bit RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    /// Write the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }
}

/// Trace one pixel with a coordinate-seeded rng, so the result does not
/// depend on which thread or strategy computes it.
fn render_pixel(camera: &Camera, tracer: &RayTracer<'_>, x: u32, y: u32) -> Color {
    let ray = camera.construct_ray(x, y);
    let mut rng = StdRng::seed_from_u64((y as u64) << 32 | x as u64);
    tracer.trace_ray(&ray, &mut rng)
}

/// Render the full image, blocking until every pixel is written.
pub fn render(camera: &Camera, tracer: &RayTracer<'_>) -> ImageBuffer {
    let (nx, ny) = (camera.nx(), camera.ny());
    log::info!("rendering {}x{} with {:?}", nx, ny, camera.strategy());

    let mut image = ImageBuffer::new(nx, ny);
    match camera.strategy() {
        RenderStrategy::Sequential => {
            for y in 0..ny {
                for x in 0..nx {
                    image.set(x, y, render_pixel(camera, tracer, x, y));
                }
            }
        }
        RenderStrategy::DataParallel => {
            image
                .pixels
                .par_iter_mut()
                .enumerate()
                .for_each(|(index, pixel)| {
                    let x = index as u32 % nx;
                    let y = index as u32 / nx;
                    *pixel = render_pixel(camera, tracer, x, y);
                });
        }
        RenderStrategy::WorkerPool(workers) => {
            let manager = PixelManager::new(nx, ny);
            let (sender, receiver) = mpsc::channel();

            std::thread::scope(|scope| {
                for _ in 0..workers.max(1) {
                    let sender = sender.clone();
                    let manager = &manager;
                    scope.spawn(move || {
                        while let Some((x, y)) = manager.next_pixel() {
                            let color = render_pixel(camera, tracer, x, y);
                            if sender.send((x, y, color)).is_err() {
                                return;
                            }
                            manager.pixel_done();
                        }
                    });
                }
                // Receiving ends once the last worker drops its sender
                drop(sender);
                for (x, y, color) in receiver {
                    image.set(x, y, color);
                }
            });
        }
    }

    image
}
