//! Renders a small showcase scene and saves it as a PNG.
//!
//! A reflective floor, a glass-like shell around a solid core, a mirror
//! sphere and a couple of triangles, lit by a spot light and a soft point
//! light.

use anyhow::Result;
use glam::DVec3;
use glint_core::{AmbientLight, Bvh, Geometry, Material, PointLight, Scene, SpotLight};
use glint_math::{Color, Point, Vector};
use glint_renderer::{render, Camera, RayTracer, RenderStrategy};

fn build_scene() -> Result<Scene> {
    let mut geometries = Vec::new();

    // Reflective floor
    geometries.push(
        Geometry::plane(Point::new(0.0, -3.0, 0.0), Vector::AXIS_Y).with_material(
            Material::new()
                .with_kd(0.4)
                .with_ks(0.2)
                .with_kr(0.3)
                .with_shininess(60),
        ),
    );

    // Transparent shell around a solid core
    geometries.push(
        Geometry::sphere(Point::new(0.0, 0.0, -12.0), 2.5)?.with_material(
            Material::new()
                .with_kd(0.05)
                .with_ks(0.3)
                .with_kt(0.8)
                .with_shininess(100),
        ),
    );
    geometries.push(
        Geometry::sphere(Point::new(0.0, 0.0, -12.0), 1.0)?
            .with_emission(Color::new(0.1, 0.0, 0.0))
            .with_material(Material::new().with_kd_rgb(DVec3::new(0.8, 0.2, 0.2))),
    );

    // Mirror sphere off to the side
    geometries.push(
        Geometry::sphere(Point::new(-4.0, -1.0, -14.0), 2.0)?.with_material(
            Material::new()
                .with_kd(0.1)
                .with_ks(0.4)
                .with_kr(0.8)
                .with_shininess(200),
        ),
    );

    // A pair of triangles standing behind the spheres
    geometries.push(
        Geometry::triangle(
            Point::new(2.0, -3.0, -18.0),
            Point::new(8.0, -3.0, -18.0),
            Point::new(5.0, 4.0, -18.0),
        )?
        .with_material(Material::new().with_kd_rgb(DVec3::new(0.2, 0.6, 0.2)).with_ks(0.2)),
    );
    geometries.push(
        Geometry::triangle(
            Point::new(-8.0, -3.0, -17.0),
            Point::new(-3.0, -3.0, -19.0),
            Point::new(-6.0, 3.0, -18.0),
        )?
        .with_material(Material::new().with_kd_rgb(DVec3::new(0.2, 0.3, 0.7)).with_ks(0.2)),
    );

    Ok(Scene::new("reflection demo")
        .with_background(Color::new(0.02, 0.02, 0.05))
        .with_ambient_light(AmbientLight::new(Color::new(0.05, 0.05, 0.05)))
        .with_geometries(Bvh::build(geometries))
        .with_light(
            SpotLight::new(
                Color::new(0.9, 0.9, 0.8),
                Point::new(8.0, 8.0, -4.0),
                Vector::new(-1.0, -1.0, -1.0)?,
            )
            .with_kl(0.001)
            .with_kq(0.0001),
        )
        .with_light(
            PointLight::new(Color::new(0.4, 0.4, 0.5), Point::new(-6.0, 6.0, -2.0))
                .with_kl(0.001)
                .with_kq(0.0001)
                .with_radius(0.8),
        ))
}

fn main() -> Result<()> {
    env_logger::init();

    let scene = build_scene()?;
    let tracer = RayTracer::new(&scene).with_soft_shadows(3);

    let camera = Camera::builder()
        .location(Point::new(0.0, 1.0, 2.0))
        .direction(-Vector::AXIS_Z, Vector::AXIS_Y)
        .view_plane_size(16.0, 9.0)
        .view_plane_distance(10.0)
        .resolution(800, 450)
        .strategy(RenderStrategy::WorkerPool(8))
        .build()?;

    let start = std::time::Instant::now();
    let image = render(&camera, &tracer);
    log::info!("rendered in {:?}", start.elapsed());

    image.save_png("reflection_demo.png")?;
    println!("saved reflection_demo.png");
    Ok(())
}
