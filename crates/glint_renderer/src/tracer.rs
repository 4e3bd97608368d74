//! Recursive Whitted-style shader.
//!
//! Local illumination (diffuse + specular with attenuated shadows) plus
//! reflection and refraction, recursing with a per-channel attenuation
//! product `k`. A branch dies when every channel of `k` falls below
//! [`MIN_ATTENUATION`] or the depth budget runs out; trace-time degeneracies
//! (zero-length vectors from coincident points) kill only the branch they
//! occur in.

use glam::DVec3;
use glint_math::{align_zero, Color, Point, Ray, Vector};
use glint_core::{Geometry, Intersection, LightSource, Material, Scene};
use rand::RngCore;

/// Hard recursion ceiling for global effects.
const MAX_RECURSION_LEVEL: usize = 10;

/// Attenuation floor: a branch whose running product drops below this on
/// every channel contributes nothing.
const MIN_ATTENUATION: f64 = 0.001;

/// Shading state for one intersection, computed once per trace level.
struct Shaded<'a> {
    geometry: &'a Geometry,
    point: Point,
    /// Unit view direction (the incoming ray's direction).
    v: Vector,
    /// Unit surface normal at the point.
    n: Vector,
    /// `n . v`, zero-aligned. Never zero for a frame that gets shaded.
    nv: f64,
}

impl<'a> Shaded<'a> {
    /// Preprocess an intersection. `None` when the normal is degenerate or
    /// the view direction grazes the surface (`n . v == 0`).
    fn prepare(intersection: Intersection<'a>, ray: &Ray) -> Option<Self> {
        let v = ray.direction();
        let n = intersection.geometry.normal(intersection.point).ok()?;
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return None;
        }
        Some(Self {
            geometry: intersection.geometry,
            point: intersection.point,
            v,
            n,
            nv,
        })
    }

    /// The view direction mirrored about the normal, offset off the surface.
    fn reflected_ray(&self) -> Option<Ray> {
        let direction = self.v.as_dvec3() - self.n.as_dvec3() * (2.0 * self.nv);
        let direction = Vector::try_from(direction).ok()?;
        Some(Ray::new_offset(self.point, direction, self.n))
    }

    /// The view direction continuing through the surface, offset past it.
    fn refracted_ray(&self) -> Ray {
        Ray::new_offset(self.point, self.v, self.n)
    }
}

/// A scene tracer: maps rays to colors.
///
/// Holds only read-only scene state and the soft-shadow configuration, so a
/// single tracer is shared freely across render workers.
pub struct RayTracer<'a> {
    scene: &'a Scene,
    soft_shadows: bool,
    grid_resolution: u32,
}

impl<'a> RayTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            soft_shadows: false,
            grid_resolution: 3,
        }
    }

    /// Enable soft shadows with `grid_resolution`^2 jittered samples per
    /// area light (plus the exact direction).
    pub fn with_soft_shadows(mut self, grid_resolution: u32) -> Self {
        self.soft_shadows = true;
        self.grid_resolution = grid_resolution;
        self
    }

    /// Color seen along `ray`: the background when nothing is hit, black
    /// when the hit cannot be shaded, full recursive shading otherwise.
    pub fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let Some(hit) = self.closest_intersection(ray) else {
            return self.scene.background;
        };
        let Some(frame) = Shaded::prepare(hit, ray) else {
            return Color::BLACK;
        };
        self.scene
            .ambient_light
            .intensity()
            .scale_rgb(frame.geometry.material().ka)
            + self.calc_color(&frame, MAX_RECURSION_LEVEL, DVec3::ONE, rng)
    }

    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let head = ray.head();
        self.scene
            .geometries
            .intersections(ray)
            .into_iter()
            .min_by(|a, b| {
                let da = a.point.distance_squared(head);
                let db = b.point.distance_squared(head);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    fn calc_color(
        &self,
        frame: &Shaded<'_>,
        level: usize,
        k: DVec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let color = self.local_effects(frame, k, rng);
        if level <= 1 {
            return color;
        }
        color + self.global_effects(frame, level, k, rng)
    }

    /// Emission plus the diffuse/specular contribution of every light,
    /// scaled by the shadow/transparency factor exactly once per sample.
    fn local_effects(&self, frame: &Shaded<'_>, k: DVec3, rng: &mut dyn RngCore) -> Color {
        let material = frame.geometry.material();
        let mut color = frame.geometry.emission();

        for light in &self.scene.lights {
            if self.soft_shadows {
                let directions = light.sample_ls(frame.point, self.grid_resolution, rng);
                if directions.is_empty() {
                    continue;
                }
                let samples = directions.len();
                let sum = directions.into_iter().fold(Color::BLACK, |acc, l| {
                    acc + self.light_contribution(frame, material, light.as_ref(), l, k)
                });
                color += sum.reduce(samples);
            } else if let Ok(l) = light.l(frame.point) {
                color += self.light_contribution(frame, material, light.as_ref(), l, k);
            }
        }

        color
    }

    /// One light sample: shadow-attenuated diffuse + Phong specular.
    /// `l` is the unit direction from the light toward the shaded point.
    fn light_contribution(
        &self,
        frame: &Shaded<'_>,
        material: &Material,
        light: &dyn LightSource,
        l: Vector,
        k: DVec3,
    ) -> Color {
        let nl = align_zero(frame.n.dot(l));
        // Light and viewer on opposite sides of the surface
        if nl * frame.nv <= 0.0 {
            return Color::BLACK;
        }

        let ktr = self.transparency(frame, light, l);
        if (ktr * k).max_element() < MIN_ATTENUATION {
            return Color::BLACK;
        }

        let mut factor = material.kd * nl.abs();
        // Phong: mirror l about n, dot against the reversed view direction
        let r = l.as_dvec3() - frame.n.as_dvec3() * (2.0 * nl);
        let minus_vr = -r.dot(frame.v.as_dvec3());
        if minus_vr > 0.0 {
            factor += material.ks * minus_vr.powi(material.shininess);
        }

        light.intensity(frame.point).scale_rgb(ktr * factor)
    }

    /// Per-channel fraction of light reaching the point through occluders
    /// strictly closer than the light. Drops to zero early once every
    /// channel is below the attenuation floor.
    fn transparency(&self, frame: &Shaded<'_>, light: &dyn LightSource, l: Vector) -> DVec3 {
        let shadow_ray = Ray::new_offset(frame.point, -l, frame.n);
        let light_distance = light.distance(frame.point);

        let mut ktr = DVec3::ONE;
        for occluder in self.scene.geometries.intersections(&shadow_ray) {
            if occluder.point.distance(frame.point) < light_distance {
                ktr *= occluder.geometry.material().kt;
                if ktr.max_element() < MIN_ATTENUATION {
                    return DVec3::ZERO;
                }
            }
        }
        ktr
    }

    fn global_effects(
        &self,
        frame: &Shaded<'_>,
        level: usize,
        k: DVec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let material = frame.geometry.material();
        let mut color = Color::BLACK;

        if let Some(reflected) = frame.reflected_ray() {
            color += self.global_effect(&reflected, level, k, material.kr, rng);
        }
        color + self.global_effect(&frame.refracted_ray(), level, k, material.kt, rng)
    }

    /// One secondary branch: recurse with the attenuation product folded by
    /// the branch coefficient, weight the result by that coefficient.
    fn global_effect(
        &self,
        ray: &Ray,
        level: usize,
        k: DVec3,
        kx: DVec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let kk = k * kx;
        if kk.max_element() < MIN_ATTENUATION {
            return Color::BLACK;
        }
        let Some(hit) = self.closest_intersection(ray) else {
            return self.scene.background.scale_rgb(kx);
        };
        match Shaded::prepare(hit, ray) {
            Some(frame) => self.calc_color(&frame, level - 1, kk, rng).scale_rgb(kx),
            None => Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{AmbientLight, Geometries, Material, PointLight};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_color_near(actual: Color, expected: Color) {
        assert!(
            (actual.as_dvec3() - expected.as_dvec3()).length() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn shiny_sphere() -> Geometry {
        Geometry::sphere(Point::new(0.0, 0.0, -5.0), 1.0)
            .unwrap()
            .with_material(
                Material::new()
                    .with_kd(0.5)
                    .with_ks(0.2)
                    .with_shininess(10),
            )
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new("empty").with_background(Color::new(0.2, 0.4, 0.6));
        let tracer = RayTracer::new(&scene);
        let ray = Ray::new(Point::ORIGIN, Vector::AXIS_X);
        assert_eq!(tracer.trace_ray(&ray, &mut rng()), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_unoccluded_sphere_full_contribution() {
        let mut geometries = Geometries::new();
        geometries.add(shiny_sphere());

        let scene = Scene::new("one sphere")
            .with_ambient_light(AmbientLight::new(Color::new(0.1, 0.1, 0.1)))
            .with_geometries(geometries)
            .with_light(PointLight::new(
                Color::new(1.0, 1.0, 1.0),
                Point::new(0.0, 0.0, 10.0),
            ));
        let tracer = RayTracer::new(&scene);

        // Hit at (0,0,-4): n = +Z, l = -Z, v = -Z. Diffuse contributes the
        // full kd, the mirrored light direction lines up with -v so the
        // specular term contributes the full ks, and ktr = 1.
        let ray = Ray::new(Point::ORIGIN, -Vector::AXIS_Z);
        let color = tracer.trace_ray(&ray, &mut rng());
        assert_color_near(color, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_opaque_occluder_leaves_only_ambient() {
        let mut geometries = Geometries::new();
        geometries.add(shiny_sphere());
        // Opaque triangle between the hit point and the light
        geometries.add(
            Geometry::triangle(
                Point::new(-5.0, -5.0, -2.0),
                Point::new(5.0, -5.0, -2.0),
                Point::new(0.0, 5.0, -2.0),
            )
            .unwrap(),
        );

        let scene = Scene::new("shadowed sphere")
            .with_ambient_light(AmbientLight::new(Color::new(0.1, 0.1, 0.1)))
            .with_geometries(geometries)
            .with_light(PointLight::new(
                Color::new(1.0, 1.0, 1.0),
                Point::new(0.0, 0.0, 10.0),
            ));
        let tracer = RayTracer::new(&scene);

        // Start past the triangle so the primary ray reaches the sphere
        let ray = Ray::new(Point::new(0.0, 0.0, -3.0), -Vector::AXIS_Z);
        let color = tracer.trace_ray(&ray, &mut rng());
        assert_color_near(color, Color::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn test_transparency_attenuates_monotonically() {
        let light = || PointLight::new(Color::new(1.0, 1.0, 1.0), Point::new(0.0, 0.0, 10.0));
        let ambient = AmbientLight::new(Color::new(0.1, 0.1, 0.1));
        let ray = Ray::new(Point::new(0.0, 0.0, -3.5), -Vector::AXIS_Z);

        // 0, 1 and 2 half-transparent screens between the point and light
        let mut colors = Vec::new();
        for screens in 0..3 {
            let mut geometries = Geometries::new();
            geometries.add(shiny_sphere());
            for s in 0..screens {
                geometries.add(
                    Geometry::plane(Point::new(0.0, 0.0, -2.0 - s as f64), Vector::AXIS_Z)
                        .with_material(Material::new().with_kt(0.5)),
                );
            }
            let scene = Scene::new("screens")
                .with_ambient_light(ambient)
                .with_geometries(geometries)
                .with_light(light());
            let tracer = RayTracer::new(&scene);
            colors.push(tracer.trace_ray(&ray, &mut rng()));
        }

        // Local term halves per screen: 0.7, 0.35, 0.175 on top of ambient
        assert_color_near(colors[0], Color::new(0.8, 0.8, 0.8));
        assert_color_near(colors[1], Color::new(0.45, 0.45, 0.45));
        assert_color_near(colors[2], Color::new(0.275, 0.275, 0.275));
        assert!(colors[1].r() < colors[0].r() && colors[2].r() < colors[1].r());
    }

    #[test]
    fn test_fully_transparent_outer_sphere_passes_through() {
        let mut geometries = Geometries::new();
        // Outer shell: fully transparent, no local response
        geometries.add(
            Geometry::sphere(Point::new(0.0, 0.0, -10.0), 5.0)
                .unwrap()
                .with_material(Material::new().with_ka(0.0).with_kt(1.0)),
        );
        // Inner sphere: opaque diffuse/specular
        geometries.add(
            Geometry::sphere(Point::new(0.0, 0.0, -10.0), 1.0)
                .unwrap()
                .with_material(
                    Material::new()
                        .with_ka(0.0)
                        .with_kd(0.6)
                        .with_ks(0.3)
                        .with_shininess(4),
                ),
        );

        let scene = Scene::new("concentric")
            .with_geometries(geometries)
            .with_light(PointLight::new(Color::new(1.0, 1.0, 1.0), Point::ORIGIN));
        let tracer = RayTracer::new(&scene);

        // Through both centers: the outer surface adds nothing, the result
        // is the inner sphere's shading carried out through kT = 1
        let ray = Ray::new(Point::ORIGIN, -Vector::AXIS_Z);
        let color = tracer.trace_ray(&ray, &mut rng());
        assert_color_near(color, Color::new(0.9, 0.9, 0.9));
    }

    #[test]
    fn test_mutual_mirrors_terminate() {
        let mut geometries = Geometries::new();
        let mirror = Material::new().with_ka(0.0).with_kr(1.0);
        geometries.add(
            Geometry::plane(Point::new(0.0, 0.0, -10.0), Vector::AXIS_Z).with_material(mirror),
        );
        geometries.add(
            Geometry::plane(Point::new(0.0, 0.0, 0.0), -Vector::AXIS_Z).with_material(mirror),
        );

        let scene = Scene::new("mirror corridor").with_geometries(geometries);
        let tracer = RayTracer::new(&scene);

        // kR = 1 never attenuates; only the depth ceiling stops this
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), -Vector::AXIS_Z);
        let color = tracer.trace_ray(&ray, &mut rng());
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn test_zero_radius_soft_shadows_match_hard() {
        let mut geometries = Geometries::new();
        geometries.add(shiny_sphere());
        let scene = Scene::new("point light")
            .with_ambient_light(AmbientLight::new(Color::new(0.1, 0.1, 0.1)))
            .with_geometries(geometries)
            .with_light(PointLight::new(
                Color::new(1.0, 1.0, 1.0),
                Point::new(0.0, 0.0, 10.0),
            ));

        let ray = Ray::new(Point::ORIGIN, -Vector::AXIS_Z);
        let hard = RayTracer::new(&scene).trace_ray(&ray, &mut rng());
        let soft = RayTracer::new(&scene)
            .with_soft_shadows(3)
            .trace_ray(&ray, &mut rng());
        assert_eq!(hard, soft);
    }

    #[test]
    fn test_mirror_shows_emissive_sphere() {
        let mut geometries = Geometries::new();
        geometries.add(
            Geometry::plane(Point::new(0.0, 0.0, -10.0), Vector::AXIS_Z)
                .with_material(Material::new().with_ka(0.0).with_kr(0.5)),
        );
        geometries.add(
            Geometry::sphere(Point::new(0.0, -5.0, -5.0), 1.0)
                .unwrap()
                .with_emission(Color::new(0.0, 0.8, 0.0)),
        );

        let scene = Scene::new("mirror").with_geometries(geometries);
        let tracer = RayTracer::new(&scene);

        // Hits the mirror at (0,0,-10); the bounce heads for the sphere
        let ray = Ray::new(Point::new(0.0, 10.0, 0.0), Vector::new(0.0, -1.0, -1.0).unwrap());
        let color = tracer.trace_ray(&ray, &mut rng());
        assert!(color.g() > 0.0, "reflection lost the sphere: {:?}", color);
        assert_eq!(color.r(), 0.0);
    }
}
