//! Phong shading with hard shadows.
//!
//! Every lit surface starts from a constant ambient term. Each light that
//! is not occluded adds a diffuse and a specular term per channel. The sum
//! stays unclamped until it is converted into 8-bit intensities.

use crate::primitive::Intersection;
use crate::scene::Scene;
use lumen_core::LightSource;
use lumen_math::{DVec3, GeometryError, Interval, Point3, Ray, VectorExt};

/// Per-channel intensity (x = red, y = green, z = blue).
pub type Color = DVec3;

/// Ambient intensity added to every channel of a hit.
pub const AMBIENT_INTENSITY: f64 = 15.0;

/// Slack on the shadow test so that a surface does not shadow itself.
pub const SHADOW_EPSILON: f64 = 1e-2;

const INTENSITY_RANGE: Interval = Interval::new(0.0, 255.0);

/// Compute the unclamped color seen along a primary ray.
///
/// A ray that hits nothing gives black.
pub fn ray_color(ray: &Ray, scene: &Scene, eye: Point3) -> Result<Color, GeometryError> {
    match scene.closest_intersection(ray) {
        Some(hit) => shade(scene, &hit, eye),
        None => Ok(Color::ZERO),
    }
}

/// Evaluate the lighting model at a hit point.
pub fn shade(scene: &Scene, hit: &Intersection, eye: Point3) -> Result<Color, GeometryError> {
    let mut color = Color::splat(AMBIENT_INTENSITY);

    for light in scene.lights() {
        if is_occluded(scene, hit, light)? {
            continue;
        }

        let intensity = light_intensity(light);
        let to_light = (light.position - hit.point).unit()?;
        let to_eye = (eye - hit.point).unit()?;

        color += diffuse(hit, to_light) * intensity * hit.material.diffuse;
        color += specular(hit, to_light, to_eye)? * intensity * hit.material.specular;
    }

    Ok(color)
}

/// Check whether something sits between `light` and the hit point.
///
/// The shadow ray runs from the light towards the hit. The light counts as
/// visible when nothing is found or when the first surface found is not
/// measurably closer to the light than the hit point itself.
fn is_occluded(
    scene: &Scene,
    hit: &Intersection,
    light: &LightSource,
) -> Result<bool, GeometryError> {
    let shadow_ray = Ray::from_points(light.position, hit.point)?;

    let Some(occluder) = scene.closest_intersection(&shadow_ray) else {
        return Ok(false);
    };

    let hit_distance = (hit.point - light.position).norm();
    let occluder_distance = (occluder.point - light.position).norm();
    Ok(hit_distance > occluder_distance + SHADOW_EPSILON)
}

/// Lambert factor `max(0, L . n)`, with `n` the outward surface normal.
///
/// Intersection normals point into the primitive, so the outward normal is
/// their negation.
fn diffuse(hit: &Intersection, to_light: DVec3) -> f64 {
    to_light.dot(-hit.normal).max(0.0)
}

/// Phong factor `max(0, R . V)^shininess`.
///
/// `R` mirrors the light direction about the normal line, which does not
/// depend on the normal's orientation.
fn specular(hit: &Intersection, to_light: DVec3, to_eye: DVec3) -> Result<f64, GeometryError> {
    let n = hit.normal;
    let reflected = (n * (2.0 * to_light.dot(n)) - to_light).unit()?;

    Ok(reflected.dot(to_eye).max(0.0).powf(hit.material.shininess))
}

fn light_intensity(light: &LightSource) -> Color {
    let [r, g, b] = light.intensity;
    Color::new(r as f64, g as f64, b as f64)
}

/// Clamp a color to [0, 255] and truncate to 8-bit channels.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        INTENSITY_RANGE.clamp(color.x) as u8,
        INTENSITY_RANGE.clamp(color.y) as u8,
        INTENSITY_RANGE.clamp(color.z) as u8,
    ]
}
