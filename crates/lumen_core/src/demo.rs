//! Built-in demo scene and point of view.
//!
//! The view looks from +X towards the origin with +Z as the up direction,
//! on a 20 x 20 world-unit screen.

use lumen_math::{Point3, Vector3};

use crate::scene::{LightSource, Material, SceneDescription, SphereShape};

/// Camera placement used when the caller does not supply one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemoView {
    /// Eye position
    pub eye: Point3,

    /// Point the eye looks at (center of the screen)
    pub view: Point3,

    /// Approximate up direction
    pub view_up: Vector3,

    /// Screen width in world units
    pub horizontal: f64,

    /// Screen height in world units
    pub vertical: f64,
}

impl Default for DemoView {
    fn default() -> Self {
        Self {
            eye: Point3::new(10.0, 0.0, 0.0),
            view: Point3::ZERO,
            view_up: Vector3::new(0.0, 0.0, 10.0),
            horizontal: 20.0,
            vertical: 20.0,
        }
    }
}

/// Build the demo scene: four spheres lit by two point lights.
pub fn demo_scene() -> SceneDescription {
    SceneDescription::new()
        .with_sphere(SphereShape::new(
            Point3::new(0.0, 0.0, 0.0),
            2.0,
            Material::new(Vector3::new(0.9, 0.2, 0.2), Vector3::splat(0.5), 10.0),
        ))
        .with_sphere(SphereShape::new(
            Point3::new(1.0, 4.0, 2.0),
            1.5,
            Material::new(Vector3::new(0.2, 0.9, 0.3), Vector3::splat(0.4), 20.0),
        ))
        .with_sphere(SphereShape::new(
            Point3::new(-1.0, -4.0, -2.0),
            2.5,
            Material::new(Vector3::new(0.2, 0.3, 0.9), Vector3::splat(0.6), 50.0),
        ))
        .with_sphere(SphereShape::new(
            Point3::new(-8.0, 0.0, 0.0),
            6.0,
            Material::new(Vector3::splat(0.6), Vector3::splat(0.1), 5.0),
        ))
        .with_light(LightSource::new(Point3::new(10.0, 5.0, 5.0), [200, 200, 200]))
        .with_light(LightSource::new(Point3::new(6.0, -8.0, 8.0), [160, 120, 80]))
}
