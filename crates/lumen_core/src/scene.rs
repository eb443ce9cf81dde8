//! Scene description types for Lumen.
//!
//! These are plain data: they carry what a scene contains but know nothing
//! about intersection or shading. The renderer turns a `SceneDescription`
//! into its own runtime primitives.

use lumen_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Phong reflectance coefficients of a surface.
///
/// Each vector holds one coefficient per color channel (x = red, y = green,
/// z = blue).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse reflectance (kd) per channel
    pub diffuse: Vector3,

    /// Specular reflectance (kr) per channel
    pub specular: Vector3,

    /// Shininess exponent of the specular highlight
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vector3::splat(0.5),
            specular: Vector3::splat(0.5),
            shininess: 10.0,
        }
    }
}

impl Material {
    /// Create a new material from per-channel coefficients.
    pub fn new(diffuse: Vector3, specular: Vector3, shininess: f64) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }

    /// Check that every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        self.diffuse.is_finite() && self.specular.is_finite() && self.shininess.is_finite()
    }
}

/// A point light with an integer intensity per color channel.
///
/// Intensities are nominally 0-255 but are not clamped; shading arithmetic
/// stays unclamped until the final pixel value is written.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    /// Light position in world space
    pub position: Point3,

    /// Red, green and blue intensity
    pub intensity: [u32; 3],
}

impl LightSource {
    /// Create a new light.
    pub fn new(position: Point3, intensity: [u32; 3]) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// Create a white light with the same intensity on every channel.
    pub fn white(position: Point3, intensity: u32) -> Self {
        Self::new(position, [intensity; 3])
    }
}

/// A sphere as stored in a scene file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereShape {
    /// Center point
    pub center: Point3,

    /// Radius (must be positive)
    pub radius: f64,

    /// Surface reflectance
    #[serde(default)]
    pub material: Material,
}

impl SphereShape {
    /// Create a new sphere description.
    pub fn new(center: Point3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// An ordered list of spheres and lights.
///
/// Order matters: when two primitives report the same hit distance the one
/// listed first wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub spheres: Vec<SphereShape>,

    #[serde(default)]
    pub lights: Vec<LightSource>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere (builder style).
    pub fn with_sphere(mut self, sphere: SphereShape) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Add a light (builder style).
    pub fn with_light(mut self, light: LightSource) -> Self {
        self.lights.push(light);
        self
    }

    /// Check if the scene contains neither spheres nor lights.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.lights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_builder_keeps_order() {
        let scene = SceneDescription::new()
            .with_sphere(SphereShape::new(Point3::ZERO, 1.0, Material::default()))
            .with_sphere(SphereShape::new(Point3::X, 2.0, Material::default()))
            .with_light(LightSource::white(Point3::new(0.0, 0.0, 10.0), 200));

        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.spheres[0].radius, 1.0);
        assert_eq!(scene.spheres[1].radius, 2.0);
        assert_eq!(scene.lights[0].intensity, [200, 200, 200]);
        assert!(!scene.is_empty());
    }

    #[test]
    fn test_empty_scene() {
        assert!(SceneDescription::new().is_empty());
    }

    #[test]
    fn test_material_is_finite() {
        assert!(Material::default().is_finite());

        let bad = Material::new(Vector3::new(f64::NAN, 0.0, 0.0), Vector3::ZERO, 1.0);
        assert!(!bad.is_finite());
    }
}
