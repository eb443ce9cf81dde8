//! Sphere primitive for ray casting.

use crate::error::{RenderError, RenderResult};
use crate::primitive::{Intersection, Primitive};
use lumen_core::{Material, SphereShape};
use lumen_math::{Point3, Ray, VectorExt};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails with [`RenderError::InvalidPrimitive`] unless the radius is
    /// positive and every component is finite. The squared radius must be a
    /// normal `f64` as well, so the surface never collapses onto the center.
    pub fn new(center: Point3, radius: f64, material: Material) -> RenderResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::InvalidPrimitive(format!(
                "sphere at {center} has non-positive radius {radius}"
            )));
        }
        if !(radius * radius).is_normal() {
            return Err(RenderError::InvalidPrimitive(format!(
                "sphere at {center} has radius {radius} outside the representable range"
            )));
        }
        if !center.is_finite() || !material.is_finite() {
            return Err(RenderError::InvalidPrimitive(format!(
                "sphere at {center} has non-finite parameters"
            )));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    /// Get the center point.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Get the radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Get the surface reflectance.
    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl TryFrom<&SphereShape> for Sphere {
    type Error = RenderError;

    fn try_from(shape: &SphereShape) -> RenderResult<Self> {
        Self::new(shape.center, shape.radius, shape.material)
    }
}

/// Pick the root of the ray/sphere quadratic to report, and whether the hit
/// counts as an outer one.
///
/// One root behind the origin: take the other. Both behind: take the one
/// closer to the origin and mark it inner. Otherwise take the nearer root.
fn select_root(d1: f64, d2: f64) -> (f64, bool) {
    if d1 < 0.0 && d2 > 0.0 {
        (d2, true)
    } else if d1 > 0.0 && d2 < 0.0 {
        (d1, true)
    } else if d1 < 0.0 && d2 < 0.0 {
        (d1.max(d2), false)
    } else {
        (d1.min(d2), true)
    }
}

impl Primitive for Sphere {
    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection> {
        // |direction| == 1, so the quadratic has a unit leading coefficient.
        let oc = ray.origin() - self.center;
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let d1 = (-b + sqrtd) / 2.0;
        let d2 = (-b - sqrtd) / 2.0;

        let (distance, outer) = select_root(d1, d2);

        // Both roots behind the origin: the sphere is not in front of the ray.
        if distance < 0.0 {
            return None;
        }

        let point = ray.at(distance);
        // A normal squared radius keeps the hit point away from the center.
        let normal = (self.center - point).unit().ok()?;

        Some(Intersection {
            point,
            distance,
            // A ray starting inside the sphere always leaves through its
            // inner side.
            outer: outer && c >= 0.0,
            normal,
            material: self.material,
        })
    }
}
