//! Primitive trait and Intersection for ray-object intersection.

use lumen_core::Material;
use lumen_math::{Point3, Ray, Vector3};

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Point of intersection
    pub point: Point3,
    /// Distance along the ray, used to pick the nearest hit
    pub distance: f64,
    /// Whether the ray started outside the primitive
    pub outer: bool,
    /// Surface normal at the intersection, pointing from the surface
    /// towards the interior of the primitive
    pub normal: Vector3,
    /// Reflectance of the primitive that was hit
    pub material: Material,
}

/// Trait for objects that can be hit by rays.
pub trait Primitive: Send + Sync {
    /// Find the nearest intersection in front of the ray origin.
    ///
    /// The ray direction is unit length. Returns `None` on a miss.
    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection>;
}

/// An ordered list of primitives.
///
/// Its `closest_intersection` scans every primitive and keeps the hit with
/// the smallest distance. Ties go to the primitive added first.
#[derive(Default)]
pub struct PrimitiveList {
    objects: Vec<Box<dyn Primitive>>,
}

impl PrimitiveList {
    /// Create a new empty primitive list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the end of the list.
    pub fn add(&mut self, object: Box<dyn Primitive>) {
        self.objects.push(object);
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Primitive for PrimitiveList {
    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection> {
        let mut closest: Option<Intersection> = None;

        for object in &self.objects {
            let Some(hit) = object.closest_intersection(ray) else {
                continue;
            };
            if closest.map_or(true, |c| hit.distance < c.distance) {
                closest = Some(hit);
            }
        }

        closest
    }
}
