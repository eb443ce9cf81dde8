//! Runtime scene: primitives ready for intersection plus light sources.

use crate::error::RenderResult;
use crate::primitive::{Intersection, Primitive, PrimitiveList};
use crate::sphere::Sphere;
use lumen_core::{LightSource, SceneDescription};
use lumen_math::Ray;

/// An immutable collection of primitives and lights.
///
/// A scene is built once before a render and only read while rendering, so
/// it can be shared by every worker thread.
#[derive(Default)]
pub struct Scene {
    primitives: PrimitiveList,
    lights: Vec<LightSource>,
}

impl Scene {
    /// Create a scene from already constructed primitives.
    pub fn new(primitives: PrimitiveList, lights: Vec<LightSource>) -> Self {
        Self { primitives, lights }
    }

    /// Build the runtime scene from a scene description.
    ///
    /// Fails if any sphere is degenerate.
    pub fn from_description(description: &SceneDescription) -> RenderResult<Self> {
        let mut primitives = PrimitiveList::new();
        for shape in &description.spheres {
            primitives.add(Box::new(Sphere::try_from(shape)?));
        }

        log::info!(
            "Built scene with {} primitives and {} lights",
            primitives.len(),
            description.lights.len()
        );

        Ok(Self::new(primitives, description.lights.clone()))
    }

    /// The ordered primitive list.
    pub fn primitives(&self) -> &PrimitiveList {
        &self.primitives
    }

    /// The ordered light list.
    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Find the nearest hit of `ray` over every primitive in the scene.
    ///
    /// Used for both primary and shadow rays.
    #[inline]
    pub fn closest_intersection(&self, ray: &Ray) -> Option<Intersection> {
        self.primitives.closest_intersection(ray)
    }
}
