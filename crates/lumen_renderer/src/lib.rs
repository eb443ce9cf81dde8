//! Lumen Renderer - parallel CPU ray casting.
//!
//! Casts one primary ray per pixel, finds the nearest sphere hit and shades
//! it with a Phong model and hard shadows. Rows are split recursively into
//! independent spans that run on a rayon pool.

mod camera;
mod error;
mod primitive;
mod producer;
mod scene;
mod scheduler;
mod shading;
mod sphere;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use primitive::{Intersection, Primitive, PrimitiveList};
pub use producer::{
    FrameBuffers, FrameProducer, ProducerConfig, RenderObserver, RenderRequest, RenderStats,
};
pub use scene::Scene;
pub use scheduler::{PlaneSlices, RowSpan, TileScheduler, DEFAULT_LEAF_ROWS};
pub use shading::{color_to_rgb, ray_color, shade, Color, AMBIENT_INTENSITY, SHADOW_EPSILON};
pub use sphere::Sphere;

/// Re-export math types from lumen_math
pub use lumen_math::{GeometryError, Point3, Ray, Vector3, VectorExt};
