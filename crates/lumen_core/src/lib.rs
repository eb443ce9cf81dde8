//! Lumen Core - Renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Scene types**: `SceneDescription`, `SphereShape`, `Material`, `LightSource`
//! - **Loading**: JSON scene files via serde
//! - **Demo data**: the built-in scene and default point of view
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.spheres.len(),
//!     scene.lights.len());
//! ```

pub mod demo;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use demo::{demo_scene, DemoView};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{LightSource, Material, SceneDescription, SphereShape};
