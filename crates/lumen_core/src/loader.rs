//! JSON scene loading.
//!
//! A scene file looks like:
//!
//! ```json
//! {
//!   "spheres": [
//!     { "center": [0, 0, 0], "radius": 1.5,
//!       "material": { "diffuse": [1, 0.2, 0.2], "specular": [0.5, 0.5, 0.5], "shininess": 10 } }
//!   ],
//!   "lights": [ { "position": [10, 5, 5], "intensity": [255, 255, 255] } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene from {}", path.display());

    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Parse a scene description from a JSON string.
pub fn load_scene_from_str(contents: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(contents)?;
    validate(&scene)?;

    log::info!(
        "Loaded {} spheres and {} lights",
        scene.spheres.len(),
        scene.lights.len()
    );
    Ok(scene)
}

fn validate(scene: &SceneDescription) -> LoadResult<()> {
    for (i, sphere) in scene.spheres.iter().enumerate() {
        if !sphere.center.is_finite() {
            return Err(LoadError::InvalidScene(format!(
                "sphere {i} has a non-finite center"
            )));
        }
        if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
            return Err(LoadError::InvalidScene(format!(
                "sphere {i} has non-positive radius {}",
                sphere.radius
            )));
        }
        if !sphere.material.is_finite() {
            return Err(LoadError::InvalidScene(format!(
                "sphere {i} has a non-finite material coefficient"
            )));
        }
    }

    for (i, light) in scene.lights.iter().enumerate() {
        if !light.position.is_finite() {
            return Err(LoadError::InvalidScene(format!(
                "light {i} has a non-finite position"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{Point3, Vector3};

    #[test]
    fn test_load_scene_from_str() {
        let json = r#"{
            "spheres": [
                { "center": [0, 0, 0], "radius": 1.5,
                  "material": { "diffuse": [1.0, 0.2, 0.2], "specular": [0.5, 0.5, 0.5], "shininess": 10 } },
                { "center": [0, 4, 0], "radius": 1 }
            ],
            "lights": [ { "position": [10, 5, 5], "intensity": [255, 128, 0] } ]
        }"#;

        let scene = load_scene_from_str(json).unwrap();

        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.spheres[0].center, Point3::ZERO);
        assert_eq!(scene.spheres[0].material.diffuse, Vector3::new(1.0, 0.2, 0.2));
        assert_eq!(scene.spheres[0].material.shininess, 10.0);
        // Missing material falls back to the default
        assert_eq!(scene.spheres[1].material, Default::default());
        assert_eq!(scene.lights[0].position, Point3::new(10.0, 5.0, 5.0));
        assert_eq!(scene.lights[0].intensity, [255, 128, 0]);
    }

    #[test]
    fn test_load_empty_scene() {
        let scene = load_scene_from_str("{}").unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_reject_non_positive_radius() {
        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 0 } ] }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(LoadError::InvalidScene(_))
        ));

        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": -2.5 } ] }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(LoadError::InvalidScene(_))
        ));
    }

    #[test]
    fn test_reject_malformed_json() {
        assert!(matches!(
            load_scene_from_str(r#"{ "spheres": [ { "center": [0, 0] } ] }"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_reject_negative_intensity() {
        let json = r#"{ "lights": [ { "position": [0, 0, 0], "intensity": [-1, 0, 0] } ] }"#;
        assert!(matches!(load_scene_from_str(json), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("/nonexistent/lumen/scene.json"),
            Err(LoadError::Io(_))
        ));
    }
}
