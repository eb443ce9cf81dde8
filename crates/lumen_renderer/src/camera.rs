//! Camera for primary ray generation.
//!
//! The screen is a rectangle of `horizontal x vertical` world units centered
//! on the view point and perpendicular to the viewing direction. Pixel
//! (0, 0) sits on its upper-left corner and pixel (width - 1, height - 1) on
//! its lower-right corner.

use crate::error::{RenderError, RenderResult};
use crate::producer::RenderRequest;
use lumen_math::{GeometryError, Point3, Ray, Vector3, VectorExt};

/// Camera for generating primary rays.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: usize,
    pub image_height: usize,

    eye: Point3,
    // Upper-left corner of the screen
    corner: Point3,
    // Screen axes: x to the right, y up
    x_axis: Vector3,
    y_axis: Vector3,
    // World-space step between neighbouring pixels
    pixel_dx: f64,
    pixel_dy: f64,
}

impl Camera {
    /// Build the camera basis for a render request.
    ///
    /// The up vector is orthogonalized against the viewing direction, so it
    /// only needs to be roughly perpendicular to it.
    pub fn new(request: &RenderRequest) -> RenderResult<Self> {
        request.validate()?;

        let forward = (request.view - request.eye).unit()?;
        let up = request.view_up.unit()?;

        let y_axis = (up - forward * forward.dot(up)).unit().map_err(|_| {
            RenderError::InvalidConfig(format!(
                "view up {} is parallel to the viewing direction",
                request.view_up
            ))
        })?;
        let x_axis = forward.cross(y_axis).unit()?;

        let corner = request.view - x_axis * (request.horizontal / 2.0)
            + y_axis * (request.vertical / 2.0);

        Ok(Self {
            image_width: request.width,
            image_height: request.height,
            eye: request.eye,
            corner,
            x_axis,
            y_axis,
            pixel_dx: request.horizontal / (request.width - 1) as f64,
            pixel_dy: request.vertical / (request.height - 1) as f64,
        })
    }

    /// Get the eye position.
    #[inline]
    pub fn eye(&self) -> Point3 {
        self.eye
    }

    /// Get the normalized screen x (right) and y (up) axes.
    pub fn axes(&self) -> (Vector3, Vector3) {
        (self.x_axis, self.y_axis)
    }

    /// World-space position of pixel (x, y) on the screen.
    #[inline]
    pub fn screen_point(&self, x: usize, y: usize) -> Point3 {
        self.corner + self.x_axis * (x as f64 * self.pixel_dx)
            - self.y_axis * (y as f64 * self.pixel_dy)
    }

    /// Generate the ray from the eye through pixel (x, y).
    #[inline]
    pub fn get_ray(&self, x: usize, y: usize) -> Result<Ray, GeometryError> {
        Ray::from_points(self.eye, self.screen_point(x, y))
    }
}
