use crate::vector::{GeometryError, Point3, Vector3, VectorExt};

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction, so intersection code can
/// rely on `|direction| == 1`. Constructing a ray from a zero-length
/// direction fails instead of producing NaN components.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self, GeometryError> {
        Ok(Self {
            origin,
            direction: direction.unit()?,
        })
    }

    /// Create a ray starting at `from` and pointing towards `to`.
    ///
    /// Fails when the two points coincide.
    pub fn from_points(from: Point3, to: Point3) -> Result<Self, GeometryError> {
        Self::new(from, to - from)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
