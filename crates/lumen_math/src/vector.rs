//! Vector helpers on top of glam's double precision `DVec3`.
//!
//! Points and direction vectors share one representation. The extension
//! trait adds the operations the ray caster needs with an explicit contract
//! for zero-length input: normalizing such a vector is an error, never NaN.

use glam::DVec3;
use thiserror::Error;

/// A position in world space.
pub type Point3 = DVec3;

/// A direction or offset in world space.
pub type Vector3 = DVec3;

/// Tolerance used by [`VectorExt::approx_eq`].
pub const EPSILON: f64 = 1e-6;

/// Errors produced by degenerate geometric input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot normalize zero-length or non-finite vector {0}")]
    ZeroLengthVector(DVec3),
}

/// Extra operations on [`Vector3`] used throughout the renderer.
pub trait VectorExt: Sized {
    /// Euclidean length.
    fn norm(self) -> f64;

    /// Unit vector with the same direction.
    ///
    /// Fails with [`GeometryError::ZeroLengthVector`] when the vector has
    /// zero or non-finite length.
    fn unit(self) -> Result<Self, GeometryError>;

    /// Cosine of the angle between `self` and `other`.
    fn cos_angle(self, other: Self) -> Result<f64, GeometryError>;

    /// Componentwise comparison within [`EPSILON`].
    fn approx_eq(self, other: Self) -> bool;
}

impl VectorExt for DVec3 {
    #[inline]
    fn norm(self) -> f64 {
        self.length()
    }

    #[inline]
    fn unit(self) -> Result<Self, GeometryError> {
        self.try_normalize()
            .ok_or(GeometryError::ZeroLengthVector(self))
    }

    fn cos_angle(self, other: Self) -> Result<f64, GeometryError> {
        Ok(self.unit()?.dot(other.unit()?))
    }

    #[inline]
    fn approx_eq(self, other: Self) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm() {
        assert_eq!(Vector3::new(3.0, 4.0, 0.0).norm(), 5.0);
        assert_eq!(Vector3::new(-1.0, -2.0, -3.0).norm(), 14.0_f64.sqrt());
    }

    #[test]
    fn test_unit() {
        let v = Vector3::new(4.0, 0.0, 0.0).unit().unwrap();
        assert!(v.approx_eq(Vector3::X));

        let v = Vector3::new(1.0, 2.0, 3.0).unit().unwrap();
        let s = 14.0_f64.sqrt();
        assert!(v.approx_eq(Vector3::new(1.0 / s, 2.0 / s, 3.0 / s)));
        assert!((v.norm() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_unit_of_zero_vector_fails() {
        let err = Vector3::ZERO.unit().unwrap_err();
        assert_eq!(err, GeometryError::ZeroLengthVector(Vector3::ZERO));
    }

    #[test]
    fn test_unit_of_non_finite_vector_fails() {
        assert!(Vector3::new(f64::NAN, 0.0, 1.0).unit().is_err());
        assert!(Vector3::new(f64::INFINITY, 0.0, 0.0).unit().is_err());
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(2.0, 3.0, 4.0);

        assert_eq!(a.dot(b), 20.0);
        assert!(a.cross(b).approx_eq(Vector3::new(-1.0, 2.0, -1.0)));
        assert!(b.cross(a).approx_eq(Vector3::new(1.0, -2.0, 1.0)));

        // Right-handed basis
        assert!(Vector3::X.cross(Vector3::Y).approx_eq(Vector3::Z));
    }

    #[test]
    fn test_cos_angle() {
        let a = Vector3::new(2.0, 0.0, 0.0);
        assert!((a.cos_angle(Vector3::new(0.0, 5.0, 0.0)).unwrap()).abs() < EPSILON);
        assert!((a.cos_angle(Vector3::new(-3.0, 0.0, 0.0)).unwrap() + 1.0).abs() < EPSILON);
        assert!(
            (a.cos_angle(Vector3::new(1.0, 1.0, 0.0)).unwrap() - 0.5_f64.sqrt()).abs() < EPSILON
        );
        assert!(a.cos_angle(Vector3::ZERO).is_err());
    }

    #[test]
    fn test_approx_eq_tolerance() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        assert!(a.approx_eq(a + Vector3::splat(1e-7)));
        assert!(!a.approx_eq(a + Vector3::new(0.0, 1e-4, 0.0)));
    }
}
