/// Vector and matrix algebra.
///
/// Vectors and matrices are plain nalgebra values. Component-wise
/// arithmetic, `dot`, `cross` and `norm` come straight from nalgebra; this
/// module adds the operations whose edge cases the pipeline cares about.
///
/// All matrices follow the row-vector convention: a point is transformed as
/// `p' = p * M`, so `multiply(a, b)` applies `a` first and `b` second.
/// Matrix literals are written row-major with `Matrix4::new`.

use nalgebra::{Matrix4, Vector3};

use crate::error::TransformError;

pub type Vec3 = Vector3<f32>;
pub type Mat4 = Matrix4<f32>;

/// Tolerance for singular matrices, zero-length vectors and `w ≈ 0`.
pub const EPSILON: f32 = 1e-6;

/// Unit vector in the direction of `v`, or the zero vector if `v` has no
/// usable length.
pub fn normalize(v: &Vec3) -> Vec3 {
    v.try_normalize(EPSILON).unwrap_or_else(Vec3::zeros)
}

pub fn identity() -> Mat4 {
    Mat4::identity()
}

pub fn transpose(m: &Mat4) -> Mat4 {
    m.transpose()
}

/// Composes two transforms: the result applies `a`, then `b`.
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    a * b
}

/// General 4x4 inverse.
///
/// Fails with [`TransformError::Singular`] when the determinant is within
/// [`EPSILON`] of zero.
pub fn try_inverse(m: &Mat4) -> Result<Mat4, TransformError> {
    let determinant = m.determinant();
    if !determinant.is_finite() || determinant.abs() < EPSILON {
        return Err(TransformError::Singular { determinant });
    }
    m.try_inverse()
        .ok_or(TransformError::Singular { determinant })
}

/// Lenient inverse: a singular input is logged and yields the identity.
pub fn inverse(m: &Mat4) -> Mat4 {
    match try_inverse(m) {
        Ok(inv) => inv,
        Err(err) => {
            log::warn!("{err}; falling back to identity");
            identity()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_close(a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -5.0, 6.0);

        assert!(vec_close(&(a + b), &Vec3::new(5.0, -3.0, 9.0)));
        assert!(vec_close(&(a - b), &Vec3::new(-3.0, 7.0, -3.0)));
        assert!(vec_close(&(a * 2.0), &Vec3::new(2.0, 4.0, 6.0)));
        assert!((a.dot(&b) - 12.0).abs() < 1e-6);
        assert!(vec_close(&a.cross(&b), &Vec3::new(27.0, 6.0, -13.0)));
        assert!((Vec3::new(3.0, 4.0, 0.0).norm() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize() {
        let n = normalize(&Vec3::new(0.0, 3.0, 4.0));
        assert!(vec_close(&n, &Vec3::new(0.0, 0.6, 0.8)));
        assert!((n.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize(&Vec3::zeros()), Vec3::zeros());
    }

    #[test]
    fn test_multiply_is_not_commutative() {
        let a = Mat4::new(
            1.0, 2.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            3.0, 0.0, 0.0, 1.0,
        );
        let b = Mat4::new(
            0.0, 1.0, 0.0, 0.0,
            -1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        assert!((multiply(&a, &b) - multiply(&b, &a)).norm() > 1e-3);
    }

    #[test]
    fn test_multiply_by_identity() {
        let m = Mat4::new(
            2.0, 0.0, 1.0, 0.0,
            0.0, 3.0, 0.0, 0.0,
            1.0, 0.0, 4.0, 0.0,
            5.0, 6.0, 7.0, 1.0,
        );
        assert_eq!(multiply(&m, &identity()), m);
        assert_eq!(multiply(&identity(), &m), m);
    }

    #[test]
    fn test_transpose() {
        let m = Mat4::new(
            1.0, 2.0, 3.0, 4.0,
            5.0, 6.0, 7.0, 8.0,
            9.0, 10.0, 11.0, 12.0,
            13.0, 14.0, 15.0, 16.0,
        );
        let t = transpose(&m);
        assert_eq!(t[(0, 3)], 13.0);
        assert_eq!(t[(3, 0)], 4.0);
        assert_eq!(transpose(&t), m);
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = Mat4::new(
            2.0, 0.0, 1.0, 0.0,
            0.0, 3.0, 0.0, 0.0,
            1.0, 0.0, 4.0, 0.0,
            5.0, 6.0, 7.0, 1.0,
        );
        let inv = try_inverse(&m).unwrap();
        assert!((multiply(&m, &inv) - identity()).norm() < 1e-5);
        assert!((multiply(&inv, &m) - identity()).norm() < 1e-5);
    }

    #[test]
    fn test_singular_inverse() {
        let mut m = identity();
        m[(1, 1)] = 0.0;

        assert!(matches!(
            try_inverse(&m),
            Err(TransformError::Singular { .. })
        ));
        assert_eq!(inverse(&m), identity());
    }
}
