/// Transform builders and homogeneous point transformation
use nalgebra::RowVector4;

use crate::error::TransformError;
use crate::math::{multiply, Mat4, Vec3, EPSILON};

/// Transform builder for 3D transformations
///
/// Every builder produces a matrix for the row-vector convention
/// (`p' = p * M`); translation lives in the bottom row.
pub struct Transform;

impl Transform {
    /// Create a scale matrix
    pub fn scale_matrix(scale: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(scale)
    }

    /// Create a translation matrix
    pub fn translation_matrix(translate: &Vec3) -> Mat4 {
        Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            translate.x, translate.y, translate.z, 1.0,
        )
    }

    pub fn rotation_x_matrix(radian: f32) -> Mat4 {
        let (s, c) = radian.sin_cos();
        Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_y_matrix(radian: f32) -> Mat4 {
        let (s, c) = radian.sin_cos();
        Mat4::new(
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_z_matrix(radian: f32) -> Mat4 {
        let (s, c) = radian.sin_cos();
        Mat4::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix from Euler angles (in radians)
    pub fn rotation_matrix(rotate: &Vec3) -> Mat4 {
        // Apply rotations in order: X, Y, Z
        let rx = Self::rotation_x_matrix(rotate.x);
        let ry = Self::rotation_y_matrix(rotate.y);
        let rz = Self::rotation_z_matrix(rotate.z);
        multiply(&multiply(&rx, &ry), &rz)
    }

    /// Scale, then rotate (X, Y, Z), then translate.
    pub fn affine_matrix(scale: &Vec3, rotate: &Vec3, translate: &Vec3) -> Mat4 {
        let scale_rotate = multiply(&Self::scale_matrix(scale), &Self::rotation_matrix(rotate));
        multiply(&scale_rotate, &Self::translation_matrix(translate))
    }

    /// Create a left-handed perspective projection.
    ///
    /// View-space depth `near_z` maps to NDC depth 0 and `far_z` to 1 after
    /// the perspective divide.
    pub fn perspective_fov_matrix(
        fov_y: f32,
        aspect: f32,
        near_z: f32,
        far_z: f32,
    ) -> Result<Mat4, TransformError> {
        if !(fov_y.is_finite() && fov_y > 0.0 && fov_y < std::f32::consts::PI) {
            return Err(TransformError::InvalidProjection(format!(
                "vertical fov must be in (0, pi), got {fov_y}"
            )));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(TransformError::InvalidProjection(format!(
                "aspect ratio must be positive, got {aspect}"
            )));
        }
        if !(near_z.is_finite() && far_z.is_finite() && near_z > 0.0 && far_z > near_z) {
            return Err(TransformError::InvalidProjection(format!(
                "clip planes must satisfy 0 < near < far, got near {near_z}, far {far_z}"
            )));
        }

        let cot = 1.0 / (fov_y / 2.0).tan();
        let depth = far_z / (far_z - near_z);
        Ok(Mat4::new(
            cot / aspect, 0.0, 0.0, 0.0,
            0.0, cot, 0.0, 0.0,
            0.0, 0.0, depth, 1.0,
            0.0, 0.0, -near_z * depth, 0.0,
        ))
    }

    /// Map NDC to pixels, flipping Y so that screen Y grows downward.
    pub fn viewport_matrix(
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        min_depth: f32,
        max_depth: f32,
    ) -> Mat4 {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Mat4::new(
            half_w, 0.0, 0.0, 0.0,
            0.0, -half_h, 0.0, 0.0,
            0.0, 0.0, max_depth - min_depth, 0.0,
            left + half_w, top + half_h, min_depth, 1.0,
        )
    }
}

/// Transform a point under homogeneous semantics.
///
/// Returns `None` when the resulting `w` is within [`EPSILON`] of zero or
/// the divided point is not finite.
pub fn transform_point(point: &Vec3, matrix: &Mat4) -> Option<Vec3> {
    let h = RowVector4::new(point.x, point.y, point.z, 1.0) * matrix;
    let w = h[3];
    if w.abs() < EPSILON {
        return None;
    }

    let result = Vec3::new(h[0] / w, h[1] / w, h[2] / w);
    if result.iter().all(|c| c.is_finite()) {
        Some(result)
    } else {
        None
    }
}
