/// Camera and projection utilities
use crate::error::TransformError;
use crate::math::{inverse, Mat4, Vec3};
use crate::transform::Transform;

/// Camera placement for 3D rendering
///
/// The effective eye position is `position + translate`; `rotate` holds
/// Euler angles in radians, applied X, then Y, then Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub translate: Vec3,
    pub rotate: Vec3,
    pub position: Vec3,
}

impl CameraState {
    pub fn new(translate: Vec3, rotate: Vec3, position: Vec3) -> Self {
        Self {
            translate,
            rotate,
            position,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.position + self.translate
    }

    /// Placement of the camera body in world space
    pub fn camera_matrix(&self) -> Mat4 {
        Transform::affine_matrix(&Vec3::new(1.0, 1.0, 1.0), &self.rotate, &self.eye())
    }

    /// Create the view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        inverse(&self.camera_matrix())
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotate += Vec3::new(dx, dy, dz);
    }

    pub fn translate_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translate += Vec3::new(dx, dy, dz);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 1.9, -6.49),
            Vec3::new(0.26, 0.0, 0.0),
            Vec3::new(0.0, 1.0, -5.0),
        )
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub near_z: f32,
    pub far_z: f32,
}

impl Projection {
    pub fn new(fov_y: f32, near_z: f32, far_z: f32) -> Self {
        Self {
            fov_y,
            near_z,
            far_z,
        }
    }

    /// Create the projection matrix for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Result<Mat4, TransformError> {
        Transform::perspective_fov_matrix(self.fov_y, aspect, self.near_z, self.far_z)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(0.45, 0.1, 100.0)
    }
}

/// Target render surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: u32,
    pub height: u32,
    /// Height of one pixel relative to its width. Terminal cells are
    /// roughly twice as tall as they are wide.
    pub pixel_aspect: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
            pixel_aspect: 1.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    pub fn with_pixel_aspect(mut self, pixel_aspect: f32) -> Self {
        self.pixel_aspect = pixel_aspect;
        self
    }

    /// Physical width over height of the surface
    pub fn aspect(&self) -> f32 {
        self.width as f32 / (self.height as f32 * self.pixel_aspect)
    }

    pub fn viewport_matrix(&self) -> Mat4 {
        Transform::viewport_matrix(
            self.left,
            self.top,
            self.width as f32,
            self.height as f32,
            self.min_depth,
            self.max_depth,
        )
    }
}
