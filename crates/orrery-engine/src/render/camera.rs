//! Camera and projection matrices.

use glam::{Mat4, Vec3};

use crate::coords::Viewport;

/// A fixed look-at camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub const fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    /// World → eye transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Perspective projection that tracks the window size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    viewport: Viewport,
}

impl Projection {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        debug_assert!(near > 0.0 && far > near);
        Self {
            fov_y_degrees,
            near,
            far,
            viewport: Viewport::new(1.0, 1.0),
        }
    }

    /// Updates the viewport after a window resize.
    ///
    /// Zero dimensions are accepted; the aspect ratio is clamped so the matrix
    /// stays finite.
    pub fn reshape(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::from_size(width, height);
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.aspect_ratio()
    }

    /// Eye → clip transform with wgpu's `[0, 1]` depth range.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio(),
            self.near,
            self.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_finite(m: Mat4) -> bool {
        m.to_cols_array().iter().all(|v| v.is_finite())
    }

    #[test]
    fn reshape_with_zero_height_stays_finite() {
        let mut proj = Projection::new(45.0, 0.1, 50.0);
        proj.reshape(800, 0);
        assert!(is_finite(proj.matrix()));
        proj.reshape(0, 0);
        assert!(is_finite(proj.matrix()));
    }

    #[test]
    fn aspect_follows_reshape() {
        let mut proj = Projection::new(45.0, 0.1, 50.0);
        proj.reshape(800, 600);
        assert!((proj.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
        proj.reshape(600, 800);
        assert!((proj.aspect_ratio() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn near_and_far_map_to_depth_range() {
        let mut proj = Projection::new(45.0, 0.1, 50.0);
        proj.reshape(800, 600);
        let m = proj.matrix();
        let near = m.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = m.project_point3(Vec3::new(0.0, 0.0, -50.0));
        assert!(near.z.abs() < 1e-4, "near depth {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-4, "far depth {}", far.z);
    }

    #[test]
    fn camera_looks_down_negative_z() {
        let cam = Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let origin_eye = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin_eye - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
    }
}
