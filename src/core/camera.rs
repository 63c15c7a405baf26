//! Camera for 3D rendering

use crate::core::types::{Vec3, Mat4};

/// Perspective camera with position, look target, and projection parameters
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            target,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 4.0, 10.0), Vec3::new(0.0, 1.0, 0.0), 45.0, 4.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_matrix_centers_target() {
        let camera = Camera::default();
        let view = camera.view_matrix();

        // The look target lands on the camera-space -Z axis
        let target_in_camera = view.transform_point3(camera.target);
        assert!(target_in_camera.x.abs() < 0.001);
        assert!(target_in_camera.y.abs() < 0.001);
        assert!(target_in_camera.z < 0.0);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = Camera::default();
        camera.set_aspect(1920.0, 1080.0);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 0.001);
    }

    #[test]
    fn test_projection_inverse() {
        let camera = Camera::default();
        let vp = camera.view_projection();
        let identity = vp * vp.inverse();
        assert!((identity.w_axis.w - 1.0).abs() < 0.001);
    }
}
