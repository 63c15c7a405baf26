//! Orbit camera controller

use crate::core::camera::Camera;
use crate::core::input::InputState;
use winit::event::MouseButton;

/// Orbit-style camera controller.
///
/// Left-drag orbits around the target, right-drag zooms. The camera position
/// is derived from spherical coordinates around a fixed look target each
/// update.
pub struct OrbitCameraController {
    /// Orbit sensitivity in radians per pixel
    pub sensitivity: f32,
    /// Zoom sensitivity in meters per pixel
    pub zoom_sensitivity: f32,
    /// Azimuth around the Y axis in radians
    theta: f32,
    /// Elevation above the ground plane in radians
    phi: f32,
    /// Distance from the target in meters
    radius: f32,
}

impl OrbitCameraController {
    /// Create a controller at the given starting orbit
    pub fn new(theta: f32, phi: f32, radius: f32) -> Self {
        Self {
            sensitivity: 0.005,
            zoom_sensitivity: 0.05,
            theta,
            phi,
            radius,
        }
    }

    /// Update camera position from drag input
    pub fn update(&mut self, camera: &mut Camera, input: &InputState) {
        let (dx, dy) = input.drag_delta();

        if input.is_mouse_button_pressed(MouseButton::Left) {
            self.theta -= dx * self.sensitivity;
            self.phi += dy * self.sensitivity;
            // Keep the camera above the ground plane and below the zenith
            self.phi = self.phi.clamp(0.05, 1.5);
        } else if input.is_mouse_button_pressed(MouseButton::Right) {
            self.radius = (self.radius + dy * self.zoom_sensitivity).clamp(1.0, 60.0);
        }

        camera.position = camera.target
            + glam::Vec3::new(
                self.radius * self.phi.cos() * self.theta.sin(),
                self.radius * self.phi.sin(),
                self.radius * self.phi.cos() * self.theta.cos(),
            );
    }

    /// Current distance from the orbit target
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::new(0.0, 0.5, 12.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_camera_stays_on_orbit_radius() {
        let mut controller = OrbitCameraController::new(0.3, 0.5, 10.0);
        let mut camera = Camera::default();
        camera.target = Vec3::new(0.0, 1.0, 0.0);
        let input = InputState::new();

        controller.update(&mut camera, &input);

        let distance = (camera.position - camera.target).length();
        assert!((distance - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_camera_above_ground() {
        let mut controller = OrbitCameraController::default();
        let mut camera = Camera::default();
        camera.target = Vec3::ZERO;
        let input = InputState::new();

        controller.update(&mut camera, &input);
        assert!(camera.position.y > 0.0);
    }
}
