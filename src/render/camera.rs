//! Perspective camera: aspect tracking for resize, pointer-to-world rays
//! for picking, and an orbit control around the model.

use glam::{Mat4, Vec3};

use super::pick::Ray;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// The session camera: at (40, 40, 40) looking at the origin.
    pub fn session_default(aspect: f32) -> Self {
        Self {
            position: Vec3::splat(40.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_deg: 50.0,
            aspect,
            near: 1.0,
            far: 1000.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Ray from the camera through a pointer position in viewport pixels.
    /// Both axes normalize to [-1, 1]; Y is inverted (pixel origin is
    /// top-left, NDC origin is the viewport center).
    pub fn ray_from_pointer(&self, px: f32, py: f32, width: u32, height: u32) -> Ray {
        let ndc_x = (px / width.max(1) as f32) * 2.0 - 1.0;
        let ndc_y = -((py / height.max(1) as f32) * 2.0 - 1.0);

        let inverse = (self.projection() * self.view()).inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray {
            origin: self.position,
            direction: (far_point - self.position).normalize(),
        }
    }

    /// Orbit around the target, preserving distance. Pitch is clamped
    /// short of the poles to keep the view basis stable.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        let offset = self.position - self.target;
        let radius = offset.length().max(1e-3);
        let mut yaw = offset.z.atan2(offset.x);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();

        yaw += yaw_delta;
        pitch = (pitch + pitch_delta).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );

        let cos_pitch = pitch.cos();
        self.position = self.target
            + Vec3::new(
                radius * cos_pitch * yaw.cos(),
                radius * pitch.sin(),
                radius * cos_pitch * yaw.sin(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_aspect_matches_viewport() {
        let mut camera = Camera::session_default(1.0);
        camera.set_aspect(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn center_pointer_ray_points_at_target() {
        let camera = Camera::session_default(16.0 / 9.0);
        let ray = camera.ray_from_pointer(640.0, 360.0, 1280, 720);
        let to_target = (camera.target - camera.position).normalize();
        assert!((ray.direction - to_target).length() < 1e-4);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn pointer_above_center_raises_the_ray() {
        let camera = Camera::session_default(1.0);
        let center = camera.ray_from_pointer(360.0, 360.0, 720, 720);
        let above = camera.ray_from_pointer(360.0, 100.0, 720, 720);
        assert!(above.direction.y > center.direction.y);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut camera = Camera::session_default(1.0);
        let before = (camera.position - camera.target).length();
        camera.orbit(0.3, -0.2);
        let after = (camera.position - camera.target).length();
        assert!((before - after).abs() < 1e-3);
    }
}
