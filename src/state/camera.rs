// Viewing camera: fixed eye on +Z looking at the disk.
use glam::{Mat4, Vec3};

use crate::model::{CAMERA_DISTANCE, FOV_Y_DEGREES, Z_FAR, Z_NEAR};

/// World-space right/up unit vectors of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: FOV_Y_DEGREES,
            aspect: 1.0,
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }
}

impl Camera {
    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f32;
        }
    }

    pub fn basis(&self) -> CameraBasis {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        CameraBasis { right, up }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy.to_radians(), self.aspect, self.znear, self.zfar)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis_is_screen_aligned() {
        let basis = Camera::default().basis();
        assert!((basis.right - Vec3::X).length() < 1e-6);
        assert!((basis.up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_basis_follows_eye() {
        let cam = Camera {
            eye: Vec3::new(4.0, 0.0, 0.0),
            ..Camera::default()
        };
        let basis = cam.basis();
        assert!((basis.right - Vec3::NEG_Z).length() < 1e-6);
        assert!((basis.up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_resize_ignores_degenerate_sizes() {
        let mut cam = Camera::default();
        cam.resize(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
        cam.resize(800.0, 0.0);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn test_origin_projects_to_clip_centre() {
        let clip = Camera::default().view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
        assert!(clip.w > 0.0);
    }
}
