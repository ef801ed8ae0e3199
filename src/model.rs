//! Core data models for the video disk.
//! Tunables are compile-time constants; `DiskSettings` groups them so the
//! controllers and renderer can be built from one value (and tests can
//! build them from another).

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

use crate::render::color::ColorAdjust;

pub const DEFAULT_VIDEO_URL: &str = "media/live/index.m3u8";
pub const DEFAULT_IMAGE_URL: &str = "media/underside.jpg";

// Colour adjustment applied to the video face.
pub const SATURATION: f32 = 1.25;
pub const CONTRAST: f32 = 1.1;
/// Hue rotation in turns (1.0 = full circle).
pub const HUE_SHIFT: f32 = -0.015;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 2.5;
pub const INITIAL_SCALE: f32 = 1.0;
pub const ZOOM_STEP: f32 = 0.1;

/// Radians of rotation per unit of normalized drag.
pub const ROTATION_SPEED: f32 = 2.0;
pub const INERTIA_STRENGTH: f32 = 1.0;
/// Per-frame multiplier on residual spin; must stay below 1.
pub const DAMPING: f32 = 0.94;
pub const ANGLE_EPSILON: f32 = 1e-5;
pub const VELOCITY_EPSILON: f32 = 1e-4;
/// Frames between orientation re-normalizations.
pub const RENORMALIZE_INTERVAL: u32 = 120;

/// Initial orientation as XYZ Euler angles in radians. Tilts the top face
/// toward the camera with a slight turn so the rim is visible.
pub const INITIAL_EULER: [f32; 3] = [1.2, 0.35, 0.0];

pub const DISK_RADIUS: f32 = 1.0;
pub const DISK_HEIGHT: f32 = 0.18;
pub const DISK_SEGMENTS: u32 = 96;

pub const CAMERA_DISTANCE: f32 = 4.0;
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub const BACKGROUND: [f32; 4] = [0.055, 0.067, 0.086, 1.0];
pub const RIM_COLOR: [f32; 3] = [0.62, 0.64, 0.68];
pub const UNTEXTURED_COLOR: [f32; 3] = [0.13, 0.15, 0.18];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationSettings {
    pub speed: f32,
    pub inertia: f32,
    pub damping: f32,
    pub angle_epsilon: f32,
    pub velocity_epsilon: f32,
    pub renormalize_interval: u32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            speed: ROTATION_SPEED,
            inertia: INERTIA_STRENGTH,
            damping: DAMPING,
            angle_epsilon: ANGLE_EPSILON,
            velocity_epsilon: VELOCITY_EPSILON,
            renormalize_interval: RENORMALIZE_INTERVAL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleSettings {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub initial: f32,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
            step: ZOOM_STEP,
            initial: INITIAL_SCALE,
        }
    }
}

impl ScaleSettings {
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiskSettings {
    pub rotation: RotationSettings,
    pub scale: ScaleSettings,
    pub color: ColorAdjust,
    pub initial_euler: [f32; 3],
}

impl Default for DiskSettings {
    fn default() -> Self {
        Self {
            rotation: RotationSettings::default(),
            scale: ScaleSettings::default(),
            color: ColorAdjust {
                hue: HUE_SHIFT,
                contrast: CONTRAST,
                saturation: SATURATION,
            },
            initial_euler: INITIAL_EULER,
        }
    }
}

impl DiskSettings {
    pub fn initial_orientation(&self) -> Quat {
        let [x, y, z] = self.initial_euler;
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }

    pub fn initial_pose(&self) -> DiskPose {
        DiskPose {
            orientation: self.initial_orientation(),
            scale: self.scale.clamp(self.scale.initial),
        }
    }
}

/// Orientation and uniform scale of the disk. Written by the controllers,
/// read by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiskPose {
    pub orientation: Quat,
    pub scale: f32,
}

impl Default for DiskPose {
    fn default() -> Self {
        DiskSettings::default().initial_pose()
    }
}

/// Snapshot logged by the diagnostic keypress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseReport {
    /// Quaternion as `[x, y, z, w]`.
    pub quaternion: [f32; 4],
    /// XYZ Euler angles in degrees.
    pub euler_degrees: [f32; 3],
    pub scale: f32,
}

impl DiskPose {
    pub fn report(&self) -> PoseReport {
        let (x, y, z) = self.orientation.to_euler(EulerRot::XYZ);
        PoseReport {
            quaternion: self.orientation.to_array(),
            euler_degrees: [x.to_degrees(), y.to_degrees(), z.to_degrees()],
            scale: self.scale,
        }
    }
}
