//! Drag-to-rotate with inertial spin-down.
//!
//! Drag deltas are normalized by the viewport and turned into a rotation
//! about a world-space axis built from the camera basis: vertical drag turns
//! about camera-right, horizontal drag about camera-up. Increments are
//! pre-multiplied onto the orientation so they compose in world space no
//! matter how the disk is already turned.
//!
//! Only a single pressed pointer rotates. A second pointer hands the
//! gesture over to the pinch scale controller and kills any spin.

use glam::{Quat, Vec2, Vec3};

use super::camera::CameraBasis;
use super::pointers::ActivePointers;
use crate::model::RotationSettings;

#[derive(Debug, Clone)]
pub struct RotationController {
    settings: RotationSettings,
    pointers: ActivePointers,
    dragging: bool,
    /// Last seen position of the dragging pointer. `None` means the next move
    /// only re-anchors.
    last: Option<Vec2>,
    /// Axis scaled by angle (radians per frame).
    velocity: Vec3,
    frames_since_normalize: u32,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(RotationSettings::default())
    }
}

impl RotationController {
    pub fn new(settings: RotationSettings) -> Self {
        Self {
            settings,
            pointers: ActivePointers::default(),
            dragging: false,
            last: None,
            velocity: Vec3::ZERO,
            frames_since_normalize: 0,
        }
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[cfg(test)]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[cfg(test)]
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_down(&mut self, id: i32, pos: Vec2) {
        if self.pointers.press(id) == 1 {
            self.dragging = true;
            self.last = Some(pos);
        } else {
            self.dragging = false;
            self.last = None;
        }
        self.velocity = Vec3::ZERO;
    }

    /// Applies the drag since the previous move. Returns whether the
    /// orientation changed. Missing camera or target is a silent no-op.
    pub fn pointer_move(
        &mut self,
        id: i32,
        pos: Vec2,
        viewport: Vec2,
        camera: Option<&CameraBasis>,
        orientation: Option<&mut Quat>,
    ) -> bool {
        if !self.dragging || self.pointers.single() != Some(id) {
            return false;
        }
        let Some(last) = self.last.replace(pos) else {
            return false;
        };
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return false;
        }
        let (Some(camera), Some(orientation)) = (camera, orientation) else {
            return false;
        };
        self.drag((pos - last) / viewport, camera, orientation)
    }

    /// Rotates by a viewport-normalized drag delta.
    pub fn drag(&mut self, delta: Vec2, camera: &CameraBasis, orientation: &mut Quat) -> bool {
        let axis = camera.right * delta.y + camera.up * delta.x;
        let angle = delta.length() * self.settings.speed;
        if angle <= self.settings.angle_epsilon {
            return false;
        }
        let Some(axis) = axis.try_normalize() else {
            return false;
        };
        *orientation = (Quat::from_axis_angle(axis, angle) * *orientation).normalize();
        self.velocity = axis * angle * self.settings.inertia;
        true
    }

    pub fn pointer_up(&mut self, id: i32) {
        let before = self.pointers.len();
        let remaining = self.pointers.release(id);
        if remaining == before {
            return;
        }
        match remaining {
            0 => {
                self.dragging = false;
                self.last = None;
            }
            // Back to one finger after a multi-touch gesture: rotation resumes
            // from wherever the remaining pointer moves next.
            1 => {
                self.dragging = true;
                self.last = None;
            }
            _ => {}
        }
    }

    pub fn pointer_cancel(&mut self, id: i32) {
        self.pointer_up(id);
    }

    /// Per-frame inertial decay. Missing target is a silent no-op.
    pub fn tick(&mut self, orientation: Option<&mut Quat>) {
        let Some(orientation) = orientation else {
            return;
        };
        if !self.dragging {
            let speed = self.velocity.length();
            if speed > self.settings.velocity_epsilon {
                let axis = self.velocity / speed;
                *orientation = Quat::from_axis_angle(axis, speed) * *orientation;
                self.velocity *= self.settings.damping;
                if self.velocity.length() <= self.settings.velocity_epsilon {
                    self.velocity = Vec3::ZERO;
                }
            } else {
                self.velocity = Vec3::ZERO;
            }
        }
        self.frames_since_normalize += 1;
        if self.frames_since_normalize >= self.settings.renormalize_interval {
            *orientation = orientation.normalize();
            self.frames_since_normalize = 0;
        }
    }

    /// Drops every pointer and any residual spin.
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.dragging = false;
        self.last = None;
        self.velocity = Vec3::ZERO;
    }
}
