//! Everything the DOM listeners and the frame callback share.
//!
//! The scene (camera + disk pose) only exists while a renderer is attached;
//! input arriving before that, or after teardown, falls through the
//! controllers as a no-op.

use glam::Vec2;

use super::camera::Camera;
use super::rotation::RotationController;
use super::scale::ScaleController;
use crate::model::{DiskPose, DiskSettings, PoseReport};

#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub pose: DiskPose,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    settings: DiskSettings,
    pub rotation: RotationController,
    pub scale: ScaleController,
    /// CSS-pixel size of the canvas; drag deltas are normalized by it.
    pub viewport: Vec2,
    pub scene: Option<Scene>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DiskSettings::default())
    }
}

impl ViewState {
    pub fn new(settings: DiskSettings) -> Self {
        Self {
            rotation: RotationController::new(settings.rotation),
            scale: ScaleController::new(settings.scale),
            viewport: Vec2::ZERO,
            scene: None,
            settings,
        }
    }

    pub fn settings(&self) -> &DiskSettings {
        &self.settings
    }

    /// Creates the scene at the initial orientation and the current scale.
    pub fn attach_scene(&mut self) {
        let mut camera = Camera::default();
        camera.resize(self.viewport.x as f64, self.viewport.y as f64);
        let mut pose = self.settings.initial_pose();
        pose.scale = self.scale.scale();
        self.scene = Some(Scene { camera, pose });
    }

    pub fn detach_scene(&mut self) {
        self.scene = None;
        self.rotation.reset();
    }

    pub fn on_resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        if let Some(scene) = &mut self.scene {
            scene.camera.resize(viewport.x as f64, viewport.y as f64);
        }
    }

    pub fn on_pointer_down(&mut self, id: i32, pos: Vec2) {
        self.rotation.pointer_down(id, pos);
    }

    pub fn on_pointer_move(&mut self, id: i32, pos: Vec2) -> bool {
        let basis = self.scene.as_ref().map(|s| s.camera.basis());
        let orientation = self.scene.as_mut().map(|s| &mut s.pose.orientation);
        self.rotation
            .pointer_move(id, pos, self.viewport, basis.as_ref(), orientation)
    }

    pub fn on_pointer_up(&mut self, id: i32) {
        self.rotation.pointer_up(id);
    }

    pub fn on_pointer_cancel(&mut self, id: i32) {
        self.rotation.pointer_cancel(id);
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        let scale = self.scale.wheel(delta_y);
        self.apply_scale(scale);
    }

    pub fn on_touches(&mut self, points: &[Vec2]) {
        let scale = self.scale.touches(points);
        self.apply_scale(scale);
    }

    fn apply_scale(&mut self, scale: f32) {
        if let Some(scene) = &mut self.scene {
            scene.pose.scale = scale;
        }
    }

    /// Per-frame controller work.
    pub fn on_frame(&mut self) {
        let orientation = self.scene.as_mut().map(|s| &mut s.pose.orientation);
        self.rotation.tick(orientation);
    }

    pub fn report(&self) -> Option<PoseReport> {
        self.scene.as_ref().map(|s| s.pose.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MAX_SCALE, ZOOM_STEP};
    use glam::Quat;

    fn attached() -> ViewState {
        let mut state = ViewState::default();
        state.on_resize(Vec2::new(800.0, 600.0));
        state.attach_scene();
        state
    }

    fn orientation(state: &ViewState) -> Quat {
        state.scene.as_ref().map(|s| s.pose.orientation).unwrap_or(Quat::NAN)
    }

    #[test]
    fn test_input_before_attach_is_ignored() {
        let mut state = ViewState::default();
        state.on_resize(Vec2::new(800.0, 600.0));
        state.on_pointer_down(1, Vec2::ZERO);
        assert!(!state.on_pointer_move(1, Vec2::new(100.0, 0.0)));
        state.on_frame();
        assert!(state.report().is_none());
    }

    #[test]
    fn test_drag_then_release_keeps_spinning() {
        let mut state = attached();
        let start = orientation(&state);
        state.on_pointer_down(1, Vec2::new(100.0, 100.0));
        assert!(state.on_pointer_move(1, Vec2::new(180.0, 100.0)));
        state.on_pointer_up(1);
        let released = orientation(&state);
        assert_ne!(released, start);
        state.on_frame();
        assert_ne!(orientation(&state), released);
    }

    #[test]
    fn test_wheel_scales_pose() {
        let mut state = attached();
        let before = state.report().map(|r| r.scale).unwrap_or_default();
        state.on_wheel(-100.0);
        let after = state.report().map(|r| r.scale).unwrap_or_default();
        assert!((after - before - ZOOM_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_scale_survives_reattach() {
        let mut state = ViewState::default();
        for _ in 0..100 {
            state.on_wheel(-1.0);
        }
        state.attach_scene();
        assert_eq!(state.report().map(|r| r.scale), Some(MAX_SCALE));
    }

    #[test]
    fn test_pinch_writes_pose_scale() {
        let mut state = attached();
        state.on_touches(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        state.on_touches(&[Vec2::ZERO, Vec2::new(130.0, 0.0)]);
        let scale = state.report().map(|r| r.scale).unwrap_or_default();
        assert!((scale - 1.3).abs() < 1e-5);
        state.on_touches(&[]);
        assert!(!state.scale.is_pinching());
    }

    #[test]
    fn test_detach_drops_scene_and_spin() {
        let mut state = attached();
        state.on_pointer_down(1, Vec2::ZERO);
        state.on_pointer_move(1, Vec2::new(100.0, 0.0));
        state.detach_scene();
        assert!(state.scene.is_none());
        assert_eq!(state.rotation.velocity(), glam::Vec3::ZERO);
        assert_eq!(state.rotation.active_pointers(), 0);
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut state = attached();
        state.on_resize(Vec2::new(1200.0, 600.0));
        let aspect = state.scene.as_ref().map(|s| s.camera.aspect);
        assert_eq!(aspect, Some(2.0));
    }
}
