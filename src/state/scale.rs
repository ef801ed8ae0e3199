//! Wheel and pinch input mapped onto one clamped uniform scale factor.

use glam::Vec2;

use super::touch::{PinchGesture, touch_distance};
use crate::model::ScaleSettings;

#[derive(Debug, Clone)]
pub struct ScaleController {
    settings: ScaleSettings,
    scale: f32,
    pinch: PinchGesture,
}

impl Default for ScaleController {
    fn default() -> Self {
        Self::new(ScaleSettings::default())
    }
}

impl ScaleController {
    pub fn new(settings: ScaleSettings) -> Self {
        Self {
            scale: settings.clamp(settings.initial),
            settings,
            pinch: PinchGesture::default(),
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[cfg(test)]
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_active()
    }

    /// Negative `delta_y` (wheel up) zooms in by one step, positive zooms
    /// out. Returns the new scale.
    pub fn wheel(&mut self, delta_y: f64) -> f32 {
        let step = if delta_y < 0.0 {
            self.settings.step
        } else if delta_y > 0.0 {
            -self.settings.step
        } else {
            0.0
        };
        self.scale = self.settings.clamp(self.scale + step);
        self.scale
    }

    /// Feeds the current touch list (start, move, end or cancel). Two or more
    /// points drive the pinch; fewer reset it.
    pub fn touches(&mut self, points: &[Vec2]) -> f32 {
        match points {
            [a, b, ..] => {
                if let Some(target) = self.pinch.update(touch_distance(*a, *b), self.scale) {
                    self.scale = self.settings.clamp(target);
                }
            }
            _ => self.pinch.reset(),
        }
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};
    #[cfg(not(target_arch = "wasm32"))]
    use proptest::prelude::*;

    fn pinch(c: &mut ScaleController, distance: f32) -> f32 {
        c.touches(&[Vec2::ZERO, Vec2::new(distance, 0.0)])
    }

    #[test]
    fn test_wheel_up_zooms_in_by_step() {
        let mut c = ScaleController::default();
        let before = c.scale();
        assert!((c.wheel(-120.0) - (before + ZOOM_STEP)).abs() < 1e-6);
        assert!((c.wheel(53.0) - before).abs() < 1e-6);
    }

    #[test]
    fn test_zero_wheel_delta_is_ignored() {
        let mut c = ScaleController::default();
        let before = c.scale();
        assert_eq!(c.wheel(0.0), before);
    }

    #[test]
    fn test_wheel_never_leaves_bounds() {
        let mut c = ScaleController::default();
        for _ in 0..500 {
            let s = c.wheel(-1.0);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&s));
        }
        assert_eq!(c.scale(), MAX_SCALE);
        for _ in 0..500 {
            let s = c.wheel(1.0);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&s));
        }
        assert_eq!(c.scale(), MIN_SCALE);
    }

    #[test]
    fn test_wheel_round_trip_modulo_clamping() {
        let mut c = ScaleController::default();
        for _ in 0..500 {
            c.wheel(-1.0);
        }
        c.wheel(-1.0);
        c.wheel(1.0);
        assert!((c.scale() - (MAX_SCALE - ZOOM_STEP)).abs() < 1e-5);
    }

    #[test]
    fn test_pinch_scales_by_distance_ratio() {
        let mut c = ScaleController::default();
        let s0 = c.scale();
        pinch(&mut c, 100.0);
        assert!(c.is_pinching());
        let s1 = pinch(&mut c, 150.0);
        assert!((s1 - (s0 * 1.5).clamp(MIN_SCALE, MAX_SCALE)).abs() < 1e-6);
        let s2 = pinch(&mut c, 80.0);
        assert!((s2 - (s0 * 0.8).clamp(MIN_SCALE, MAX_SCALE)).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_is_clamped() {
        let mut c = ScaleController::default();
        pinch(&mut c, 10.0);
        assert_eq!(pinch(&mut c, 1000.0), MAX_SCALE);
        assert_eq!(pinch(&mut c, 0.1), MIN_SCALE);
    }

    #[test]
    fn test_pinch_resets_below_two_touches() {
        let mut c = ScaleController::default();
        pinch(&mut c, 100.0);
        pinch(&mut c, 200.0);
        let zoomed = c.scale();
        c.touches(&[Vec2::ZERO]);
        assert!(!c.is_pinching());
        // New gesture anchors at the zoomed scale.
        pinch(&mut c, 50.0);
        let s = pinch(&mut c, 25.0);
        assert!((s - (zoomed * 0.5).clamp(MIN_SCALE, MAX_SCALE)).abs() < 1e-6);
    }

    #[test]
    fn test_wheel_and_pinch_share_accumulator() {
        let mut c = ScaleController::default();
        c.wheel(-1.0);
        let s0 = c.scale();
        pinch(&mut c, 100.0);
        assert!((pinch(&mut c, 120.0) - s0 * 1.2).abs() < 1e-6);
    }

    #[cfg(not(target_arch = "wasm32"))]
    proptest! {
        #[test]
        fn wheel_sequences_stay_in_bounds(
            deltas in prop::collection::vec(-1.0e4f64..1.0e4, 0..300)
        ) {
            let mut c = ScaleController::default();
            for delta in deltas {
                let s = c.wheel(delta);
                prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&s), "scale {s} after {delta}");
            }
        }

        #[test]
        fn pinch_is_clamped_distance_ratio(
            d0 in 0.01f32..2000.0,
            d1 in 0.0f32..4000.0,
            s0 in MIN_SCALE..=MAX_SCALE
        ) {
            let mut c = ScaleController::new(ScaleSettings {
                initial: s0,
                ..ScaleSettings::default()
            });
            pinch(&mut c, d0);
            let got = pinch(&mut c, d1);
            let expected = (s0 * d1 / d0).clamp(MIN_SCALE, MAX_SCALE);
            prop_assert!(
                (got - expected).abs() <= 1e-5 * expected,
                "got {got}, expected {expected}"
            );
        }

        #[test]
        fn mixed_input_stays_in_bounds(
            steps in prop::collection::vec((any::<bool>(), -1.0e3f32..1.0e3), 0..200)
        ) {
            let mut c = ScaleController::default();
            for (is_wheel, amount) in steps {
                let s = if is_wheel {
                    c.wheel(amount as f64)
                } else {
                    pinch(&mut c, amount.abs())
                };
                prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&s));
            }
        }
    }
}
