// Two-finger pinch gesture state.
use glam::Vec2;

/// Below this finger separation (px) a pinch cannot be anchored.
const MIN_PINCH_DISTANCE: f32 = 1e-3;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PinchGesture {
    anchor: Option<PinchAnchor>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchAnchor {
    start_distance: f32,
    start_scale: f32,
}

impl PinchGesture {
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }

    /// Feeds the current distance between the first two touches. Returns the
    /// unclamped target scale once the gesture is anchored; the first call
    /// only records the anchor.
    pub fn update(&mut self, distance: f32, current_scale: f32) -> Option<f32> {
        match self.anchor {
            Some(anchor) => Some(anchor.start_scale * distance / anchor.start_distance),
            None => {
                if distance > MIN_PINCH_DISTANCE {
                    self.anchor = Some(PinchAnchor {
                        start_distance: distance,
                        start_scale: current_scale,
                    });
                }
                None
            }
        }
    }
}

pub fn touch_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
