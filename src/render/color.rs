//! Hue / contrast / saturation adjustment for the video face.
//!
//! The transform is a fixed pipeline of [`Step`]s. `ColorAdjust::glsl` emits
//! it as a GLSL `color_adjust(vec3)` function with the parameters baked in as
//! constants; the disk fragment shader calls it on every video texel.

use serde::{Deserialize, Serialize};

/// Rec. 709 luma weights.
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

const GLSL_HELPERS: &str = r"
vec3 rgb2hsv(vec3 c) {
    vec4 K = vec4(0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0);
    vec4 p = mix(vec4(c.bg, K.wz), vec4(c.gb, K.xy), step(c.b, c.g));
    vec4 q = mix(vec4(p.xyw, c.r), vec4(c.r, p.yzx), step(p.x, c.r));
    float d = q.x - min(q.w, q.y);
    float e = 1.0e-10;
    return vec3(abs(q.z + (q.w - q.y) / (6.0 * d + e)), d / (q.x + e), q.x);
}

vec3 hsv2rgb(vec3 c) {
    vec4 K = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    vec3 p = abs(fract(c.xxx + K.xyz) * 6.0 - K.www);
    return c.z * mix(K.xxx, clamp(p - K.xxx, 0.0, 1.0), c.y);
}
";

/// One stage of the colour pipeline, applied in [`Step::PIPELINE`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Scale around mid-gray, then clamp to the unit cube.
    Contrast,
    /// Rotate the HSV hue, wrapping into `[0, 1)`.
    HueShift,
    /// Interpolate from luma gray towards the colour, then clamp.
    Saturation,
}

impl Step {
    pub const PIPELINE: [Step; 3] = [Step::Contrast, Step::HueShift, Step::Saturation];

    /// GLSL statement for this step, operating in place on `vec3 c`.
    pub fn glsl(self) -> &'static str {
        match self {
            Step::Contrast => "c = clamp((c - 0.5) * ADJ_CONTRAST + 0.5, 0.0, 1.0);",
            Step::HueShift => {
                "{ vec3 hsv = rgb2hsv(c); hsv.x = fract(hsv.x + ADJ_HUE); c = hsv2rgb(hsv); }"
            }
            Step::Saturation => {
                "c = clamp(mix(vec3(dot(c, ADJ_LUMA)), c, ADJ_SATURATION), 0.0, 1.0);"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorAdjust {
    /// Hue rotation in turns.
    pub hue: f32,
    /// Multiplier around mid-gray (1.0 = unchanged).
    pub contrast: f32,
    /// Interpolation factor from luma gray (0.0) to the input colour (1.0).
    pub saturation: f32,
}

impl ColorAdjust {
    pub const IDENTITY: Self = Self {
        hue: 0.0,
        contrast: 1.0,
        saturation: 1.0,
    };

    pub fn glsl(&self) -> String {
        let mut src = format!(
            "const float ADJ_HUE = {:.6};\n\
             const float ADJ_CONTRAST = {:.6};\n\
             const float ADJ_SATURATION = {:.6};\n\
             const vec3 ADJ_LUMA = vec3({:.6}, {:.6}, {:.6});\n",
            self.hue,
            self.contrast,
            self.saturation,
            LUMA[0],
            LUMA[1],
            LUMA[2],
        );
        src.push_str(GLSL_HELPERS);
        src.push_str("\nvec3 color_adjust(vec3 rgb) {\n    vec3 c = rgb;\n");
        for step in Step::PIPELINE {
            src.push_str("    ");
            src.push_str(step.glsl());
            src.push('\n');
        }
        src.push_str("    return c;\n}\n");
        src
    }
}

impl Default for ColorAdjust {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// CPU mirror of each pipeline step. The match is exhaustive, so a new
    /// step cannot reach the shader without a reference here.
    fn apply_step(adj: &ColorAdjust, step: Step, c: Vec3) -> Vec3 {
        match step {
            Step::Contrast => ((c - 0.5) * adj.contrast + 0.5).clamp(Vec3::ZERO, Vec3::ONE),
            Step::HueShift => {
                let mut hsv = rgb_to_hsv(c);
                hsv.x = (hsv.x + adj.hue).rem_euclid(1.0);
                hsv_to_rgb(hsv)
            }
            Step::Saturation => {
                let gray = Vec3::splat(c.dot(Vec3::from(LUMA)));
                gray.lerp(c, adj.saturation).clamp(Vec3::ZERO, Vec3::ONE)
            }
        }
    }

    impl ColorAdjust {
        fn apply(&self, rgb: Vec3) -> Vec3 {
            Step::PIPELINE
                .into_iter()
                .fold(rgb, |c, step| apply_step(self, step, c))
        }
    }

    /// Components of the result are hue (turns), saturation, value.
    fn rgb_to_hsv(rgb: Vec3) -> Vec3 {
        let max = rgb.max_element();
        let min = rgb.min_element();
        let delta = max - min;
        let s = if max > 0.0 { delta / max } else { 0.0 };
        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == rgb.x {
            ((rgb.y - rgb.z) / delta).rem_euclid(6.0) / 6.0
        } else if max == rgb.y {
            ((rgb.z - rgb.x) / delta + 2.0) / 6.0
        } else {
            ((rgb.x - rgb.y) / delta + 4.0) / 6.0
        };
        Vec3::new(h, s, max)
    }

    fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
        let (h, s, v) = (hsv.x.rem_euclid(1.0), hsv.y, hsv.z);
        let sector = h * 6.0;
        let i = sector.floor();
        let f = sector - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match i as u32 % 6 {
            0 => Vec3::new(v, t, p),
            1 => Vec3::new(q, v, p),
            2 => Vec3::new(p, v, t),
            3 => Vec3::new(p, q, v),
            4 => Vec3::new(t, p, v),
            _ => Vec3::new(v, p, q),
        }
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_identity_leaves_colour_unchanged() {
        for c in [
            Vec3::new(0.2, 0.4, 0.6),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::splat(0.5),
            Vec3::ZERO,
        ] {
            assert!(approx(ColorAdjust::IDENTITY.apply(c), c), "{c:?}");
        }
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        let adj = ColorAdjust {
            contrast: 2.0,
            ..ColorAdjust::IDENTITY
        };
        assert!(approx(adj.apply(Vec3::splat(0.5)), Vec3::splat(0.5)));
        assert!(approx(adj.apply(Vec3::splat(0.6)), Vec3::splat(0.7)));
        assert!(approx(adj.apply(Vec3::splat(0.3)), Vec3::splat(0.1)));
    }

    #[test]
    fn test_zero_saturation_gives_luma_gray() {
        let adj = ColorAdjust {
            saturation: 0.0,
            ..ColorAdjust::IDENTITY
        };
        let out = adj.apply(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(out, Vec3::splat(0.2126)));
    }

    #[test]
    fn test_hue_third_turn_cycles_primaries() {
        let adj = ColorAdjust {
            hue: 1.0 / 3.0,
            ..ColorAdjust::IDENTITY
        };
        assert!(approx(adj.apply(Vec3::X), Vec3::Y));
        assert!(approx(adj.apply(Vec3::Y), Vec3::Z));
    }

    #[test]
    fn test_hsv_round_trip_matches() {
        let c = Vec3::new(0.8, 0.3, 0.55);
        assert!(approx(hsv_to_rgb(rgb_to_hsv(c)), c));
    }

    #[test]
    fn test_output_stays_in_unit_cube() {
        let adj = ColorAdjust {
            hue: 0.4,
            contrast: 3.0,
            saturation: 4.0,
        };
        for c in [Vec3::new(0.9, 0.1, 0.4), Vec3::new(0.05, 0.95, 0.5)] {
            let out = adj.apply(c);
            assert!(out.min_element() >= 0.0 && out.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_glsl_bakes_parameters() {
        let adj = ColorAdjust {
            hue: -0.015,
            contrast: 1.1,
            saturation: 1.25,
        };
        let src = adj.glsl();
        assert!(src.contains("const float ADJ_HUE = -0.015000;"));
        assert!(src.contains("const float ADJ_CONTRAST = 1.100000;"));
        assert!(src.contains("const float ADJ_SATURATION = 1.250000;"));
        assert!(src.contains("vec3 color_adjust(vec3 rgb)"));
    }

    #[test]
    fn test_glsl_runs_every_step_in_pipeline_order() {
        let src = ColorAdjust::IDENTITY.glsl();
        let body = &src[src.find("vec3 color_adjust(vec3 rgb)").unwrap_or(0)..];
        let mut cursor = 0;
        for step in Step::PIPELINE {
            let at = body[cursor..].find(step.glsl());
            assert!(at.is_some(), "{step:?} missing or out of order");
            cursor += at.unwrap_or(0) + step.glsl().len();
        }
        assert!(body[cursor..].trim_start().starts_with("return c;"));
        // Every statement between the prologue and the return is a pipeline step.
        let statements = body
            .lines()
            .filter(|l| l.trim_start().starts_with("c = ") || l.contains("{ vec3 hsv"));
        assert_eq!(statements.count(), Step::PIPELINE.len());
    }

    #[test]
    fn test_each_step_reads_its_own_parameter() {
        for step in Step::PIPELINE {
            let constants: &[&str] = match step {
                Step::Contrast => &["ADJ_CONTRAST"],
                Step::HueShift => &["ADJ_HUE", "rgb2hsv", "hsv2rgb"],
                Step::Saturation => &["ADJ_SATURATION", "ADJ_LUMA"],
            };
            for name in constants {
                assert!(step.glsl().contains(name), "{step:?} does not use {name}");
            }
        }
    }

    #[test]
    fn test_reference_steps_match_pipeline_composition() {
        let adj = ColorAdjust {
            hue: -0.015,
            contrast: 1.1,
            saturation: 1.25,
        };
        let c = Vec3::new(0.7, 0.35, 0.2);
        let contrasted = apply_step(&adj, Step::Contrast, c);
        let shifted = apply_step(&adj, Step::HueShift, contrasted);
        let saturated = apply_step(&adj, Step::Saturation, shifted);
        assert!(approx(adj.apply(c), saturated));
        assert!(approx(contrasted, Vec3::new(0.72, 0.335, 0.17)));
    }
}
