// extensions/easing.rs
//
// Easing curves for tweens, named after the power-curve family animators
// already know ("power1.out" and friends). Pure math, no scene access.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve. Serialized by its conventional name, e.g. `"power2.inOut"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity.
    #[serde(rename = "none")]
    Linear,
    #[serde(rename = "power1.in")]
    Power1In,
    /// Quadratic ease-out; the default for `to` tweens.
    #[default]
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.in")]
    Power2In,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    #[serde(rename = "power3.in")]
    Power3In,
    #[serde(rename = "power3.out")]
    Power3Out,
    #[serde(rename = "power3.inOut")]
    Power3InOut,
    #[serde(rename = "power4.in")]
    Power4In,
    #[serde(rename = "power4.out")]
    Power4Out,
    #[serde(rename = "power4.inOut")]
    Power4InOut,
    #[serde(rename = "sine.in")]
    SineIn,
    #[serde(rename = "sine.out")]
    SineOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
    #[serde(rename = "expo.in")]
    ExpoIn,
    #[serde(rename = "expo.out")]
    ExpoOut,
    /// Overshoots the target, then settles.
    #[serde(rename = "back.out")]
    BackOut,
}

impl Easing {
    /// Map normalized time `t` in [0, 1] to eased progress.
    /// `BackOut` overshoots past 1.0 before settling.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::Power1In => power_in(t, 2),
            Easing::Power1Out => power_out(t, 2),
            Easing::Power1InOut => power_in_out(t, 2),
            Easing::Power2In => power_in(t, 3),
            Easing::Power2Out => power_out(t, 3),
            Easing::Power2InOut => power_in_out(t, 3),
            Easing::Power3In => power_in(t, 4),
            Easing::Power3Out => power_out(t, 4),
            Easing::Power3InOut => power_in_out(t, 4),
            Easing::Power4In => power_in(t, 5),
            Easing::Power4Out => power_out(t, 5),
            Easing::Power4InOut => power_in_out(t, 5),

            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            Easing::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
            }
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }

            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

#[inline]
fn power_in(t: f32, exp: i32) -> f32 {
    t.powi(exp)
}

#[inline]
fn power_out(t: f32, exp: i32) -> f32 {
    1.0 - (1.0 - t).powi(exp)
}

#[inline]
fn power_in_out(t: f32, exp: i32) -> f32 {
    if t < 0.5 {
        power_in(2.0 * t, exp) / 2.0
    } else {
        1.0 - power_in(2.0 * (1.0 - t), exp) / 2.0
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}
