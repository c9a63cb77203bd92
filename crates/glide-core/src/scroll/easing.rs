//! L4 Atomic Layer: Pure easing functions
//!
//! Maps input [0, 1] to output [0, 1] with various acceleration curves.
//! Shared by the scroll engine and the tween player.

pub use crate::config::EasingType;

/// Curve evaluation for configured easings
pub trait EasingTypeExt {
    /// Eased value for progress `t`; input outside [0, 1] is clamped
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => if t < 1.0 { 0.0 } else { 1.0 },
            EasingType::Linear => t,
            EasingType::Power1Out => power_out(t, 2),
            EasingType::Power2Out => power_out(t, 3),
            EasingType::Power3Out => power_out(t, 4),
            EasingType::Power4Out => power_out(t, 5),
            EasingType::Power2InOut => cubic_in_out(t),
            EasingType::ExpoOut => exponential_ease_out(t),
        }
    }
}

/// Power ease-out: f(t) = 1 - (1-t)^n
#[inline]
fn power_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// Cubic ease-in-out
#[inline]
fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Exponential ease-out: f(t) = min(1, 1.001 - 2^(-10t))
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    (1.001 - 2.0_f64.powf(-10.0 * t)).min(1.0)
}
