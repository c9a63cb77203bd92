//! L4 Atomic Layer: Configuration helpers for smooth scrolling
//!
//! Re-exports configuration from `crate::config` and adds derived values.

use std::time::Duration;

pub use crate::config::{EasingType, ScrollConfig};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Glide duration as Duration
    fn glide_duration(&self) -> Duration;

    /// Frame interval for the configured frame rate
    fn frame_interval(&self) -> Duration;

    /// Damping rate per second when damping mode is active
    fn damping_rate(&self) -> Option<f64>;

    /// Check if wheel smoothing is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn glide_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.frame_rate as u64)
        }
    }

    #[inline]
    fn damping_rate(&self) -> Option<f64> {
        self.lerp
            .filter(|l| *l > 0.0)
            .map(|l| l.min(1.0) * 60.0)
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_wheel && (self.damping_rate().is_some() || self.duration_ms > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glide_duration() {
        let config = ScrollConfig {
            duration_ms: 200,
            ..Default::default()
        };
        assert_eq!(config.glide_duration(), Duration::from_millis(200));
    }

    #[test]
    fn test_frame_interval_fallback() {
        let config = ScrollConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.smooth_wheel = false;
        assert!(!config.is_smooth());

        config.smooth_wheel = true;
        config.duration_ms = 0;
        assert!(!config.is_smooth());

        config.lerp = Some(0.1);
        assert!(config.is_smooth());
    }
}
