//! L4 Atomic Layer: Time calculation utilities
//!
//! Pure functions over host-supplied frame timestamps. Timestamps are
//! durations since the session started, so nothing here reads a clock.

use std::time::Duration;

/// Calculate progress (0.0 to 1.0) of an interval that started at `start`
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]; 0.0 before `start`
#[inline]
pub fn progress(start: Duration, now: Duration, duration: Duration) -> f64 {
    if now < start {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now - start;
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an interval is complete
#[inline]
pub fn is_complete(start: Duration, now: Duration, duration: Duration) -> bool {
    now >= start + duration
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Frame-rate independent exponential damping toward `target`
///
/// `rate` is the decay constant per second.
#[inline]
pub fn damp(current: f64, target: f64, rate: f64, dt: Duration) -> f64 {
    lerp(current, target, 1.0 - (-rate * dt.as_secs_f64()).exp())
}

/// Scale a duration by a non-negative factor
#[inline]
pub fn scale(duration: Duration, factor: f64) -> Duration {
    Duration::from_nanos((duration.as_nanos() as f64 * factor.max(0.0)).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let start = Duration::from_millis(100);
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, Duration::ZERO, duration), 0.0);
        assert!((progress(start, Duration::from_millis(200), duration) - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, Duration::from_millis(900), duration), 1.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Duration::from_millis(5);
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_scale_rounds_to_nanos() {
        assert_eq!(scale(Duration::from_millis(150), 0.5), Duration::from_millis(75));
        assert_eq!(scale(Duration::from_millis(150), -1.0), Duration::ZERO);
    }

    #[test]
    fn test_damp_converges() {
        let mut x = 0.0;
        for _ in 0..120 {
            x = damp(x, 100.0, 6.0, Duration::from_millis(16));
        }
        assert!((x - 100.0).abs() < 0.1);
        assert!(x <= 100.0);
    }
}
