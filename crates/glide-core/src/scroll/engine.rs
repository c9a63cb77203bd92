//! L3 Molecular Layer: Smooth-scroll engine
//!
//! Combines easing functions and timing utilities to turn bursts of native
//! scroll input into a smoothed position published once per frame.

use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::EasingTypeExt;
use super::timing::{damp, is_complete, lerp, progress};

/// Below this distance the smoothed position snaps onto the raw one
const SETTLE_EPSILON: f64 = 0.01;

/// Published scroll state. Only the engine mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollState {
    /// Position native scrolling would be at
    pub raw_position: f64,
    /// Interpolated position used for layout and triggers
    pub smoothed_position: f64,
    /// Smoothed displacement per second over the last tick
    pub velocity: f64,
}

/// Native scroll input, in document units (positive = down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollInput {
    Wheel { delta: f64 },
    Touch { delta: f64 },
}

/// Glide in flight (duration mode)
#[derive(Debug, Clone)]
struct Glide {
    started: Duration,
    from: f64,
    to: f64,
}

/// Smooth-scroll engine
///
/// Call `input()` as native events arrive and `tick()` once per frame to get
/// the current smoothed position.
#[derive(Debug, Clone)]
pub struct SmoothScroller {
    config: ScrollConfig,
    state: ScrollState,
    /// Furthest reachable position
    limit: f64,
    /// Input accumulated since the last tick
    pending_delta: f64,
    /// Raw position moved without input (scroll_to), glide must restart
    retarget: bool,
    glide: Option<Glide>,
    last_tick: Option<Duration>,
    /// False while native scrolling is in charge
    attached: bool,
}

impl Default for SmoothScroller {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl SmoothScroller {
    /// Create a new engine with configuration
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            state: ScrollState::default(),
            limit: 0.0,
            pending_delta: 0.0,
            retarget: false,
            glide: None,
            last_tick: None,
            attached: true,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Current published state
    #[inline]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[inline]
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Set the furthest reachable position, clamping current positions
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        if self.state.raw_position > self.limit {
            self.state.raw_position = self.limit;
            self.retarget = true;
        }
        if self.state.smoothed_position > self.limit {
            self.state.smoothed_position = self.limit;
        }
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Take over scrolling from the native behavior
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Hand scrolling back to the native behavior, settling in place
    pub fn detach(&mut self) {
        self.stop();
        self.attached = false;
    }

    fn smooths_wheel(&self) -> bool {
        self.attached && self.config.is_smooth()
    }

    fn smooths_touch(&self) -> bool {
        self.smooths_wheel() && self.config.smooth_touch
    }

    /// Check if the smoothed position is still moving
    pub fn is_animating(&self) -> bool {
        self.glide.is_some()
            || (self.config.damping_rate().is_some()
                && (self.state.raw_position - self.state.smoothed_position).abs() > SETTLE_EPSILON)
    }

    /// Check if there's pending work (motion or unprocessed input)
    /// Use this to determine if we need the frame rate
    pub fn needs_update(&self) -> bool {
        self.is_animating() || self.pending_delta != 0.0 || self.retarget
    }

    /// Feed one native input event
    pub fn input(&mut self, input: ScrollInput) {
        match input {
            ScrollInput::Wheel { delta } => {
                let delta = delta * self.config.wheel_multiplier;
                if self.smooths_wheel() {
                    self.pending_delta += delta;
                } else {
                    self.jump_by(delta);
                }
            }
            ScrollInput::Touch { delta } => {
                let delta = delta * self.config.touch_multiplier;
                if self.smooths_touch() {
                    self.pending_delta += delta;
                } else {
                    self.jump_by(delta);
                }
            }
        }
    }

    /// Scroll by a delta amount (positive = down, negative = up)
    ///
    /// Deltas within the same frame are batched together.
    pub fn scroll_by(&mut self, delta: f64) {
        if self.smooths_wheel() {
            self.pending_delta += delta;
        } else {
            self.jump_by(delta);
        }
    }

    /// Scroll to an absolute position
    pub fn scroll_to(&mut self, target: f64, immediate: bool) {
        let target = target.clamp(0.0, self.limit);
        self.pending_delta = 0.0;
        if immediate || !self.smooths_wheel() {
            self.glide = None;
            self.retarget = false;
            self.state.raw_position = target;
            self.state.smoothed_position = target;
            self.state.velocity = 0.0;
        } else if target != self.state.raw_position {
            self.state.raw_position = target;
            self.retarget = true;
        }
    }

    fn jump_by(&mut self, delta: f64) {
        let target = (self.state.raw_position + delta).clamp(0.0, self.limit);
        self.glide = None;
        self.state.raw_position = target;
        self.state.smoothed_position = target;
    }

    /// Advance one frame and return the published state
    ///
    /// `now` is the frame timestamp since the session started.
    pub fn tick(&mut self, now: Duration) -> ScrollState {
        let dt = self
            .last_tick
            .map(|last| now.saturating_sub(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        let previous = self.state.smoothed_position;

        // Commit batched input relative to the current target
        if self.pending_delta != 0.0 {
            let target = (self.state.raw_position + self.pending_delta).clamp(0.0, self.limit);
            self.pending_delta = 0.0;
            if target != self.state.raw_position {
                self.state.raw_position = target;
                self.retarget = true;
            }
        }

        if std::mem::take(&mut self.retarget) {
            let distance = (self.state.raw_position - self.state.smoothed_position).abs();
            self.glide = (distance > SETTLE_EPSILON).then(|| Glide {
                started: now,
                from: self.state.smoothed_position,
                to: self.state.raw_position,
            });
        }

        match self.config.damping_rate() {
            Some(rate) => {
                self.glide = None;
                let target = self.state.raw_position;
                let next = damp(self.state.smoothed_position, target, rate, dt);
                self.state.smoothed_position = if (target - next).abs() <= SETTLE_EPSILON {
                    target
                } else {
                    next
                };
            }
            None => {
                if let Some(glide) = &self.glide {
                    let duration = self.config.glide_duration();
                    if is_complete(glide.started, now, duration) {
                        self.state.smoothed_position = glide.to;
                        self.glide = None;
                    } else {
                        let t = progress(glide.started, now, duration);
                        let eased = self.config.easing.apply(t);
                        self.state.smoothed_position = lerp(glide.from, glide.to, eased);
                    }
                }
            }
        }

        self.state.smoothed_position = self.state.smoothed_position.clamp(0.0, self.limit);
        self.state.velocity = if dt.is_zero() {
            0.0
        } else {
            (self.state.smoothed_position - previous) / dt.as_secs_f64()
        };

        trace!(
            raw = self.state.raw_position,
            smoothed = self.state.smoothed_position,
            velocity = self.state.velocity,
            "scroll tick"
        );
        self.state
    }

    /// Cancel any motion and stop at the current smoothed position
    pub fn stop(&mut self) {
        self.glide = None;
        self.pending_delta = 0.0;
        self.retarget = false;
        self.state.raw_position = self.state.smoothed_position;
        self.state.velocity = 0.0;
    }
}
