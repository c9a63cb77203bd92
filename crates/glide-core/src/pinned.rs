//! Pinned horizontal scroll section
//!
//! While pinned, the container is held in place and vertical scroll is
//! consumed to slide its inner track sideways. The vertical distance consumed
//! equals the track's horizontal overflow, so the track's trailing edge lands
//! flush with the viewport edge exactly when the pin releases.

use serde::Serialize;
use tracing::debug;

use crate::error::FrameFault;
use crate::geometry::Viewport;
use crate::scene::{ElementId, RenderTarget};

/// Pin configuration carried by a trigger descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSpec {
    /// Inner element translated horizontally
    pub track: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPhase {
    Before,
    Pinned,
    Released,
}

/// Output of one pinned-section update
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PinFrame {
    pub phase: PinPhase,
    /// Consumed fraction of the scrollable range, [0, 1]
    pub progress: f64,
    /// Vertical offset holding the container in place
    pub pin_offset: f64,
    /// Horizontal track displacement, in [-range, 0]
    pub displacement: f64,
    /// Total scrollable range the frame was computed with
    pub range: f64,
}

#[derive(Debug, Clone)]
pub struct PinnedSection {
    container: ElementId,
    track: ElementId,
    /// Cached total scrollable range
    range: Option<f64>,
    /// Viewport and track extent the range was measured for
    measured: Option<(Viewport, f64)>,
    stale: bool,
    phase: PinPhase,
}

impl PinnedSection {
    pub fn new(container: ElementId, spec: PinSpec) -> Self {
        Self {
            container,
            track: spec.track,
            range: None,
            measured: None,
            stale: true,
            phase: PinPhase::Before,
        }
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn track(&self) -> ElementId {
        self.track
    }

    /// Cached range, `None` until first measured
    pub fn range(&self) -> Option<f64> {
        self.range
    }

    /// Force the range to be recomputed before the next write
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    fn current_range(&mut self, viewport: Viewport, track_right: f64) -> f64 {
        if let (Some(range), Some(measured)) = (self.range, self.measured) {
            if !self.stale && measured == (viewport, track_right) {
                return range;
            }
            debug!(fault = %FrameFault::StaleRange(self.container), "Recomputing scrollable range");
        }
        let range = (track_right - viewport.width).max(0.0);
        self.range = Some(range);
        self.measured = Some((viewport, track_right));
        self.stale = false;
        range
    }

    /// Compute this frame's pin offset and track displacement
    pub fn update(
        &mut self,
        scroll: f64,
        viewport: Viewport,
        target: &dyn RenderTarget,
    ) -> Result<PinFrame, FrameFault> {
        let container = target
            .bounds(self.container)
            .ok_or(FrameFault::TargetDetached(self.container))?;
        if container.is_unmeasured() || viewport.height <= 0.0 {
            return Err(FrameFault::LayoutNotReady(self.container));
        }
        let track = target
            .bounds(self.track)
            .ok_or(FrameFault::TargetDetached(self.track))?;
        if track.width <= 0.0 {
            return Err(FrameFault::LayoutNotReady(self.track));
        }

        let range = self.current_range(viewport, track.right());
        let delta = scroll - container.top();
        let phase = if delta < 0.0 {
            PinPhase::Before
        } else if delta < range {
            PinPhase::Pinned
        } else {
            PinPhase::Released
        };
        if phase != self.phase {
            debug!(container = %self.container, ?phase, "Pin phase changed");
            self.phase = phase;
        }

        let consumed = delta.clamp(0.0, range);
        let progress = if range > 0.0 {
            consumed / range
        } else if delta >= 0.0 {
            1.0
        } else {
            0.0
        };

        Ok(PinFrame {
            phase,
            progress,
            pin_offset: consumed,
            displacement: -range * progress,
            range,
        })
    }
}
