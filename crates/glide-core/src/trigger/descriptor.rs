use std::rc::Rc;

use serde::Serialize;

use crate::animation::AnimationSpec;
use crate::pinned::PinSpec;
use crate::scene::ElementId;

/// Region top at 80% of the viewport height, measured from the top
pub const DEFAULT_ACTIVATION_EDGE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    /// Plays forward once per mount when the activation edge is crossed
    OneShot,
    /// Progress tracks the visibility ratio every tick
    Scrubbed,
}

/// A watched region and the animation it drives
#[derive(Debug, Clone)]
pub struct TriggerDescriptor {
    pub region: ElementId,
    /// Viewport-relative threshold, 0 = bottom edge, 1 = top edge
    pub activation_edge: f64,
    pub mode: TriggerMode,
    pub animation: Option<Rc<AnimationSpec>>,
    /// Elements written by the animation
    pub targets: Vec<ElementId>,
    pub pin: Option<PinSpec>,
}

impl TriggerDescriptor {
    /// One-shot reveal of the region itself
    pub fn one_shot(region: ElementId, animation: AnimationSpec) -> Self {
        Self {
            region,
            activation_edge: DEFAULT_ACTIVATION_EDGE,
            mode: TriggerMode::OneShot,
            animation: Some(Rc::new(animation)),
            targets: vec![region],
            pin: None,
        }
    }

    /// Scroll-scrubbed animation of the region itself
    pub fn scrubbed(region: ElementId, animation: AnimationSpec) -> Self {
        Self {
            mode: TriggerMode::Scrubbed,
            ..Self::one_shot(region, animation)
        }
    }

    /// Pinned horizontal section; the container is the region
    pub fn pinned(container: ElementId, track: ElementId) -> Self {
        Self {
            region: container,
            activation_edge: 1.0,
            mode: TriggerMode::Scrubbed,
            animation: None,
            targets: Vec::new(),
            pin: Some(PinSpec { track }),
        }
    }

    pub fn activate_at(mut self, edge: f64) -> Self {
        self.activation_edge = edge.clamp(0.0, 1.0);
        self
    }

    pub fn with_targets(mut self, targets: Vec<ElementId>) -> Self {
        self.targets = targets;
        self
    }

    /// Attach an animation, e.g. one scrubbed along a pin
    pub fn with_animation(mut self, animation: Rc<AnimationSpec>) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}
