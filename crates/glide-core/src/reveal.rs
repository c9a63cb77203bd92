//! Section reveal bindings
//!
//! Declarative per-section registration: what region to watch, which
//! elements to animate and how. Presets carry the landing page's tuning in
//! CSS pixels; hosts with other units rescale them with
//! [`RevealPreset::scale_distance`].

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::animation::{AnimationSpec, PropertySet};
use crate::config::EasingType;
use crate::scene::{ElementId, Property};
use crate::trigger::DEFAULT_ACTIVATION_EDGE;

#[derive(Debug, Clone, PartialEq)]
pub struct RevealPreset {
    pub from: PropertySet,
    pub to: PropertySet,
    pub duration: Duration,
    pub easing: EasingType,
    pub stagger: Duration,
    pub delay: Duration,
    pub activation_edge: f64,
}

impl RevealPreset {
    /// Fade in while sliding up by `distance`
    pub fn fade_up(distance: f64, duration_ms: u64, easing: EasingType) -> Self {
        Self {
            from: PropertySet::new()
                .with(Property::Opacity, 0.0)
                .with(Property::TranslateY, distance),
            to: PropertySet::new()
                .with(Property::Opacity, 1.0)
                .with(Property::TranslateY, 0.0),
            duration: Duration::from_millis(duration_ms),
            easing,
            stagger: Duration::ZERO,
            delay: Duration::ZERO,
            activation_edge: DEFAULT_ACTIVATION_EDGE,
        }
    }

    /// Hero headline, plays on load
    pub fn hero_title() -> Self {
        Self::fade_up(50.0, 1200, EasingType::Power3Out).with_delay(300)
    }

    /// Hero backdrop settling from a slight zoom
    pub fn hero_backdrop() -> Self {
        Self {
            from: PropertySet::new().with(Property::Scale, 1.1),
            to: PropertySet::new().with(Property::Scale, 1.0),
            ..Self::fade_up(0.0, 2000, EasingType::Power2Out)
        }
    }

    /// Service and product card grids
    pub fn cards() -> Self {
        Self::fade_up(40.0, 800, EasingType::Power2Out)
            .with_stagger(150)
            .activate_at(0.2)
    }

    /// Generic section marked for reveal
    pub fn section() -> Self {
        Self::fade_up(50.0, 1000, EasingType::Power3Out).activate_at(0.15)
    }

    /// Stat and graph cards
    pub fn stats() -> Self {
        Self::fade_up(30.0, 800, EasingType::Power2Out)
            .with_stagger(100)
            .activate_at(0.15)
    }

    pub fn contact() -> Self {
        Self::fade_up(60.0, 1000, EasingType::Power3Out).activate_at(0.15)
    }

    pub fn footer() -> Self {
        Self::fade_up(40.0, 1000, EasingType::Power3Out).activate_at(0.1)
    }

    pub fn with_stagger(mut self, ms: u64) -> Self {
        self.stagger = Duration::from_millis(ms);
        self
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn activate_at(mut self, edge: f64) -> Self {
        self.activation_edge = edge.clamp(0.0, 1.0);
        self
    }

    /// Rescale translate distances, e.g. pixels to terminal columns and rows
    pub fn scale_distance(mut self, horizontal: f64, vertical: f64) -> Self {
        let rescale = |set: &PropertySet| {
            set.iter().fold(PropertySet::new(), |acc, (property, value)| match property {
                Property::TranslateX => acc.with(property, value * horizontal),
                Property::TranslateY => acc.with(property, value * vertical),
                _ => acc.with(property, value),
            })
        };
        self.from = rescale(&self.from);
        self.to = rescale(&self.to);
        self
    }

    pub fn animation(&self) -> AnimationSpec {
        AnimationSpec::new(self.from.clone(), self.to.clone())
            .with_duration(self.duration)
            .with_easing(self.easing)
            .with_stagger(self.stagger)
            .with_delay(self.delay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// One-shot reveal when the region enters
    Reveal,
    /// Progress follows the region's visibility
    Scrub,
    /// Plays immediately on mount
    Intro,
    /// Pinned horizontal section sliding `track`
    Pin { track: ElementId },
}

#[derive(Debug, Clone)]
pub struct SectionBinding {
    pub name: String,
    pub region: ElementId,
    /// Animated elements; the region itself when empty
    pub targets: Vec<ElementId>,
    pub preset: Option<RevealPreset>,
    pub kind: BindingKind,
}

impl SectionBinding {
    pub fn reveal(name: impl Into<String>, region: ElementId, preset: RevealPreset) -> Self {
        Self {
            name: name.into(),
            region,
            targets: Vec::new(),
            preset: Some(preset),
            kind: BindingKind::Reveal,
        }
    }

    pub fn scrub(name: impl Into<String>, region: ElementId, preset: RevealPreset) -> Self {
        Self {
            kind: BindingKind::Scrub,
            ..Self::reveal(name, region, preset)
        }
    }

    pub fn intro(name: impl Into<String>, region: ElementId, preset: RevealPreset) -> Self {
        Self {
            kind: BindingKind::Intro,
            ..Self::reveal(name, region, preset)
        }
    }

    pub fn pinned(name: impl Into<String>, container: ElementId, track: ElementId) -> Self {
        Self {
            name: name.into(),
            region: container,
            targets: Vec::new(),
            preset: None,
            kind: BindingKind::Pin { track },
        }
    }

    pub fn with_targets(mut self, targets: Vec<ElementId>) -> Self {
        self.targets = targets;
        self
    }

    /// Animation to scrub along a pin, or replace the preset
    pub fn with_preset(mut self, preset: RevealPreset) -> Self {
        self.preset = Some(preset);
        self
    }

    pub(crate) fn resolved_targets(&self) -> Vec<ElementId> {
        if self.targets.is_empty() {
            vec![self.region]
        } else {
            self.targets.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SectionId(pub u32);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_preset() {
        let spec = RevealPreset::cards().animation();
        assert_eq!(spec.start_value(Property::Opacity), 0.0);
        assert_eq!(spec.start_value(Property::TranslateY), 40.0);
        assert_eq!(spec.stagger, Duration::from_millis(150));
        assert_eq!(RevealPreset::cards().activation_edge, 0.2);
    }

    #[test]
    fn test_scale_distance_leaves_opacity() {
        let preset = RevealPreset::section().scale_distance(1.0 / 8.0, 1.0 / 16.0);
        assert_eq!(preset.from.get(Property::TranslateY), Some(50.0 / 16.0));
        assert_eq!(preset.from.get(Property::Opacity), Some(0.0));
        assert_eq!(preset.to.get(Property::TranslateY), Some(0.0));
    }

    #[test]
    fn test_backdrop_only_scales() {
        let preset = RevealPreset::hero_backdrop();
        assert_eq!(preset.from.get(Property::Scale), Some(1.1));
        assert_eq!(preset.from.get(Property::Opacity), None);
        assert_eq!(preset.duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_empty_targets_resolve_to_region() {
        let binding = SectionBinding::reveal("contact", ElementId(4), RevealPreset::contact());
        assert_eq!(binding.resolved_targets(), vec![ElementId(4)]);
        let binding = binding.with_targets(vec![ElementId(5), ElementId(6)]);
        assert_eq!(binding.resolved_targets(), vec![ElementId(5), ElementId(6)]);
    }
}
