use std::time::Duration;

use crate::config::EasingType;
use crate::scene::Property;
use crate::scroll::easing::EasingTypeExt;
use crate::scroll::timing::{lerp, scale};

/// Ordered snapshot of property values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    values: Vec<(Property, f64)>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value
    pub fn with(mut self, property: Property, value: f64) -> Self {
        match self.values.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.values.push((property, value)),
        }
        self
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        self.values
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.values.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// From/to tween description. Immutable once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub from: PropertySet,
    pub to: PropertySet,
    pub duration: Duration,
    pub easing: EasingType,
    /// Start offset between consecutive targets
    pub stagger: Duration,
    /// Start offset of the first target
    pub delay: Duration,
}

impl AnimationSpec {
    pub fn new(from: PropertySet, to: PropertySet) -> Self {
        Self {
            from,
            to,
            duration: Duration::from_millis(500),
            easing: EasingType::Power2Out,
            stagger: Duration::ZERO,
            delay: Duration::ZERO,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Scale every timing value by `factor`
    pub fn time_scaled(mut self, factor: f64) -> Self {
        self.duration = scale(self.duration, factor);
        self.stagger = scale(self.stagger, factor);
        self.delay = scale(self.delay, factor);
        self
    }

    /// Start value of an animated property
    pub fn start_value(&self, property: Property) -> f64 {
        self.from.get(property).unwrap_or_else(|| property.identity())
    }

    /// Offset of the n-th target's start from the moment playback begins
    pub fn start_offset(&self, index: usize) -> Duration {
        self.delay + self.stagger * index as u32
    }

    /// Time until the last of `targets` targets finishes
    pub fn total_duration(&self, targets: usize) -> Duration {
        self.start_offset(targets.saturating_sub(1)) + self.duration
    }

    /// Property values at raw progress `t`, easing applied
    pub fn values_at(&self, t: f64) -> impl Iterator<Item = (Property, f64)> + '_ {
        let eased = self.easing.apply(t);
        self.to
            .iter()
            .map(move |(property, end)| (property, lerp(self.start_value(property), end, eased)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade_up() -> AnimationSpec {
        AnimationSpec::new(
            PropertySet::new()
                .with(Property::Opacity, 0.0)
                .with(Property::TranslateY, 40.0),
            PropertySet::new()
                .with(Property::Opacity, 1.0)
                .with(Property::TranslateY, 0.0),
        )
        .with_duration(Duration::from_millis(800))
        .with_stagger(Duration::from_millis(150))
    }

    #[test]
    fn test_values_at_endpoints() {
        let spec = fade_up();
        let start: Vec<_> = spec.values_at(0.0).collect();
        let end: Vec<_> = spec.values_at(1.0).collect();
        assert_eq!(start, vec![(Property::Opacity, 0.0), (Property::TranslateY, 40.0)]);
        assert_eq!(end, vec![(Property::Opacity, 1.0), (Property::TranslateY, 0.0)]);
    }

    #[test]
    fn test_missing_from_uses_identity() {
        let spec = AnimationSpec::new(
            PropertySet::new(),
            PropertySet::new().with(Property::Scale, 2.0),
        )
        .with_easing(EasingType::Linear);
        let mid: Vec<_> = spec.values_at(0.5).collect();
        assert_eq!(mid, vec![(Property::Scale, 1.5)]);
    }

    #[test]
    fn test_stagger_timing() {
        let spec = fade_up().with_delay(Duration::from_millis(100));
        assert_eq!(spec.start_offset(0), Duration::from_millis(100));
        assert_eq!(spec.start_offset(2), Duration::from_millis(400));
        assert_eq!(spec.total_duration(3), Duration::from_millis(1200));
        assert_eq!(spec.time_scaled(0.5).total_duration(3), Duration::from_millis(600));
    }
}
