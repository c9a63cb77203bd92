//! Trigger registry
//!
//! Triggers live in an arena of generation-checked slots. Unregistering
//! leaves a tombstone whose index is reused under a new generation, so a
//! handle held past its trigger's lifetime can never reach a newer trigger.
//!
//! Evaluation is snapshot-then-iterate: take [`TriggerRegistry::snapshot`] at
//! tick start and call [`TriggerRegistry::evaluate`] per handle. Triggers
//! unregistered mid-pass report [`Evaluation::Gone`], triggers registered
//! mid-pass wait for the next tick, and nothing fires twice.

use serde::Serialize;
use tracing::{debug, trace};

use super::descriptor::{TriggerDescriptor, TriggerMode};
use crate::error::FrameFault;
use crate::geometry::{Rect, Viewport};
use crate::pinned::{PinFrame, PinnedSection};
use crate::scene::RenderTarget;

/// Smallest usable activation edge, so an edge of 0 still needs movement
const MIN_EDGE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TriggerHandle {
    index: u32,
    generation: u32,
}

/// Lifecycle of a registered trigger
///
/// `Registered -> Fired` for one-shots, `Registered -> Tracking` for scrubbed
/// and pinned triggers. Unregistering ends every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    Registered,
    Fired,
    Tracking,
}

/// Result of evaluating one trigger for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Handle no longer registered
    Gone,
    /// Not measurable this tick, retried next tick
    Skipped(FrameFault),
    /// Measured, nothing to do
    Idle { ratio: f64 },
    /// One-shot crossed its activation edge
    Fired { ratio: f64 },
    /// Scrubbed progress for this tick
    Progress { progress: f64 },
    /// Pinned section frame
    Pinned(PinFrame),
}

#[derive(Debug)]
struct Entry {
    descriptor: TriggerDescriptor,
    state: TriggerState,
    last_ratio: Option<f64>,
    pin: Option<PinnedSection>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// How far `region` has entered the viewport from its bottom edge
///
/// 0 while the region's top is at or below the bottom edge, 1 once it has
/// reached the top edge.
pub fn visibility_ratio(region: Rect, scroll: f64, viewport: Viewport) -> f64 {
    let top_in_viewport = region.top() - scroll;
    ((viewport.height - top_in_viewport) / viewport.height).clamp(0.0, 1.0)
}

/// Highest ratio `region` can reach with scrolling stopped at `limit`
///
/// Below 1 for regions within a viewport of the document end.
fn reachable_ratio(region: Rect, limit: Option<f64>, viewport: Viewport) -> f64 {
    limit.map_or(1.0, |limit| visibility_ratio(region, limit, viewport))
}

#[derive(Debug, Default)]
pub struct TriggerRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
    /// Furthest scroll position, `None` while unbounded
    scroll_limit: Option<f64>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: TriggerDescriptor) -> TriggerHandle {
        let pin = descriptor
            .pin
            .map(|spec| PinnedSection::new(descriptor.region, spec));
        let entry = Entry {
            descriptor,
            state: TriggerState::Registered,
            last_ratio: None,
            pin,
        };

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.entry = Some(entry);
        self.len += 1;

        let handle = TriggerHandle {
            index,
            generation: slot.generation,
        };
        debug!(?handle, "Registered trigger");
        handle
    }

    pub fn unregister(&mut self, handle: TriggerHandle) -> Option<TriggerDescriptor> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        debug!(?handle, state = ?entry.state, "Unregistered trigger");
        Some(entry.descriptor)
    }

    fn entry(&self, handle: TriggerHandle) -> Option<&Entry> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry_mut(&mut self, handle: TriggerHandle) -> Option<&mut Entry> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    pub fn contains(&self, handle: TriggerHandle) -> bool {
        self.entry(handle).is_some()
    }

    pub fn state(&self, handle: TriggerHandle) -> Option<TriggerState> {
        self.entry(handle).map(|e| e.state)
    }

    pub fn descriptor(&self, handle: TriggerHandle) -> Option<&TriggerDescriptor> {
        self.entry(handle).map(|e| &e.descriptor)
    }

    /// Cached scrollable range of a pinned trigger
    pub fn pin_range(&self, handle: TriggerHandle) -> Option<f64> {
        self.entry(handle)
            .and_then(|e| e.pin.as_ref())
            .and_then(|p| p.range())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live handles at this moment, in registration-slot order
    pub fn snapshot(&self) -> Vec<TriggerHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.entry.is_some())
            .map(|(index, slot)| TriggerHandle {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    /// Bound ratios to what scrolling can reach, so edges and scrub ends
    /// past the document end resolve at the limit
    pub fn set_scroll_limit(&mut self, limit: f64) {
        self.scroll_limit = Some(limit.max(0.0));
    }

    /// Mark every pinned range stale (viewport or content changed)
    pub fn invalidate_layout(&mut self) {
        for entry in self.slots.iter_mut().filter_map(|s| s.entry.as_mut()) {
            if let Some(pin) = &mut entry.pin {
                pin.invalidate();
            }
        }
    }

    /// Evaluate one trigger against the current scroll position
    pub fn evaluate(
        &mut self,
        handle: TriggerHandle,
        scroll: f64,
        viewport: Viewport,
        target: &dyn RenderTarget,
    ) -> Evaluation {
        let limit = self.scroll_limit;
        let Some(entry) = self.entry_mut(handle) else {
            return Evaluation::Gone;
        };

        if let Some(pin) = &mut entry.pin {
            return match pin.update(scroll, viewport, target) {
                Ok(frame) => {
                    if entry.state == TriggerState::Registered {
                        debug!(?handle, "Pinned trigger tracking");
                        entry.state = TriggerState::Tracking;
                    }
                    entry.last_ratio = Some(frame.progress);
                    Evaluation::Pinned(frame)
                }
                Err(fault) => {
                    trace!(?handle, %fault, "Skipping pinned trigger");
                    Evaluation::Skipped(fault)
                }
            };
        }

        let region = match target.bounds(entry.descriptor.region) {
            None => return Evaluation::Skipped(FrameFault::TargetDetached(entry.descriptor.region)),
            Some(rect) if rect.is_unmeasured() || viewport.height <= 0.0 => {
                trace!(?handle, "Region not laid out yet");
                return Evaluation::Skipped(FrameFault::LayoutNotReady(entry.descriptor.region));
            }
            Some(rect) => rect,
        };

        let ratio = visibility_ratio(region, scroll, viewport);
        let reachable = reachable_ratio(region, limit, viewport);
        let previous = entry.last_ratio.replace(ratio).unwrap_or(0.0);

        match (entry.descriptor.mode, entry.state) {
            (TriggerMode::OneShot, TriggerState::Registered) => {
                let edge = entry.descriptor.activation_edge.min(reachable).max(MIN_EDGE);
                if ratio > previous && previous < edge && ratio >= edge {
                    debug!(?handle, ratio, "Trigger fired");
                    entry.state = TriggerState::Fired;
                    Evaluation::Fired { ratio }
                } else {
                    Evaluation::Idle { ratio }
                }
            }
            (TriggerMode::OneShot, _) => Evaluation::Idle { ratio },
            (TriggerMode::Scrubbed, state) => {
                if state == TriggerState::Registered {
                    debug!(?handle, "Scrubbed trigger tracking");
                    entry.state = TriggerState::Tracking;
                }
                let progress = if reachable > 0.0 && reachable < 1.0 {
                    (ratio / reachable).min(1.0)
                } else {
                    ratio
                };
                Evaluation::Progress { progress }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationSpec, PropertySet};
    use crate::scene::{ElementId, Property, Scene};

    const VIEWPORT: Viewport = Viewport::new(100.0, 100.0);
    const REGION_TOP: f64 = 500.0;

    fn fade() -> AnimationSpec {
        AnimationSpec::new(
            PropertySet::new().with(Property::Opacity, 0.0),
            PropertySet::new().with(Property::Opacity, 1.0),
        )
    }

    fn scene() -> (Scene, ElementId) {
        let mut scene = Scene::new();
        let region = scene.insert("services", Rect::new(0.0, REGION_TOP, 100.0, 60.0));
        (scene, region)
    }

    /// Scroll position giving the requested visibility ratio
    fn scroll_for(ratio: f64) -> f64 {
        REGION_TOP - VIEWPORT.height + ratio * VIEWPORT.height
    }

    #[test]
    fn test_visibility_ratio_edges() {
        let region = Rect::new(0.0, REGION_TOP, 100.0, 60.0);
        assert_eq!(visibility_ratio(region, 0.0, VIEWPORT), 0.0);
        assert_eq!(visibility_ratio(region, scroll_for(0.0), VIEWPORT), 0.0);
        assert!((visibility_ratio(region, scroll_for(0.3), VIEWPORT) - 0.3).abs() < 1e-9);
        assert_eq!(visibility_ratio(region, REGION_TOP, VIEWPORT), 1.0);
        assert_eq!(visibility_ratio(region, 5_000.0, VIEWPORT), 1.0);
    }

    #[test]
    fn test_one_shot_fires_once_across_recrossings() {
        let (scene, region) = scene();
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(TriggerDescriptor::one_shot(region, fade()).activate_at(0.8));

        let mut fired = 0;
        for ratio in [0.0, 0.85, 0.5, 0.9, 0.1, 1.0] {
            if let Evaluation::Fired { ratio: at } = registry.evaluate(handle, scroll_for(ratio), VIEWPORT, &scene) {
                assert!((at - 0.85).abs() < 1e-9);
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(registry.state(handle), Some(TriggerState::Fired));
    }

    #[test]
    fn test_one_shot_already_past_edge_fires_on_first_measurement() {
        let (scene, region) = scene();
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(TriggerDescriptor::one_shot(region, fade()).activate_at(0.5));

        // page loaded mid-scroll
        assert!(matches!(
            registry.evaluate(handle, scroll_for(0.7), VIEWPORT, &scene),
            Evaluation::Fired { .. }
        ));
        assert!(matches!(
            registry.evaluate(handle, scroll_for(0.3), VIEWPORT, &scene),
            Evaluation::Idle { .. }
        ));
    }

    #[test]
    fn test_one_shot_waits_below_edge() {
        let (scene, region) = scene();
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(TriggerDescriptor::one_shot(region, fade()).activate_at(0.5));

        for ratio in [0.1, 0.3, 0.49, 0.2] {
            assert!(matches!(
                registry.evaluate(handle, scroll_for(ratio), VIEWPORT, &scene),
                Evaluation::Idle { .. }
            ));
        }
        assert_eq!(registry.state(handle), Some(TriggerState::Registered));
        assert!(matches!(
            registry.evaluate(handle, scroll_for(0.5), VIEWPORT, &scene),
            Evaluation::Fired { .. }
        ));
    }

    #[test]
    fn test_scrubbed_progress_tracks_ratio_both_ways() {
        let (scene, region) = scene();
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(TriggerDescriptor::scrubbed(region, fade()));

        let mut progress_at = |ratio: f64| match registry.evaluate(handle, scroll_for(ratio), VIEWPORT, &scene) {
            Evaluation::Progress { progress } => progress,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(progress_at(0.0), 0.0);
        assert_eq!(progress_at(1.0), 1.0);

        let mut previous = -1.0;
        for step in 0..=10 {
            let progress = progress_at(step as f64 / 10.0);
            assert!(progress >= previous);
            previous = progress;
        }
        // scrolling back reduces progress
        assert!(progress_at(0.4) < previous);
        assert_eq!(registry.state(handle), Some(TriggerState::Tracking));
    }

    #[test]
    fn test_edge_past_scroll_limit_fires_at_limit() {
        let (scene, region) = scene();
        let mut registry = TriggerRegistry::new();
        // region top sits half a viewport above the document end
        registry.set_scroll_limit(REGION_TOP - VIEWPORT.height / 2.0);
        let handle = registry.register(TriggerDescriptor::one_shot(region, fade()).activate_at(0.8));

        assert!(matches!(
            registry.evaluate(handle, scroll_for(0.4), VIEWPORT, &scene),
            Evaluation::Idle { .. }
        ));
        assert!(matches!(
            registry.evaluate(handle, scroll_for(0.5), VIEWPORT, &scene),
            Evaluation::Fired { .. }
        ));
    }

    #[test]
    fn test_scrub_reaches_one_at_scroll_limit() {
        let (scene, region) = scene();
        let mut registry = TriggerRegistry::new();
        registry.set_scroll_limit(scroll_for(0.5));
        let handle = registry.register(TriggerDescriptor::scrubbed(region, fade()));

        let mut progress_at = |ratio: f64| match registry.evaluate(handle, scroll_for(ratio), VIEWPORT, &scene) {
            Evaluation::Progress { progress } => progress,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(progress_at(0.0), 0.0);
        assert_eq!(progress_at(0.25), 0.5);
        assert_eq!(progress_at(0.5), 1.0);
    }

    #[test]
    fn test_zero_height_region_is_skipped_until_measured() {
        let (mut scene, region) = scene();
        scene.set_bounds(region, Rect::new(0.0, REGION_TOP, 100.0, 0.0));
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(TriggerDescriptor::one_shot(region, fade()));

        assert_eq!(
            registry.evaluate(handle, scroll_for(0.9), VIEWPORT, &scene),
            Evaluation::Skipped(FrameFault::LayoutNotReady(region))
        );
        assert_eq!(registry.state(handle), Some(TriggerState::Registered));

        scene.set_bounds(region, Rect::new(0.0, REGION_TOP, 100.0, 60.0));
        assert!(matches!(
            registry.evaluate(handle, scroll_for(0.9), VIEWPORT, &scene),
            Evaluation::Fired { .. }
        ));
    }

    #[test]
    fn test_snapshot_tolerates_mutation_mid_pass() {
        let (scene, region) = scene();
        let mut registry = TriggerRegistry::new();
        let first = registry.register(TriggerDescriptor::one_shot(region, fade()));
        let second = registry.register(TriggerDescriptor::one_shot(region, fade()));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot, vec![first, second]);

        let mut fired = Vec::new();
        let mut late = None;
        for handle in snapshot {
            match registry.evaluate(handle, scroll_for(0.9), VIEWPORT, &scene) {
                Evaluation::Fired { .. } => {
                    fired.push(handle);
                    // firing the first unmounts the second and mounts a replacement
                    if handle == first {
                        registry.unregister(second);
                        late = Some(registry.register(TriggerDescriptor::one_shot(region, fade())));
                    }
                }
                Evaluation::Gone => assert_eq!(handle, second),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(fired, vec![first]);

        // the replacement reuses the slot but not the identity
        let late = late.unwrap();
        assert_ne!(late, second);
        assert!(!registry.contains(second));
        assert_eq!(registry.state(late), Some(TriggerState::Registered));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let (_, region) = scene();
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(TriggerDescriptor::one_shot(region, fade()));
        assert!(registry.unregister(handle).is_some());
        assert!(registry.unregister(handle).is_none());
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_pinned_trigger_reports_frames() {
        let mut scene = Scene::new();
        let container = scene.insert("worlds", Rect::new(0.0, 200.0, 100.0, 100.0));
        let track = scene.insert_child(container, "track", Rect::new(0.0, 200.0, 400.0, 100.0));
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(TriggerDescriptor::pinned(container, track));

        match registry.evaluate(handle, 350.0, VIEWPORT, &scene) {
            Evaluation::Pinned(frame) => {
                assert!((frame.progress - 0.5).abs() < 1e-9);
                assert_eq!(frame.displacement, -150.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(registry.pin_range(handle), Some(300.0));
        assert_eq!(registry.state(handle), Some(TriggerState::Tracking));
    }
}
