//! Frame coordinator
//!
//! Owns the smooth-scroll engine, trigger registry, animation player and the
//! mounted sections. One [`Coordinator::frame`] call is one strict pass:
//!
//! 1. tick the scroller and publish the smoothed position
//! 2. evaluate a snapshot of the registry against it and dispatch
//! 3. apply buffered pin writes, then advance playback
//!
//! Layout is only measured in step 2 and only written in step 3, so every
//! trigger in a pass sees the same geometry.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::animation::{PlaybackToken, Player};
use crate::config::{AppConfig, RevealConfig};
use crate::error::{Error, FrameFault, Result};
use crate::geometry::Viewport;
use crate::pinned::PinFrame;
use crate::reveal::{BindingKind, SectionBinding, SectionId};
use crate::scene::{ElementId, Property, RenderTarget};
use crate::scroll::{ScrollInput, ScrollState, SmoothScroller};
use crate::trigger::{Evaluation, TriggerDescriptor, TriggerHandle, TriggerMode, TriggerRegistry};

/// What one frame did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    pub scroll: ScrollState,
    /// Triggers measured this frame
    pub evaluated: usize,
    /// One-shots that crossed their edge
    pub fired: usize,
    /// Triggers that could not be measured
    pub skipped: usize,
    pub pins: Vec<PinFrame>,
    /// Property writes, pins and animations together
    pub writes: usize,
    /// Animation instances that completed
    pub finished: usize,
    /// Animation instances dropped because a target left the tree
    pub detached: usize,
    pub active_animations: usize,
    pub faults: Vec<FrameFault>,
}

#[derive(Debug)]
struct MountedSection {
    name: String,
    triggers: Vec<TriggerHandle>,
    /// Playback started outside any trigger (intros)
    playbacks: Vec<PlaybackToken>,
}

/// Per-trigger bookkeeping
#[derive(Debug, Default)]
struct Owner {
    section: Option<SectionId>,
    playback: Option<PlaybackToken>,
    last_pin: Option<PinFrame>,
}

impl Owner {
    fn release(self) {
        if let Some(token) = self.playback {
            token.cancel();
        }
    }
}

pub struct Coordinator {
    reveal: RevealConfig,
    scroller: SmoothScroller,
    registry: TriggerRegistry,
    player: Player,
    viewport: Viewport,
    sections: BTreeMap<SectionId, MountedSection>,
    owners: HashMap<TriggerHandle, Owner>,
    next_section: u32,
    /// Pin writes collected during evaluation
    pending_writes: Vec<(ElementId, Property, f64)>,
    layout_dirty: bool,
}

impl Coordinator {
    pub fn new(config: &AppConfig, viewport: Viewport) -> Self {
        Self {
            reveal: config.reveal.clone(),
            scroller: SmoothScroller::new(config.scroll.clone()),
            registry: TriggerRegistry::new(),
            player: Player::new(),
            viewport,
            sections: BTreeMap::new(),
            owners: HashMap::new(),
            next_section: 0,
            pending_writes: Vec::new(),
            layout_dirty: true,
        }
    }

    pub fn scroller(&self) -> &SmoothScroller {
        &self.scroller
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroller.state()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section_name(&self, id: SectionId) -> Option<&str> {
        self.sections.get(&id).map(|s| s.name.as_str())
    }

    /// Triggers owned by a mounted section
    pub fn section_triggers(&self, id: SectionId) -> Option<&[TriggerHandle]> {
        self.sections.get(&id).map(|s| s.triggers.as_slice())
    }

    pub fn trigger_count(&self) -> usize {
        self.registry.len()
    }

    pub fn active_animations(&self) -> usize {
        self.player.active_count()
    }

    /// Past `threshold` document units from the top (header styling)
    pub fn is_scrolled(&self, threshold: f64) -> bool {
        self.scroller.state().smoothed_position > threshold
    }

    /// True while scrolling or animating. Hosts drop to their idle tick otherwise.
    pub fn needs_frame(&self) -> bool {
        self.layout_dirty || self.scroller.needs_update() || self.player.is_playing()
    }

    pub fn input(&mut self, input: ScrollInput) {
        self.scroller.input(input);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroller.scroll_by(delta);
    }

    pub fn scroll_to(&mut self, target: f64, immediate: bool) {
        self.scroller.scroll_to(target, immediate);
    }

    /// New viewport or document height
    pub fn resize(&mut self, viewport: Viewport, document_height: f64) {
        debug!(?viewport, document_height, "Layout changed");
        self.viewport = viewport;
        self.scroller.set_limit(viewport.scroll_limit(document_height));
        self.registry.set_scroll_limit(self.scroller.limit());
        self.invalidate_layout();
    }

    /// Content changed size; recompute pinned ranges before their next write
    pub fn invalidate_layout(&mut self) {
        self.registry.invalidate_layout();
        self.layout_dirty = true;
    }

    /// Mount a section and return its id
    ///
    /// Targets are primed with the animation's start values right away so
    /// nothing is visible before its reveal. With reveals disabled they get
    /// their end values and only pins are registered.
    pub fn mount(&mut self, binding: SectionBinding, target: &mut dyn RenderTarget, now: Duration) -> SectionId {
        self.next_section += 1;
        let id = SectionId(self.next_section);
        let targets = binding.resolved_targets();
        let animation = binding
            .preset
            .as_ref()
            .map(|preset| preset.animation().time_scaled(self.reveal.duration_scale));

        if let Some(spec) = &animation {
            let primed: Vec<(Property, f64)> = if self.reveal.enabled {
                spec.to.iter().map(|(p, _)| (p, spec.start_value(p))).collect()
            } else {
                spec.to.iter().collect()
            };
            for &element in &targets {
                for &(property, value) in &primed {
                    if let Err(fault) = target.write(element, property, value) {
                        debug!(section = %id, %fault, "Could not prime target");
                    }
                }
            }
        }

        let mut section = MountedSection {
            name: binding.name,
            triggers: Vec::new(),
            playbacks: Vec::new(),
        };
        let animation = animation.filter(|_| self.reveal.enabled);

        let descriptor = match (binding.kind, animation) {
            (BindingKind::Pin { track }, animation) => {
                let descriptor = TriggerDescriptor::pinned(binding.region, track);
                Some(match animation {
                    Some(spec) => descriptor.with_animation(Rc::new(spec)).with_targets(targets),
                    None => descriptor,
                })
            }
            (_, None) => None,
            (BindingKind::Intro, Some(spec)) => {
                section.playbacks.push(self.player.play(Rc::new(spec), targets, now));
                None
            }
            (BindingKind::Reveal, Some(spec)) => {
                let edge = binding.preset.as_ref().map(|p| p.activation_edge).unwrap_or_default();
                Some(
                    TriggerDescriptor::one_shot(binding.region, spec)
                        .with_targets(targets)
                        .activate_at(edge),
                )
            }
            (BindingKind::Scrub, Some(spec)) => {
                Some(TriggerDescriptor::scrubbed(binding.region, spec).with_targets(targets))
            }
        };
        if let Some(descriptor) = descriptor {
            section.triggers.push(self.attach(descriptor, Some(id)));
        }

        info!(section = %id, name = %section.name, triggers = section.triggers.len(), "Mounted section");
        self.sections.insert(id, section);
        id
    }

    /// Unregister a section's triggers and cancel its animations
    ///
    /// Takes effect before the next frame: nothing the section started writes
    /// again.
    pub fn unmount(&mut self, id: SectionId) -> Result<()> {
        let section = self.sections.remove(&id).ok_or(Error::SectionNotFound(id.0))?;
        self.release_section(id, section);
        Ok(())
    }

    fn release_section(&mut self, id: SectionId, section: MountedSection) {
        for handle in &section.triggers {
            self.registry.unregister(*handle);
            if let Some(owner) = self.owners.remove(handle) {
                owner.release();
            }
        }
        for token in &section.playbacks {
            token.cancel();
        }
        info!(section = %id, name = %section.name, "Unmounted section");
    }

    /// Register a trigger that belongs to no section
    pub fn register(&mut self, descriptor: TriggerDescriptor) -> TriggerHandle {
        self.attach(descriptor, None)
    }

    fn attach(&mut self, descriptor: TriggerDescriptor, section: Option<SectionId>) -> TriggerHandle {
        let playback = match (descriptor.mode, &descriptor.animation) {
            (TriggerMode::Scrubbed, Some(spec)) => {
                Some(self.player.scrub(spec.clone(), descriptor.targets.clone()))
            }
            _ => None,
        };
        let handle = self.registry.register(descriptor);
        self.owners.insert(
            handle,
            Owner {
                section,
                playback,
                last_pin: None,
            },
        );
        handle
    }

    /// Unregister a trigger and cancel whatever it is playing
    pub fn unregister(&mut self, handle: TriggerHandle) -> bool {
        let removed = self.registry.unregister(handle).is_some();
        if let Some(owner) = self.owners.remove(&handle) {
            if let Some(section) = owner.section.and_then(|id| self.sections.get_mut(&id)) {
                section.triggers.retain(|h| *h != handle);
            }
            owner.release();
        }
        removed
    }

    /// Unmount everything and hand scrolling back to the host
    pub fn teardown(&mut self) {
        for (id, section) in std::mem::take(&mut self.sections) {
            self.release_section(id, section);
        }
        for handle in self.registry.snapshot() {
            self.unregister(handle);
        }
        self.player.cancel_all();
        self.pending_writes.clear();
        self.scroller.detach();
        self.layout_dirty = false;
        info!("Coordinator torn down");
    }

    /// Run one frame at host timestamp `now`
    pub fn frame(&mut self, now: Duration, target: &mut dyn RenderTarget) -> FrameReport {
        let scroll = self.scroller.tick(now);
        let position = scroll.smoothed_position;
        self.layout_dirty = false;
        let mut report = FrameReport {
            scroll,
            ..Default::default()
        };

        for handle in self.registry.snapshot() {
            match self.registry.evaluate(handle, position, self.viewport, &*target) {
                Evaluation::Gone => continue,
                Evaluation::Skipped(fault) => {
                    report.skipped += 1;
                    report.faults.push(fault);
                }
                Evaluation::Idle { .. } => {}
                Evaluation::Fired { .. } => {
                    report.fired += 1;
                    self.play_fired(handle, now);
                }
                Evaluation::Progress { progress } => {
                    if let Some(token) = self.owners.get(&handle).and_then(|o| o.playback.as_ref()) {
                        self.player.seek(token, progress);
                    }
                }
                Evaluation::Pinned(frame) => {
                    report.pins.push(frame);
                    self.buffer_pin(handle, frame);
                }
            }
            report.evaluated += 1;
        }

        for (element, property, value) in self.pending_writes.drain(..) {
            match target.write(element, property, value) {
                Ok(()) => report.writes += 1,
                Err(fault) => {
                    debug!(%fault, "Dropping pin write");
                    report.faults.push(fault);
                }
            }
        }

        let stats = self.player.advance(now, target);
        report.writes += stats.writes;
        report.finished = stats.finished;
        report.detached = stats.detached;
        report.active_animations = self.player.active_count();

        trace!(
            scroll = position,
            evaluated = report.evaluated,
            writes = report.writes,
            "frame"
        );
        report
    }

    fn play_fired(&mut self, handle: TriggerHandle, now: Duration) {
        let Some(descriptor) = self.registry.descriptor(handle) else {
            return;
        };
        let Some(spec) = descriptor.animation.clone() else {
            return;
        };
        let token = self.player.play(spec, descriptor.targets.clone(), now);
        if let Some(previous) = self
            .owners
            .entry(handle)
            .or_default()
            .playback
            .replace(token)
        {
            previous.cancel();
        }
    }

    fn buffer_pin(&mut self, handle: TriggerHandle, frame: PinFrame) {
        let Some(descriptor) = self.registry.descriptor(handle) else {
            return;
        };
        let container = descriptor.region;
        let Some(track) = descriptor.pin.map(|pin| pin.track) else {
            return;
        };
        let owner = self.owners.entry(handle).or_default();
        if let Some(token) = &owner.playback {
            self.player.seek(token, frame.progress);
        }

        let unchanged = owner.last_pin.is_some_and(|last| {
            last.pin_offset == frame.pin_offset && last.displacement == frame.displacement
        });
        if unchanged {
            return;
        }
        owner.last_pin = Some(frame);
        self.pending_writes.push((container, Property::TranslateY, frame.pin_offset));
        self.pending_writes.push((track, Property::TranslateX, frame.displacement));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationSpec, PropertySet};
    use crate::config::EasingType;
    use crate::geometry::Rect;
    use crate::pinned::PinPhase;
    use crate::reveal::RevealPreset;
    use crate::scene::Scene;

    const VIEWPORT: Viewport = Viewport::new(100.0, 100.0);
    const REGION_TOP: f64 = 500.0;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn scroll_for(ratio: f64) -> f64 {
        REGION_TOP - VIEWPORT.height + ratio * VIEWPORT.height
    }

    fn fade(duration_ms: u64, edge: f64) -> RevealPreset {
        RevealPreset::fade_up(0.0, duration_ms, EasingType::Linear).activate_at(edge)
    }

    fn setup(config: AppConfig) -> (Coordinator, Scene, ElementId) {
        let mut scene = Scene::new();
        let region = scene.insert("services", Rect::new(0.0, REGION_TOP, 100.0, 60.0));
        let mut coordinator = Coordinator::new(&config, VIEWPORT);
        coordinator.resize(VIEWPORT, 2000.0);
        (coordinator, scene, region)
    }

    fn opacity(scene: &Scene, id: ElementId) -> f64 {
        scene.style(id).unwrap().opacity
    }

    #[test]
    fn test_fade_in_fires_once_and_completes() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        let id = coordinator.mount(SectionBinding::reveal("services", region, fade(800, 0.8)), &mut scene, ms(0));
        assert_eq!(opacity(&scene, region), 0.0);
        assert_eq!(coordinator.section_name(id), Some("services"));
        assert_eq!(coordinator.section_triggers(id).map(<[_]>::len), Some(1));

        let mut fired = 0;
        for (frame, ratio) in [0.0, 0.85, 0.5, 0.9].into_iter().enumerate() {
            coordinator.scroll_to(scroll_for(ratio), true);
            fired += coordinator.frame(ms(frame as u64 * 16), &mut scene).fired;
        }
        assert_eq!(fired, 1);

        let report = coordinator.frame(ms(2000), &mut scene);
        assert_eq!(report.finished, 1);
        assert_eq!(opacity(&scene, region), 1.0);
        assert_eq!(report.active_animations, 0);
    }

    #[test]
    fn test_mount_primes_start_values() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        let card = scene.insert_child(region, "card", Rect::new(0.0, REGION_TOP, 20.0, 10.0));
        coordinator.mount(
            SectionBinding::reveal("services", region, RevealPreset::cards()).with_targets(vec![card]),
            &mut scene,
            ms(0),
        );
        let style = scene.style(card).unwrap();
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.translate_y, 40.0);
        // the watched region itself is untouched
        assert_eq!(opacity(&scene, region), 1.0);
    }

    #[test]
    fn test_unmount_mid_animation_stops_writes_same_tick() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        let id = coordinator.mount(SectionBinding::reveal("services", region, fade(800, 0.5)), &mut scene, ms(0));

        coordinator.scroll_to(scroll_for(0.9), true);
        assert_eq!(coordinator.frame(ms(0), &mut scene).fired, 1);
        assert!(coordinator.frame(ms(100), &mut scene).writes > 0);
        let reached = opacity(&scene, region);
        let writes = scene.write_count();

        coordinator.unmount(id).unwrap();
        let report = coordinator.frame(ms(200), &mut scene);
        assert_eq!(report.writes, 0);
        assert_eq!(scene.write_count(), writes);
        assert_eq!(opacity(&scene, region), reached);
        assert!(reached < 1.0);

        assert!(matches!(coordinator.unmount(id), Err(Error::SectionNotFound(_))));
    }

    #[test]
    fn test_unregister_cancels_trigger_playback() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        let spec = AnimationSpec::new(
            PropertySet::new().with(Property::Opacity, 0.0),
            PropertySet::new().with(Property::Opacity, 1.0),
        )
        .with_duration(ms(800));
        let handle = coordinator.register(TriggerDescriptor::one_shot(region, spec).activate_at(0.5));

        coordinator.scroll_to(scroll_for(0.9), true);
        coordinator.frame(ms(0), &mut scene);
        coordinator.frame(ms(100), &mut scene);
        assert_eq!(coordinator.active_animations(), 1);

        assert!(coordinator.unregister(handle));
        assert!(!coordinator.unregister(handle));
        assert_eq!(coordinator.frame(ms(200), &mut scene).writes, 0);
        assert_eq!(coordinator.active_animations(), 0);
    }

    #[test]
    fn test_scrubbed_section_follows_scroll() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        coordinator.mount(SectionBinding::scrub("graphs", region, fade(800, 0.0)), &mut scene, ms(0));

        coordinator.scroll_to(scroll_for(0.5), true);
        coordinator.frame(ms(0), &mut scene);
        assert!((opacity(&scene, region) - 0.5).abs() < 1e-9);

        coordinator.scroll_to(scroll_for(0.25), true);
        coordinator.frame(ms(16), &mut scene);
        assert!((opacity(&scene, region) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_resize_during_pin_recomputes_before_write() {
        let mut scene = Scene::new();
        let container = scene.insert("worlds", Rect::new(0.0, 200.0, 100.0, 100.0));
        let track = scene.insert_child(container, "worlds-track", Rect::new(0.0, 200.0, 400.0, 100.0));
        let mut coordinator = Coordinator::new(&AppConfig::default(), VIEWPORT);
        coordinator.resize(VIEWPORT, 1000.0);
        coordinator.mount(SectionBinding::pinned("worlds", container, track), &mut scene, ms(0));

        coordinator.scroll_to(450.0, true);
        let report = coordinator.frame(ms(0), &mut scene);
        assert_eq!(report.pins[0].range, 300.0);
        assert!((scene.style(track).unwrap().translate_x + 250.0).abs() < 1e-9);
        assert_eq!(scene.style(container).unwrap().translate_y, 250.0);

        let wide = Viewport::new(200.0, 100.0);
        coordinator.resize(wide, 1000.0);
        assert!(coordinator.needs_frame());
        let report = coordinator.frame(ms(16), &mut scene);
        let frame = report.pins[0];
        assert_eq!(frame.range, 200.0);
        assert_eq!(frame.phase, PinPhase::Released);
        let translate = scene.style(track).unwrap().translate_x;
        assert_eq!(translate, -200.0);
        // trailing edge flush with the new viewport
        assert_eq!(400.0 + translate, wide.width);
    }

    fn pinned_scene(config: AppConfig) -> (Coordinator, Scene, ElementId, ElementId) {
        let mut scene = Scene::new();
        let container = scene.insert("worlds", Rect::new(0.0, 200.0, 100.0, 100.0));
        let track = scene.insert_child(container, "worlds-track", Rect::new(0.0, 200.0, 400.0, 100.0));
        let mut coordinator = Coordinator::new(&config, VIEWPORT);
        coordinator.resize(VIEWPORT, 1000.0);
        (coordinator, scene, container, track)
    }

    #[test]
    fn test_pin_scrubs_its_animation() {
        let (mut coordinator, mut scene, container, track) = pinned_scene(AppConfig::default());
        let card = scene.insert_child(track, "world-card", Rect::new(0.0, 200.0, 100.0, 100.0));
        coordinator.mount(
            SectionBinding::pinned("worlds", container, track)
                .with_preset(fade(800, 0.0))
                .with_targets(vec![card]),
            &mut scene,
            ms(0),
        );
        assert_eq!(opacity(&scene, card), 0.0);

        for (frame, (scroll, expected, translate)) in [
            (200.0, 0.0, 0.0),
            (350.0, 0.5, -150.0),
            (500.0, 1.0, -300.0),
            (350.0, 0.5, -150.0),
        ]
        .into_iter()
        .enumerate()
        {
            coordinator.scroll_to(scroll, true);
            coordinator.frame(ms(frame as u64 * 16), &mut scene);
            assert!((opacity(&scene, card) - expected).abs() < 1e-9, "opacity at {scroll}");
            assert!((scene.style(track).unwrap().translate_x - translate).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pin_registers_with_reveal_disabled() {
        let mut config = AppConfig::default();
        config.reveal.enabled = false;
        let (mut coordinator, mut scene, container, track) = pinned_scene(config);
        coordinator.mount(SectionBinding::pinned("worlds", container, track), &mut scene, ms(0));
        assert_eq!(coordinator.trigger_count(), 1);

        coordinator.scroll_to(350.0, true);
        let report = coordinator.frame(ms(0), &mut scene);
        assert_eq!(report.pins.len(), 1);
        assert_eq!(scene.style(track).unwrap().translate_x, -150.0);
    }

    #[test]
    fn test_unchanged_pin_is_not_rewritten() {
        let mut scene = Scene::new();
        let container = scene.insert("worlds", Rect::new(0.0, 200.0, 100.0, 100.0));
        let track = scene.insert_child(container, "worlds-track", Rect::new(0.0, 200.0, 400.0, 100.0));
        let mut coordinator = Coordinator::new(&AppConfig::default(), VIEWPORT);
        coordinator.resize(VIEWPORT, 1000.0);
        coordinator.mount(SectionBinding::pinned("worlds", container, track), &mut scene, ms(0));

        coordinator.scroll_to(300.0, true);
        assert_eq!(coordinator.frame(ms(0), &mut scene).writes, 2);
        assert_eq!(coordinator.frame(ms(16), &mut scene).writes, 0);
    }

    #[test]
    fn test_intro_waits_for_delay() {
        let (mut coordinator, mut scene, _) = setup(AppConfig::default());
        let title = scene.insert("hero-title", Rect::new(0.0, 10.0, 80.0, 4.0));
        coordinator.mount(SectionBinding::intro("hero", title, RevealPreset::hero_title()), &mut scene, ms(0));
        assert!(coordinator.needs_frame());

        coordinator.frame(ms(200), &mut scene);
        assert_eq!(opacity(&scene, title), 0.0);
        assert_eq!(scene.style(title).unwrap().translate_y, 50.0);

        coordinator.frame(ms(1500), &mut scene);
        assert_eq!(opacity(&scene, title), 1.0);
        assert_eq!(scene.style(title).unwrap().translate_y, 0.0);
        assert!(!coordinator.needs_frame());
    }

    #[test]
    fn test_duration_scale_shortens_playback() {
        let mut config = AppConfig::default();
        config.reveal.duration_scale = 0.5;
        let (mut coordinator, mut scene, region) = setup(config);
        coordinator.mount(SectionBinding::intro("hero", region, fade(800, 0.0)), &mut scene, ms(0));

        coordinator.frame(ms(0), &mut scene);
        coordinator.frame(ms(400), &mut scene);
        assert_eq!(opacity(&scene, region), 1.0);
    }

    #[test]
    fn test_reveal_disabled_shows_final_state() {
        let mut config = AppConfig::default();
        config.reveal.enabled = false;
        let (mut coordinator, mut scene, region) = setup(config);
        coordinator.mount(SectionBinding::reveal("services", region, RevealPreset::section()), &mut scene, ms(0));

        assert_eq!(opacity(&scene, region), 1.0);
        assert_eq!(scene.style(region).unwrap().translate_y, 0.0);
        assert_eq!(coordinator.trigger_count(), 0);
        assert_eq!(coordinator.frame(ms(0), &mut scene).writes, 0);
    }

    #[test]
    fn test_unmeasured_region_is_reported_and_retried() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        scene.set_bounds(region, Rect::new(0.0, REGION_TOP, 100.0, 0.0));
        coordinator.mount(SectionBinding::reveal("services", region, fade(800, 0.5)), &mut scene, ms(0));

        coordinator.scroll_to(scroll_for(0.9), true);
        let report = coordinator.frame(ms(0), &mut scene);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.faults, vec![FrameFault::LayoutNotReady(region)]);

        scene.set_bounds(region, Rect::new(0.0, REGION_TOP, 100.0, 60.0));
        assert_eq!(coordinator.frame(ms(16), &mut scene).fired, 1);
    }

    #[test]
    fn test_detached_target_is_absorbed() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        let card = scene.insert_child(region, "card", Rect::new(0.0, REGION_TOP, 20.0, 10.0));
        coordinator.mount(
            SectionBinding::reveal("services", region, fade(800, 0.5)).with_targets(vec![card]),
            &mut scene,
            ms(0),
        );
        coordinator.scroll_to(scroll_for(0.9), true);
        coordinator.frame(ms(0), &mut scene);

        scene.detach(card);
        let report = coordinator.frame(ms(100), &mut scene);
        assert_eq!(report.detached, 1);
        assert_eq!(report.active_animations, 0);
    }

    #[test]
    fn test_header_threshold() {
        let (mut coordinator, mut scene, _) = setup(AppConfig::default());
        assert!(!coordinator.is_scrolled(50.0));
        coordinator.scroll_to(60.0, true);
        coordinator.frame(ms(0), &mut scene);
        assert!(coordinator.is_scrolled(50.0));
    }

    #[test]
    fn test_teardown_releases_everything() {
        let (mut coordinator, mut scene, region) = setup(AppConfig::default());
        let title = scene.insert("hero-title", Rect::new(0.0, 10.0, 80.0, 4.0));
        coordinator.mount(SectionBinding::reveal("services", region, RevealPreset::section()), &mut scene, ms(0));
        coordinator.mount(SectionBinding::intro("hero", title, RevealPreset::hero_title()), &mut scene, ms(0));
        coordinator.frame(ms(0), &mut scene);

        coordinator.teardown();
        assert_eq!(coordinator.section_count(), 0);
        assert_eq!(coordinator.trigger_count(), 0);
        assert!(!coordinator.scroller().is_attached());
        assert!(!coordinator.needs_frame());
        assert_eq!(coordinator.frame(ms(100), &mut scene).writes, 0);
    }
}
