//! Animation playback engine
//!
//! Advances active instances once per frame and writes interpolated values
//! to the render target. Every `play`/`scrub` returns a [`PlaybackToken`];
//! cancelling the token stops all writes of that instance from the next
//! `advance` on and leaves properties at their last written value.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::spec::AnimationSpec;
use crate::error::FrameFault;
use crate::scene::{ElementId, RenderTarget};
use crate::scroll::timing::progress;

/// Owned handle to a playing instance
#[derive(Debug, Clone)]
pub struct PlaybackToken {
    id: u64,
    cancelled: Rc<Cell<bool>>,
}

impl PlaybackToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop the instance. No further writes happen.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Debug)]
enum Clock {
    /// Time driven; per-target progress never decreases
    Timed {
        started: Duration,
        progress: Vec<Option<f64>>,
    },
    /// Position driven; progress set from outside
    Scrubbed { progress: f64, dirty: bool },
}

#[derive(Debug)]
struct Instance {
    id: u64,
    spec: Rc<AnimationSpec>,
    targets: Vec<ElementId>,
    clock: Clock,
    cancelled: Rc<Cell<bool>>,
    finished: bool,
}

impl Instance {
    fn is_live(&self) -> bool {
        !self.finished && !self.cancelled.get()
    }

    /// Write this frame's values. Returns the number of writes.
    fn step(&mut self, now: Duration, target: &mut dyn RenderTarget) -> Result<usize, FrameFault> {
        let mut writes = 0;
        match &mut self.clock {
            Clock::Timed { started, progress: last } => {
                let mut all_done = true;
                for (n, &element) in self.targets.iter().enumerate() {
                    let start = *started + self.spec.start_offset(n);
                    if now < start {
                        all_done = false;
                        continue;
                    }
                    let t = progress(start, now, self.spec.duration);
                    match last[n] {
                        Some(previous) if t <= previous => {
                            all_done &= previous >= 1.0;
                            continue;
                        }
                        _ => {}
                    }
                    for (property, value) in self.spec.values_at(t) {
                        target.write(element, property, value)?;
                        writes += 1;
                    }
                    last[n] = Some(t);
                    all_done &= t >= 1.0;
                }
                self.finished = all_done;
            }
            Clock::Scrubbed { progress, dirty } => {
                if std::mem::take(dirty) {
                    for &element in &self.targets {
                        for (property, value) in self.spec.values_at(*progress) {
                            target.write(element, property, value)?;
                            writes += 1;
                        }
                    }
                }
            }
        }
        Ok(writes)
    }
}

/// Per-advance summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackStats {
    pub writes: usize,
    pub finished: usize,
    pub detached: usize,
}

#[derive(Debug, Default)]
pub struct Player {
    instances: Vec<Instance>,
    next_id: u64,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&mut self, spec: Rc<AnimationSpec>, targets: Vec<ElementId>, clock: Clock) -> PlaybackToken {
        self.next_id += 1;
        let cancelled = Rc::new(Cell::new(false));
        self.instances.push(Instance {
            id: self.next_id,
            spec,
            targets,
            clock,
            cancelled: cancelled.clone(),
            finished: false,
        });
        PlaybackToken {
            id: self.next_id,
            cancelled,
        }
    }

    /// Start a timed instance at `now`. Target n starts after `delay + n * stagger`.
    pub fn play(&mut self, spec: Rc<AnimationSpec>, targets: Vec<ElementId>, now: Duration) -> PlaybackToken {
        let progress = vec![None; targets.len()];
        self.start(
            spec,
            targets,
            Clock::Timed {
                started: now,
                progress,
            },
        )
    }

    /// Start a position-driven instance at progress 0
    pub fn scrub(&mut self, spec: Rc<AnimationSpec>, targets: Vec<ElementId>) -> PlaybackToken {
        self.start(
            spec,
            targets,
            Clock::Scrubbed {
                progress: 0.0,
                dirty: true,
            },
        )
    }

    /// Move a scrubbed instance. Returns false for unknown or timed instances.
    pub fn seek(&mut self, token: &PlaybackToken, value: f64) -> bool {
        let value = value.clamp(0.0, 1.0);
        let Some(instance) = self
            .instances
            .iter_mut()
            .find(|i| i.id == token.id && i.is_live())
        else {
            return false;
        };
        match &mut instance.clock {
            Clock::Scrubbed { progress, dirty } => {
                if *progress != value {
                    *progress = value;
                    *dirty = true;
                }
                true
            }
            Clock::Timed { .. } => false,
        }
    }

    /// Check if the token's instance is still playing or scrubbing
    pub fn is_active(&self, token: &PlaybackToken) -> bool {
        self.instances
            .iter()
            .any(|i| i.id == token.id && i.is_live())
    }

    /// Live instances of either kind
    pub fn active_count(&self) -> usize {
        self.instances.iter().filter(|i| i.is_live()).count()
    }

    /// True while any timed instance still needs frames
    pub fn is_playing(&self) -> bool {
        self.instances
            .iter()
            .any(|i| i.is_live() && matches!(i.clock, Clock::Timed { .. }))
    }

    /// Cancel every instance
    pub fn cancel_all(&mut self) {
        for instance in self.instances.drain(..) {
            instance.cancelled.set(true);
        }
    }

    /// Advance all instances to `now` and write their values
    pub fn advance(&mut self, now: Duration, target: &mut dyn RenderTarget) -> PlaybackStats {
        let mut stats = PlaybackStats::default();
        self.instances.retain(Instance::is_live);

        for instance in &mut self.instances {
            match instance.step(now, target) {
                Ok(writes) => {
                    stats.writes += writes;
                    if instance.finished {
                        stats.finished += 1;
                    }
                }
                Err(fault) => {
                    debug!(instance = instance.id, %fault, "Cancelling animation");
                    instance.cancelled.set(true);
                    stats.detached += 1;
                }
            }
        }

        self.instances.retain(Instance::is_live);
        stats
    }
}
