use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use glide_core::pinned::PinPhase;
use glide_core::{AppConfig, FrameReport};
use glide_tui::{App, Variant};

/// Seconds of simulated time allowed for one target to settle
const SETTLE_LIMIT_SECS: u64 = 30;

pub struct SimulateArgs {
    pub variant: Variant,
    pub width: u16,
    pub height: u16,
    pub targets: Vec<f64>,
    pub fps: u32,
    pub json: bool,
}

/// Result of gliding to one target and letting everything finish
#[derive(Debug, Serialize)]
pub struct Step {
    pub target: f64,
    pub frames: u64,
    pub elapsed_ms: u64,
    /// Totals across every frame of the step
    pub fired: usize,
    pub writes: usize,
    pub finished: usize,
    /// Last frame of the step
    pub report: FrameReport,
}

pub fn run(config: AppConfig, args: &SimulateArgs) -> Result<()> {
    let mut app = App::new(config, args.variant, args.width, args.height);
    let targets = if args.targets.is_empty() {
        app.page.section_tops()
    } else {
        args.targets.clone()
    };

    let interval = Duration::from_millis(1000 / u64::from(args.fps.max(1)));
    let mut now = Duration::ZERO;
    let mut steps = Vec::with_capacity(targets.len());
    for target in targets {
        let step = settle(&mut app, target, &mut now, interval);
        if !args.json {
            print_step(&step);
        }
        steps.push(step);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
    } else {
        println!(
            "\n{} sections, {} triggers, page {} rows",
            app.mounted_sections(),
            app.coordinator.trigger_count(),
            app.page.height()
        );
    }

    app.teardown();
    Ok(())
}

/// Glide to `target` and step frames until nothing is moving
pub fn settle(app: &mut App, target: f64, now: &mut Duration, interval: Duration) -> Step {
    app.coordinator.scroll_to(target, false);
    let started = *now;
    let limit = started + Duration::from_secs(SETTLE_LIMIT_SECS);
    let mut step = Step {
        target,
        frames: 0,
        elapsed_ms: 0,
        fired: 0,
        writes: 0,
        finished: 0,
        report: FrameReport::default(),
    };

    loop {
        let report = app.frame(*now).clone();
        step.frames += 1;
        step.fired += report.fired;
        step.writes += report.writes;
        step.finished += report.finished;
        step.report = report;
        if !app.needs_frame() || *now >= limit {
            break;
        }
        *now += interval;
    }

    step.elapsed_ms = (*now - started).as_millis() as u64;
    step
}

fn print_step(step: &Step) {
    let pin = match step.report.pins.first() {
        Some(frame) if frame.phase == PinPhase::Pinned => {
            format!("  pin {:.0}%", frame.progress * 100.0)
        }
        _ => String::new(),
    };
    println!(
        "to {:>7.1}  at {:>7.1}  {:>4} frames {:>6} ms  fired {:>2}  writes {:>5}  finished {:>3}{}",
        step.target,
        step.report.scroll.smoothed_position,
        step.frames,
        step.elapsed_ms,
        step.fired,
        step.writes,
        step.finished,
        pin
    );
    for fault in &step.report.faults {
        println!("  fault: {:?}", fault);
    }
}
