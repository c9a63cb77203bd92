use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use glide_core::scroll::ScrollCapture;
use glide_core::AppConfig;
use glide_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets, App, TerminalHost, Variant,
};

pub fn run(config: AppConfig, variant: Variant) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Glide"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, config, variant);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    variant: Variant,
) -> Result<()> {
    let (width, height) = terminal::size()?;

    // Mouse capture is released when this guard drops, even on error
    let mut capture = ScrollCapture::acquire(TerminalHost::stdout(width, height))?;

    let events = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.scroll.frame_rate);
    let mut app = App::new(config, variant, width, height);
    let start = Instant::now();
    info!(variant = variant.name(), width, height, "Preview started");

    loop {
        app.frame(start.elapsed());
        terminal.draw(|frame| widgets::draw(frame, &app))?;

        let Some(event) = events.next(app.needs_frame())? else {
            continue;
        };
        match event {
            AppEvent::Key(key) => {
                let action = handle_key_event(key, &app);
                if !app.apply(action, start.elapsed())? {
                    break;
                }
            }
            AppEvent::Wheel(notches) => app.wheel(notches),
            AppEvent::Resize(w, h) => {
                capture.host_mut().resize(w, h);
                app.resize(w, h);
            }
            AppEvent::Tick => {}
        }
    }

    app.teardown();
    capture.release();
    info!("Preview closed");
    Ok(())
}
