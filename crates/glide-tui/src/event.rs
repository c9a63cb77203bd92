use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    frame_interval: Duration,
}

impl EventHandler {
    /// Poll at `fps` while animating, at the tick rate otherwise
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            frame_interval: Duration::from_millis(1000 / u64::from(fps.max(1))),
        }
    }

    /// Poll timeout for the next iteration
    pub fn timeout(&self, animating: bool) -> Duration {
        if animating {
            self.frame_interval
        } else {
            self.tick_rate
        }
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        if event::poll(self.timeout(animating))? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(MouseEvent { kind, .. }) => match kind {
            MouseEventKind::ScrollDown => Some(AppEvent::Wheel(1)),
            MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-1)),
            _ => None,
        },
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel notches, positive = down
    Wheel(i16),
    /// Terminal was resized
    Resize(u16, u16),
    /// Nothing arrived before the poll timeout
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_timeout_switches_with_animation() {
        let handler = EventHandler::with_animation_fps(250, 60);
        assert_eq!(handler.timeout(false), Duration::from_millis(250));
        assert_eq!(handler.timeout(true), Duration::from_millis(16));
    }

    #[test]
    fn test_translate_wheel_and_release() {
        let wheel = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(matches!(translate(wheel), Some(AppEvent::Wheel(1))));

        let mut release = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(translate(Event::Key(release)).is_none());
    }
}
