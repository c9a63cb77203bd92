//! Terminal viewport host
//!
//! The terminal scrolls natively through its own scrollback. While captured,
//! mouse reporting is on and wheel events reach the smooth-scroll engine
//! instead.

use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use glide_core::scroll::ViewportHost;
use glide_core::Viewport;
use tracing::warn;

use crate::app::content_viewport;

pub struct TerminalHost<W: Write> {
    out: W,
    size: (u16, u16),
    captured: bool,
}

impl TerminalHost<io::Stdout> {
    pub fn stdout(width: u16, height: u16) -> Self {
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            size: (width, height),
            captured: false,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

impl<W: Write> ViewportHost for TerminalHost<W> {
    fn viewport(&self) -> Viewport {
        content_viewport(self.size.0, self.size.1)
    }

    fn capture_scroll(&mut self) -> glide_core::Result<()> {
        execute!(self.out, EnableMouseCapture)?;
        self.captured = true;
        Ok(())
    }

    fn release_scroll(&mut self) {
        if let Err(e) = execute!(self.out, DisableMouseCapture) {
            warn!("Failed to disable mouse capture: {}", e);
        }
        self.captured = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::scroll::ScrollCapture;

    #[test]
    fn test_capture_guard_toggles_mouse_reporting() {
        let mut host = TerminalHost::new(Vec::new(), 80, 24);
        {
            let capture = ScrollCapture::acquire(&mut host).unwrap();
            assert!(capture.host().is_captured());
            assert_eq!(capture.viewport(), Viewport::new(80.0, 22.0));
        }
        assert!(!host.is_captured());
        // enable and disable escape sequences were both written
        let written = String::from_utf8_lossy(&host.out).to_string();
        assert!(written.contains("\x1b[?1000h"));
        assert!(written.contains("\x1b[?1000l"));
    }
}
