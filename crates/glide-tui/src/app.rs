use std::time::Duration;

use glide_core::scroll::ScrollInput;
use glide_core::{AppConfig, Coordinator, FrameReport, SectionId, Viewport};
use tracing::{debug, info};

use crate::input::Action;
use crate::page::{Page, Variant};
use crate::theme::Theme;

/// Rows taken by the header and the status bar
pub const CHROME_ROWS: u16 = 2;

/// Current UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub coordinator: Coordinator,
    pub page: Page,
    pub mode: Mode,
    pub status_message: Option<String>,
    pub last_report: FrameReport,
    /// First key of a two-key sequence (gg)
    pub pending_key: Option<char>,
    sections: Vec<SectionId>,
    size: (u16, u16),
}

impl App {
    /// Build the page for a terminal of `width` x `height` and mount it at time zero
    pub fn new(config: AppConfig, variant: Variant, width: u16, height: u16) -> Self {
        let viewport = content_viewport(width, height);
        let mut app = Self {
            theme: Theme::default(),
            coordinator: Coordinator::new(&config, viewport),
            page: Page::new(variant, &config.ui),
            config,
            mode: Mode::Normal,
            status_message: None,
            last_report: FrameReport::default(),
            pending_key: None,
            sections: Vec::new(),
            size: (width, height),
        };
        app.relayout();
        app.mount(Duration::ZERO);
        app
    }

    fn mount(&mut self, now: Duration) {
        for binding in self.page.bindings().to_vec() {
            let id = self.coordinator.mount(binding, self.page.scene_mut(), now);
            self.sections.push(id);
        }
        info!(variant = self.page.variant().name(), sections = self.sections.len(), "Page mounted");
    }

    fn unmount_all(&mut self) -> glide_core::Result<()> {
        for id in self.sections.drain(..) {
            self.coordinator.unmount(id)?;
        }
        Ok(())
    }

    fn relayout(&mut self) {
        let (width, height) = self.size;
        let viewport = content_viewport(width, height);
        self.page.layout(width, viewport.height as u16);
        self.coordinator.resize(viewport, self.page.height());
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Rows available to the page
    pub fn viewport_rows(&self) -> f64 {
        self.coordinator.viewport().height
    }

    pub fn mounted_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Terminal resized");
        self.size = (width, height);
        self.relayout();
    }

    /// Run one coordinator frame against the page
    pub fn frame(&mut self, now: Duration) -> &FrameReport {
        self.last_report = self.coordinator.frame(now, self.page.scene_mut());
        &self.last_report
    }

    pub fn needs_frame(&self) -> bool {
        self.coordinator.needs_frame()
    }

    pub fn scroll_position(&self) -> f64 {
        self.coordinator.scroll_state().smoothed_position
    }

    /// Fraction of the page scrolled, 0 to 1
    pub fn progress(&self) -> f64 {
        let limit = self.coordinator.scroller().limit();
        if limit > 0.0 {
            (self.scroll_position() / limit).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Header switches style past the configured pixel threshold
    pub fn is_header_scrolled(&self) -> bool {
        let ui = &self.config.ui;
        self.coordinator
            .is_scrolled(ui.header_threshold_px / ui.cell_height_px)
    }

    /// Mouse wheel notches, positive = down
    pub fn wheel(&mut self, notches: i16) {
        let delta = f64::from(notches) * self.config.ui.wheel_rows;
        self.coordinator.input(ScrollInput::Wheel { delta });
    }

    /// Unmount every section and mount the page again from the top
    pub fn remount(&mut self, now: Duration) -> glide_core::Result<()> {
        self.unmount_all()?;
        self.page.scene_mut().reset_styles();
        self.coordinator.scroll_to(0.0, true);
        self.mount(now);
        self.status_message = Some(format!("Remounted {} sections", self.sections.len()));
        Ok(())
    }

    /// Swap to the other landing page
    pub fn switch_variant(&mut self, now: Duration) -> glide_core::Result<()> {
        self.unmount_all()?;
        self.page = Page::new(self.page.variant().toggled(), &self.config.ui);
        self.relayout();
        self.coordinator.scroll_to(0.0, true);
        self.mount(now);
        self.status_message = Some(format!("Showing {}", self.page.variant().name()));
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.sections.clear();
        self.coordinator.teardown();
    }

    fn next_section_top(&self, forward: bool) -> Option<f64> {
        let current = self.coordinator.scroll_state().raw_position;
        let tops = self.page.section_tops();
        if forward {
            tops.into_iter().find(|&top| top > current + 0.5)
        } else {
            tops.into_iter().rev().find(|&top| top < current - 0.5)
        }
    }

    /// Apply an input action. Returns false when the app should quit.
    pub fn apply(&mut self, action: Action, now: Duration) -> glide_core::Result<bool> {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if !matches!(action, Action::None | Action::PendingG) {
            self.status_message = None;
        }

        let rows = self.viewport_rows();
        let step = self.config.ui.wheel_rows;
        match action {
            Action::Quit => return Ok(false),
            Action::ScrollDown => self.coordinator.scroll_by(step),
            Action::ScrollUp => self.coordinator.scroll_by(-step),
            Action::HalfPageDown => self.coordinator.scroll_by(rows / 2.0),
            Action::HalfPageUp => self.coordinator.scroll_by(-rows / 2.0),
            Action::PageDown => self.coordinator.scroll_by(rows),
            Action::PageUp => self.coordinator.scroll_by(-rows),
            Action::NextSection | Action::PrevSection => {
                if let Some(top) = self.next_section_top(action == Action::NextSection) {
                    self.coordinator.scroll_to(top, false);
                }
            }
            Action::JumpToTop => self.coordinator.scroll_to(0.0, false),
            Action::JumpToBottom => self.coordinator.scroll_to(self.page.height(), false),
            Action::PendingG => self.pending_key = Some('g'),
            Action::Remount => self.remount(now)?,
            Action::ToggleVariant => self.switch_variant(now)?,
            Action::Help => self.mode = Mode::Help,
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
        Ok(true)
    }
}

/// Page viewport inside the header and status bar
pub fn content_viewport(width: u16, height: u16) -> Viewport {
    Viewport::new(f64::from(width), f64::from(height.saturating_sub(CHROME_ROWS).max(1)))
}
