use glide_core::pinned::PinPhase;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let report = &app.last_report;
            let pin = match report.pins.first().map(|p| p.phase) {
                Some(PinPhase::Pinned) => " | PINNED",
                _ => "",
            };
            format!(
                " {} | {} | {:>3.0}% | row {:.0} | anim {}{}",
                mode_str,
                app.page.variant().name(),
                app.progress() * 100.0,
                app.scroll_position(),
                report.active_animations,
                pin
            )
        };

        let help_hint = " q:quit j/k:scroll n/p:section v:variant r:replay ?:help ";
        let padding_len = (area.width as usize).saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
