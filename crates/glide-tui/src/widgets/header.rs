use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let scrolled = app.is_header_scrolled();
        let bg = if scrolled { theme.header_scrolled } else { theme.bg1 };

        let brand = format!(" {} ", app.page.brand());
        let nav = format!("{} ", app.page.nav().join("  "));
        let brand_style = if scrolled {
            Style::default().fg(theme.accent).bg(bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg1).bg(bg)
        };

        let padding_len = (area.width as usize).saturating_sub(brand.width() + nav.width());
        let line = Line::from(vec![
            Span::styled(brand, brand_style),
            Span::styled(" ".repeat(padding_len), Style::default().bg(bg)),
            Span::styled(nav, Style::default().fg(theme.grey1).bg(bg)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
