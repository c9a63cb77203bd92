use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Block,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::page::{wrap, NodeKind};
use crate::theme::Theme;

/// Elements fainter than this are not drawn
const MIN_OPACITY: f64 = 0.05;
/// Backdrop star count
const STARS: usize = 48;

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let scene = app.page.scene();
        let scroll = app.scroll_position();
        let mut canvas = Canvas {
            buf: frame.buffer_mut(),
            area,
        };

        for node in app.page.nodes() {
            let Some(element) = scene.element(node.id).filter(|e| e.is_attached()) else {
                continue;
            };
            let opacity = scene.world_opacity(node.id);
            if opacity < MIN_OPACITY {
                continue;
            }
            let (dx, dy) = scene.world_offset(node.id);
            let bounds = element.bounds;
            let rect = Placed {
                x: (bounds.x + dx).round() as i32 + i32::from(area.x),
                y: (bounds.y + dy - scroll).round() as i32 + i32::from(area.y),
                width: bounds.width.round() as i32,
                height: bounds.height.round() as i32,
            };
            if !canvas.overlaps(&rect) {
                continue;
            }
            let paint = Paint { theme, opacity };

            match &node.kind {
                NodeKind::Section => {}
                NodeKind::Backdrop => draw_backdrop(&mut canvas, &rect, element.style.scale, &paint),
                NodeKind::Title(text) => {
                    let style = paint.fg(theme.fg1).add_modifier(Modifier::BOLD);
                    for (row, line) in wrap(text, rect.width as usize).iter().enumerate() {
                        canvas.put_centered(&rect, rect.y + row as i32, line, style);
                    }
                }
                NodeKind::Heading(text) => {
                    let style = paint.fg(theme.yellow).add_modifier(Modifier::BOLD);
                    for (row, line) in wrap(text, rect.width as usize).iter().enumerate() {
                        canvas.put(rect.x, rect.y + row as i32, line, style);
                    }
                }
                NodeKind::Text(text) => {
                    for (row, line) in wrap(text, rect.width as usize).iter().enumerate() {
                        canvas.put(rect.x, rect.y + row as i32, line, paint.fg(theme.fg0));
                    }
                }
                NodeKind::Card { title, body } => {
                    canvas.frame(&rect, paint.fg(theme.border));
                    let inner = (rect.width - 4).max(1) as usize;
                    canvas.put(
                        rect.x + 2,
                        rect.y + 1,
                        &truncate(title, inner),
                        paint.fg(theme.fg1).add_modifier(Modifier::BOLD),
                    );
                    let rows = (rect.height - 3).max(0) as usize;
                    for (row, line) in wrap(body, inner).iter().take(rows).enumerate() {
                        canvas.put(rect.x + 2, rect.y + 2 + row as i32, line, paint.fg(theme.grey1));
                    }
                }
                NodeKind::Stat { value, label } => {
                    canvas.frame(&rect, paint.fg(theme.border));
                    canvas.put_centered(&rect, rect.y + 1, value, paint.fg(theme.yellow).add_modifier(Modifier::BOLD));
                    canvas.put_centered(&rect, rect.y + 2, label, paint.fg(theme.grey1));
                }
                NodeKind::Gauge { label, value } => {
                    let percent = format!("{}%", value);
                    canvas.put(rect.x, rect.y, label, paint.fg(theme.grey1));
                    canvas.put(
                        rect.x + rect.width - percent.width() as i32,
                        rect.y,
                        &percent,
                        paint.fg(theme.fg1).add_modifier(Modifier::BOLD),
                    );
                    let filled = (f64::from(rect.width) * value / 100.0 * element.style.scale.clamp(0.0, 1.0))
                        .round() as usize;
                    let bar: String = (0..rect.width.max(0) as usize)
                        .map(|i| if i < filled { '█' } else { '░' })
                        .collect();
                    canvas.put(rect.x, rect.y + 1, &bar[..], paint.fg(theme.green));
                }
                NodeKind::Footer(text) => {
                    let rule = "─".repeat(rect.width.max(0) as usize);
                    canvas.put(rect.x, rect.y, &rule, paint.fg(theme.border));
                    canvas.put_centered(&rect, rect.y + 1, text, paint.fg(theme.grey1));
                }
            }
        }
    }
}

/// Element box in screen cells, may lie partly off screen
struct Placed {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

struct Paint<'a> {
    theme: &'a Theme,
    opacity: f64,
}

impl Paint<'_> {
    fn fg(&self, color: Color) -> Style {
        Style::default().fg(self.theme.fade(color, self.opacity))
    }
}

/// Buffer writer that clips to an area
struct Canvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl Canvas<'_> {
    fn overlaps(&self, rect: &Placed) -> bool {
        rect.x < i32::from(self.area.right())
            && rect.x + rect.width > i32::from(self.area.left())
            && rect.y < i32::from(self.area.bottom())
            && rect.y + rect.height > i32::from(self.area.top())
    }

    fn put(&mut self, x: i32, y: i32, text: &str, style: Style) {
        if y < i32::from(self.area.top()) || y >= i32::from(self.area.bottom()) {
            return;
        }
        let mut col = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if col + width > i32::from(self.area.right()) {
                break;
            }
            if col >= i32::from(self.area.left()) {
                if let Some(cell) = self.buf.cell_mut((col as u16, y as u16)) {
                    cell.set_char(ch).set_style(style);
                }
            }
            col += width;
        }
    }

    fn put_centered(&mut self, rect: &Placed, y: i32, text: &str, style: Style) {
        let x = rect.x + (rect.width - text.width() as i32).max(0) / 2;
        self.put(x, y, text, style);
    }

    /// Rounded border around `rect`
    fn frame(&mut self, rect: &Placed, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let span = "─".repeat((rect.width - 2) as usize);
        self.put(rect.x, rect.y, &format!("╭{}╮", span), style);
        for row in 1..rect.height - 1 {
            self.put(rect.x, rect.y + row, "│", style);
            self.put(rect.x + rect.width - 1, rect.y + row, "│", style);
        }
        self.put(rect.x, rect.y + rect.height - 1, &format!("╰{}╯", span), style);
    }
}

/// Star field zoomed around the hero center by `scale`
fn draw_backdrop(canvas: &mut Canvas, rect: &Placed, scale: f64, paint: &Paint) {
    let cx = f64::from(rect.x) + f64::from(rect.width) / 2.0;
    let cy = f64::from(rect.y) + f64::from(rect.height) / 2.0;
    for i in 0..STARS {
        let px = f64::from(rect.x) + ((i * 37) % 101) as f64 / 101.0 * f64::from(rect.width);
        let py = f64::from(rect.y) + ((i * 53) % 97) as f64 / 97.0 * f64::from(rect.height);
        let x = (cx + (px - cx) * scale).round() as i32;
        let y = (cy + (py - cy) * scale).round() as i32;
        let (glyph, color) = if i % 5 == 0 {
            ("✦", paint.theme.aqua)
        } else {
            ("·", paint.theme.grey0)
        };
        if x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height {
            canvas.put(x, y, glyph, paint.fg(color));
        }
    }
}

/// Truncate to a display width with ellipsis
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if out.width() + ch.width().unwrap_or(0) + 1 > max_width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Variant;
    use glide_core::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| PageWidget::render(frame, frame.area(), app))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        (0..buf.area.height).any(|y| {
            let row: String = (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect();
            row.contains(needle)
        })
    }

    #[test]
    fn test_title_hidden_until_intro_plays() {
        let mut app = App::new(AppConfig::default(), Variant::SmartHome, 100, 26);
        app.frame(Duration::ZERO);
        assert!(!contains(&render(&app, 100, 24), "Smart Automation"));

        app.frame(Duration::from_secs(3));
        assert!(contains(&render(&app, 100, 24), "Transform Your Home with Smart Automation"));
    }

    #[test]
    fn test_pinned_track_slides_cards_into_view() {
        let mut app = App::new(AppConfig::default(), Variant::SmartHome, 80, 26);
        let top = app.page.showcase_top();
        app.coordinator.scroll_to(top, true);
        app.frame(Duration::ZERO);
        let start = render(&app, 80, 24);
        assert!(contains(&start, "Aurora Control Hub"));
        assert!(!contains(&start, "Pulse Energy Canvas"));

        app.coordinator.scroll_to(top + app.page.pin_range(), true);
        app.frame(Duration::from_millis(16));
        let end = render(&app, 80, 24);
        assert!(contains(&end, "Pulse Energy Canvas"));
        // pinned heading stays on the first row
        assert!(contains(&end, "Intelligent systems built in-house"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Aurora", 10), "Aurora");
        assert_eq!(truncate("Aurora Control Hub", 8), "Aurora …");
    }
}
