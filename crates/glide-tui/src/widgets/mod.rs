mod header;
mod page_view;
mod popup;
mod status_bar;

pub use header::HeaderWidget;
pub use page_view::PageWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Mode};

/// Header, page and status bar, with the help overlay on top
pub fn draw(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    HeaderWidget::render(frame, layout[0], app);
    PageWidget::render(frame, layout[1], app);
    StatusBarWidget::render(frame, layout[2], app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.theme);
    }
}
