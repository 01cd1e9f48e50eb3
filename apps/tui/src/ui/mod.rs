// UI module for data_modules_tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::Frame;

/// Title, scrolling content and status rows.
pub fn main_layout(area: Rect) -> [Rect; 3] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(3),    // Page content
            Constraint::Length(1), // Status / shortcuts
        ])
        .split(area.inner(Margin::new(1, 0)));
    [rows[0], rows[1], rows[2]]
}

/// The area sections scroll through for a terminal of the given size.
pub fn content_area(area: Rect) -> Rect {
    main_layout(area)[1]
}

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let [title, content, status] = main_layout(f.area());
    screens::page::render_title(app, f, title);
    screens::page::render_page(app, f, content);
    screens::page::render_status(app, f, status);

    if app.picker.is_some() {
        widgets::popup::render_picker_popup(app, f, f.area());
    }
    if app.show_help {
        widgets::popup::render_help_popup(f, f.area());
    }
}
