use chartkit::UiEvent;
use crossterm::event::KeyCode;

use crate::app::state::App;

pub fn handle_page_input(app: &mut App, key: KeyCode) {
    let page_rows = i32::from(app.viewport.height.saturating_sub(2).max(1));
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc => {
            let has_selection = app
                .sections
                .get(app.focused)
                .is_some_and(|view| view.ui.selection.is_some());
            if has_selection {
                app.chart_event(UiEvent::Clear);
                if let Some(view) = app.sections.get_mut(app.focused) {
                    view.cursor = None;
                }
            } else {
                app.running = false;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::PageDown => app.scroll_by(page_rows),
        KeyCode::PageUp => app.scroll_by(-page_rows),
        KeyCode::Home => app.scroll_to(0),
        KeyCode::End => app.scroll_to(u16::MAX),
        KeyCode::Char('n') => app.focus_chart(true),
        KeyCode::Char('p') => app.focus_chart(false),
        KeyCode::Tab => app.cycle_region(true),
        KeyCode::BackTab => app.cycle_region(false),
        KeyCode::Enter => app.pin_cursor(),
        KeyCode::Left => app.chart_event(UiEvent::Step(-1)),
        KeyCode::Right => app.chart_event(UiEvent::Step(1)),
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('/') => app.open_picker(),
        _ => {}
    }
}
