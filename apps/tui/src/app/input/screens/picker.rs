use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_picker_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.picker = None;
            return;
        }
        KeyCode::Enter => {
            app.accept_picker();
            return;
        }
        _ => {}
    }

    let matches = app
        .picker
        .as_ref()
        .map_or(0, |picker| picker.matches(&app.pages).len());
    let Some(picker) = app.picker.as_mut() else {
        return;
    };
    match key {
        KeyCode::Up | KeyCode::BackTab => picker.step(false, matches),
        KeyCode::Down | KeyCode::Tab => picker.step(true, matches),
        KeyCode::Backspace => picker.pop(),
        KeyCode::Char(ch) => picker.push(ch),
        _ => {}
    }
}
