use crate::app::state::App;
use crossterm::event::KeyCode;

mod help;
mod page;
mod picker;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.picker.is_some() {
        picker::handle_picker_input(app, key);
        return;
    }

    if help::handle_animation_toggle(app, key) {
        return;
    }

    page::handle_page_input(app, key);
}
