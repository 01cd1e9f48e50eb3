use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::app::{handle_input, App};
use crate::ui;

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 33;

    loop {
        let size = terminal.size()?;
        app.set_viewport(ui::content_area(Rect::new(0, 0, size.width, size.height)));
        app.update_reveals();
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT))? {
            continue;
        }
        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                handle_input(app, key.code);
                if !app.running {
                    break;
                }
            }
            Ok(Event::Resize(width, height)) => {
                // Re-measure so sections uncovered by the resize can reveal
                app.set_viewport(ui::content_area(Rect::new(0, 0, width, height)));
                app.update_reveals();
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
        }
    }
    Ok(())
}
