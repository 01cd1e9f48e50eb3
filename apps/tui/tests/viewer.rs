use chartkit::reveal::RevealPhase;
use chartkit::{HitKey, UiEvent};
use crossterm::event::KeyCode;
use data_modules_tui::app::handle_input;
use data_modules_tui::{pages, App, AppConfig};
use ratatui::layout::Rect;

fn app_on(slug: &str) -> App {
    let config = AppConfig {
        page: Some(slug.to_string()),
        ..AppConfig::default()
    };
    let mut app = App::new(pages::load_bundle().unwrap(), &config).unwrap();
    app.set_viewport(Rect::new(0, 0, 100, 20));
    app.update_reveals();
    app
}

#[test]
fn only_sections_in_view_reveal() {
    let app = app_on("rice-seasons");
    assert!(app.sections[0].reveal.is_revealed());
    let last = app.sections.last().unwrap();
    assert_eq!(last.reveal.phase(), RevealPhase::Watching);
    assert!(last.is_watching());
}

#[test]
fn nothing_reveals_before_the_terminal_is_measured() {
    let config = AppConfig {
        page: Some("rice-seasons".to_string()),
        ..AppConfig::default()
    };
    let mut app = App::new(pages::load_bundle().unwrap(), &config).unwrap();
    assert!(!app.viewport_measured());
    app.update_reveals();
    assert!(app.sections.iter().all(|view| view.is_watching()));

    app.set_viewport(Rect::new(0, 0, 100, 4));
    app.update_reveals();
    assert!(app.sections[0].reveal.is_revealed());
    assert!(app.sections[1..].iter().all(|view| !view.reveal.is_revealed()));
}

#[test]
fn scrolling_reveals_once_and_disconnects() {
    let mut app = app_on("rice-seasons");
    app.scroll_to(u16::MAX);
    let last = app.sections.len() - 1;
    assert!(app.sections[last].reveal.is_revealed());
    assert!(!app.sections[last].is_watching());

    // Scrolling back out never hides it again.
    app.scroll_to(0);
    assert!(app.sections[last].reveal.is_revealed());
}

#[test]
fn opening_another_page_starts_fresh() {
    let mut app = app_on("rice-seasons");
    app.scroll_to(u16::MAX);
    app.open_page(1);
    assert_eq!(app.page().slug, "coastal-tourism");
    assert_eq!(app.scroll, 0);
    assert!(app.sections.iter().skip(2).all(|view| !view.reveal.is_revealed()));
}

#[test]
fn tab_walks_regions_and_enter_pins() {
    let mut app = app_on("rice-seasons");
    assert_eq!(app.focused, 1);

    handle_input(&mut app, KeyCode::Tab);
    let view = &app.sections[app.focused];
    assert_eq!(view.cursor, Some(0));
    assert!(view.ui.is_selected(&HitKey::year(2005)));
    assert!(!view.ui.is_pinned());

    handle_input(&mut app, KeyCode::BackTab);
    handle_input(&mut app, KeyCode::Enter);
    let view = &app.sections[app.focused];
    assert!(view.ui.is_pinned());
    assert!(view.ui.is_selected(&HitKey::year(2025)));

    handle_input(&mut app, KeyCode::Esc);
    assert!(app.running);
    assert_eq!(app.sections[app.focused].ui.selection, None);
}

#[test]
fn arrows_step_the_active_index_within_bounds() {
    let mut app = app_on("rice-seasons");
    handle_input(&mut app, KeyCode::Left);
    assert_eq!(app.sections[app.focused].ui.active_index, 0);
    for _ in 0..40 {
        handle_input(&mut app, KeyCode::Right);
    }
    assert_eq!(app.sections[app.focused].ui.active_index, 20);
}

#[test]
fn filter_cycles_back_to_everything() {
    let mut app = app_on("rice-seasons");
    let filters = app.focused_chart().unwrap().filters();
    for expected in &filters {
        handle_input(&mut app, KeyCode::Char('f'));
        assert_eq!(app.sections[app.focused].ui.filter.as_ref(), Some(expected));
    }
    handle_input(&mut app, KeyCode::Char('f'));
    assert_eq!(app.sections[app.focused].ui.filter, None);
}

#[test]
fn focus_moves_between_charts_and_scrolls() {
    let mut app = app_on("rice-seasons");
    handle_input(&mut app, KeyCode::Char('n'));
    assert_eq!(app.focused, 2);
    assert!(app.sections[2].reveal.is_revealed());
    handle_input(&mut app, KeyCode::Char('p'));
    assert_eq!(app.focused, 1);
}

#[test]
fn picker_opens_the_chosen_page() {
    let mut app = app_on("rice-seasons");
    handle_input(&mut app, KeyCode::Char('/'));
    assert!(app.picker.is_some());
    for ch in "temple".chars() {
        handle_input(&mut app, KeyCode::Char(ch));
    }
    handle_input(&mut app, KeyCode::Enter);
    assert!(app.picker.is_none());
    assert_eq!(app.page().slug, "temple-architecture");
}

#[test]
fn q_quits_but_not_inside_the_picker() {
    let mut app = app_on("rice-seasons");
    handle_input(&mut app, KeyCode::Char('/'));
    handle_input(&mut app, KeyCode::Char('q'));
    assert!(app.running);
    handle_input(&mut app, KeyCode::Esc);
    handle_input(&mut app, KeyCode::Char('q'));
    assert!(!app.running);
}

#[test]
fn chart_events_without_a_chart_are_ignored() {
    let mut app = app_on("temple-architecture");
    app.focused = 0;
    app.chart_event(UiEvent::Step(1));
    assert_eq!(app.sections[0].ui.active_index, 0);
}
