use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

const HELP: [(&str, &str); 13] = [
    ("↑/↓ j/k", "Scroll"),
    ("PgUp/PgDn", "Scroll a screen"),
    ("Home/End", "Top / bottom of the page"),
    ("n / p", "Next / previous chart"),
    ("Tab / Shift+Tab", "Walk chart targets"),
    ("Enter", "Pin or unpin the target"),
    ("← / →", "Step the active year or item"),
    ("f", "Cycle the chart filter"),
    ("Esc", "Clear selection, then quit"),
    ("/", "Find a page"),
    ("Space", "Pause or resume animation"),
    ("F1 / ?", "Toggle this help"),
    ("q", "Quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(60, 70, area);
    let lines: Vec<TextLine<'_>> = HELP
        .iter()
        .map(|(keys, action)| {
            TextLine::from(vec![
                Span::styled(
                    format!("{keys:<16}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Keys ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false }),
        popup,
    );
}

pub fn render_picker_popup(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(picker) = app.picker.as_ref() else {
        return;
    };
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Open page ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::raw(picker.query.as_str()),
        ])),
        rows[0],
    );

    let items: Vec<ListItem<'_>> = picker
        .matches(&app.pages)
        .into_iter()
        .filter_map(|index| app.pages.get(index))
        .map(|page| {
            ListItem::new(TextLine::from(vec![
                Span::raw(page.title.as_str()),
                Span::styled(
                    format!("  {}", page.slug),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let empty = items.is_empty();
    let mut state = ListState::default().with_selected((!empty).then_some(picker.selected));
    f.render_stateful_widget(
        List::new(items).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        rows[1],
        &mut state,
    );
}
