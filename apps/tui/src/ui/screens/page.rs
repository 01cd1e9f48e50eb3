use chartkit::motion::MotionMode;
use chartkit::Section;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

use crate::app::layout::{body_rows, CHART_ROWS};
use crate::app::{App, SectionView};
use crate::ui::widgets::scene_canvas::{chart_frame, SceneCanvas};

pub fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let page = app.page();
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Cyan));
    let title = TextLine::from(vec![
        Span::styled(
            page.kicker.to_uppercase(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            page.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let position = format!("{}/{}", app.page_index + 1, app.pages.len());
    let rows = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(block.inner(area));
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(title), rows[0]);
    f.render_widget(
        Paragraph::new(position)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        rows[1],
    );
}

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let text = if app.status_message.is_empty() {
        Span::styled(
            "q quit · / pages · n/p charts · Tab targets · f filter · F1 help",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let color = if app.motion == MotionMode::Paused {
            Color::Yellow
        } else {
            Color::Green
        };
        Span::styled(app.status_message.as_str(), Style::default().fg(color))
    };
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Draws every section overlapping the viewport. Each section is drawn into
/// its own buffer at full height, then the visible rows are copied across,
/// so partly scrolled sections clip cleanly.
pub fn render_page(app: &App, f: &mut Frame<'_>, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let view_top = app.scroll;
    let view_bottom = app.scroll.saturating_add(area.height);

    for (index, span) in app.spans().into_iter().enumerate() {
        if span.bottom() <= view_top || span.top >= view_bottom {
            continue;
        }
        let (Some(section), Some(view)) = (app.page().sections.get(index), app.sections.get(index))
        else {
            continue;
        };
        // Unrevealed sections stay blank.
        if !view.reveal.is_revealed() {
            continue;
        }

        let local = Rect::new(0, 0, area.width, span.height);
        let mut scratch = Buffer::empty(local);
        let slide = view.slide_rows().min(span.height);
        let placed = Rect::new(0, slide, area.width, span.height - slide);
        render_section(section, view, index == app.focused, placed, &mut scratch);

        if let Ok(mut slot) = view.fx.lock() {
            let finished = slot.as_ref().is_some_and(tachyonfx::Effect::done);
            if finished {
                *slot = None;
            } else if let Some(effect) = slot.as_mut() {
                scratch.render_effect(effect, local, app.last_tick);
            }
        }

        copy_rows(&scratch, f.buffer_mut(), area, span.top, view_top, view_bottom);
    }
}

/// Copies the rows of `source` (a section placed at page row `top`) that
/// fall inside `[view_top, view_bottom)` onto `area`.
fn copy_rows(
    source: &Buffer,
    target: &mut Buffer,
    area: Rect,
    top: u16,
    view_top: u16,
    view_bottom: u16,
) {
    let height = source.area.height;
    for row in 0..height {
        let page_row = top.saturating_add(row);
        if page_row < view_top || page_row >= view_bottom {
            continue;
        }
        let screen_y = area.y + (page_row - view_top);
        for col in 0..area.width.min(source.area.width) {
            let (Some(cell), Some(slot)) = (
                source.cell((col, row)),
                target.cell_mut((area.x + col, screen_y)),
            ) else {
                continue;
            };
            *slot = cell.clone();
        }
    }
}

fn render_section(section: &Section, view: &SectionView, focused: bool, area: Rect, buf: &mut Buffer) {
    let border = if focused && section.chart.is_some() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", section.heading),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    block.render(area, buf);

    let body_height = body_rows(section, area.width).min(inner.height);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(body_height), Constraint::Min(0)])
        .split(inner);

    let mut lines = Vec::new();
    for (index, paragraph) in section.body.iter().enumerate() {
        if index > 0 {
            lines.push(TextLine::from(""));
        }
        lines.push(TextLine::from(paragraph.as_str()));
    }
    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .render(rows[0], buf);

    let Some(chart) = section.chart.as_ref() else {
        return;
    };
    let chart_area = Rect {
        height: rows[1].height.min(CHART_ROWS),
        ..rows[1]
    };
    let scene = chart.scene(&chart_frame(), &view.ui);
    let cursor = view
        .cursor
        .and_then(|index| scene.regions.get(index))
        .map(|region| &region.shape);
    SceneCanvas::new(&scene)
        .cursor(cursor)
        .render(chart_area, buf);
}
