use chartkit::geom::Insets;
use chartkit::hit::HitShape;
use chartkit::scene::{Anchor, Emphasis, Role, ShapeKind, TONE_MUTED};
use chartkit::{ChartFrame, Point, Scene};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::Widget;

const CANVAS_WIDTH: f64 = 640.0;
const CANVAS_HEIGHT: f64 = 360.0;
/// Segments per curve when flattening arcs and cubics.
const CURVE_STEPS: usize = 12;

/// Logical frame every terminal chart is laid out in; the canvas scales it
/// to whatever cells are available.
pub const fn chart_frame() -> ChartFrame {
    ChartFrame::new(CANVAS_WIDTH, CANVAS_HEIGHT).with_insets(Insets::new(28.0, 110.0, 40.0, 56.0))
}

/// `#rrggbb` author colors become true-color cells; chrome and anything
/// unparseable falls back to grey.
pub fn tone_color(tone: &str) -> Color {
    if tone == TONE_MUTED {
        return Color::DarkGray;
    }
    let hex = tone.strip_prefix('#').unwrap_or(tone);
    if hex.len() != 6 {
        return Color::Gray;
    }
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

fn shade(tone: &str, emphasis: Emphasis) -> Color {
    match emphasis {
        Emphasis::Dimmed => Color::DarkGray,
        Emphasis::Normal | Emphasis::Highlighted => tone_color(tone),
    }
}

/// Scene coordinates grow downwards, canvas coordinates upwards.
fn flip(point: Point) -> (f64, f64) {
    (point.x, CANVAS_HEIGHT - point.y)
}

fn draw_polyline(ctx: &mut Context<'_>, points: &[Point], color: Color) {
    for pair in points.windows(2) {
        let (x1, y1) = flip(pair[0]);
        let (x2, y2) = flip(pair[1]);
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}

/// Hatches a rectangle with vertical strokes `step` apart.
fn fill_rect(ctx: &mut Context<'_>, x: f64, y: f64, width: f64, height: f64, step: f64, color: Color) {
    let bottom = CANVAS_HEIGHT - (y + height);
    let top = CANVAS_HEIGHT - y;
    let mut column = x;
    while column <= x + width {
        ctx.draw(&CanvasLine {
            x1: column,
            y1: bottom,
            x2: column,
            y2: top,
            color,
        });
        column += step;
    }
}

/// Draws a chart scene (marks, labels and the keyboard cursor region) on a
/// braille canvas.
pub struct SceneCanvas<'a> {
    scene: &'a Scene,
    cursor: Option<&'a HitShape>,
}

impl<'a> SceneCanvas<'a> {
    pub const fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            cursor: None,
        }
    }

    #[must_use]
    pub const fn cursor(mut self, cursor: Option<&'a HitShape>) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Widget for SceneCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        let cell_width = CANVAS_WIDTH / f64::from(area.width);
        // Braille packs two dots per cell horizontally.
        let hatch = cell_width / 2.0;
        let scene = self.scene;
        let cursor = self.cursor;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, CANVAS_WIDTH])
            .y_bounds([0.0, CANVAS_HEIGHT])
            .paint(move |ctx| {
                for shape in &scene.shapes {
                    let color = shade(&shape.tone, shape.emphasis);
                    match &shape.kind {
                        ShapeKind::Path(path) => {
                            for run in path.flatten(CURVE_STEPS) {
                                draw_polyline(ctx, &run, color);
                            }
                        }
                        ShapeKind::Rect {
                            x,
                            y,
                            width,
                            height,
                        } => {
                            if shape.role == Role::Bar {
                                fill_rect(ctx, *x, *y, *width, *height, hatch, color);
                            } else {
                                let corners = [
                                    Point::new(*x, *y),
                                    Point::new(x + width, *y),
                                    Point::new(x + width, y + height),
                                    Point::new(*x, y + height),
                                    Point::new(*x, *y),
                                ];
                                draw_polyline(ctx, &corners, color);
                            }
                        }
                        ShapeKind::Circle { center, radius } => {
                            let (x, y) = flip(*center);
                            ctx.draw(&Circle {
                                x,
                                y,
                                radius: *radius,
                                color,
                            });
                        }
                    }
                }

                if let Some(shape) = cursor {
                    for run in shape.to_path().flatten(CURVE_STEPS) {
                        draw_polyline(ctx, &run, Color::White);
                    }
                }

                ctx.layer();
                for label in &scene.labels {
                    let chars = label.text.chars().count() as f64;
                    let shift = match label.anchor {
                        Anchor::Start => 0.0,
                        Anchor::Middle => chars * cell_width / 2.0,
                        Anchor::End => chars * cell_width,
                    };
                    let (x, y) = flip(label.at);
                    let style = match label.emphasis {
                        Emphasis::Highlighted => Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                        Emphasis::Dimmed => Style::default().fg(Color::DarkGray),
                        Emphasis::Normal => Style::default().fg(Color::Gray),
                    };
                    ctx.print(
                        (x - shift).clamp(0.0, CANVAS_WIDTH),
                        y.clamp(0.0, CANVAS_HEIGHT),
                        TextLine::styled(label.text.clone(), style),
                    );
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_author_colors() {
        assert_eq!(tone_color("#16a34a"), Color::Rgb(0x16, 0xa3, 0x4a));
        assert_eq!(tone_color(TONE_MUTED), Color::DarkGray);
        assert_eq!(tone_color("#zzzzzz"), Color::Gray);
        assert_eq!(tone_color("teal"), Color::Gray);
    }

    #[test]
    fn dimmed_marks_are_grey() {
        assert_eq!(shade("#ffffff", Emphasis::Dimmed), Color::DarkGray);
        assert_eq!(shade("#ffffff", Emphasis::Highlighted), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn renders_a_bar_chart_into_a_buffer() {
        let entities = vec![chartkit::CategoricalEntity {
            id: "a".to_string(),
            name: "Alpha".to_string(),
            category: "x".to_string(),
            value: 3.0,
            attributes: std::collections::BTreeMap::new(),
            color: "#ff0000".to_string(),
        }];
        let scene = chartkit::chart::bar_chart(&entities, &chart_frame(), &chartkit::UiState::default());
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        SceneCanvas::new(&scene).render(area, &mut buf);
        let painted = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(painted > 0);
    }
}
