//! Vector paths that format as SVG `d` attributes and flatten to points
//! for raster back-ends.

use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::geom::Point;
use crate::scale::polar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
    /// Circular arc around `center`; the pen must already sit at the
    /// start angle.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Close,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn cubic_to(&mut self, control1: Point, control2: Point, to: Point) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
        self
    }

    pub fn arc_to(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> &mut Self {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Samples the path into polylines, one per sub-path. Curves and arcs
    /// are split into `steps` straight segments.
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Point>> {
        let steps = steps.max(1);
        let mut lines: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(point) => {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.push(point);
                }
                PathCommand::LineTo(point) => current.push(point),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    let from = current.last().copied().unwrap_or(to);
                    current.extend(
                        (1..=steps).map(|i| cubic_point(from, control1, control2, to, i, steps)),
                    );
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    let delta = (end_angle - start_angle) / steps as f64;
                    current.extend((1..=steps).map(|i| {
                        polar(center, radius, (i as f64).mul_add(delta, start_angle))
                    }));
                }
                PathCommand::Close => {
                    if let Some(first) = current.first().copied() {
                        current.push(first);
                    }
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

fn cubic_point(from: Point, c1: Point, c2: Point, to: Point, i: usize, steps: usize) -> Point {
    let t = i as f64 / steps as f64;
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        d.mul_add(to.x, c.mul_add(c2.x, a.mul_add(from.x, b * c1.x))),
        d.mul_add(to.y, c.mul_add(c2.y, a.mul_add(from.y, b * c1.y))),
    )
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn write_point(f: &mut fmt::Formatter<'_>, point: Point) -> fmt::Result {
    write!(f, "{},{}", format_number(point.x), format_number(point.y))
}

fn write_arc_segment(
    f: &mut fmt::Formatter<'_>,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> fmt::Result {
    let span = end_angle - start_angle;
    let large_arc = u8::from(span.abs() > PI);
    let sweep = u8::from(span > 0.0);
    let r = format_number(radius);
    write!(f, "A{r},{r} 0 {large_arc} {sweep} ")?;
    write_point(f, polar(center, radius, end_angle))
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            match *command {
                PathCommand::MoveTo(point) => {
                    f.write_str("M")?;
                    write_point(f, point)?;
                }
                PathCommand::LineTo(point) => {
                    f.write_str("L")?;
                    write_point(f, point)?;
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    f.write_str("C")?;
                    write_point(f, control1)?;
                    f.write_str(" ")?;
                    write_point(f, control2)?;
                    f.write_str(" ")?;
                    write_point(f, to)?;
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    // SVG cannot draw a full turn as one arc: split it.
                    if (end_angle - start_angle).abs() >= TAU - 1e-9 {
                        let middle = (start_angle + end_angle) / 2.0;
                        write_arc_segment(f, center, radius, start_angle, middle)?;
                        f.write_str(" ")?;
                        write_arc_segment(f, center, radius, middle, end_angle)?;
                    } else {
                        write_arc_segment(f, center, radius, start_angle, end_angle)?;
                    }
                }
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Straight segments through `points` in order.
pub fn polyline(points: &[Point]) -> Path {
    let mut path = Path::new();
    let mut iter = points.iter().copied();
    if let Some(first) = iter.next() {
        path.move_to(first);
        for point in iter {
            path.line_to(point);
        }
    }
    path
}

/// Closed Catmull-Rom spline through `points`, as cubic Béziers.
///
/// `tension` of 1.0 is the uniform spline; 0.0 collapses to straight edges.
pub fn smooth_closed(points: &[Point], tension: f64) -> Path {
    let count = points.len();
    if count < 3 {
        let mut path = polyline(points);
        if count == 2 {
            path.close();
        }
        return path;
    }

    let factor = tension / 6.0;
    let mut path = Path::new();
    path.move_to(points[0]);
    for i in 0..count {
        let p0 = points[(i + count - 1) % count];
        let p1 = points[i];
        let p2 = points[(i + 1) % count];
        let p3 = points[(i + 2) % count];
        let control1 = Point::new(
            (p2.x - p0.x).mul_add(factor, p1.x),
            (p2.y - p0.y).mul_add(factor, p1.y),
        );
        let control2 = Point::new(
            (p3.x - p1.x).mul_add(-factor, p2.x),
            (p3.y - p1.y).mul_add(-factor, p2.y),
        );
        path.cubic_to(control1, control2, p2);
    }
    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn polyline_moves_then_lines() {
        let path = polyline(&points(&[(0.0, 10.0), (20.5, 4.0), (40.0, 0.125)]));
        assert_eq!(path.to_string(), "M0,10 L20.5,4 L40,0.13");
    }

    #[test]
    fn empty_and_single_point_paths() {
        assert!(polyline(&[]).is_empty());
        assert_eq!(polyline(&points(&[(3.0, 4.0)])).to_string(), "M3,4");
        assert!(smooth_closed(&[], 1.0).is_empty());
    }

    #[test]
    fn smooth_closed_returns_to_start() {
        let square = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let path = smooth_closed(&square, 1.0);
        let commands = path.commands();
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0], PathCommand::MoveTo(square[0]));
        match commands[4] {
            PathCommand::CubicTo { to, .. } => assert_eq!(to, square[0]),
            other => panic!("expected closing curve, got {other:?}"),
        }
        assert_eq!(commands[5], PathCommand::Close);
        assert!(path.to_string().ends_with('Z'));
    }

    #[test]
    fn zero_tension_uses_straight_controls() {
        let triangle = points(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);
        let path = smooth_closed(&triangle, 0.0);
        match path.commands()[1] {
            PathCommand::CubicTo {
                control1, control2, ..
            } => {
                assert_eq!(control1, triangle[0]);
                assert_eq!(control2, triangle[1]);
            }
            other => panic!("expected curve, got {other:?}"),
        }
    }

    #[test]
    fn flatten_samples_curves_and_closes() {
        let square = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let lines = smooth_closed(&square, 1.0).flatten(4);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.len(), 1 + 4 * 4 + 1);
        assert_eq!(line.first(), line.last());
    }

    #[test]
    fn format_number_trims_and_avoids_negative_zero() {
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(12.346), "12.35");
        assert_eq!(format_number(-7.5), "-7.5");
    }
}
