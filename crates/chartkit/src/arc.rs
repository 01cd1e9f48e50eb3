//! Arcs on cyclical domains such as the months of a year.

use crate::geom::Point;
use crate::path::Path;
use crate::scale::{polar, AngularScale};

/// Number of units covered from `start` to `end` inclusive, wrapping past
/// the end of the cycle when `end` comes before `start`.
pub const fn arc_span(start: usize, end: usize, units: usize) -> usize {
    if units == 0 {
        return 0;
    }
    let end = if end < start { end + units } else { end };
    end - start + 1
}

/// Builds padded arcs around a shared center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcBuilder {
    scale: AngularScale,
    center: Point,
    pad_angle: f64,
}

impl ArcBuilder {
    pub const fn new(units: usize, center: Point) -> Self {
        Self {
            scale: AngularScale::new(units),
            center,
            pad_angle: 0.0,
        }
    }

    /// Inset, in radians, applied at both ends of every arc.
    #[must_use]
    pub const fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    pub const fn scale(&self) -> AngularScale {
        self.scale
    }

    pub const fn center(&self) -> Point {
        self.center
    }

    /// Start and end angles of the arc from unit `start` to unit `end`.
    ///
    /// The padding is capped at a quarter of the sweep so short arcs never
    /// turn backwards.
    pub fn sweep(&self, start: usize, end: usize) -> (f64, f64) {
        let units = self.scale.units();
        debug_assert!(
            start < units && end < units,
            "arc {start}..{end} outside a {units}-unit cycle"
        );
        let span = arc_span(start, end, units);
        let from = self.scale.angle(start as f64);
        let to = self.scale.angle((start + span) as f64);
        let pad = self.pad_angle.clamp(0.0, (to - from) / 4.0);
        (from + pad, to - pad)
    }

    pub fn arc(&self, start: usize, end: usize, radius: f64) -> Path {
        let mut path = Path::new();
        if self.scale.units() == 0 {
            return path;
        }
        let (from, to) = self.sweep(start, end);
        path.move_to(polar(self.center, radius, from))
            .arc_to(self.center, radius, from, to);
        path
    }

    /// Annular sector covering units `start..=end`, without padding.
    pub fn wedge(&self, start: usize, end: usize, inner: f64, outer: f64) -> Path {
        if self.scale.units() == 0 {
            return Path::new();
        }
        let span = arc_span(start, end, self.scale.units());
        let from = self.scale.angle(start as f64);
        let to = self.scale.angle((start + span) as f64);
        annular_sector(self.center, inner, outer, from, to)
    }
}

pub fn annular_sector(center: Point, inner: f64, outer: f64, from: f64, to: f64) -> Path {
    let mut path = Path::new();
    path.move_to(polar(center, outer, from))
        .arc_to(center, outer, from, to);
    if inner > 0.0 {
        path.line_to(polar(center, inner, to))
            .arc_to(center, inner, to, from);
    } else {
        path.line_to(center);
    }
    path.close();
    path
}
