//! Domain to pixel mappings.

use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::debug;

use crate::geom::Point;

/// Affine map from a numeric domain onto a padded pixel range.
///
/// The range may run backwards (SVG y axes grow downwards), and padding is
/// always applied inwards from each end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_end: f64,
    pad_before: f64,
    pad_after: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_start: f64, range_end: f64) -> Self {
        debug_assert!(
            domain_min <= domain_max,
            "domain minimum {domain_min} exceeds maximum {domain_max}"
        );
        Self {
            domain_min,
            domain_max,
            range_start,
            range_end,
            pad_before: 0.0,
            pad_after: 0.0,
        }
    }

    #[must_use]
    pub const fn with_padding(mut self, before: f64, after: f64) -> Self {
        self.pad_before = before;
        self.pad_after = after;
        self
    }

    pub const fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Range endpoints after padding, in range order.
    pub fn range(&self) -> (f64, f64) {
        let direction = if self.range_end < self.range_start {
            -1.0
        } else {
            1.0
        };
        (
            self.pad_before.mul_add(direction, self.range_start),
            (-self.pad_after).mul_add(direction, self.range_end),
        )
    }

    /// True when the domain has no usable width: a single value, inverted
    /// bounds, or non-finite bounds.
    pub fn is_degenerate(&self) -> bool {
        !(self.domain_min.is_finite() && self.domain_max.is_finite())
            || self.domain_max <= self.domain_min
    }

    pub fn midpoint(&self) -> f64 {
        let (start, end) = self.range();
        (start + end) / 2.0
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (start, end) = self.range();
        if self.is_degenerate() {
            debug!(
                min = self.domain_min,
                max = self.domain_max,
                "degenerate domain, mapping to range midpoint"
            );
            return self.midpoint();
        }
        if value == self.domain_min {
            return start;
        }
        if value == self.domain_max {
            return end;
        }

        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        let mapped = t.mul_add(end - start, start);
        if (0.0..=1.0).contains(&t) {
            mapped.clamp(start.min(end), start.max(end))
        } else {
            mapped
        }
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (start, end) = self.range();
        if self.is_degenerate() || start == end {
            return self.domain_min;
        }
        let t = (pixel - start) / (end - start);
        t.mul_add(self.domain_max - self.domain_min, self.domain_min)
    }

    /// Evenly spaced domain values, both bounds included.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 || self.is_degenerate() {
            return vec![self.domain_min];
        }
        let step = (self.domain_max - self.domain_min) / (count - 1) as f64;
        (0..count)
            .map(|i| {
                if i == count - 1 {
                    self.domain_max
                } else {
                    (i as f64).mul_add(step, self.domain_min)
                }
            })
            .collect()
    }
}

/// Splits a pixel range into `count` equal bands for categorical axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    end: f64,
    inner_padding: f64,
}

impl BandScale {
    /// `inner_padding` is the fraction of each step left empty, split
    /// evenly on both sides of the band.
    pub fn new(count: usize, start: f64, end: f64, inner_padding: f64) -> Self {
        Self {
            count,
            start,
            end,
            inner_padding: inner_padding.clamp(0.0, 0.95),
        }
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.end - self.start) / self.count as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.inner_padding)
    }

    /// Start and width of band `index`.
    pub fn band(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.count {
            return None;
        }
        let step = self.step();
        let offset = step * self.inner_padding / 2.0;
        Some(((index as f64).mul_add(step, self.start) + offset, self.bandwidth()))
    }

    pub fn center(&self, index: usize) -> Option<f64> {
        self.band(index).map(|(start, width)| start + width / 2.0)
    }

    /// Full step occupied by `index`, padding included.
    pub fn slot(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.count {
            return None;
        }
        let step = self.step();
        Some(((index as f64).mul_add(step, self.start), step))
    }
}

/// Maps the units of a cyclical domain onto a full turn, starting at
/// twelve o'clock and running clockwise in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularScale {
    units: usize,
    origin: f64,
}

impl AngularScale {
    pub const fn new(units: usize) -> Self {
        Self {
            units,
            origin: -FRAC_PI_2,
        }
    }

    pub const fn units(&self) -> usize {
        self.units
    }

    pub fn unit_angle(&self) -> f64 {
        if self.units == 0 {
            return 0.0;
        }
        TAU / self.units as f64
    }

    /// Angle of the leading edge of `position`; fractional positions are
    /// allowed and positions past `units` keep turning.
    pub fn angle(&self, position: f64) -> f64 {
        position.mul_add(self.unit_angle(), self.origin)
    }

    /// Angle at the middle of unit `index`.
    pub fn center_angle(&self, index: usize) -> f64 {
        self.angle(index as f64 + 0.5)
    }
}

pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        angle.cos().mul_add(radius, center.x),
        angle.sin().mul_add(radius, center.y),
    )
}
