//! Radial layouts: blooms and sector/ring scatters.

use crate::geom::Point;
use crate::scale::{polar, AngularScale, LinearScale};

/// One point per cyclical unit, centered in the unit, at the scaled
/// distance from `center`. Feed into [`crate::path::smooth_closed`].
pub fn bloom_points(
    values: &[f64],
    radius: &LinearScale,
    angles: &AngularScale,
    center: Point,
) -> Vec<Point> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| polar(center, radius.apply(*value), angles.center_angle(index)))
        .collect()
}

/// Stable pseudo-random offsets in `[0, 1)` derived from a name, so a
/// record lands in the same spot on every render.
pub fn name_jitter(name: &str) -> (f64, f64) {
    let hash = name
        .bytes()
        .fold(0_u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    let first = (hash % 100) as f64 / 100.0;
    let second = ((hash / 100) % 100) as f64 / 100.0;
    (first, second)
}

/// Angle and radius fraction (0 = center, 1 = outer edge) for a record
/// placed in `sector` of `sectors` and `ring` of `rings`.
///
/// Points stay inside the middle 60% of their cell in both directions.
pub fn scatter_position(
    name: &str,
    sector: usize,
    sectors: usize,
    ring: usize,
    rings: usize,
) -> (f64, f64) {
    let angles = AngularScale::new(sectors);
    let (angle_jitter, radius_jitter) = name_jitter(name);

    let angle = ((angle_jitter - 0.5) * 0.6)
        .mul_add(angles.unit_angle(), angles.center_angle(sector));
    let fraction = if rings == 0 {
        0.0
    } else {
        ((radius_jitter - 0.5) * 0.6 + 0.5 + ring as f64) / rings as f64
    };
    (angle, fraction)
}
