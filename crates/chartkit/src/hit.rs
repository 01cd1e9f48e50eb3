//! Invisible pointer targets that are larger than the marks they stand for,
//! so thin lines and arcs do not need pixel-precise hovering.

use std::f64::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arc::{annular_sector, ArcBuilder};
use crate::geom::Point;
use crate::path::Path;
use crate::scale::BandScale;

/// Minimum width of a column target when there are no neighbours to
/// measure against.
pub const MIN_COLUMN_WIDTH: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HitKey(String);

impl HitKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn index(index: usize) -> Self {
        Self(index.to_string())
    }

    pub fn year(year: i32) -> Self {
        Self(year.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric keys (indices and years) parsed back.
    pub fn as_number(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for HitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Wedge {
        center: Point,
        inner: f64,
        outer: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl HitShape {
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => point.x >= x && point.x <= x + width && point.y >= y && point.y <= y + height,
            Self::Wedge {
                center,
                inner,
                outer,
                start_angle,
                end_angle,
            } => {
                let distance = point.distance(center);
                if distance < inner || distance > outer {
                    return false;
                }
                let angle = (point.y - center.y).atan2(point.x - center.x);
                let offset = (angle - start_angle).rem_euclid(TAU);
                offset <= end_angle - start_angle
            }
        }
    }

    pub fn to_path(&self) -> Path {
        match *self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => {
                let mut path = Path::new();
                path.move_to(Point::new(x, y))
                    .line_to(Point::new(x + width, y))
                    .line_to(Point::new(x + width, y + height))
                    .line_to(Point::new(x, y + height))
                    .close();
                path
            }
            Self::Wedge {
                center,
                inner,
                outer,
                start_angle,
                end_angle,
            } => annular_sector(center, inner, outer, start_angle, end_angle),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub key: HitKey,
    pub shape: HitShape,
}

/// One full-slot rectangle per band, padding included.
pub fn band_regions(
    bands: &BandScale,
    top: f64,
    bottom: f64,
    keys: impl IntoIterator<Item = HitKey>,
) -> Vec<HitRegion> {
    keys.into_iter()
        .enumerate()
        .filter_map(|(index, key)| {
            let (x, width) = bands.slot(index)?;
            Some(HitRegion {
                key,
                shape: HitShape::Rect {
                    x,
                    y: top,
                    width,
                    height: bottom - top,
                },
            })
        })
        .collect()
}

/// Columns around ascending x positions, each reaching halfway to its
/// neighbours; the outer columns mirror their inner half.
pub fn column_regions(
    positions: &[f64],
    top: f64,
    bottom: f64,
    keys: impl IntoIterator<Item = HitKey>,
) -> Vec<HitRegion> {
    let count = positions.len();
    keys.into_iter()
        .zip(positions.iter().copied())
        .enumerate()
        .map(|(index, (key, x))| {
            let half_left = if index > 0 {
                (x - positions[index - 1]) / 2.0
            } else if count > 1 {
                (positions[1] - x) / 2.0
            } else {
                MIN_COLUMN_WIDTH / 2.0
            };
            let half_right = if index + 1 < count {
                (positions[index + 1] - x) / 2.0
            } else {
                half_left
            };
            HitRegion {
                key,
                shape: HitShape::Rect {
                    x: x - half_left,
                    y: top,
                    width: half_left + half_right,
                    height: bottom - top,
                },
            }
        })
        .collect()
}

/// One wedge per cyclical unit spanning the whole annulus.
pub fn wedge_regions(builder: &ArcBuilder, inner: f64, outer: f64) -> Vec<HitRegion> {
    let scale = builder.scale();
    (0..scale.units())
        .map(|unit| HitRegion {
            key: HitKey::index(unit),
            shape: HitShape::Wedge {
                center: builder.center(),
                inner,
                outer,
                start_angle: scale.angle(unit as f64),
                end_angle: scale.angle(unit as f64 + 1.0),
            },
        })
        .collect()
}

/// Topmost region under `point`; later regions sit above earlier ones.
pub fn hit_test(regions: &[HitRegion], point: Point) -> Option<&HitKey> {
    regions
        .iter()
        .rev()
        .find(|region| region.shape.contains(point))
        .map(|region| &region.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_regions_cover_the_whole_slot() {
        let bands = BandScale::new(3, 0.0, 300.0, 0.4);
        let regions = band_regions(&bands, 10.0, 110.0, (0..3).map(HitKey::index));
        assert_eq!(regions.len(), 3);
        match regions[1].shape {
            HitShape::Rect { x, width, .. } => {
                assert!((x - 100.0).abs() < 1e-9);
                assert!((width - 100.0).abs() < 1e-9);
                assert!(width > bands.bandwidth());
            }
            HitShape::Wedge { .. } => panic!("expected rect"),
        }
    }

    #[test]
    fn columns_meet_halfway() {
        let regions = column_regions(
            &[0.0, 10.0, 30.0],
            0.0,
            100.0,
            [2000, 2001, 2002].map(HitKey::year),
        );
        assert_eq!(hit_test(&regions, Point::new(4.0, 50.0)), Some(&HitKey::year(2000)));
        assert_eq!(hit_test(&regions, Point::new(6.0, 50.0)), Some(&HitKey::year(2001)));
        assert_eq!(hit_test(&regions, Point::new(21.0, 50.0)), Some(&HitKey::year(2002)));
        assert_eq!(hit_test(&regions, Point::new(41.0, 50.0)), None);
        assert_eq!(hit_test(&regions, Point::new(5.0, 150.0)), None);
    }

    #[test]
    fn single_column_gets_minimum_width() {
        let regions = column_regions(&[50.0], 0.0, 10.0, [HitKey::year(1999)]);
        assert!(regions[0].shape.contains(Point::new(50.0 + MIN_COLUMN_WIDTH / 2.0 - 0.1, 5.0)));
    }

    #[test]
    fn wedges_wrap_through_the_cycle() {
        let builder = ArcBuilder::new(4, Point::new(0.0, 0.0));
        let regions = wedge_regions(&builder, 10.0, 50.0);
        assert_eq!(regions.len(), 4);
        // Unit 0 spans twelve to three o'clock.
        assert_eq!(hit_test(&regions, Point::new(20.0, -20.0)), Some(&HitKey::index(0)));
        // Unit 3 spans nine to twelve o'clock.
        assert_eq!(hit_test(&regions, Point::new(-20.0, -20.0)), Some(&HitKey::index(3)));
        // Inside the hole.
        assert_eq!(hit_test(&regions, Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn numeric_keys_parse_back() {
        assert_eq!(HitKey::year(2012).as_number(), Some(2012));
        assert_eq!(HitKey::new("wheat").as_number(), None);
    }
}
