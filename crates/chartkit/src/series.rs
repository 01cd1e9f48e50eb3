//! Lookups over sparse, year-sorted series.

use tracing::debug;

use crate::domain::TimeSeriesPoint;

/// Value at `year`, interpolating linearly between the bracketing points.
///
/// A year that matches a stored point returns that point's value untouched.
/// Years outside the series clamp to the nearest endpoint. `None` only for
/// an empty series.
pub fn value_at(points: &[TimeSeriesPoint], year: i32) -> Option<f64> {
    debug_assert!(is_sorted_by_year(points), "series must be sorted by year");

    let first = points.first()?;
    let last = points.last()?;
    if year <= first.year {
        if year < first.year {
            debug!(year, first = first.year, "lookup before series start, clamping");
        }
        return Some(first.value);
    }
    if year >= last.year {
        if year > last.year {
            debug!(year, last = last.year, "lookup after series end, clamping");
        }
        return Some(last.value);
    }

    match points.binary_search_by_key(&year, |point| point.year) {
        Ok(index) => Some(points[index].value),
        Err(index) => {
            let before = &points[index - 1];
            let after = &points[index];
            Some(lerp_between(before, after, f64::from(year)))
        }
    }
}

/// Like [`value_at`] for fractional years, used by animated scrubbers.
pub fn value_at_fractional(points: &[TimeSeriesPoint], year: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if year <= f64::from(first.year) {
        return Some(first.value);
    }
    if year >= f64::from(last.year) {
        return Some(last.value);
    }

    let index = points.partition_point(|point| f64::from(point.year) <= year);
    let before = &points[index - 1];
    if f64::from(before.year) == year {
        return Some(before.value);
    }
    Some(lerp_between(before, &points[index], year))
}

fn lerp_between(before: &TimeSeriesPoint, after: &TimeSeriesPoint, year: f64) -> f64 {
    let span = f64::from(after.year - before.year);
    let t = (year - f64::from(before.year)) / span;
    t.mul_add(after.value - before.value, before.value)
}

pub fn is_sorted_by_year(points: &[TimeSeriesPoint]) -> bool {
    points.windows(2).all(|pair| pair[0].year < pair[1].year)
}

/// Year and value bounds of one or more series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_year: i32,
    pub max_year: i32,
    pub min_value: f64,
    pub max_value: f64,
}

impl Extent {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min_year: self.min_year.min(other.min_year),
            max_year: self.max_year.max(other.max_year),
            min_value: self.min_value.min(other.min_value),
            max_value: self.max_value.max(other.max_value),
        }
    }
}

pub fn extent(points: &[TimeSeriesPoint]) -> Option<Extent> {
    let first = points.first()?;
    let last = points.last()?;
    let (min_value, max_value) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), point| {
            (lo.min(point.value), hi.max(point.value))
        });
    Some(Extent {
        min_year: first.year,
        max_year: last.year,
        min_value,
        max_value,
    })
}

/// Every year from the first to the last point, for per-year hit columns.
pub fn year_span(points: &[TimeSeriesPoint]) -> Vec<i32> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.year..=last.year).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TimeSeriesPoint> {
        [(2005, 10.0), (2010, 20.0), (2015, 15.0), (2020, 30.0), (2025, 40.0)]
            .into_iter()
            .map(|(year, value)| TimeSeriesPoint::new(year, value))
            .collect()
    }

    #[test]
    fn interpolates_between_known_years() {
        let value = value_at(&sample(), 2012).unwrap();
        assert!((value - 18.0).abs() < 1e-12, "got {value}");
    }

    #[test]
    fn known_years_return_stored_values() {
        let points = sample();
        for point in &points {
            assert_eq!(value_at(&points, point.year), Some(point.value));
        }
    }

    #[test]
    fn clamps_outside_the_series() {
        let points = sample();
        assert_eq!(value_at(&points, 2003), Some(10.0));
        assert_eq!(value_at(&points, 2030), Some(40.0));
    }

    #[test]
    fn empty_series_has_no_value() {
        assert_eq!(value_at(&[], 2000), None);
        assert_eq!(value_at_fractional(&[], 2000.5), None);
        assert!(extent(&[]).is_none());
    }

    #[test]
    fn fractional_lookup_matches_integer_lookup() {
        let points = sample();
        assert_eq!(value_at_fractional(&points, 2015.0), Some(15.0));
        let halfway = value_at_fractional(&points, 2017.5).unwrap();
        assert!((halfway - 22.5).abs() < 1e-12);
    }

    #[test]
    fn extent_covers_years_and_values() {
        let extent = extent(&sample()).unwrap();
        assert_eq!((extent.min_year, extent.max_year), (2005, 2025));
        assert_eq!((extent.min_value, extent.max_value), (10.0, 40.0));
    }

    #[test]
    fn detects_unsorted_series() {
        let mut points = sample();
        points.swap(1, 2);
        assert!(!is_sorted_by_year(&points));
        assert!(is_sorted_by_year(&sample()));
    }
}
