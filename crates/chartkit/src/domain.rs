use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One dated observation. Series are kept sorted ascending by `year`;
/// gaps between years are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub year: i32,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TimeSeriesPoint {
    pub const fn new(year: i32, value: f64) -> Self {
        Self {
            year,
            value,
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A named run of points drawn as one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<TimeSeriesPoint>,
}

/// A labelled record belonging to an author-defined category.
///
/// `color` is a presentation token chosen by the author, never derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalEntity {
    pub id: String,
    pub name: String,
    pub category: String,
    pub value: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub color: String,
}

/// A named location handed to the map collaborator as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    #[serde(default)]
    pub popup: String,
}

/// Arc on a cyclical domain, e.g. a harvest season from month 10 to month 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleArc {
    pub id: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
    /// Concentric track, 0 is innermost.
    pub track: usize,
    pub color: String,
}

/// A closed radial shape: one value per cyclical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloomLayer {
    pub id: String,
    pub label: String,
    pub values: Vec<f64>,
    pub color: String,
}
