use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or validating page documents.
///
/// Chart geometry itself never fails: degenerate input renders flat or empty.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid page document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("section `{section}`: series `{series}` is not sorted by year (year {year} follows {previous})")]
    UnsortedSeries {
        section: String,
        series: String,
        previous: i32,
        year: i32,
    },

    #[error("section `{section}`: chart has no data")]
    EmptyDataset { section: String },

    #[error("section `{section}`: arc index {index} is outside a {units}-unit cycle")]
    ArcOutOfRange {
        section: String,
        index: usize,
        units: usize,
    },

    #[error("section `{section}`: layer `{layer}` has {found} values for {expected} units")]
    LayerLength {
        section: String,
        layer: String,
        expected: usize,
        found: usize,
    },

    #[error("section `{section}`: domain minimum {min} is greater than maximum {max}")]
    InvertedDomain { section: String, min: f64, max: f64 },

    #[error("unknown page `{0}`")]
    UnknownPage(String),
}
