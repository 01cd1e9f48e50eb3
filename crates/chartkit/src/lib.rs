//! Shared chart and reveal toolkit for data-module pages.
//!
//! Pages supply static records and visual parameters; this crate turns them
//! into pixel geometry (scales, paths, arcs, hit regions), tracks the
//! one-shot "has this scrolled into view yet" state for each section, and
//! owns the lifecycle of an external map instance.

pub mod arc;
pub mod chart;
pub mod domain;
pub mod error;
pub mod geom;
pub mod hit;
pub mod map;
pub mod motion;
pub mod page;
pub mod path;
pub mod radial;
pub mod reveal;
pub mod scale;
pub mod scene;
pub mod selection;
pub mod series;
pub mod svg;

pub use domain::{CategoricalEntity, GeoPoint, TimeSeriesPoint};
pub use error::{Error, Result};
pub use geom::Point;
pub use hit::{HitKey, HitRegion};
pub use page::{ChartSpec, PageDocument, Section};
pub use reveal::{RevealObserver, ViewportWatch};
pub use scene::{ChartFrame, Scene};
pub use selection::{UiEvent, UiState};
