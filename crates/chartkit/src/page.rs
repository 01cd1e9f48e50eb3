//! Long-form page documents: prose sections with optional charts, loaded
//! from static JSON compiled into the front-ends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chart::{bar_chart, bloom_chart, cycle_chart, line_chart, radial_scatter};
use crate::domain::{BloomLayer, CategoricalEntity, CycleArc, GeoPoint, Series};
use crate::error::{Error, Result};
use crate::scene::{ChartFrame, Scene};
use crate::selection::UiState;
use crate::series::{extent, is_sorted_by_year, Extent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Line {
        series: Vec<Series>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        domain: Option<(f64, f64)>,
    },
    Bar {
        entities: Vec<CategoricalEntity>,
    },
    Cycle {
        units: Vec<String>,
        arcs: Vec<CycleArc>,
    },
    Bloom {
        units: Vec<String>,
        layers: Vec<BloomLayer>,
    },
    Scatter {
        sectors: Vec<String>,
        rings: Vec<String>,
        entities: Vec<CategoricalEntity>,
    },
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

impl ChartSpec {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Bar { .. } => "bar",
            Self::Cycle { .. } => "cycle",
            Self::Bloom { .. } => "bloom",
            Self::Scatter { .. } => "scatter",
        }
    }

    pub fn scene(&self, frame: &ChartFrame, ui: &UiState) -> Scene {
        match self {
            Self::Line { series, domain } => line_chart(series, *domain, frame, ui),
            Self::Bar { entities } => bar_chart(entities, frame, ui),
            Self::Cycle { units, arcs } => cycle_chart(units, arcs, frame, ui),
            Self::Bloom { units, layers } => bloom_chart(units, layers, frame, ui),
            Self::Scatter {
                sectors,
                rings,
                entities,
            } => radial_scatter(entities, sectors, rings, frame, ui),
        }
    }

    /// Values the chart's filter can take, in first-seen order.
    pub fn filters(&self) -> Vec<String> {
        match self {
            Self::Line { series, .. } => distinct(series.iter().map(|line| &line.name)),
            Self::Bar { entities } | Self::Scatter { entities, .. } => {
                distinct(entities.iter().map(|entity| &entity.category))
            }
            Self::Cycle { arcs, .. } => distinct(arcs.iter().map(|arc| &arc.id)),
            Self::Bloom { layers, .. } => distinct(layers.iter().map(|layer| &layer.id)),
        }
    }

    /// Number of positions `UiState::active_index` can step through.
    pub fn active_len(&self) -> usize {
        match self {
            Self::Line { .. } => self
                .year_extent()
                .map_or(0, |bounds| (bounds.max_year - bounds.min_year + 1) as usize),
            Self::Bar { entities } | Self::Scatter { entities, .. } => entities.len(),
            Self::Cycle { units, .. } | Self::Bloom { units, .. } => units.len(),
        }
    }

    pub fn record_count(&self) -> usize {
        match self {
            Self::Line { series, .. } => series.iter().map(|line| line.points.len()).sum(),
            Self::Bar { entities } | Self::Scatter { entities, .. } => entities.len(),
            Self::Cycle { arcs, .. } => arcs.len(),
            Self::Bloom { layers, .. } => layers.len(),
        }
    }

    pub fn year_extent(&self) -> Option<Extent> {
        match self {
            Self::Line { series, .. } => series
                .iter()
                .filter_map(|line| extent(&line.points))
                .reduce(Extent::merge),
            _ => None,
        }
    }

    pub fn validate(&self, section: &str) -> Result<()> {
        let empty = || Error::EmptyDataset {
            section: section.to_string(),
        };
        match self {
            Self::Line { series, domain } => {
                if series.is_empty() {
                    return Err(empty());
                }
                for line in series {
                    if line.points.is_empty() {
                        return Err(empty());
                    }
                    if !is_sorted_by_year(&line.points) {
                        let (previous, year) = line
                            .points
                            .windows(2)
                            .find(|pair| pair[0].year >= pair[1].year)
                            .map_or((0, 0), |pair| (pair[0].year, pair[1].year));
                        return Err(Error::UnsortedSeries {
                            section: section.to_string(),
                            series: line.name.clone(),
                            previous,
                            year,
                        });
                    }
                }
                if let Some((min, max)) = domain {
                    if min > max {
                        return Err(Error::InvertedDomain {
                            section: section.to_string(),
                            min: *min,
                            max: *max,
                        });
                    }
                }
            }
            Self::Bar { entities } => {
                if entities.is_empty() {
                    return Err(empty());
                }
            }
            Self::Cycle { units, arcs } => {
                if units.is_empty() || arcs.is_empty() {
                    return Err(empty());
                }
                for arc in arcs {
                    for index in [arc.start, arc.end] {
                        if index >= units.len() {
                            return Err(Error::ArcOutOfRange {
                                section: section.to_string(),
                                index,
                                units: units.len(),
                            });
                        }
                    }
                }
            }
            Self::Bloom { units, layers } => {
                if units.is_empty() || layers.is_empty() {
                    return Err(empty());
                }
                for layer in layers {
                    if layer.values.len() != units.len() {
                        return Err(Error::LayerLength {
                            section: section.to_string(),
                            layer: layer.id.clone(),
                            expected: units.len(),
                            found: layer.values.len(),
                        });
                    }
                }
            }
            Self::Scatter {
                sectors,
                rings,
                entities,
            } => {
                if sectors.is_empty() || rings.is_empty() || entities.is_empty() {
                    return Err(empty());
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub heading: String,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
}

impl Section {
    /// The section's chart as a scene, or `None` for prose-only sections.
    pub fn scene(&self, frame: &ChartFrame, ui: &UiState) -> Option<Scene> {
        self.chart.as_ref().map(|chart| chart.scene(frame, ui))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub kicker: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub places: Vec<GeoPoint>,
}

impl PageDocument {
    /// Parses and validates a page.
    pub fn from_json(source: &str) -> Result<Self> {
        let page: Self = serde_json::from_str(source)?;
        page.validate()?;
        Ok(page)
    }

    pub fn validate(&self) -> Result<()> {
        for section in &self.sections {
            if let Some(chart) = &section.chart {
                if let Err(error) = chart.validate(&section.id) {
                    warn!(page = %self.slug, %error, "page failed validation");
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn charts(&self) -> impl Iterator<Item = (&Section, &ChartSpec)> + '_ {
        self.sections
            .iter()
            .filter_map(|section| section.chart.as_ref().map(|chart| (section, chart)))
    }

    pub fn stats(&self) -> PageStats {
        let mut charts = BTreeMap::new();
        let mut records = 0;
        let mut years: Option<Extent> = None;
        for (_, chart) in self.charts() {
            *charts.entry(chart.kind().to_string()).or_insert(0) += 1;
            records += chart.record_count();
            if let Some(bounds) = chart.year_extent() {
                years = Some(years.map_or(bounds, |current| current.merge(bounds)));
            }
        }
        PageStats {
            slug: self.slug.clone(),
            title: self.title.clone(),
            sections: self.sections.len(),
            charts,
            records,
            places: self.places.len(),
            year_span: years.map(|bounds| (bounds.min_year, bounds.max_year)),
        }
    }
}

/// Summary used by headless reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStats {
    pub slug: String,
    pub title: String,
    pub sections: usize,
    pub charts: BTreeMap<String, usize>,
    pub records: usize,
    pub places: usize,
    pub year_span: Option<(i32, i32)>,
}

/// Finds a page by slug in a bundle.
pub fn find_page<'a>(pages: &'a [PageDocument], slug: &str) -> Result<&'a PageDocument> {
    pages
        .iter()
        .find(|page| page.slug == slug)
        .ok_or_else(|| Error::UnknownPage(slug.to_string()))
}
