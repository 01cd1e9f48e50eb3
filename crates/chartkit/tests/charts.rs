use std::collections::BTreeMap;

use chartkit::chart::{bar_chart, bloom_chart, cycle_chart, line_chart, radial_scatter};
use chartkit::domain::{BloomLayer, CycleArc, Series};
use chartkit::geom::Insets;
use chartkit::hit::hit_test;
use chartkit::scene::{Emphasis, Role, ShapeKind};
use chartkit::{CategoricalEntity, ChartFrame, HitKey, Point, TimeSeriesPoint, UiEvent, UiState};

fn frame() -> ChartFrame {
    ChartFrame::new(600.0, 320.0).with_insets(Insets::new(24.0, 80.0, 32.0, 48.0))
}

fn output() -> Vec<Series> {
    vec![Series {
        name: "Delta".to_string(),
        color: "#16a34a".to_string(),
        points: [(2005, 10.0), (2010, 20.0), (2015, 15.0), (2020, 30.0), (2025, 40.0)]
            .into_iter()
            .map(|(year, value)| TimeSeriesPoint::new(year, value))
            .collect(),
    }]
}

fn months() -> Vec<String> {
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        .map(String::from)
        .to_vec()
}

fn entity(id: &str, category: &str, value: f64, ring: Option<&str>) -> CategoricalEntity {
    let mut attributes = BTreeMap::new();
    if let Some(ring) = ring {
        attributes.insert("ring".to_string(), ring.to_string());
    }
    CategoricalEntity {
        id: id.to_string(),
        name: id.to_uppercase(),
        category: category.to_string(),
        value,
        attributes,
        color: "#333333".to_string(),
    }
}

#[test]
fn line_chart_has_one_column_per_year() {
    let scene = line_chart(&output(), None, &frame(), &UiState::default());
    assert_eq!(scene.regions.len(), 21);
    assert_eq!(scene.shapes_with_role(Role::Line).count(), 1);
    assert_eq!(scene.shapes_with_role(Role::Dot).count(), 5);

    // Columns are wider than the 3px dots drawn inside them.
    let first = &scene.regions[0];
    match first.shape {
        chartkit::hit::HitShape::Rect { width, .. } => assert!(width > 6.0),
        chartkit::hit::HitShape::Wedge { .. } => panic!("expected a column"),
    }
}

#[test]
fn hovering_a_year_moves_the_marker_and_interpolates() {
    let base = line_chart(&output(), None, &frame(), &UiState::default());
    let column = base
        .regions
        .iter()
        .find(|region| region.key == HitKey::year(2012))
        .unwrap();
    let center = match column.shape {
        chartkit::hit::HitShape::Rect {
            x,
            y,
            width,
            height,
        } => Point::new(x + width / 2.0, y + height / 2.0),
        chartkit::hit::HitShape::Wedge { .. } => unreachable!(),
    };
    let key = hit_test(&base.regions, center).unwrap().clone();
    assert_eq!(key, HitKey::year(2012));

    let ui = UiState::default().apply(UiEvent::Hover(key), 21);
    let scene = line_chart(&output(), None, &frame(), &ui);
    let labels: Vec<&str> = scene.labels.iter().map(|label| label.text.as_str()).collect();
    assert!(labels.contains(&"Delta 18"), "{labels:?}");
    assert!(labels.contains(&"2012"));
}

#[test]
fn active_index_selects_the_marker_year() {
    let ui = UiState::default().apply(UiEvent::Jump(20), 21);
    let scene = line_chart(&output(), None, &frame(), &ui);
    assert!(scene.labels.iter().any(|label| label.text == "Delta 40"));
}

#[test]
fn flat_series_renders_centered() {
    let flat = vec![Series {
        name: "Flat".to_string(),
        color: "#000000".to_string(),
        points: vec![TimeSeriesPoint::new(2000, 0.0), TimeSeriesPoint::new(2001, 0.0)],
    }];
    let scene = line_chart(&flat, None, &frame(), &UiState::default());
    let center_y = (frame().top() + frame().bottom()) / 2.0;
    for dot in scene.shapes_with_role(Role::Dot) {
        match dot.kind {
            ShapeKind::Circle { center, .. } => assert!((center.y - center_y).abs() < 1e-9),
            _ => panic!("dots are circles"),
        }
    }
}

#[test]
fn single_point_series_is_centered_horizontally() {
    let single = vec![Series {
        name: "One".to_string(),
        color: "#000000".to_string(),
        points: vec![TimeSeriesPoint::new(1999, 5.0)],
    }];
    let scene = line_chart(&single, None, &frame(), &UiState::default());
    let center_x = (frame().left() + frame().right()) / 2.0;
    let dot = scene.shapes_with_role(Role::Dot).next().unwrap();
    match dot.kind {
        ShapeKind::Circle { center, .. } => assert!((center.x - center_x).abs() < 1e-9),
        _ => panic!("dots are circles"),
    }
    assert_eq!(scene.regions.len(), 1);
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "empty data"))]
fn empty_bar_chart_is_blank() {
    let scene = bar_chart(&[], &frame(), &UiState::default());
    assert!(scene.is_blank());
}

#[test]
fn bar_filter_dims_other_categories() {
    let entities = vec![
        entity("ir64", "modern", 5.8, None),
        entity("jasmine", "aromatic", 4.1, None),
    ];
    let ui = UiState::default().apply(UiEvent::Filter(Some("aromatic".to_string())), 0);
    let scene = bar_chart(&entities, &frame(), &ui);
    let emphasis: Vec<Emphasis> = scene
        .shapes_with_role(Role::Bar)
        .map(|bar| bar.emphasis)
        .collect();
    assert_eq!(emphasis, vec![Emphasis::Dimmed, Emphasis::Normal]);
    assert_eq!(scene.regions.len(), 2);
    assert_eq!(scene.regions[1].key, HitKey::new("jasmine"));
}

#[test]
fn tallest_bar_reaches_the_top() {
    let entities = vec![entity("a", "x", 2.0, None), entity("b", "x", 8.0, None)];
    let scene = bar_chart(&entities, &frame(), &UiState::default());
    let tops: Vec<f64> = scene
        .shapes_with_role(Role::Bar)
        .map(|bar| match bar.kind {
            ShapeKind::Rect { y, .. } => y,
            _ => f64::NAN,
        })
        .collect();
    assert_eq!(tops[1], frame().top());
    assert!(tops[0] > tops[1]);
}

#[test]
fn cycle_chart_highlights_arcs_covering_the_hovered_month() {
    let arcs = vec![
        CycleArc {
            id: "winter".to_string(),
            label: "Winter harvest".to_string(),
            start: 10,
            end: 1,
            track: 0,
            color: "#7c3aed".to_string(),
        },
        CycleArc {
            id: "summer".to_string(),
            label: "Summer harvest".to_string(),
            start: 6,
            end: 7,
            track: 1,
            color: "#ca8a04".to_string(),
        },
    ];
    let ui = UiState::default().apply(UiEvent::Hover(HitKey::index(0)), 12);
    let scene = cycle_chart(&months(), &arcs, &frame(), &ui);
    let emphasis: Vec<Emphasis> = scene
        .shapes_with_role(Role::Arc)
        .map(|arc| arc.emphasis)
        .collect();
    assert_eq!(emphasis, vec![Emphasis::Highlighted, Emphasis::Dimmed]);
    assert_eq!(scene.regions.len(), 12);
    assert!(scene.labels.iter().any(|label| label.text == "1 active"));
}

#[test]
fn bloom_chart_draws_one_closed_shape_per_layer() {
    let layers = vec![
        BloomLayer {
            id: "north".to_string(),
            label: "North".to_string(),
            values: vec![1.0; 12],
            color: "#0ea5e9".to_string(),
        },
        BloomLayer {
            id: "south".to_string(),
            label: "South".to_string(),
            values: (1..=12).map(f64::from).collect(),
            color: "#f97316".to_string(),
        },
    ];
    let scene = bloom_chart(&months(), &layers, &frame(), &UiState::default());
    let blooms: Vec<String> = scene
        .shapes_with_role(Role::Bloom)
        .map(|bloom| match &bloom.kind {
            ShapeKind::Path(path) => path.to_string(),
            _ => String::new(),
        })
        .collect();
    assert_eq!(blooms.len(), 2);
    assert!(blooms.iter().all(|d| d.starts_with('M') && d.ends_with('Z')));

    let hovered = UiState::default().apply(UiEvent::Hover(HitKey::index(11)), 12);
    let scene = bloom_chart(&months(), &layers, &frame(), &hovered);
    assert!(scene.labels.iter().any(|label| label.text == "South 12"));
}

#[test]
fn scatter_skips_unplaced_entities() {
    let sectors = vec!["structural".to_string(), "ritual".to_string()];
    let rings = vec!["founding".to_string(), "modern".to_string()];
    let entities = vec![
        entity("hall", "structural", 1.0, Some("founding")),
        entity("bell", "ritual", 1.0, Some("modern")),
        entity("stray", "unknown", 1.0, Some("modern")),
        entity("ringless", "ritual", 1.0, None),
    ];
    let ui = UiState::default().apply(UiEvent::Click(HitKey::new("bell")), 0);
    let scene = radial_scatter(&entities, &sectors, &rings, &frame(), &ui);
    assert_eq!(scene.shapes_with_role(Role::Dot).count(), 2);
    assert_eq!(scene.regions.len(), 2);
    assert!(scene.labels.iter().any(|label| label.text == "BELL"));
}

#[test]
fn rebuilding_from_the_same_inputs_is_idempotent() {
    let ui = UiState::default().apply(UiEvent::Step(3), 21);
    assert_eq!(
        line_chart(&output(), None, &frame(), &ui),
        line_chart(&output(), None, &frame(), &ui)
    );
}
