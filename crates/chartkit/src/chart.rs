//! Chart builders: data + frame + UI state in, [`Scene`] out.
//!
//! Every builder is pure. Empty input is a programmer error and trips a
//! debug assertion; release builds return a blank scene instead so one bad
//! chart cannot take the page down.

use tracing::warn;

use crate::arc::{arc_span, ArcBuilder};
use crate::domain::{BloomLayer, CategoricalEntity, CycleArc, Series};
use crate::geom::Point;
use crate::hit::{band_regions, column_regions, wedge_regions, HitKey, HitRegion, HitShape};
use crate::path::{polyline, smooth_closed};
use crate::radial::{bloom_points, scatter_position};
use crate::scale::{polar, AngularScale, BandScale, LinearScale};
use crate::scene::{
    Anchor, ChartFrame, Emphasis, Label, Role, Scene, Shape, ShapeKind, TONE_MUTED,
};
use crate::selection::UiState;
use crate::series::{extent, value_at, Extent};

const DOT_RADIUS: f64 = 3.0;
const MARKER_RADIUS: f64 = 5.0;
const ARC_PAD_ANGLE: f64 = 0.03;
const LABEL_GAP: f64 = 6.0;

fn blank(frame: &ChartFrame, chart: &str) -> Scene {
    debug_assert!(false, "{chart} chart built from empty data");
    warn!(chart, "empty chart data, rendering blank scene");
    Scene::empty(frame)
}

/// Compact numeric label: integers without decimals, others with one.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn value_domain(extent: &Extent) -> (f64, f64) {
    (extent.min_value.min(0.0), extent.max_value.max(0.0))
}

/// Time-series lines with a per-year hover column and an active-year
/// marker showing the interpolated value of every series.
///
/// `fixed_domain` pins the value axis; otherwise it spans the data and zero.
pub fn line_chart(
    series: &[Series],
    fixed_domain: Option<(f64, f64)>,
    frame: &ChartFrame,
    ui: &UiState,
) -> Scene {
    let Some(bounds) = series
        .iter()
        .filter_map(|line| extent(&line.points))
        .reduce(Extent::merge)
    else {
        return blank(frame, "line");
    };

    let mut scene = Scene::empty(frame);
    let x = LinearScale::new(
        f64::from(bounds.min_year),
        f64::from(bounds.max_year),
        frame.left(),
        frame.right(),
    );
    let (min_value, max_value) = fixed_domain.unwrap_or_else(|| value_domain(&bounds));
    let y = LinearScale::new(min_value, max_value, frame.bottom(), frame.top());

    for tick in y.ticks(5) {
        let py = y.apply(tick);
        scene.push(Shape::new(
            ShapeKind::Path(polyline(&[
                Point::new(frame.left(), py),
                Point::new(frame.right(), py),
            ])),
            Role::Grid,
            TONE_MUTED,
        ));
        scene.label(Label::new(
            Point::new(frame.left() - LABEL_GAP, py),
            format_value(tick),
            Anchor::End,
        ));
    }

    let span = bounds.max_year - bounds.min_year;
    let tick_count = usize::try_from(span).unwrap_or(0).min(5) + 1;
    let mut previous_year = None;
    for tick in x.ticks(tick_count) {
        let year = tick.round() as i32;
        if previous_year == Some(year) {
            continue;
        }
        previous_year = Some(year);
        scene.label(Label::new(
            Point::new(x.apply(f64::from(year)), frame.bottom() + LABEL_GAP * 3.0),
            year.to_string(),
            Anchor::Middle,
        ));
    }

    scene.push(Shape::new(
        ShapeKind::Path(polyline(&[
            Point::new(frame.left(), frame.bottom()),
            Point::new(frame.right(), frame.bottom()),
        ])),
        Role::Axis,
        TONE_MUTED,
    ));

    let years: Vec<i32> = (bounds.min_year..=bounds.max_year).collect();
    let active_year = ui
        .selected_key()
        .and_then(HitKey::as_number)
        .and_then(|year| i32::try_from(year).ok())
        .filter(|year| years.contains(year))
        .unwrap_or_else(|| years[ui.active_index.min(years.len() - 1)]);

    for line in series {
        if line.points.is_empty() {
            continue;
        }
        let emphasis = match ui.filter.as_ref() {
            Some(filter) if *filter == line.name => Emphasis::Highlighted,
            Some(_) => Emphasis::Dimmed,
            None => Emphasis::Normal,
        };
        let points: Vec<Point> = line
            .points
            .iter()
            .map(|point| Point::new(x.apply(f64::from(point.year)), y.apply(point.value)))
            .collect();
        scene.push(
            Shape::new(ShapeKind::Path(polyline(&points)), Role::Line, &line.color)
                .with_emphasis(emphasis),
        );
        for (point, record) in points.iter().zip(&line.points) {
            let dot_emphasis = if record.year == active_year {
                Emphasis::Highlighted
            } else {
                emphasis
            };
            scene.push(
                Shape::new(
                    ShapeKind::Circle {
                        center: *point,
                        radius: DOT_RADIUS,
                    },
                    Role::Dot,
                    &line.color,
                )
                .with_emphasis(dot_emphasis),
            );
        }
    }

    let active_x = x.apply(f64::from(active_year));
    scene.push(
        Shape::new(
            ShapeKind::Path(polyline(&[
                Point::new(active_x, frame.top()),
                Point::new(active_x, frame.bottom()),
            ])),
            Role::Grid,
            TONE_MUTED,
        )
        .with_emphasis(Emphasis::Highlighted),
    );
    for line in series {
        let Some(value) = value_at(&line.points, active_year) else {
            continue;
        };
        let at = Point::new(active_x, y.apply(value));
        scene.push(
            Shape::new(
                ShapeKind::Circle {
                    center: at,
                    radius: MARKER_RADIUS,
                },
                Role::Marker,
                &line.color,
            )
            .with_emphasis(Emphasis::Highlighted),
        );
        scene.label(
            Label::new(
                Point::new(active_x + LABEL_GAP + MARKER_RADIUS, at.y),
                format!("{} {}", line.name, format_value(value)),
                Anchor::Start,
            )
            .with_emphasis(Emphasis::Highlighted),
        );
    }
    scene.label(
        Label::new(
            Point::new(active_x, frame.top() - LABEL_GAP),
            active_year.to_string(),
            Anchor::Middle,
        )
        .with_emphasis(Emphasis::Highlighted),
    );

    let positions: Vec<f64> = years.iter().map(|year| x.apply(f64::from(*year))).collect();
    scene.regions = column_regions(
        &positions,
        frame.top(),
        frame.bottom(),
        years.iter().copied().map(HitKey::year),
    );
    scene
}

/// Vertical bars in record order; a category filter dims the rest.
pub fn bar_chart(entities: &[CategoricalEntity], frame: &ChartFrame, ui: &UiState) -> Scene {
    if entities.is_empty() {
        return blank(frame, "bar");
    }

    let mut scene = Scene::empty(frame);
    let bands = BandScale::new(entities.len(), frame.left(), frame.right(), 0.25);
    let max_value = entities
        .iter()
        .map(|entity| entity.value)
        .fold(0.0_f64, f64::max);
    // All-zero data keeps a unit domain so bars sit flat on the baseline.
    let domain_max = if max_value > 0.0 { max_value } else { 1.0 };
    let y = LinearScale::new(0.0, domain_max, frame.bottom(), frame.top());

    scene.push(Shape::new(
        ShapeKind::Path(polyline(&[
            Point::new(frame.left(), frame.bottom()),
            Point::new(frame.right(), frame.bottom()),
        ])),
        Role::Axis,
        TONE_MUTED,
    ));

    for (index, entity) in entities.iter().enumerate() {
        let Some((x, width)) = bands.band(index) else {
            continue;
        };
        let key = HitKey::new(&entity.id);
        let emphasis = if ui.passes_filter(&entity.category) {
            ui.emphasis_for(&key)
        } else {
            Emphasis::Dimmed
        };
        let top = y.apply(entity.value.max(0.0));
        scene.push(
            Shape::new(
                ShapeKind::Rect {
                    x,
                    y: top,
                    width,
                    height: frame.bottom() - top,
                },
                Role::Bar,
                &entity.color,
            )
            .with_emphasis(emphasis),
        );
        let center = x + width / 2.0;
        scene.label(
            Label::new(
                Point::new(center, top - LABEL_GAP),
                format_value(entity.value),
                Anchor::Middle,
            )
            .with_emphasis(emphasis),
        );
        scene.label(
            Label::new(
                Point::new(center, frame.bottom() + LABEL_GAP * 3.0),
                &entity.name,
                Anchor::Middle,
            )
            .with_emphasis(emphasis),
        );
    }

    scene.regions = band_regions(
        &bands,
        frame.top(),
        frame.bottom(),
        entities.iter().map(|entity| HitKey::new(&entity.id)),
    );
    scene
}

fn covers_unit(arc: &CycleArc, unit: usize, units: usize) -> bool {
    let span = arc_span(arc.start, arc.end, units);
    (unit + units - arc.start) % units < span
}

/// Concentric tracks of arcs on a cyclical domain, e.g. growing seasons
/// across the months of a year.
pub fn cycle_chart(
    unit_labels: &[String],
    arcs: &[CycleArc],
    frame: &ChartFrame,
    ui: &UiState,
) -> Scene {
    let units = unit_labels.len();
    if units == 0 || arcs.is_empty() {
        return blank(frame, "cycle");
    }

    let mut scene = Scene::empty(frame);
    let center = frame.center();
    let radius = frame.radius();
    let tracks = arcs.iter().map(|arc| arc.track).max().unwrap_or(0) + 1;
    let inner = radius * 0.3;
    let track_width = (radius * 0.8 - inner) / tracks as f64;
    let track_radius = |track: usize| (track as f64 + 0.5).mul_add(track_width, inner);
    let builder = ArcBuilder::new(units, center).with_pad_angle(ARC_PAD_ANGLE);

    for track in 0..tracks {
        scene.push(Shape::new(
            ShapeKind::Circle {
                center,
                radius: track_radius(track),
            },
            Role::Track,
            TONE_MUTED,
        ));
    }

    let selected_unit = ui
        .selected_key()
        .and_then(HitKey::as_number)
        .and_then(|unit| usize::try_from(unit).ok())
        .filter(|unit| *unit < units);

    for arc in arcs {
        if arc.start >= units || arc.end >= units {
            warn!(arc = %arc.id, units, "arc outside the cycle, skipping");
            continue;
        }
        let emphasis = if !ui.passes_filter(&arc.id) {
            Emphasis::Dimmed
        } else {
            match selected_unit {
                Some(unit) if covers_unit(arc, unit, units) => Emphasis::Highlighted,
                Some(_) => Emphasis::Dimmed,
                None => Emphasis::Normal,
            }
        };
        scene.push(
            Shape::new(
                ShapeKind::Path(builder.arc(arc.start, arc.end, track_radius(arc.track))),
                Role::Arc,
                &arc.color,
            )
            .with_emphasis(emphasis),
        );
    }

    let angles = builder.scale();
    for (unit, label) in unit_labels.iter().enumerate() {
        let emphasis = match selected_unit {
            Some(selected) if selected == unit => Emphasis::Highlighted,
            _ => Emphasis::Normal,
        };
        scene.label(
            Label::new(
                polar(center, radius * 0.92, angles.center_angle(unit)),
                label,
                Anchor::Middle,
            )
            .with_emphasis(emphasis),
        );
    }

    if let Some(unit) = selected_unit {
        let active: Vec<&str> = arcs
            .iter()
            .filter(|arc| arc.start < units && arc.end < units && covers_unit(arc, unit, units))
            .map(|arc| arc.label.as_str())
            .collect();
        scene.label(
            Label::new(center, &unit_labels[unit], Anchor::Middle)
                .with_emphasis(Emphasis::Highlighted),
        );
        scene.label(Label::new(
            Point::new(center.x, center.y + LABEL_GAP * 3.0),
            format!("{} active", active.len()),
            Anchor::Middle,
        ));
    }

    scene.regions = wedge_regions(&builder, inner - track_width / 2.0, radius);
    scene
}

/// Smoothed closed shapes, one per layer, over a cyclical axis.
pub fn bloom_chart(
    unit_labels: &[String],
    layers: &[BloomLayer],
    frame: &ChartFrame,
    ui: &UiState,
) -> Scene {
    let units = unit_labels.len();
    if units == 0 || layers.is_empty() {
        return blank(frame, "bloom");
    }

    let mut scene = Scene::empty(frame);
    let center = frame.center();
    let radius = frame.radius();
    let max_value = layers
        .iter()
        .flat_map(|layer| layer.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let scale = LinearScale::new(0.0, max_value, radius * 0.15, radius * 0.8);
    let angles = AngularScale::new(units);

    for tick in scale.ticks(4).into_iter().skip(1) {
        scene.push(Shape::new(
            ShapeKind::Circle {
                center,
                radius: scale.apply(tick),
            },
            Role::Grid,
            TONE_MUTED,
        ));
    }
    for unit in 0..units {
        let angle = angles.center_angle(unit);
        scene.push(Shape::new(
            ShapeKind::Path(polyline(&[center, polar(center, radius * 0.8, angle)])),
            Role::Axis,
            TONE_MUTED,
        ));
    }

    let selected_unit = ui
        .selected_key()
        .and_then(HitKey::as_number)
        .and_then(|unit| usize::try_from(unit).ok())
        .filter(|unit| *unit < units);

    for layer in layers {
        let values: Vec<f64> = layer.values.iter().copied().take(units).collect();
        let points = bloom_points(&values, &scale, &angles, center);
        let emphasis = if ui.passes_filter(&layer.id) {
            Emphasis::Normal
        } else {
            Emphasis::Dimmed
        };
        scene.push(
            Shape::new(
                ShapeKind::Path(smooth_closed(&points, 1.0)),
                Role::Bloom,
                &layer.color,
            )
            .with_emphasis(emphasis),
        );
        if let Some(unit) = selected_unit {
            if let (Some(point), Some(value)) = (points.get(unit), values.get(unit)) {
                scene.push(
                    Shape::new(
                        ShapeKind::Circle {
                            center: *point,
                            radius: MARKER_RADIUS,
                        },
                        Role::Marker,
                        &layer.color,
                    )
                    .with_emphasis(Emphasis::Highlighted),
                );
                scene.label(
                    Label::new(
                        Point::new(point.x + LABEL_GAP + MARKER_RADIUS, point.y),
                        format!("{} {}", layer.label, format_value(*value)),
                        Anchor::Start,
                    )
                    .with_emphasis(Emphasis::Highlighted),
                );
            }
        }
    }

    for (unit, label) in unit_labels.iter().enumerate() {
        let emphasis = if selected_unit == Some(unit) {
            Emphasis::Highlighted
        } else {
            Emphasis::Normal
        };
        scene.label(
            Label::new(
                polar(center, radius * 0.92, angles.center_angle(unit)),
                label,
                Anchor::Middle,
            )
            .with_emphasis(emphasis),
        );
    }

    // Each wedge is centered on its spoke.
    scene.regions = wedge_regions(&ArcBuilder::new(units, center), 0.0, radius);
    scene
}

/// Records placed in sector (category) and ring cells around a center.
///
/// Each entity's ring comes from its `ring` attribute; entities whose
/// category or ring is not listed are left out.
pub fn radial_scatter(
    entities: &[CategoricalEntity],
    sectors: &[String],
    rings: &[String],
    frame: &ChartFrame,
    ui: &UiState,
) -> Scene {
    if entities.is_empty() || sectors.is_empty() || rings.is_empty() {
        return blank(frame, "scatter");
    }

    let mut scene = Scene::empty(frame);
    let center = frame.center();
    let radius = frame.radius() * 0.9;
    let angles = AngularScale::new(sectors.len());

    for ring in 1..=rings.len() {
        scene.push(Shape::new(
            ShapeKind::Circle {
                center,
                radius: radius * ring as f64 / rings.len() as f64,
            },
            Role::Grid,
            TONE_MUTED,
        ));
    }
    for (index, sector) in sectors.iter().enumerate() {
        let edge = angles.angle(index as f64);
        scene.push(Shape::new(
            ShapeKind::Path(polyline(&[center, polar(center, radius, edge)])),
            Role::Axis,
            TONE_MUTED,
        ));
        scene.label(Label::new(
            polar(center, radius + LABEL_GAP * 2.0, angles.center_angle(index)),
            sector,
            Anchor::Middle,
        ));
    }
    for (index, ring) in rings.iter().enumerate() {
        let inner = radius * index as f64 / rings.len() as f64;
        scene.label(Label::new(
            Point::new(center.x + LABEL_GAP / 2.0, center.y - inner - LABEL_GAP),
            ring,
            Anchor::Start,
        ));
    }

    let dot_radius = (radius * 0.035).max(DOT_RADIUS);
    let mut regions = Vec::new();
    for entity in entities {
        let Some(sector) = sectors.iter().position(|name| *name == entity.category) else {
            continue;
        };
        let Some(ring) = entity
            .attributes
            .get("ring")
            .and_then(|ring| rings.iter().position(|name| name == ring))
        else {
            continue;
        };
        let (angle, fraction) =
            scatter_position(&entity.name, sector, sectors.len(), ring, rings.len());
        let at = polar(center, radius * fraction, angle);
        let key = HitKey::new(&entity.id);
        let emphasis = if ui.passes_filter(&entity.category) {
            ui.emphasis_for(&key)
        } else {
            Emphasis::Dimmed
        };
        scene.push(
            Shape::new(
                ShapeKind::Circle {
                    center: at,
                    radius: dot_radius,
                },
                Role::Dot,
                &entity.color,
            )
            .with_emphasis(emphasis),
        );
        if emphasis == Emphasis::Highlighted {
            scene.label(
                Label::new(
                    Point::new(at.x, at.y - dot_radius - LABEL_GAP),
                    &entity.name,
                    Anchor::Middle,
                )
                .with_emphasis(Emphasis::Highlighted),
            );
        }
        let reach = dot_radius * 3.0;
        regions.push(HitRegion {
            key,
            shape: HitShape::Rect {
                x: at.x - reach,
                y: at.y - reach,
                width: reach * 2.0,
                height: reach * 2.0,
            },
        });
    }
    scene.regions = regions;
    scene
}
