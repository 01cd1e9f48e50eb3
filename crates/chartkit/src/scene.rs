//! Renderer-neutral output of the chart builders.

use serde::{Deserialize, Serialize};

use crate::geom::{Insets, Point};
use crate::hit::HitRegion;
use crate::path::Path;

/// Tone used for axes, grid lines and other chrome; front-ends map it to
/// their muted color.
pub const TONE_MUTED: &str = "muted";

/// Drawing region handed to a chart builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub insets: Insets,
}

impl ChartFrame {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            insets: Insets::uniform(0.0),
        }
    }

    #[must_use]
    pub const fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn left(&self) -> f64 {
        self.insets.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.insets.right
    }

    pub fn top(&self) -> f64 {
        self.insets.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.insets.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left() + self.right()) / 2.0,
            (self.top() + self.bottom()) / 2.0,
        )
    }

    /// Largest radius that fits the plot area.
    pub fn radius(&self) -> f64 {
        ((self.right() - self.left()).min(self.bottom() - self.top()) / 2.0).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Path(Path),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Axis,
    Grid,
    Track,
    Line,
    Dot,
    Bar,
    Arc,
    Bloom,
    Marker,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Axis => "axis",
            Self::Grid => "grid",
            Self::Track => "track",
            Self::Line => "line",
            Self::Dot => "dot",
            Self::Bar => "bar",
            Self::Arc => "arc",
            Self::Bloom => "bloom",
            Self::Marker => "marker",
        }
    }

    /// Whether shapes with this role are filled rather than stroked.
    pub const fn is_filled(self) -> bool {
        matches!(self, Self::Dot | Self::Bar | Self::Bloom | Self::Marker)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    #[default]
    Normal,
    Highlighted,
    Dimmed,
}

impl Emphasis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Highlighted => "highlighted",
            Self::Dimmed => "dimmed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub role: Role,
    pub tone: String,
    pub emphasis: Emphasis,
}

impl Shape {
    pub fn new(kind: ShapeKind, role: Role, tone: impl Into<String>) -> Self {
        Self {
            kind,
            role,
            tone: tone.into(),
            emphasis: Emphasis::Normal,
        }
    }

    #[must_use]
    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub at: Point,
    pub text: String,
    pub anchor: Anchor,
    pub emphasis: Emphasis,
}

impl Label {
    pub fn new(at: Point, text: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            at,
            text: text.into(),
            anchor,
            emphasis: Emphasis::Normal,
        }
    }

    #[must_use]
    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }
}

/// Everything a front-end needs to paint one chart and route pointer
/// events back into its UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
    pub labels: Vec<Label>,
    pub regions: Vec<HitRegion>,
}

impl Scene {
    pub const fn empty(frame: &ChartFrame) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            shapes: Vec::new(),
            labels: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// A scene with nothing drawn, the fallback for malformed input.
    pub fn is_blank(&self) -> bool {
        self.shapes.is_empty() && self.labels.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn label(&mut self, label: Label) {
        self.labels.push(label);
    }

    pub fn shapes_with_role(&self, role: Role) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().filter(move |shape| shape.role == role)
    }
}
