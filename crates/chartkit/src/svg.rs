//! Scene to SVG. The same attribute lists feed the standalone document
//! writer here and the live DOM builder in the web front-end.

use std::fmt::Write;

use crate::path::format_number;
use crate::scene::{Emphasis, Label, Scene, Shape, ShapeKind, TONE_MUTED};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

const MUTED_COLOR: &str = "#94a3b8";
const LABEL_COLOR: &str = "#334155";

/// Tones are author color tokens used verbatim; only the chrome tone is
/// mapped here.
pub fn tone_color(tone: &str) -> &str {
    if tone == TONE_MUTED {
        MUTED_COLOR
    } else {
        tone
    }
}

const fn opacity(emphasis: Emphasis) -> &'static str {
    match emphasis {
        Emphasis::Normal => "0.9",
        Emphasis::Highlighted => "1",
        Emphasis::Dimmed => "0.2",
    }
}

const fn stroke_width(emphasis: Emphasis) -> &'static str {
    match emphasis {
        Emphasis::Highlighted => "3",
        Emphasis::Normal | Emphasis::Dimmed => "1.5",
    }
}

/// Element name and attributes for one shape.
pub fn shape_element(shape: &Shape) -> (&'static str, Vec<(&'static str, String)>) {
    let color = tone_color(&shape.tone).to_string();
    let mut attributes = match &shape.kind {
        ShapeKind::Path(path) => vec![("d", path.to_string())],
        ShapeKind::Rect {
            x,
            y,
            width,
            height,
        } => vec![
            ("x", format_number(*x)),
            ("y", format_number(*y)),
            ("width", format_number(width.max(0.0))),
            ("height", format_number(height.max(0.0))),
        ],
        ShapeKind::Circle { center, radius } => vec![
            ("cx", format_number(center.x)),
            ("cy", format_number(center.y)),
            ("r", format_number(radius.max(0.0))),
        ],
    };
    if shape.role.is_filled() {
        attributes.push(("fill", color));
        if shape.role == crate::scene::Role::Bloom {
            attributes.push(("fill-opacity", "0.35".to_string()));
        }
    } else {
        attributes.push(("fill", "none".to_string()));
        attributes.push(("stroke", color));
        attributes.push(("stroke-width", stroke_width(shape.emphasis).to_string()));
    }
    attributes.push(("opacity", opacity(shape.emphasis).to_string()));
    attributes.push(("data-role", shape.role.as_str().to_string()));
    attributes.push(("data-emphasis", shape.emphasis.as_str().to_string()));

    let tag = match shape.kind {
        ShapeKind::Path(_) => "path",
        ShapeKind::Rect { .. } => "rect",
        ShapeKind::Circle { .. } => "circle",
    };
    (tag, attributes)
}

pub fn label_attributes(label: &Label) -> Vec<(&'static str, String)> {
    vec![
        ("x", format_number(label.at.x)),
        ("y", format_number(label.at.y)),
        ("text-anchor", label.anchor.as_str().to_string()),
        ("dominant-baseline", "middle".to_string()),
        ("font-size", "11".to_string()),
        ("fill", LABEL_COLOR.to_string()),
        ("opacity", opacity(label.emphasis).to_string()),
        ("data-emphasis", label.emphasis.as_str().to_string()),
    ]
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn write_element(out: &mut String, tag: &str, attributes: &[(&'static str, String)]) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
    out.push_str("/>\n");
}

/// Standalone SVG document for `scene`, hit regions included as
/// transparent `data-key` paths.
pub fn render(scene: &Scene) -> String {
    let mut out = String::new();
    let width = format_number(scene.width);
    let height = format_number(scene.height);
    let _ = writeln!(
        out,
        "<svg xmlns=\"{SVG_NS}\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\">"
    );

    out.push_str("<g class=\"marks\">\n");
    for shape in &scene.shapes {
        let (tag, attributes) = shape_element(shape);
        write_element(&mut out, tag, &attributes);
    }
    out.push_str("</g>\n<g class=\"labels\">\n");
    for label in &scene.labels {
        out.push_str("<text");
        for (name, value) in label_attributes(label) {
            let _ = write!(out, " {name}=\"{}\"", escape(&value));
        }
        let _ = writeln!(out, ">{}</text>", escape(&label.text));
    }
    out.push_str("</g>\n<g class=\"hits\">\n");
    for region in &scene.regions {
        write_element(
            &mut out,
            "path",
            &[
                ("d", region.shape.to_path().to_string()),
                ("fill", "transparent".to_string()),
                ("data-key", region.key.to_string()),
            ],
        );
    }
    out.push_str("</g>\n</svg>\n");
    out
}
