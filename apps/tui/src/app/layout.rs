//! Row layout of a page inside the scrolling viewport.

use chartkit::{PageDocument, Section};

/// Rows given to a chart inside its section.
pub const CHART_ROWS: u16 = 16;
/// Border plus horizontal padding on each side of a section.
const FRAME_COLS: u16 = 4;
/// Top and bottom border.
const FRAME_ROWS: u16 = 2;
/// Blank rows between sections.
pub const SECTION_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    pub const fn bottom(self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

/// Rows `text` occupies when greedily word-wrapped at `width` columns.
pub fn wrapped_lines(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut lines = 0_u16;
    let mut current = 0_usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current == 0 {
            lines = lines.saturating_add(1);
            current = len;
        } else if current + 1 + len <= width {
            current += 1 + len;
        } else {
            lines = lines.saturating_add(1);
            current = len;
        }
        while current > width {
            lines = lines.saturating_add(1);
            current -= width;
        }
    }
    lines
}

pub fn body_rows(section: &Section, width: u16) -> u16 {
    let text_width = width.saturating_sub(FRAME_COLS);
    let paragraphs = u16::try_from(section.body.len()).unwrap_or(u16::MAX);
    section
        .body
        .iter()
        .map(|paragraph| wrapped_lines(paragraph, text_width))
        .fold(0_u16, u16::saturating_add)
        // one blank row between paragraphs
        .saturating_add(paragraphs.saturating_sub(1))
}

pub fn section_height(section: &Section, width: u16) -> u16 {
    let chart = if section.chart.is_some() { CHART_ROWS } else { 0 };
    body_rows(section, width)
        .saturating_add(chart)
        .saturating_add(FRAME_ROWS)
        .max(FRAME_ROWS + 1)
}

/// Stacked spans for every section of `page` at the given width.
pub fn section_spans(page: &PageDocument, width: u16) -> Vec<SectionSpan> {
    let mut top = 0_u16;
    page.sections
        .iter()
        .map(|section| {
            let span = SectionSpan {
                top,
                height: section_height(section, width),
            };
            top = span.bottom().saturating_add(SECTION_GAP);
            span
        })
        .collect()
}

/// Largest scroll offset that still fills the viewport.
pub fn max_scroll(spans: &[SectionSpan], viewport_rows: u16) -> u16 {
    spans
        .last()
        .map_or(0, |span| span.bottom().saturating_sub(viewport_rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(body: &[&str], chart: bool) -> Section {
        let chart = chart.then(|| chartkit::ChartSpec::Bar {
            entities: Vec::new(),
        });
        Section {
            id: "s".to_string(),
            heading: "S".to_string(),
            body: body.iter().map(ToString::to_string).collect(),
            chart,
        }
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrapped_lines("", 10), 0);
        assert_eq!(wrapped_lines("one two three", 20), 1);
        assert_eq!(wrapped_lines("one two three", 7), 2);
        assert_eq!(wrapped_lines("abcdefghijkl", 5), 3);
    }

    #[test]
    fn chart_sections_reserve_canvas_rows() {
        let prose = section(&["short"], false);
        let chart = section(&["short"], true);
        assert_eq!(section_height(&prose, 40), 3);
        assert_eq!(section_height(&chart, 40), 3 + CHART_ROWS);
    }

    #[test]
    fn paragraphs_are_separated() {
        let two = section(&["a", "b"], false);
        assert_eq!(body_rows(&two, 40), 3);
    }

    #[test]
    fn max_scroll_stops_at_the_last_section() {
        let spans = [
            SectionSpan { top: 0, height: 10 },
            SectionSpan { top: 11, height: 20 },
        ];
        assert_eq!(max_scroll(&spans, 12), 19);
        assert_eq!(max_scroll(&spans, 80), 0);
        assert_eq!(max_scroll(&[], 10), 0);
    }
}
