use std::sync::Mutex;
use std::time::{Duration, Instant};

use chartkit::motion::{advance_reveal, MotionMode, RevealStyle};
use chartkit::reveal::{visible_ratio, RevealObserver, ViewportWatch};
use chartkit::{ChartSpec, HitKey, PageDocument, UiEvent, UiState};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::layout::Rect;
use ratatui::style::Color;
use tachyonfx::{fx, Effect, Interpolation};
use tracing::debug;

use crate::app::layout::{max_scroll, section_spans, SectionSpan};
use crate::app::picker::Picker;
use crate::config::AppConfig;
use crate::pages::initial_page;
use crate::ui::widgets::scene_canvas::chart_frame;

/// Reveal fade length, matching the browser transition.
const REVEAL_FADE_MS: u32 = 700;
/// Logical pixels per terminal row when converting the slide-in offset.
const PX_PER_ROW: f64 = 8.0;

/// Terminal stand-in for an intersection observer. The event loop measures
/// each section against the viewport and only reports to connected watches.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollWatch {
    connected: bool,
    threshold: f64,
}

impl ScrollWatch {
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl ViewportWatch for ScrollWatch {
    fn observe(&mut self, threshold: f64) {
        self.connected = true;
        self.threshold = threshold;
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }
}

/// Per-section view state: the one-shot reveal, the chart's selection and
/// the fade that plays once revealed.
pub struct SectionView {
    pub reveal: RevealObserver<ScrollWatch>,
    pub ui: UiState,
    /// Hit region reached with Tab, as an index into the scene's regions.
    pub cursor: Option<usize>,
    pub progress: f64,
    last_motion_tick: Option<f64>,
    pub fx: Mutex<Option<Effect>>,
}

impl std::fmt::Debug for SectionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionView")
            .field("reveal", &self.reveal)
            .field("ui", &self.ui)
            .field("cursor", &self.cursor)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl SectionView {
    pub fn new(threshold: f64) -> Self {
        let mut reveal = RevealObserver::new(threshold);
        reveal.mount(Some(ScrollWatch::default()));
        Self {
            reveal,
            ui: UiState::default(),
            cursor: None,
            progress: 0.0,
            last_motion_tick: None,
            fx: Mutex::new(None),
        }
    }

    pub fn is_watching(&self) -> bool {
        self.reveal.watch().is_some_and(ScrollWatch::is_connected)
    }

    fn start_fade(&self) {
        if let Ok(mut slot) = self.fx.lock() {
            *slot = Some(fx::fade_from_fg(
                Color::Black,
                (REVEAL_FADE_MS, Interpolation::CubicOut),
            ));
        }
    }

    /// Rows the content still sits below its resting place.
    pub fn slide_rows(&self) -> u16 {
        if !self.reveal.is_revealed() {
            return 0;
        }
        (RevealStyle::at(self.progress).offset_y / PX_PER_ROW).round() as u16
    }
}

/// Size of the scrolling content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 20,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub pages: Vec<PageDocument>,
    pub page_index: usize,
    pub sections: Vec<SectionView>,
    pub scroll: u16,
    /// Section receiving chart keys.
    pub focused: usize,
    pub threshold: f64,
    pub motion: MotionMode,
    pub show_help: bool,
    pub picker: Option<Picker>,
    pub status_message: String,
    pub viewport: Viewport,
    /// Set once the terminal has reported its size; reveals wait for it.
    viewport_measured: bool,
    pub started: Instant,
    pub last_frame: Instant,
    pub last_tick: Duration,
}

impl App {
    pub fn new(pages: Vec<PageDocument>, config: &AppConfig) -> Result<Self> {
        if pages.is_empty() {
            return Err(eyre!("no pages to show"));
        }
        let page_index = initial_page(&pages, config.page.as_deref())?;
        let now = Instant::now();
        let mut app = Self {
            running: true,
            pages,
            page_index,
            sections: Vec::new(),
            scroll: 0,
            focused: 0,
            threshold: config.reveal_threshold,
            motion: MotionMode::Running,
            show_help: false,
            picker: None,
            status_message: String::new(),
            viewport: Viewport::default(),
            viewport_measured: false,
            started: now,
            last_frame: now,
            last_tick: Duration::ZERO,
        };
        app.open_page(page_index);
        Ok(app)
    }

    pub fn page(&self) -> &PageDocument {
        &self.pages[self.page_index]
    }

    /// Replaces the section views; dropping the old ones disconnects any
    /// watch that never fired.
    pub fn open_page(&mut self, index: usize) {
        let Some(page) = self.pages.get(index) else {
            return;
        };
        self.page_index = index;
        self.sections = page
            .sections
            .iter()
            .map(|_| SectionView::new(self.threshold))
            .collect();
        self.scroll = 0;
        self.focused = page
            .sections
            .iter()
            .position(|section| section.chart.is_some())
            .unwrap_or(0);
        self.status_message = format!("Opened {}", page.title);
        debug!(page = %page.slug, sections = self.sections.len(), "page opened");
        self.update_reveals();
    }

    pub fn spans(&self) -> Vec<SectionSpan> {
        section_spans(self.page(), self.viewport.width)
    }

    pub fn set_viewport(&mut self, area: Rect) {
        let viewport = Viewport {
            width: area.width,
            height: area.height,
        };
        if viewport != self.viewport {
            self.viewport = viewport;
            self.scroll = self.scroll.min(max_scroll(&self.spans(), viewport.height));
        }
        self.viewport_measured = true;
    }

    pub const fn viewport_measured(&self) -> bool {
        self.viewport_measured
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let limit = i32::from(max_scroll(&self.spans(), self.viewport.height));
        let next = (i32::from(self.scroll) + delta).clamp(0, limit);
        self.scroll = u16::try_from(next).unwrap_or(0);
        self.update_reveals();
    }

    pub fn scroll_to(&mut self, row: u16) {
        self.scroll = row.min(max_scroll(&self.spans(), self.viewport.height));
        self.update_reveals();
    }

    /// Reports the current visible ratio of every still-watched section.
    pub fn update_reveals(&mut self) {
        if !self.viewport_measured {
            return;
        }
        let spans = self.spans();
        let view_start = f64::from(self.scroll);
        let view_len = f64::from(self.viewport.height);
        for (index, (view, span)) in self.sections.iter_mut().zip(spans).enumerate() {
            if !view.is_watching() {
                continue;
            }
            let ratio = visible_ratio(
                f64::from(span.top),
                f64::from(span.height),
                view_start,
                view_len,
            );
            if view.reveal.on_intersection(ratio) {
                debug!(section = index, ratio, "section revealed");
                view.start_fade();
            }
        }
    }

    /// Advances frame timing and the slide-in of revealed sections.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.last_tick = match self.motion {
            MotionMode::Running => delta,
            MotionMode::Paused => Duration::ZERO,
        };

        let seconds = now.duration_since(self.started).as_secs_f64();
        for view in &mut self.sections {
            if !view.reveal.is_revealed() || view.progress >= 1.0 {
                continue;
            }
            let (progress, tick) =
                advance_reveal(view.progress, view.last_motion_tick, seconds, self.motion);
            view.progress = progress;
            view.last_motion_tick = tick;
        }
    }

    pub fn toggle_motion(&mut self) {
        self.motion = match self.motion {
            MotionMode::Running => MotionMode::Paused,
            MotionMode::Paused => MotionMode::Running,
        };
        self.status_message = match self.motion {
            MotionMode::Running => "Animation running".to_string(),
            MotionMode::Paused => "Animation paused".to_string(),
        };
    }

    pub fn focused_chart(&self) -> Option<&ChartSpec> {
        self.page()
            .sections
            .get(self.focused)
            .and_then(|section| section.chart.as_ref())
    }

    /// Moves focus to the next (or previous) chart section and scrolls it
    /// into view.
    pub fn focus_chart(&mut self, forward: bool) {
        let charts: Vec<usize> = self
            .page()
            .sections
            .iter()
            .enumerate()
            .filter(|(_, section)| section.chart.is_some())
            .map(|(index, _)| index)
            .collect();
        if charts.is_empty() {
            return;
        }
        let position = charts.iter().position(|index| *index == self.focused);
        let next = match (position, forward) {
            (None, _) => 0,
            (Some(current), true) => (current + 1) % charts.len(),
            (Some(current), false) => (current + charts.len() - 1) % charts.len(),
        };
        self.focused = charts[next];
        if let Some(span) = self.spans().get(self.focused).copied() {
            self.scroll_to(span.top);
        }
    }

    /// Applies `event` to the focused chart's selection state.
    pub fn chart_event(&mut self, event: UiEvent) {
        let Some(len) = self.focused_chart().map(ChartSpec::active_len) else {
            return;
        };
        if let Some(view) = self.sections.get_mut(self.focused) {
            if matches!(event, UiEvent::Filter(_) | UiEvent::Clear) {
                view.cursor = None;
            }
            view.ui.update(event, len);
        }
    }

    /// Region keys of the focused chart, in draw order.
    pub fn focused_keys(&self) -> Vec<HitKey> {
        let (Some(chart), Some(view)) = (self.focused_chart(), self.sections.get(self.focused))
        else {
            return Vec::new();
        };
        chart
            .scene(&chart_frame(), &view.ui)
            .regions
            .into_iter()
            .map(|region| region.key)
            .collect()
    }

    /// Tab stand-in for pointer hover: walks the focused chart's regions.
    pub fn cycle_region(&mut self, forward: bool) {
        let keys = self.focused_keys();
        if keys.is_empty() {
            return;
        }
        let Some(view) = self.sections.get_mut(self.focused) else {
            return;
        };
        let next = match (view.cursor, forward) {
            (None, true) => 0,
            (None, false) => keys.len() - 1,
            (Some(current), true) => (current + 1) % keys.len(),
            (Some(current), false) => (current + keys.len() - 1) % keys.len(),
        };
        view.cursor = Some(next);
        let key = keys[next].clone();
        self.chart_event(UiEvent::Hover(key));
    }

    /// Enter: pins (or unpins) the region under the cursor.
    pub fn pin_cursor(&mut self) {
        let keys = self.focused_keys();
        let Some(key) = self
            .sections
            .get(self.focused)
            .and_then(|view| view.cursor)
            .and_then(|cursor| keys.get(cursor).cloned())
        else {
            return;
        };
        self.chart_event(UiEvent::Click(key));
    }

    /// Cycles the focused chart's filter through its values, then back to
    /// showing everything.
    pub fn cycle_filter(&mut self) {
        let Some(filters) = self.focused_chart().map(ChartSpec::filters) else {
            return;
        };
        let current = self
            .sections
            .get(self.focused)
            .and_then(|view| view.ui.filter.clone());
        let next = match current {
            None => filters.first().cloned(),
            Some(value) => filters
                .iter()
                .position(|filter| *filter == value)
                .and_then(|index| filters.get(index + 1))
                .cloned(),
        };
        self.status_message = next
            .as_ref()
            .map_or_else(|| "Filter cleared".to_string(), |value| format!("Filter: {value}"));
        self.chart_event(UiEvent::Filter(next));
    }

    pub fn open_picker(&mut self) {
        self.picker = Some(Picker::default());
    }

    /// Opens the page highlighted in the picker and closes it.
    pub fn accept_picker(&mut self) {
        let choice = self
            .picker
            .as_ref()
            .and_then(|picker| picker.choice(&self.pages));
        self.picker = None;
        if let Some(index) = choice {
            self.open_page(index);
        }
    }
}
