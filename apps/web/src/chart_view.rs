use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chartkit::scene::ChartFrame;
use chartkit::svg::{label_attributes, shape_element, SVG_NS};
use chartkit::{ChartSpec, HitKey, Scene, UiEvent, UiState};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

const FRAME: ChartFrame = ChartFrame::new(720.0, 400.0);

fn svg_element(document: &Document, tag: &str) -> Option<Element> {
    document.create_element_ns(Some(SVG_NS), tag).ok()
}

fn set_attributes(element: &Element, attributes: &[(&str, String)]) {
    for (name, value) in attributes {
        let _ = element.set_attribute(name, value);
    }
}

/// Rebuilds `svg`'s children from `scene`.
pub fn paint(document: &Document, svg: &Element, scene: &Scene) {
    svg.set_inner_html("");
    let _ = svg.set_attribute(
        "viewBox",
        &format!("0 0 {} {}", scene.width, scene.height),
    );

    let (Some(marks), Some(labels), Some(hits)) = (
        svg_element(document, "g"),
        svg_element(document, "g"),
        svg_element(document, "g"),
    ) else {
        return;
    };
    let _ = marks.set_attribute("class", "marks");
    let _ = labels.set_attribute("class", "labels");
    let _ = hits.set_attribute("class", "hits");

    for shape in &scene.shapes {
        let (tag, attributes) = shape_element(shape);
        if let Some(element) = svg_element(document, tag) {
            set_attributes(&element, &attributes);
            let _ = marks.append_child(&element);
        }
    }
    for label in &scene.labels {
        if let Some(element) = svg_element(document, "text") {
            set_attributes(&element, &label_attributes(label));
            element.set_text_content(Some(&label.text));
            let _ = labels.append_child(&element);
        }
    }
    for region in &scene.regions {
        if let Some(element) = svg_element(document, "path") {
            set_attributes(
                &element,
                &[
                    ("d", region.shape.to_path().to_string()),
                    ("fill", "transparent".to_string()),
                    ("data-key", region.key.to_string()),
                ],
            );
            let _ = hits.append_child(&element);
        }
    }

    let _ = svg.append_child(&marks);
    let _ = svg.append_child(&labels);
    let _ = svg.append_child(&hits);
}

/// `data-key` of the hit target under a pointer event, if any.
fn event_key(event: &Event) -> Option<HitKey> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.get_attribute("data-key"))
        .map(HitKey::new)
}

/// One interactive chart: its definition, selection state and the listeners
/// attached to its `<svg>`. Hit targets are re-created on every paint, so
/// pointer events are delegated to the root.
pub struct ChartView {
    document: Document,
    svg: Element,
    chart: ChartSpec,
    ui: RefCell<UiState>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ChartView {
    pub fn mount(document: &Document, figure: &Element, chart: ChartSpec) -> Option<Rc<Self>> {
        let svg = svg_element(document, "svg")?;
        let _ = svg.set_attribute("class", &format!("chart chart-{}", chart.kind()));
        let _ = svg.set_attribute("role", "img");
        let _ = figure.set_attribute("tabindex", "0");
        let _ = figure.append_child(&svg);

        let view = Rc::new(Self {
            document: document.clone(),
            svg,
            chart,
            ui: RefCell::new(UiState::default()),
            listeners: RefCell::new(Vec::new()),
        });
        view.mount_filters(figure);
        view.listen(figure);
        view.render();
        Some(view)
    }

    fn render(&self) {
        let scene = self.chart.scene(&FRAME, &self.ui.borrow());
        paint(&self.document, &self.svg, &scene);
    }

    /// Applies a selection event, repainting only when the state changed.
    pub fn dispatch(&self, event: UiEvent) {
        let len = self.chart.active_len();
        let Ok(mut ui) = self.ui.try_borrow_mut() else {
            return;
        };
        let next = ui.clone().apply(event, len);
        if next == *ui {
            return;
        }
        *ui = next;
        drop(ui);
        self.render();
    }

    fn mount_filters(self: &Rc<Self>, figure: &Element) {
        let filters = self.chart.filters();
        if filters.len() < 2 {
            return;
        }
        let Ok(bar) = self.document.create_element("div") else {
            return;
        };
        let _ = bar.set_attribute("class", "chart-filters");
        let options = std::iter::once(None).chain(filters.into_iter().map(Some));
        for option in options {
            let Ok(button) = self.document.create_element("button") else {
                continue;
            };
            let _ = button.set_attribute("type", "button");
            button.set_text_content(Some(option.as_deref().unwrap_or("All")));
            let weak = Rc::downgrade(self);
            let listener = EventListener::new(&button, "click", move |_event: &Event| {
                if let Some(view) = weak.upgrade() {
                    view.dispatch(UiEvent::Filter(option.clone()));
                }
            });
            self.listeners.borrow_mut().push(listener);
            let _ = bar.append_child(&button);
        }
        let _ = figure.append_child(&bar);
    }

    fn listen(self: &Rc<Self>, figure: &Element) {
        let on = |target: &Element, name: &'static str, handler: fn(&Self, &Event)| {
            let weak: Weak<Self> = Rc::downgrade(self);
            EventListener::new(target, name, move |event: &Event| {
                if let Some(view) = weak.upgrade() {
                    handler(&view, event);
                }
            })
        };

        let listeners = [
            on(&self.svg, "mouseover", |view, event| match event_key(event) {
                Some(key) => view.dispatch(UiEvent::Hover(key)),
                None => view.dispatch(UiEvent::Leave),
            }),
            on(&self.svg, "mouseleave", |view, _| view.dispatch(UiEvent::Leave)),
            on(&self.svg, "click", |view, event| {
                if let Some(key) = event_key(event) {
                    view.dispatch(UiEvent::Click(key));
                }
            }),
            on(figure, "keydown", |view, event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                match event.key().as_str() {
                    "ArrowLeft" => view.dispatch(UiEvent::Step(-1)),
                    "ArrowRight" => view.dispatch(UiEvent::Step(1)),
                    "Escape" => view.dispatch(UiEvent::Clear),
                    _ => return,
                }
                event.prevent_default();
            }),
        ];
        self.listeners.borrow_mut().extend(listeners);
    }
}
