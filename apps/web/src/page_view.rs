use std::cell::RefCell;
use std::rc::Rc;

use chartkit::map::{MapHandle, MapView};
use chartkit::{PageDocument, RevealObserver};
use web_sys::{console, Document, Element};

use crate::animation::RevealAnimation;
use crate::chart_view::ChartView;
use crate::dom_watch::DomWatch;
use crate::leaflet::LeafletBackend;

const REVEAL_THRESHOLD: f64 = 0.1;
const MAP_ZOOM: u8 = 6;
const MAP_FALLBACK: MapView = MapView {
    latitude: 0.0,
    longitude: 0.0,
    zoom: 2,
};

fn element(document: &Document, tag: &str, class: &str) -> Option<Element> {
    let element = document.create_element(tag).ok()?;
    if !class.is_empty() {
        let _ = element.set_attribute("class", class);
    }
    Some(element)
}

fn text(document: &Document, tag: &str, class: &str, content: &str) -> Option<Element> {
    let element = element(document, tag, class)?;
    element.set_text_content(Some(content));
    Some(element)
}

/// A section gated by a one-shot reveal.
struct SectionView {
    element: Element,
    reveal: RefCell<RevealObserver<DomWatch>>,
    animation: Rc<RevealAnimation>,
    _chart: Option<Rc<ChartView>>,
}

impl SectionView {
    fn mount(element: Element, chart: Option<Rc<ChartView>>) -> Rc<Self> {
        let section = Rc::new(Self {
            animation: RevealAnimation::new(element.clone()),
            element: element.clone(),
            reveal: RefCell::new(RevealObserver::new(REVEAL_THRESHOLD)),
            _chart: chart,
        });
        let weak = Rc::downgrade(&section);
        let watch = DomWatch::new(element, move |ratio| {
            if let Some(section) = weak.upgrade() {
                section.on_ratio(ratio);
            }
        });
        section.reveal.borrow_mut().mount(Some(watch));
        section
    }

    fn on_ratio(&self, ratio: f64) {
        let revealed = self
            .reveal
            .try_borrow_mut()
            .is_ok_and(|mut reveal| reveal.on_intersection(ratio));
        if revealed {
            let _ = self.element.class_list().add_1("is-revealed");
            self.animation.start();
        }
    }
}

/// Everything one page put into the document. Dropping it disconnects the
/// remaining observers, releases the map and clears the root.
pub struct PageView {
    root: Element,
    sections: Vec<Rc<SectionView>>,
    map: Option<MapHandle<LeafletBackend>>,
}

impl PageView {
    pub fn mount(document: &Document, root: &Element, page: &PageDocument, pages: &[PageDocument]) -> Self {
        root.set_inner_html("");
        let mut view = Self {
            root: root.clone(),
            sections: Vec::new(),
            map: None,
        };

        if let Some(header) = header(document, page, pages) {
            let _ = root.append_child(&header);
        }

        for section in &page.sections {
            let Some(container) = element(document, "section", "module-section") else {
                continue;
            };
            let _ = container.set_attribute("id", &section.id);
            if let Some(heading) = text(document, "h2", "", &section.heading) {
                let _ = container.append_child(&heading);
            }
            for paragraph in &section.body {
                if let Some(paragraph) = text(document, "p", "", paragraph) {
                    let _ = container.append_child(&paragraph);
                }
            }
            let chart = section.chart.clone().and_then(|chart| {
                let figure = element(document, "figure", "module-chart")?;
                let _ = container.append_child(&figure);
                ChartView::mount(document, &figure, chart)
            });
            let _ = root.append_child(&container);
            view.sections.push(SectionView::mount(container, chart));
        }

        if !page.places.is_empty() {
            view.mount_map(document, page);
        }
        view
    }

    fn mount_map(&mut self, document: &Document, page: &PageDocument) {
        let (Some(container), Some(canvas)) = (
            element(document, "section", "module-section module-places"),
            element(document, "div", "module-map"),
        ) else {
            return;
        };
        let id = format!("map-{}", page.slug);
        let _ = canvas.set_attribute("id", &id);
        if let Some(heading) = text(document, "h2", "", "Places") {
            let _ = container.append_child(&heading);
        }
        let _ = container.append_child(&canvas);
        let _ = self.root.append_child(&container);
        self.sections.push(SectionView::mount(container, None));

        let Some(backend) = LeafletBackend::from_window() else {
            console::warn_1(&"Leaflet not loaded; skipping map".into());
            return;
        };
        let view = MapView::centered_on(&page.places, MAP_ZOOM, MAP_FALLBACK);
        match MapHandle::mount(backend, id, view) {
            Ok(mut map) => {
                if let Err(error) = map.sync(&page.places) {
                    console::warn_1(&format!("Failed to place markers: {error}").into());
                }
                self.map = Some(map);
            }
            Err(error) => console::warn_1(&format!("Failed to create map: {error}").into()),
        }
    }
}

impl Drop for PageView {
    fn drop(&mut self) {
        self.map.take();
        self.sections.clear();
        self.root.set_inner_html("");
    }
}

fn header(document: &Document, page: &PageDocument, pages: &[PageDocument]) -> Option<Element> {
    let header = element(document, "header", "module-header")?;
    if !page.kicker.is_empty() {
        let kicker: Element = text(document, "p", "module-kicker", &page.kicker)?;
        let _ = header.append_child(&kicker);
    }
    let title: Element = text(document, "h1", "", &page.title)?;
    let _ = header.append_child(&title);

    let nav = element(document, "nav", "module-nav")?;
    for other in pages {
        let link = text(document, "a", "", &other.title)?;
        let _ = link.set_attribute("href", &format!("#{}", other.slug));
        if other.slug == page.slug {
            let _ = link.set_attribute("aria-current", "page");
        }
        let _ = nav.append_child(&link);
    }
    let _ = header.append_child(&nav);
    Some(header)
}
