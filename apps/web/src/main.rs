mod animation;
mod chart_view;
mod dom_watch;
mod leaflet;
mod page_view;
mod pages;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;

use page_view::PageView;

fn main() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(root) = document.get_element_by_id("app") else {
        web_sys::console::error_1(&"Missing #app element".into());
        return;
    };

    let pages = pages::load_bundle();
    let current: RefCell<Option<PageView>> = RefCell::new(None);

    let show: Rc<dyn Fn()> = Rc::new({
        let window = window.clone();
        move || {
            let hash = window.location().hash().unwrap_or_default();
            // Tear the old page down before building the next one
            current.borrow_mut().take();
            if let Some(page) = pages::pick(&pages, &hash) {
                *current.borrow_mut() = Some(PageView::mount(&document, &root, page, &pages));
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
        }
    });

    show();
    EventListener::new(&window, "hashchange", move |_event| show()).forget();
}
