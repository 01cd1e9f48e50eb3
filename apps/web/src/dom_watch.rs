use chartkit::reveal::ViewportWatch;
use js_sys::Array;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Browser `IntersectionObserver` on one element. Every reported
/// intersection ratio is handed to `sink`.
pub struct DomWatch {
    target: Element,
    sink: std::rc::Rc<dyn Fn(f64)>,
    observer: Option<IntersectionObserver>,
    callback: Option<EntriesCallback>,
}

impl DomWatch {
    pub fn new(target: Element, sink: impl Fn(f64) + 'static) -> Self {
        Self {
            target,
            sink: std::rc::Rc::new(sink),
            observer: None,
            callback: None,
        }
    }
}

impl ViewportWatch for DomWatch {
    fn observe(&mut self, threshold: f64) {
        let sink = self.sink.clone();
        let callback: EntriesCallback = Closure::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    sink(entry.intersection_ratio());
                }
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&self.target);
                self.observer = Some(observer);
                self.callback = Some(callback);
            }
            Err(error) => {
                web_sys::console::warn_2(&"IntersectionObserver unavailable".into(), &error);
            }
        }
    }

    fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        // Dropping the closure while it is running (reveal from inside the
        // callback) is deferred by wasm-bindgen until the call returns.
        self.callback = None;
    }
}
