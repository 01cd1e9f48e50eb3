use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use chartkit::motion::{advance_reveal, MotionMode, RevealStyle};
use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use web_sys::Element;

pub fn prefers_reduced_motion() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(match_media) = Reflect::get(&window, &"matchMedia".into()) else {
        return false;
    };
    let Ok(match_media) = match_media.dyn_into::<Function>() else {
        return false;
    };
    let Ok(query) = match_media.call1(&window, &"(prefers-reduced-motion: reduce)".into()) else {
        return false;
    };
    Reflect::get(&query, &"matches".into())
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

/// Fade/slide-in of one revealed element, stepped once per animation frame.
pub struct RevealAnimation {
    element: Element,
    progress: Cell<f64>,
    last_tick: Cell<Option<f64>>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl RevealAnimation {
    /// Puts `element` in its hidden pose.
    pub fn new(element: Element) -> Rc<Self> {
        let _ = element.set_attribute("style", &RevealStyle::hidden().to_css());
        Rc::new(Self {
            element,
            progress: Cell::new(0.0),
            last_tick: Cell::new(None),
            frame: RefCell::new(None),
        })
    }

    pub fn start(self: &Rc<Self>) {
        if prefers_reduced_motion() {
            self.progress.set(1.0);
            self.apply();
            return;
        }
        self.schedule();
    }

    fn schedule(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let frame = request_animation_frame(move |timestamp_ms| {
            let Some(animation) = weak.upgrade() else {
                return;
            };
            animation.step(timestamp_ms / 1000.0);
        });
        *self.frame.borrow_mut() = Some(frame);
    }

    fn step(self: &Rc<Self>, now_seconds: f64) {
        let (progress, tick) = advance_reveal(
            self.progress.get(),
            self.last_tick.get(),
            now_seconds,
            MotionMode::Running,
        );
        self.progress.set(progress);
        self.last_tick.set(tick);
        self.apply();
        if progress < 1.0 {
            self.schedule();
        } else {
            self.frame.borrow_mut().take();
        }
    }

    fn apply(&self) {
        let style = if self.progress.get() >= 1.0 {
            RevealStyle::visible()
        } else {
            RevealStyle::at(self.progress.get())
        };
        let _ = self.element.set_attribute("style", &style.to_css());
    }
}
