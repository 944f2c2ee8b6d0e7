use std::cell::Cell;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const REVEAL_SELECTOR: &str = ".reveal";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const ACTIVE_CLASS: &str = "active";

/// Anything the reveal scan can inspect and flip on.
pub trait Revealable {
    /// Top edge relative to the viewport, in CSS pixels.
    fn viewport_top(&self) -> f64;
    fn is_active(&self) -> bool;
    fn activate(&self);
}

pub fn is_in_reveal_zone(viewport_top: f64, viewport_height: f64, offset: f64) -> bool {
    viewport_top < viewport_height - offset
}

/// Activates every item that has entered the reveal zone and returns how
/// many were newly activated. Activation is one-way.
pub fn reveal_pass<R: Revealable>(items: &[R], viewport_height: f64, offset: f64) -> usize {
    let mut activated = 0;
    for item in items {
        if item.is_active() {
            continue;
        }
        if is_in_reveal_zone(item.viewport_top(), viewport_height, offset) {
            item.activate();
            activated += 1;
        }
    }
    activated
}

/// Coalesces scroll events into at most one scan per rendered frame and
/// remembers the handle of the frame in flight.
#[derive(Default)]
pub struct FrameGate {
    pending: Cell<bool>,
    handle: Cell<Option<i32>>,
}

impl FrameGate {
    /// Returns true when the caller should request a frame.
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    /// Records the handle returned for the frame just requested.
    pub fn armed(&self, handle: i32) {
        self.handle.set(Some(handle));
    }

    pub fn complete(&self) {
        self.handle.set(None);
        self.pending.set(false);
    }

    /// Handle of a frame that was requested but has not run yet. The gate is
    /// idle afterwards.
    pub fn cancel(&self) -> Option<i32> {
        self.pending.set(false);
        self.handle.take()
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{RevealAnimator, ResizeRescan};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::FxConfig;
    use crate::dom;
    use gloo_events::EventListener;
    use gloo_timers::callback::Timeout;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{window, HtmlElement, Window};

    impl Revealable for HtmlElement {
        fn viewport_top(&self) -> f64 {
            self.get_bounding_client_rect().top()
        }

        fn is_active(&self) -> bool {
            self.class_list().contains(ACTIVE_CLASS)
        }

        fn activate(&self) {
            let _ = self.class_list().add_1(ACTIVE_CLASS);
        }
    }

    fn scan(items: &[HtmlElement], offset: f64) -> usize {
        reveal_pass(items, dom::viewport_height(), offset)
    }

    pub struct RevealAnimator {
        win: Window,
        gate: Rc<FrameGate>,
        _scroll: EventListener,
        _frame: Rc<Closure<dyn FnMut()>>,
        initially_revealed: usize,
        tracked: usize,
    }

    impl RevealAnimator {
        pub fn install(config: &FxConfig) -> Option<Self> {
            let win = window()?;
            let items = Rc::new(dom::query_all(REVEAL_SELECTOR));
            let offset = config.reveal_offset_px;
            let gate = Rc::new(FrameGate::default());

            let frame = {
                let items = items.clone();
                let gate = gate.clone();
                Rc::new(Closure::<dyn FnMut()>::new(move || {
                    scan(&items, offset);
                    gate.complete();
                }))
            };

            let initially_revealed = scan(&items, offset);

            let scroll = {
                let frame = frame.clone();
                let gate = gate.clone();
                let win_for_frame = win.clone();
                EventListener::new(&win, "scroll", move |_| {
                    if !gate.request() {
                        return;
                    }
                    match win_for_frame.request_animation_frame((*frame).as_ref().unchecked_ref()) {
                        Ok(handle) => gate.armed(handle),
                        Err(_) => gate.complete(),
                    }
                })
            };

            Some(Self {
                win,
                gate,
                _scroll: scroll,
                _frame: frame,
                initially_revealed,
                tracked: items.len(),
            })
        }

        pub fn tracked(&self) -> usize {
            self.tracked
        }

        pub fn initially_revealed(&self) -> usize {
            self.initially_revealed
        }
    }

    impl Drop for RevealAnimator {
        fn drop(&mut self) {
            // The frame closure is freed with `self`; the browser must not call it.
            if let Some(handle) = self.gate.cancel() {
                let _ = self.win.cancel_animation_frame(handle);
            }
        }
    }

    /// Re-runs the reveal scan once resizing has settled.
    pub struct ResizeRescan {
        _resize: EventListener,
        _pending: Rc<RefCell<Option<Timeout>>>,
    }

    impl ResizeRescan {
        pub fn install(config: &FxConfig) -> Option<Self> {
            let win = window()?;
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            let offset = config.reveal_offset_px;
            let debounce_ms = config.resize_debounce_ms;

            let resize = {
                let pending = pending.clone();
                EventListener::new(&win, "resize", move |_| {
                    let timeout = Timeout::new(debounce_ms, move || {
                        scan(&dom::query_all(REVEAL_SELECTOR), offset);
                    });
                    // Replacing drops the previous timeout, which clears it.
                    let previous = pending.borrow_mut().replace(timeout);
                    drop(previous);
                })
            };

            Some(Self {
                _resize: resize,
                _pending: pending,
            })
        }
    }
}
