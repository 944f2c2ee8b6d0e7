#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const TIMELINE_ITEM_SELECTOR: &str = ".timeline-item";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const TIMELINE_DOT_SELECTOR: &str = ".timeline-dot";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const ANIMATED_CLASS: &str = "animated";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const PULSE_ANIMATION: &str = "pulse 2s infinite";

pub trait PulseDot {
    fn is_animated(&self) -> bool;
    /// Starts the pulse and marks the dot as animated.
    fn start_pulse(&self);
}

/// Handles one intersection report for an item's dot. Returns true when the
/// pulse was started by this call.
pub fn on_intersection<D: PulseDot>(is_intersecting: bool, dot: Option<&D>) -> bool {
    match dot {
        Some(dot) if is_intersecting && !dot.is_animated() => {
            dot.start_pulse();
            true
        }
        _ => false,
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::TimelineObserver;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::FxConfig;
    use crate::dom;
    use crate::error::DomError;
    use js_sys::Array;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    impl PulseDot for HtmlElement {
        fn is_animated(&self) -> bool {
            self.class_list().contains(ANIMATED_CLASS)
        }

        fn start_pulse(&self) {
            dom::set_style(self, "animation", PULSE_ANIMATION);
            let _ = self.class_list().add_1(ANIMATED_CLASS);
        }
    }

    pub struct TimelineObserver {
        observer: IntersectionObserver,
        _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
        observed: usize,
    }

    impl TimelineObserver {
        pub fn install(config: &FxConfig) -> Result<Option<Self>, DomError> {
            let items = dom::query_all(TIMELINE_ITEM_SELECTOR);
            if items.is_empty() {
                return Ok(None);
            }

            let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                |entries: Array, _observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let dot = dom::query_within(&entry.target(), TIMELINE_DOT_SELECTOR);
                        on_intersection(entry.is_intersecting(), dot.as_ref());
                    }
                },
            );

            let options = IntersectionObserverInit::new();
            options.set_threshold(&JsValue::from_f64(config.timeline_threshold));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                    .map_err(|err| DomError::js("create intersection observer", err))?;

            for item in &items {
                observer.observe(item);
            }

            Ok(Some(Self {
                observer,
                _callback: callback,
                observed: items.len(),
            }))
        }

        pub fn observed(&self) -> usize {
            self.observed
        }
    }

    impl Drop for TimelineObserver {
        fn drop(&mut self) {
            self.observer.disconnect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeDot {
        animated: Cell<bool>,
        pulses_started: Cell<u32>,
    }

    impl PulseDot for FakeDot {
        fn is_animated(&self) -> bool {
            self.animated.get()
        }

        fn start_pulse(&self) {
            self.pulses_started.set(self.pulses_started.get() + 1);
            self.animated.set(true);
        }
    }

    #[test]
    fn pulse_starts_once_across_repeated_crossings() {
        let dot = FakeDot::default();
        let reports = [true, false, true, true, false, true];

        let started: Vec<bool> = reports
            .iter()
            .map(|&intersecting| on_intersection(intersecting, Some(&dot)))
            .collect();

        assert_eq!(started, vec![true, false, false, false, false, false]);
        assert_eq!(dot.pulses_started.get(), 1);
    }

    #[test]
    fn leaving_viewport_does_not_start_pulse() {
        let dot = FakeDot::default();

        assert!(!on_intersection(false, Some(&dot)));
        assert_eq!(dot.pulses_started.get(), 0);
    }

    #[test]
    fn item_without_dot_is_skipped() {
        assert!(!on_intersection::<FakeDot>(true, None));
    }
}
