/// Remembers the deepest scroll position seen so far.
#[derive(Debug, Default)]
pub struct DepthRatchet {
    deepest: u32,
}

impl DepthRatchet {
    /// Returns the new depth percentage when it strictly exceeds every
    /// earlier observation.
    pub fn observe(&mut self, scroll_top: f64, viewport_height: f64, document_height: f64) -> Option<u32> {
        let depth = depth_percent(scroll_top, viewport_height, document_height)?;
        if depth <= self.deepest {
            return None;
        }
        self.deepest = depth;
        Some(depth)
    }

    #[cfg(test)]
    pub fn deepest(&self) -> u32 {
        self.deepest
    }
}

pub fn depth_percent(scroll_top: f64, viewport_height: f64, document_height: f64) -> Option<u32> {
    if document_height <= 0.0 {
        return None;
    }
    let percent = ((scroll_top + viewport_height) / document_height * 100.0).floor();
    Some(percent.max(0.0) as u32)
}

pub fn dwell_seconds(started_at_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(started_at_ms) / 1_000
}

#[cfg(target_arch = "wasm32")]
pub use browser::PageMetrics;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::FxConfig;
    use crate::dom;
    use crate::logging::{log_event, now_unix_millis, LogLevel};
    use gloo_events::EventListener;
    use serde_json::json;
    use web_sys::window;

    pub struct PageMetrics {
        _scroll: EventListener,
        _unload: EventListener,
    }

    impl PageMetrics {
        pub fn install(config: &FxConfig) -> Option<Self> {
            let win = window()?;
            let started_at_ms = now_unix_millis();
            let mut ratchet = DepthRatchet::default();

            let scroll = {
                let config = *config;
                EventListener::new(&win, "scroll", move |_| {
                    let document_height = dom::document()
                        .ok()
                        .and_then(|d| d.document_element())
                        .map(|root| f64::from(root.scroll_height()))
                        .unwrap_or(0.0);
                    let observed = ratchet.observe(
                        dom::scroll_top(),
                        dom::viewport_height(),
                        document_height,
                    );

                    if let Some(depth) = observed {
                        log_event(&config, LogLevel::Info, "scroll_depth", json!({ "depth_percent": depth }));
                    }
                })
            };

            let unload = {
                let config = *config;
                EventListener::new(&win, "beforeunload", move |_| {
                    let seconds = dwell_seconds(started_at_ms, now_unix_millis());
                    log_event(&config, LogLevel::Info, "dwell_time", json!({ "seconds": seconds }));
                })
            };

            Some(Self {
                _scroll: scroll,
                _unload: unload,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_floored_percentage_of_document() {
        assert_eq!(depth_percent(0.0, 800.0, 3_200.0), Some(25));
        assert_eq!(depth_percent(1_199.0, 800.0, 3_200.0), Some(62));
        assert_eq!(depth_percent(2_400.0, 800.0, 3_200.0), Some(100));
    }

    #[test]
    fn empty_document_reports_nothing() {
        assert_eq!(depth_percent(0.0, 800.0, 0.0), None);
    }

    #[test]
    fn ratchet_only_reports_strict_increases() {
        let mut ratchet = DepthRatchet::default();

        assert_eq!(ratchet.observe(0.0, 800.0, 3_200.0), Some(25));
        assert_eq!(ratchet.observe(0.0, 800.0, 3_200.0), None);
        assert_eq!(ratchet.observe(800.0, 800.0, 3_200.0), Some(50));
        assert_eq!(ratchet.observe(400.0, 800.0, 3_200.0), None);
        assert_eq!(ratchet.observe(810.0, 800.0, 3_200.0), None);
        assert_eq!(ratchet.observe(2_400.0, 800.0, 3_200.0), Some(100));
        assert_eq!(ratchet.deepest(), 100);
    }

    #[test]
    fn dwell_time_is_whole_seconds() {
        assert_eq!(dwell_seconds(1_000, 4_999), 3);
        assert_eq!(dwell_seconds(1_000, 61_000), 60);
        assert_eq!(dwell_seconds(5_000, 1_000), 0);
    }
}
