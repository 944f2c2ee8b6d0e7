#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Element id an in-page link points at, or `None` for `#` and non-fragment
/// hrefs.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_destination(document_top: f64, offset: f64) -> f64 {
    document_top - offset
}

#[cfg(target_arch = "wasm32")]
pub use browser::AnchorRouter;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::FxConfig;
    use crate::dom;
    use gloo_events::{EventListener, EventListenerOptions};
    use web_sys::{window, HtmlElement};

    pub struct AnchorRouter {
        clicks: Vec<EventListener>,
    }

    impl AnchorRouter {
        pub fn install(config: &FxConfig) -> Self {
            let offset = config.anchor_offset_px;
            let clicks = dom::query_all(ANCHOR_SELECTOR)
                .into_iter()
                .map(|anchor| route_clicks(anchor, offset))
                .collect();

            Self { clicks }
        }

        pub fn routed(&self) -> usize {
            self.clicks.len()
        }
    }

    fn route_clicks(anchor: HtmlElement, offset: f64) -> EventListener {
        let target = anchor.clone();
        EventListener::new_with_options(
            &target,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(href) = anchor.get_attribute("href") else {
                    return;
                };
                let Some(id) = fragment_target(&href) else {
                    return;
                };
                let Some(element) = dom::document().ok().and_then(|d| d.get_element_by_id(id)) else {
                    return;
                };

                event.prevent_default();

                let document_top = element.get_bounding_client_rect().top() + dom::scroll_top();
                dom::smooth_scroll_window_to(scroll_destination(document_top, offset));

                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&href));
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_links_resolve_to_ids() {
        assert_eq!(fragment_target("#contact"), Some("contact"));
        assert_eq!(fragment_target("#experience-2024"), Some("experience-2024"));
    }

    #[test]
    fn bare_hash_and_external_links_are_ignored() {
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target(""), None);
        assert_eq!(fragment_target("/resume.pdf"), None);
        assert_eq!(fragment_target("https://example.com/#contact"), None);
    }

    #[test]
    fn destination_sits_above_target() {
        assert_eq!(scroll_destination(1_840.0, 50.0), 1_790.0);
        assert_eq!(scroll_destination(20.0, 50.0), -30.0);
    }
}
