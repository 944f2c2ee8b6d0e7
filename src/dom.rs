use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions};

use crate::error::DomError;

pub fn document() -> Result<Document, DomError> {
    window().ok_or(DomError::NoWindow)?.document().ok_or(DomError::NoDocument)
}

pub fn viewport_height() -> f64 {
    window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0)
}

pub fn scroll_top() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Every element under `document` matching `selector`, in document order.
/// An invalid selector yields an empty list.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Ok(document) = document() else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query(selector: &str) -> Option<HtmlElement> {
    document()
        .ok()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn query_within(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn create_div(document: &Document, class_name: &str) -> Result<HtmlElement, DomError> {
    let element = document
        .create_element("div")
        .map_err(|err| DomError::js("create div", err))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Js {
            context: "create div",
            message: "created node is not an HtmlElement".to_string(),
        })?;
    element.set_class_name(class_name);
    Ok(element)
}

pub fn set_styles(element: &HtmlElement, declarations: &[(&str, &str)]) -> Result<(), DomError> {
    let style = element.style();
    for (property, value) in declarations {
        style
            .set_property(property, value)
            .map_err(|err| DomError::js("set style", err))?;
    }
    Ok(())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn append(parent: &Element, child: &Element) -> Result<(), DomError> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|err| DomError::js("append child", err))
}

pub fn smooth_scroll_window_to(top: f64) {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_with_scroll_to_options(&options);
}

pub fn smooth_scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Removes the wrapped element from the document when dropped.
pub struct DetachOnDrop(pub HtmlElement);

impl DetachOnDrop {
    pub fn element(&self) -> &HtmlElement {
        &self.0
    }
}

impl Drop for DetachOnDrop {
    fn drop(&mut self) {
        self.0.remove();
    }
}
