use thiserror::Error;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Debug, Error)]
pub enum DomError {
    #[error("window is unavailable")]
    NoWindow,
    #[error("document is unavailable")]
    NoDocument,
    #[error("document has no {0} element")]
    MissingNode(&'static str),
    #[error("{context} failed: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}

impl DomError {
    #[cfg(target_arch = "wasm32")]
    pub fn js(context: &'static str, value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));

        Self::Js { context, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_failure_names_the_operation() {
        let error = DomError::Js {
            context: "append tooltip",
            message: "HierarchyRequestError".to_string(),
        };

        assert_eq!(error.to_string(), "append tooltip failed: HierarchyRequestError");
    }

    #[test]
    fn missing_node_reports_which_one() {
        assert_eq!(DomError::MissingNode("body").to_string(), "document has no body element");
    }
}
