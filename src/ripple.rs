#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const ACHIEVEMENT_CARD_SELECTOR: &str = ".achievement-card";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const RIPPLE_CLASS: &str = "ripple";

#[cfg(target_arch = "wasm32")]
pub use browser::AchievementRipples;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::FxConfig;
    use crate::dom::{self, DetachOnDrop};
    use crate::error::DomError;
    use crate::logging::{log_event, LogLevel};
    use crate::schedule::{sleep, TaskSet};
    use gloo_events::EventListener;
    use std::rc::Rc;
    use web_sys::HtmlElement;

    pub struct AchievementRipples {
        listeners: Vec<EventListener>,
        ripples: Rc<TaskSet>,
    }

    impl AchievementRipples {
        pub fn install(config: &FxConfig) -> Self {
            let ripples = Rc::new(TaskSet::default());
            let listeners = dom::query_all(ACHIEVEMENT_CARD_SELECTOR)
                .into_iter()
                .map(|card| on_hover(card, *config, ripples.clone()))
                .collect();

            Self { listeners, ripples }
        }

        pub fn cards(&self) -> usize {
            self.listeners.len()
        }
    }

    impl Drop for AchievementRipples {
        fn drop(&mut self) {
            self.ripples.cancel_all();
        }
    }

    fn on_hover(card: HtmlElement, config: FxConfig, ripples: Rc<TaskSet>) -> EventListener {
        let target = card.clone();
        EventListener::new(&target, "mouseenter", move |_| {
            let ripple = match spawn_ripple(&card) {
                Ok(ripple) => ripple,
                Err(err) => {
                    log_event(
                        &config,
                        LogLevel::Debug,
                        "effect_failed",
                        serde_json::json!({ "effect": "achievement_ripple", "error": err.to_string() }),
                    );
                    return;
                }
            };

            let lifetime_ms = config.ripple_lifetime_ms;
            ripples.spawn(async move {
                sleep(lifetime_ms).await;
                drop(ripple);
            });
        })
    }

    fn spawn_ripple(card: &HtmlElement) -> Result<DetachOnDrop, DomError> {
        let document = dom::document()?;
        let ripple = dom::create_div(&document, RIPPLE_CLASS)?;
        dom::set_styles(&ripple, &[("left", "50%"), ("top", "50%")])?;
        dom::set_style(card, "position", "relative");
        dom::append(card, &ripple)?;
        Ok(DetachOnDrop(ripple))
    }
}
