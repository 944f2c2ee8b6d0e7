use std::cell::RefCell;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const SKILL_TAG_SELECTOR: &str = ".skill-tag";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const TOOLTIP_CLASS: &str = "skill-tooltip";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const LEVEL_ATTRIBUTE: &str = "data-level";

const FLOAT_EVERY: usize = 3;
const FLOAT_STAGGER_SECONDS: f64 = 0.2;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const FLOAT_ANIMATION: &str = "float 4s ease-in-out infinite";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const FLOAT_START_DELAY_MS: u32 = 100;
const TOOLTIP_LIFT_PX: f64 = 30.0;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const RESTING_TRANSFORM: &str = "scale(1) rotate(0deg)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillLevel {
    Expert,
    Advanced,
    Other,
}

impl SkillLevel {
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("expert") => Self::Expert,
            Some("advanced") => Self::Advanced,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expert => "expert",
            Self::Advanced => "advanced",
            Self::Other => "familiar",
        }
    }

    pub fn hover_transform(self) -> Option<&'static str> {
        match self {
            Self::Expert => Some("scale(1.1) rotate(2deg)"),
            Self::Advanced => Some("scale(1.08) rotate(-1deg)"),
            Self::Other => None,
        }
    }

    pub fn glow_shadow(self) -> String {
        let color = match self {
            Self::Expert => "rgba(34, 197, 94, 0.4)",
            Self::Advanced | Self::Other => "rgba(59, 130, 246, 0.4)",
        };
        format!("0 0 20px {color}")
    }

    pub fn tooltip_label(self) -> &'static str {
        match self {
            Self::Expert => "Expert Level",
            Self::Advanced | Self::Other => "Advanced Level",
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn tooltip_background(self) -> &'static str {
        match self {
            Self::Expert => "linear-gradient(135deg, #22c55e, #16a34a)",
            Self::Advanced | Self::Other => "linear-gradient(135deg, #3b82f6, #2563eb)",
        }
    }
}

/// `animation-delay` for the tag at `index`, or `None` when the tag stays
/// still.
pub fn float_delay(index: usize) -> Option<String> {
    if index % FLOAT_EVERY != 0 {
        return None;
    }
    Some(format!("{:.1}s", index as f64 * FLOAT_STAGGER_SECONDS))
}

pub fn tooltip_position(tag_left: f64, tag_top: f64) -> (f64, f64) {
    (tag_left, tag_top - TOOLTIP_LIFT_PX)
}

/// Holds at most one occupant. Replacing hands back the previous occupant
/// so the caller decides how to tear it down.
pub struct TooltipSlot<T> {
    occupant: RefCell<Option<T>>,
}

impl<T> Default for TooltipSlot<T> {
    fn default() -> Self {
        Self {
            occupant: RefCell::new(None),
        }
    }
}

impl<T> TooltipSlot<T> {
    pub fn replace(&self, next: T) -> Option<T> {
        self.occupant.borrow_mut().replace(next)
    }

    pub fn take(&self) -> Option<T> {
        self.occupant.borrow_mut().take()
    }

    #[cfg(test)]
    pub fn is_occupied(&self) -> bool {
        self.occupant.borrow().is_some()
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{SkillFloat, SkillLevels};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::config::FxConfig;
    use crate::dom::{self, DetachOnDrop};
    use crate::error::DomError;
    use crate::logging::{log_event, LogLevel};
    use crate::schedule::{sleep, ScheduledTask};
    use gloo_events::{EventListener, EventListenerOptions};
    use gloo_timers::callback::Timeout;
    use std::rc::Rc;
    use web_sys::HtmlElement;

    /// Idle float on every third tag, started shortly after install.
    pub struct SkillFloat {
        _start: Option<Timeout>,
    }

    impl SkillFloat {
        pub fn install(config: &FxConfig) -> Self {
            if config.respect_reduced_motion && dom::prefers_reduced_motion() {
                return Self { _start: None };
            }

            let tags = dom::query_all(SKILL_TAG_SELECTOR);
            let start = Timeout::new(FLOAT_START_DELAY_MS, move || {
                for (index, tag) in tags.iter().enumerate() {
                    if let Some(delay) = float_delay(index) {
                        dom::set_style(tag, "animation", FLOAT_ANIMATION);
                        dom::set_style(tag, "animation-delay", &delay);
                    }
                }
            });

            Self {
                _start: Some(start),
            }
        }
    }

    struct LiveTooltip {
        _fade: ScheduledTask,
    }

    /// Hover transform and glow plus the click tooltip.
    pub struct SkillLevels {
        listeners: Vec<EventListener>,
        slot: Rc<TooltipSlot<LiveTooltip>>,
    }

    impl SkillLevels {
        pub fn install(config: &FxConfig) -> Self {
            let slot: Rc<TooltipSlot<LiveTooltip>> = Rc::new(TooltipSlot::default());
            let mut listeners = Vec::new();

            for tag in dom::query_all(SKILL_TAG_SELECTOR) {
                let level = SkillLevel::from_attribute(tag.get_attribute(LEVEL_ATTRIBUTE).as_deref());
                listeners.push(on_hover_enter(&tag, level));
                listeners.push(on_hover_leave(&tag));
                listeners.push(on_click(&tag, level, *config, slot.clone()));
            }

            Self { listeners, slot }
        }

        pub fn tags(&self) -> usize {
            self.listeners.len() / 3
        }
    }

    impl Drop for SkillLevels {
        fn drop(&mut self) {
            drop(self.slot.take());
        }
    }

    fn on_hover_enter(tag: &HtmlElement, level: SkillLevel) -> EventListener {
        let element = tag.clone();
        EventListener::new(tag, "mouseenter", move |_| {
            if let Some(transform) = level.hover_transform() {
                dom::set_style(&element, "transform", transform);
            }
            dom::set_style(&element, "box-shadow", &level.glow_shadow());
        })
    }

    fn on_hover_leave(tag: &HtmlElement) -> EventListener {
        let element = tag.clone();
        EventListener::new(tag, "mouseleave", move |_| {
            dom::set_style(&element, "transform", RESTING_TRANSFORM);
            let _ = element.style().remove_property("box-shadow");
        })
    }

    fn on_click(
        tag: &HtmlElement,
        level: SkillLevel,
        config: FxConfig,
        slot: Rc<TooltipSlot<LiveTooltip>>,
    ) -> EventListener {
        let element = tag.clone();
        EventListener::new_with_options(
            tag,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();

                for stale in dom::query_all(&format!(".{TOOLTIP_CLASS}")) {
                    stale.remove();
                }

                match show_tooltip(&element, level, &config) {
                    Ok(fade) => {
                        drop(slot.replace(LiveTooltip { _fade: fade }));
                    }
                    Err(err) => {
                        drop(slot.take());
                        log_event(
                            &config,
                            LogLevel::Debug,
                            "effect_failed",
                            serde_json::json!({ "effect": "skill_tooltip", "error": err.to_string() }),
                        );
                    }
                }
            },
        )
    }

    fn show_tooltip(
        tag: &HtmlElement,
        level: SkillLevel,
        config: &FxConfig,
    ) -> Result<ScheduledTask, DomError> {
        let document = dom::document()?;
        let body = document.body().ok_or(DomError::MissingNode("body"))?;
        let tooltip = dom::create_div(&document, TOOLTIP_CLASS)?;

        let rect = tag.get_bounding_client_rect();
        let (left, top) = tooltip_position(rect.left(), rect.top());
        let left = format!("{left}px");
        let top = format!("{top}px");

        dom::set_styles(
            &tooltip,
            &[
                ("position", "absolute"),
                ("background", level.tooltip_background()),
                ("color", "white"),
                ("padding", "4px 12px"),
                ("border-radius", "12px"),
                ("font-size", "12px"),
                ("font-weight", "600"),
                ("z-index", "1000"),
                ("animation", "fadeIn 0.3s ease"),
                ("left", left.as_str()),
                ("top", top.as_str()),
            ],
        )?;
        tooltip.set_text_content(Some(level.tooltip_label()));
        dom::append(&body, &tooltip)?;

        let visible_ms = config.tooltip_visible_ms;
        let fade_ms = config.tooltip_fade_ms;
        let tooltip = DetachOnDrop(tooltip);

        Ok(ScheduledTask::spawn(async move {
            sleep(visible_ms).await;
            dom::set_style(tooltip.element(), "animation", &format!("fadeOut {fade_ms}ms ease"));
            sleep(fade_ms).await;
            drop(tooltip);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn levels_parse_from_data_attribute() {
        assert_eq!(SkillLevel::from_attribute(Some("expert")), SkillLevel::Expert);
        assert_eq!(SkillLevel::from_attribute(Some("advanced")), SkillLevel::Advanced);
        assert_eq!(SkillLevel::from_attribute(Some("beginner")), SkillLevel::Other);
        assert_eq!(SkillLevel::from_attribute(None), SkillLevel::Other);
    }

    #[test]
    fn hover_transform_depends_on_level() {
        assert_eq!(SkillLevel::Expert.hover_transform(), Some("scale(1.1) rotate(2deg)"));
        assert_eq!(SkillLevel::Advanced.hover_transform(), Some("scale(1.08) rotate(-1deg)"));
        assert_eq!(SkillLevel::Other.hover_transform(), None);
    }

    #[test]
    fn glow_is_green_only_for_experts() {
        assert_eq!(SkillLevel::Expert.glow_shadow(), "0 0 20px rgba(34, 197, 94, 0.4)");
        assert_eq!(SkillLevel::Advanced.glow_shadow(), "0 0 20px rgba(59, 130, 246, 0.4)");
        assert_eq!(SkillLevel::Other.glow_shadow(), SkillLevel::Advanced.glow_shadow());
    }

    #[test]
    fn tooltip_labels_fall_back_to_advanced() {
        assert_eq!(SkillLevel::Expert.tooltip_label(), "Expert Level");
        assert_eq!(SkillLevel::Advanced.tooltip_label(), "Advanced Level");
        assert_eq!(SkillLevel::Other.tooltip_label(), "Advanced Level");
    }

    #[test]
    fn every_third_tag_floats_with_staggered_delay() {
        let delays: Vec<Option<String>> = (0..7).map(float_delay).collect();

        assert_eq!(delays[0].as_deref(), Some("0.0s"));
        assert_eq!(delays[1], None);
        assert_eq!(delays[2], None);
        assert_eq!(delays[3].as_deref(), Some("0.6s"));
        assert_eq!(delays[6].as_deref(), Some("1.2s"));
    }

    #[test]
    fn tooltip_sits_above_tag() {
        assert_eq!(tooltip_position(120.0, 400.0), (120.0, 370.0));
    }

    struct CountedTooltip {
        live: Rc<Cell<usize>>,
    }

    impl CountedTooltip {
        fn show(live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self { live: live.clone() }
        }
    }

    impl Drop for CountedTooltip {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn second_click_leaves_exactly_one_tooltip() {
        let live = Rc::new(Cell::new(0));
        let slot = TooltipSlot::default();

        assert!(slot.replace(CountedTooltip::show(&live)).is_none());
        assert_eq!(live.get(), 1);

        let previous = slot.replace(CountedTooltip::show(&live));
        assert!(previous.is_some());
        drop(previous);
        assert_eq!(live.get(), 1);
        assert!(slot.is_occupied());

        drop(slot.take());
        assert_eq!(live.get(), 0);
    }
}
