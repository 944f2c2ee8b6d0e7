//! Installs every enhancement against the mounted page and owns the
//! resulting subscriptions.

use js_sys::{Object, Reflect};
use serde_json::json;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::window;

use crate::anchors::AnchorRouter;
use crate::config::FxConfig;
use crate::error::DomError;
use crate::logging::{log_event, LogLevel};
use crate::reactions::ContactReactions;
use crate::reveal::{ResizeRescan, RevealAnimator};
use crate::ripple::AchievementRipples;
use crate::shortcuts::KeyboardShortcuts;
use crate::skills::{SkillFloat, SkillLevels};
use crate::timeline::TimelineObserver;

pub const NAMESPACE: &str = "qualityLanding";

/// Everything installed for one mount of the page. Dropping it removes every
/// listener, disconnects the timeline observer and cancels in-flight effects.
pub struct Enhancements {
    _reveal: Option<RevealAnimator>,
    _resize: Option<ResizeRescan>,
    _anchors: AnchorRouter,
    _float: SkillFloat,
    _levels: SkillLevels,
    _timeline: Option<TimelineObserver>,
    _ripples: AchievementRipples,
    _reactions: Option<ContactReactions>,
    _shortcuts: Option<KeyboardShortcuts>,
}

impl Enhancements {
    pub fn install(config: &FxConfig) -> Self {
        let reveal = RevealAnimator::install(config);
        let resize = ResizeRescan::install(config);
        let anchors = AnchorRouter::install(config);
        let float = SkillFloat::install(config);
        let levels = SkillLevels::install(config);
        let timeline = TimelineObserver::install(config).unwrap_or_else(|err| {
            log_event(
                config,
                LogLevel::Debug,
                "effect_failed",
                json!({ "effect": "timeline_observer", "error": err.to_string() }),
            );
            None
        });
        let ripples = AchievementRipples::install(config);
        let reactions = ContactReactions::install(config);
        let shortcuts = KeyboardShortcuts::install();

        log_event(
            config,
            LogLevel::Debug,
            "enhancements_installed",
            json!({
                "reveal_tracked": reveal.as_ref().map_or(0, RevealAnimator::tracked),
                "reveal_initial": reveal.as_ref().map_or(0, RevealAnimator::initially_revealed),
                "anchors": anchors.routed(),
                "skill_tags": levels.tags(),
                "timeline_items": timeline.as_ref().map_or(0, TimelineObserver::observed),
                "achievement_cards": ripples.cards(),
                "contact_card": reactions.is_some(),
            }),
        );

        Self {
            _reveal: reveal,
            _resize: resize,
            _anchors: anchors,
            _float: float,
            _levels: levels,
            _timeline: timeline,
            _ripples: ripples,
            _reactions: reactions,
            _shortcuts: shortcuts,
        }
    }
}

thread_local! {
    static PAGE_LIFETIME: RefCell<Vec<Box<dyn Any>>> = RefCell::new(Vec::new());
}

/// Keeps `value` alive until the page is torn down.
pub fn keep_for_page<T: 'static>(value: T) {
    PAGE_LIFETIME.with(|kept| kept.borrow_mut().push(Box::new(value)));
}

/// Publishes `window.qualityLanding` so external scripts can re-run the
/// installers. Every call installs again; nothing is deduplicated.
pub fn expose_namespace(config: FxConfig) -> Result<(), DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    let namespace = Object::new();

    let installers: [(&str, fn(&FxConfig)); 4] = [
        ("reveal", |config| keep_for_page(RevealAnimator::install(config))),
        ("smoothScroll", |config| keep_for_page(AnchorRouter::install(config))),
        ("skillTags", |config| keep_for_page(SkillFloat::install(config))),
        ("skillLevels", |config| keep_for_page(SkillLevels::install(config))),
    ];

    for (name, install) in installers {
        let callback = Closure::<dyn Fn()>::new(move || install(&config));
        Reflect::set(&namespace, &JsValue::from_str(name), callback.as_ref())
            .map_err(|err| DomError::js("publish namespace entry", err))?;
        callback.forget();
    }

    Reflect::set(&win, &JsValue::from_str(NAMESPACE), &namespace)
        .map_err(|err| DomError::js("publish namespace", err))?;
    Ok(())
}
