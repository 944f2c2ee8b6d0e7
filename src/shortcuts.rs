#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const CONTACT_SELECTOR: &str = "#contact";
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const TECHNICAL_SKILLS_SELECTOR: &str = ".gradient-section";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Contact,
    Home,
    TechnicalSkills,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

impl Shortcut {
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        if modifiers.any() {
            return None;
        }

        match key {
            "c" => Some(Self::Contact),
            "h" => Some(Self::Home),
            "t" => Some(Self::TechnicalSkills),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::KeyboardShortcuts;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use crate::dom;
    use gloo_events::EventListener;
    use wasm_bindgen::JsCast;
    use web_sys::KeyboardEvent;

    pub struct KeyboardShortcuts {
        _keydown: EventListener,
    }

    impl KeyboardShortcuts {
        pub fn install() -> Option<Self> {
            let document = dom::document().ok()?;
            let keydown = EventListener::new(&document, "keydown", |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let modifiers = Modifiers {
                    ctrl: event.ctrl_key(),
                    meta: event.meta_key(),
                    alt: event.alt_key(),
                };

                match Shortcut::from_key(&event.key(), modifiers) {
                    Some(Shortcut::Contact) => {
                        if let Some(section) = dom::query(CONTACT_SELECTOR) {
                            dom::smooth_scroll_into_view(&section);
                        }
                    }
                    Some(Shortcut::Home) => dom::smooth_scroll_window_to(0.0),
                    Some(Shortcut::TechnicalSkills) => {
                        if let Some(section) = dom::query(TECHNICAL_SKILLS_SELECTOR) {
                            dom::smooth_scroll_into_view(&section);
                        }
                    }
                    None => {}
                }
            });

            Some(Self { _keydown: keydown })
        }
    }
}
