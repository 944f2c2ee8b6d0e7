pub const ANIMATION_STYLES: &str = r#"
@keyframes fadeIn {
    from {
        opacity: 0;
        transform: scale(0.9);
    }
    to {
        opacity: 1;
        transform: scale(1);
    }
}

@keyframes fadeOut {
    from {
        opacity: 1;
        transform: scale(1);
    }
    to {
        opacity: 0;
        transform: scale(0.9);
    }
}

@keyframes fadeInUp {
    from {
        opacity: 0;
        transform: translateY(30px);
    }
    to {
        opacity: 1;
        transform: translateY(0);
    }
}

.skill-tooltip {
    animation: fadeIn 0.3s ease;
}

.skill-tag[data-level="expert"]:hover {
    animation: shimmer 1s ease infinite;
}

@keyframes shimmer {
    0%, 100% {
        box-shadow: 0 0 20px rgba(34, 197, 94, 0.4);
    }
    50% {
        box-shadow: 0 0 30px rgba(34, 197, 94, 0.6);
    }
}
"#;

/// Appends the keyframe stylesheet to `<head>`. Each call appends another
/// copy.
#[cfg(target_arch = "wasm32")]
pub fn inject() -> Result<(), crate::error::DomError> {
    use crate::dom;
    use crate::error::DomError;

    let document = dom::document()?;
    let head = document.head().ok_or(DomError::MissingNode("head"))?;
    let style = document
        .create_element("style")
        .map_err(|err| DomError::js("create style", err))?;
    style.set_text_content(Some(ANIMATION_STYLES));
    dom::append(&head, &style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_defines_every_keyframe() {
        for name in ["fadeIn", "fadeOut", "fadeInUp", "shimmer"] {
            assert!(
                ANIMATION_STYLES.contains(&format!("@keyframes {name} {{")),
                "missing keyframes {name}"
            );
        }
    }

    #[test]
    fn shimmer_applies_only_to_expert_hover() {
        assert!(ANIMATION_STYLES.contains(".skill-tag[data-level=\"expert\"]:hover"));
        assert!(!ANIMATION_STYLES.contains("data-level=\"advanced\""));
    }
}
