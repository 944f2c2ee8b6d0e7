use crate::logging::LogLevel;

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_REVEAL_OFFSET_PX: f64 = 150.0;
const DEFAULT_ANCHOR_OFFSET_PX: f64 = 50.0;
const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 250;
const DEFAULT_TOOLTIP_VISIBLE_MS: u32 = 2_000;
const DEFAULT_TOOLTIP_FADE_MS: u32 = 300;
const DEFAULT_RIPPLE_LIFETIME_MS: u32 = 600;
const DEFAULT_BURST_PARTICLES: u32 = 30;
const DEFAULT_BURST_DURATION_MS: u32 = 8_000;
const DEFAULT_BURST_LINGER_MS: u32 = 3_000;
const DEFAULT_TIMELINE_THRESHOLD: f64 = 0.5;

const REVEAL_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const ANCHOR_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const RESIZE_DEBOUNCE_MS_BOUNDS: (u32, u32) = (0, 5_000);
const TOOLTIP_VISIBLE_MS_BOUNDS: (u32, u32) = (100, 60_000);
const TOOLTIP_FADE_MS_BOUNDS: (u32, u32) = (0, 5_000);
const RIPPLE_LIFETIME_MS_BOUNDS: (u32, u32) = (50, 10_000);
const BURST_PARTICLES_BOUNDS: (u32, u32) = (1, 200);
const BURST_DURATION_MS_BOUNDS: (u32, u32) = (100, 60_000);
const BURST_LINGER_MS_BOUNDS: (u32, u32) = (0, 60_000);
const TIMELINE_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Tunables for every enhancement, read once at startup from `data-fx-*`
/// attributes on the document element.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FxConfig {
    pub log_level: LogLevel,
    pub reveal_offset_px: f64,
    pub anchor_offset_px: f64,
    pub resize_debounce_ms: u32,
    pub tooltip_visible_ms: u32,
    pub tooltip_fade_ms: u32,
    pub ripple_lifetime_ms: u32,
    pub burst_particles: u32,
    pub burst_duration_ms: u32,
    pub burst_linger_ms: u32,
    pub timeline_threshold: f64,
    pub respect_reduced_motion: bool,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            reveal_offset_px: DEFAULT_REVEAL_OFFSET_PX,
            anchor_offset_px: DEFAULT_ANCHOR_OFFSET_PX,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            tooltip_visible_ms: DEFAULT_TOOLTIP_VISIBLE_MS,
            tooltip_fade_ms: DEFAULT_TOOLTIP_FADE_MS,
            ripple_lifetime_ms: DEFAULT_RIPPLE_LIFETIME_MS,
            burst_particles: DEFAULT_BURST_PARTICLES,
            burst_duration_ms: DEFAULT_BURST_DURATION_MS,
            burst_linger_ms: DEFAULT_BURST_LINGER_MS,
            timeline_threshold: DEFAULT_TIMELINE_THRESHOLD,
            respect_reduced_motion: false,
        }
    }
}

impl FxConfig {
    /// Builds a config from any attribute source. Missing, malformed and
    /// out-of-bounds values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = parse_log_level(&lookup, "data-fx-log-level", DEFAULT_LOG_LEVEL);
        let reveal_offset_px = parse_f64_with_bounds(
            &lookup,
            "data-fx-reveal-offset",
            DEFAULT_REVEAL_OFFSET_PX,
            REVEAL_OFFSET_PX_BOUNDS,
        );
        let anchor_offset_px = parse_f64_with_bounds(
            &lookup,
            "data-fx-anchor-offset",
            DEFAULT_ANCHOR_OFFSET_PX,
            ANCHOR_OFFSET_PX_BOUNDS,
        );
        let resize_debounce_ms = parse_u32_with_bounds(
            &lookup,
            "data-fx-resize-debounce-ms",
            DEFAULT_RESIZE_DEBOUNCE_MS,
            RESIZE_DEBOUNCE_MS_BOUNDS,
        );
        let tooltip_visible_ms = parse_u32_with_bounds(
            &lookup,
            "data-fx-tooltip-visible-ms",
            DEFAULT_TOOLTIP_VISIBLE_MS,
            TOOLTIP_VISIBLE_MS_BOUNDS,
        );
        let tooltip_fade_ms = parse_u32_with_bounds(
            &lookup,
            "data-fx-tooltip-fade-ms",
            DEFAULT_TOOLTIP_FADE_MS,
            TOOLTIP_FADE_MS_BOUNDS,
        );
        let ripple_lifetime_ms = parse_u32_with_bounds(
            &lookup,
            "data-fx-ripple-ms",
            DEFAULT_RIPPLE_LIFETIME_MS,
            RIPPLE_LIFETIME_MS_BOUNDS,
        );
        let burst_particles = parse_u32_with_bounds(
            &lookup,
            "data-fx-burst-particles",
            DEFAULT_BURST_PARTICLES,
            BURST_PARTICLES_BOUNDS,
        );
        let burst_duration_ms = parse_u32_with_bounds(
            &lookup,
            "data-fx-burst-duration-ms",
            DEFAULT_BURST_DURATION_MS,
            BURST_DURATION_MS_BOUNDS,
        );
        let burst_linger_ms = parse_u32_with_bounds(
            &lookup,
            "data-fx-burst-linger-ms",
            DEFAULT_BURST_LINGER_MS,
            BURST_LINGER_MS_BOUNDS,
        );
        let timeline_threshold = parse_f64_with_bounds(
            &lookup,
            "data-fx-timeline-threshold",
            DEFAULT_TIMELINE_THRESHOLD,
            TIMELINE_THRESHOLD_BOUNDS,
        );
        let respect_reduced_motion = parse_reduced_motion(&lookup, "data-fx-reduced-motion");

        Self {
            log_level,
            reveal_offset_px,
            anchor_offset_px,
            resize_debounce_ms,
            tooltip_visible_ms,
            tooltip_fade_ms,
            ripple_lifetime_ms,
            burst_particles,
            burst_duration_ms,
            burst_linger_ms,
            timeline_threshold,
            respect_reduced_motion,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_document() -> Self {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return Self::default();
        };

        Self::from_lookup(|name| root.get_attribute(name))
    }
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
    bounds: (f64, f64),
) -> f64 {
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: LogLevel,
) -> LogLevel {
    match parse_non_empty_string(lookup, name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

fn parse_reduced_motion(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> bool {
    matches!(
        parse_non_empty_string(lookup, name)
            .map(|value| value.to_ascii_lowercase())
            .as_deref(),
        Some("respect")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> FxConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        FxConfig::from_lookup(|name| attributes.get(name).cloned())
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(config_from(&[]), FxConfig::default());
    }

    #[test]
    fn attributes_override_defaults() {
        let config = config_from(&[
            ("data-fx-log-level", " DEBUG "),
            ("data-fx-reveal-offset", "90"),
            ("data-fx-burst-particles", "12"),
            ("data-fx-timeline-threshold", "0.25"),
            ("data-fx-reduced-motion", "respect"),
        ]);

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.reveal_offset_px, 90.0);
        assert_eq!(config.burst_particles, 12);
        assert_eq!(config.timeline_threshold, 0.25);
        assert!(config.respect_reduced_motion);
    }

    #[test]
    fn out_of_bounds_values_fall_back() {
        let config = config_from(&[
            ("data-fx-burst-particles", "0"),
            ("data-fx-tooltip-visible-ms", "99"),
            ("data-fx-timeline-threshold", "1.5"),
            ("data-fx-anchor-offset", "NaN"),
        ]);

        assert_eq!(config.burst_particles, DEFAULT_BURST_PARTICLES);
        assert_eq!(config.tooltip_visible_ms, DEFAULT_TOOLTIP_VISIBLE_MS);
        assert_eq!(config.timeline_threshold, DEFAULT_TIMELINE_THRESHOLD);
        assert_eq!(config.anchor_offset_px, DEFAULT_ANCHOR_OFFSET_PX);
    }

    #[test]
    fn unknown_values_keep_defaults() {
        let config = config_from(&[
            ("data-fx-log-level", "trace"),
            ("data-fx-reduced-motion", "sometimes"),
            ("data-fx-ripple-ms", "fast"),
        ]);

        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.respect_reduced_motion);
        assert_eq!(config.ripple_lifetime_ms, DEFAULT_RIPPLE_LIFETIME_MS);
    }
}
