use serde::Serialize;
use std::cmp::Ordering;

use crate::config::FxConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Serialize)]
struct LogRecord<'a> {
    ts: u64,
    level: &'static str,
    event: &'a str,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

fn render_record(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let fields = match fields {
        serde_json::Value::Object(extra) => extra,
        serde_json::Value::Null => serde_json::Map::new(),
        other => {
            let mut wrapped = serde_json::Map::new();
            wrapped.insert("value".to_string(), other);
            wrapped
        }
    };

    let record = LogRecord {
        ts,
        level: level.as_str(),
        event,
        fields,
    };

    serde_json::to_string(&record).unwrap_or_else(|_| format!("{{\"event\":\"{event}\"}}"))
}

pub fn log_event(config: &FxConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    emit(&render_record(now_unix_millis(), level, event, fields));
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
pub fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn debug_ranks_below_info() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert_eq!(LogLevel::Info.max(LogLevel::Debug), LogLevel::Info);
    }

    #[test]
    fn record_flattens_fields_next_to_envelope() {
        let line = render_record(
            1_700_000_000_000,
            LogLevel::Info,
            "scroll_depth",
            json!({ "depth_percent": 42 }),
        );
        let parsed: Value = serde_json::from_str(&line).expect("record is valid JSON");

        assert_eq!(parsed["ts"], 1_700_000_000_000_u64);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "scroll_depth");
        assert_eq!(parsed["depth_percent"], 42);
    }

    #[test]
    fn non_object_fields_are_wrapped() {
        let line = render_record(0, LogLevel::Debug, "effect_failed", json!("boom"));
        let parsed: Value = serde_json::from_str(&line).expect("record is valid JSON");

        assert_eq!(parsed["value"], "boom");
        assert_eq!(parsed["level"], "debug");
    }
}
