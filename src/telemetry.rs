use serde_json::{Map, Number, Value};
use std::sync::atomic::{AtomicU8, Ordering};

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

static MIN_LOG_LEVEL: AtomicU8 = AtomicU8::new(DEFAULT_LOG_LEVEL as u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            _ => Self::Error,
        }
    }
}

pub fn set_min_level(level: LogLevel) {
    MIN_LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn min_level() -> LogLevel {
    LogLevel::from_rank(MIN_LOG_LEVEL.load(Ordering::Relaxed))
}

/// Resolves the level from an optional raw setting, keeping the default for
/// missing or unrecognised values.
pub fn level_from_setting(raw: Option<&str>) -> LogLevel {
    raw.and_then(LogLevel::parse).unwrap_or(DEFAULT_LOG_LEVEL)
}

pub fn log_event(level: LogLevel, event: &str, fields: Value) {
    if level < min_level() {
        return;
    }

    let line = build_log_line(now_unix_seconds(), level, event, fields).to_string();
    emit(level, &line);
}

fn build_log_line(ts: u64, level: LogLevel, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn now_unix_seconds() -> u64 {
    (js_sys::Date::now() / 1_000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug | LogLevel::Info => web_sys::console::log_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Error => web_sys::console::error_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Debug | LogLevel::Info => println!("{line}"),
        LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn log_line_merges_fields_after_envelope() {
        let line = build_log_line(
            42,
            LogLevel::Warn,
            "projects_fetch_failed",
            json!({ "error_class": "network", "owner": "dinonuwg" }),
        );

        assert_eq!(line["ts"], json!(42));
        assert_eq!(line["level"], json!("warn"));
        assert_eq!(line["event"], json!("projects_fetch_failed"));
        assert_eq!(line["error_class"], json!("network"));
        assert_eq!(line["owner"], json!("dinonuwg"));
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let line = build_log_line(1, LogLevel::Info, "tick", json!("ignored"));
        let object = line.as_object().expect("log line is an object");

        assert_eq!(object.len(), 3);
    }

    #[test]
    fn level_setting_falls_back_to_info() {
        assert_eq!(level_from_setting(None), LogLevel::Info);
        assert_eq!(level_from_setting(Some("verbose")), LogLevel::Info);
        assert_eq!(level_from_setting(Some(" DEBUG ")), LogLevel::Debug);
        assert_eq!(level_from_setting(Some("warning")), LogLevel::Warn);
    }

    #[test]
    fn levels_order_from_debug_to_error() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::from_rank(LogLevel::Warn as u8), LogLevel::Warn);
    }
}
