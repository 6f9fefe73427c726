use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Warnings and errors always pass; lower levels respect the threshold
    pub fn allows(&self, level: LogLevel) -> bool {
        level >= LogLevel::Warn || level >= *self
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime settings for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app_name: String,
    pub api_base_url: String,
    pub api_timeout_ms: u32,
    pub teacher_id: i64,
    /// Length of a signed-in session
    pub session_duration_secs: u64,
    /// How long before expiry the warning modal appears
    pub session_warning_secs: u64,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Science Point".to_string(),
            api_base_url: "http://localhost:8001".to_string(),
            api_timeout_ms: 10_000,
            teacher_id: 1,
            session_duration_secs: 86_400,
            session_warning_secs: 300,
            log_level: LogLevel::Info,
        }
    }
}

impl AppConfig {
    pub const APP_NAME: &'static str = "SCHOOL_APP_NAME";
    pub const API_BASE_URL: &'static str = "SCHOOL_API_BASE_URL";
    pub const API_TIMEOUT_MS: &'static str = "SCHOOL_API_TIMEOUT_MS";
    pub const TEACHER_ID: &'static str = "SCHOOL_TEACHER_ID";
    pub const SESSION_DURATION_SECS: &'static str = "SCHOOL_SESSION_DURATION_SECS";
    pub const SESSION_WARNING_SECS: &'static str = "SCHOOL_SESSION_WARNING_SECS";
    pub const LOG_LEVEL: &'static str = "SCHOOL_LOG_LEVEL";

    /// Overlays defaults with whatever `lookup` provides. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(Self::APP_NAME).filter(|v| !v.trim().is_empty()) {
            config.app_name = name;
        }
        if let Some(url) = lookup(Self::API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        overlay(&lookup, Self::API_TIMEOUT_MS, &mut config.api_timeout_ms);
        overlay(&lookup, Self::TEACHER_ID, &mut config.teacher_id);
        overlay(&lookup, Self::SESSION_DURATION_SECS, &mut config.session_duration_secs);
        overlay(&lookup, Self::SESSION_WARNING_SECS, &mut config.session_warning_secs);
        overlay(&lookup, Self::LOG_LEVEL, &mut config.log_level);

        config
    }
}

fn overlay<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!(key, value = %raw, "ignoring unparseable config value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8001");
        assert_eq!(config.api_timeout_ms, 10_000);
        assert_eq!(config.session_warning_secs, 300);
    }

    #[test]
    fn test_overlay_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SCHOOL_API_BASE_URL", "https://api.school.test/"),
            ("SCHOOL_TEACHER_ID", "42"),
            ("SCHOOL_LOG_LEVEL", "DEBUG"),
            ("SCHOOL_API_TIMEOUT_MS", "2500"),
        ]));

        assert_eq!(config.api_base_url, "https://api.school.test");
        assert_eq!(config.teacher_id, 42);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api_timeout_ms, 2500);
    }

    #[test]
    fn test_unparseable_values_keep_defaults() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let config = AppConfig::from_lookup(lookup_from(&[
            ("SCHOOL_TEACHER_ID", "abc"),
            ("SCHOOL_LOG_LEVEL", "loud"),
            ("SCHOOL_API_BASE_URL", "   "),
        ]));

        assert_eq!(config.teacher_id, 1);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.api_base_url, "http://localhost:8001");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "teacher_id": 7, "log_level": "warn" }"#).unwrap();
        assert_eq!(config.teacher_id, 7);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.app_name, "Science Point");
    }

    #[test]
    fn test_log_level_gate() {
        assert!(LogLevel::Info.allows(LogLevel::Info));
        assert!(!LogLevel::Info.allows(LogLevel::Debug));
        assert!(LogLevel::Debug.allows(LogLevel::Debug));
        // Warnings and errors are never filtered
        assert!(LogLevel::Error.allows(LogLevel::Warn));
        assert!(LogLevel::Error.allows(LogLevel::Error));
        assert!(!LogLevel::Error.allows(LogLevel::Info));
    }
}
