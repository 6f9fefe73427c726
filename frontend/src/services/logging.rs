use std::cell::Cell;

use shared::LogLevel;

thread_local! {
    static THRESHOLD: Cell<LogLevel> = const { Cell::new(LogLevel::Info) };
}

/// Console logger tagging each line with the component that produced it
pub struct Logger;

impl Logger {
    pub fn init(level: LogLevel) {
        THRESHOLD.with(|threshold| threshold.set(level));
    }

    pub fn threshold() -> LogLevel {
        THRESHOLD.with(Cell::get)
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::threshold().allows(level) {
            return;
        }

        let line = format_line(level, component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}

pub fn format_line(level: LogLevel, component: &str, message: &str) -> String {
    format!("[{}] [{}] {}", level.as_str().to_uppercase(), component, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_line() {
        assert_eq!(
            format_line(LogLevel::Warn, "teacher-dashboard", "fetch failed"),
            "[WARN] [teacher-dashboard] fetch failed"
        );
    }

    #[wasm_bindgen_test]
    fn test_init_sets_threshold() {
        Logger::init(LogLevel::Error);
        assert_eq!(Logger::threshold(), LogLevel::Error);
        Logger::init(LogLevel::Info);
        assert_eq!(Logger::threshold(), LogLevel::Info);
    }
}
