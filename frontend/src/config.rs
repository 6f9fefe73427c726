use shared::AppConfig;

/// Settings baked in at build time, e.g. `SCHOOL_API_BASE_URL=https://api.example trunk build`
pub fn load() -> AppConfig {
    AppConfig::from_lookup(|key| compile_time_value(key).map(str::to_string))
}

fn compile_time_value(key: &str) -> Option<&'static str> {
    match key {
        AppConfig::APP_NAME => option_env!("SCHOOL_APP_NAME"),
        AppConfig::API_BASE_URL => option_env!("SCHOOL_API_BASE_URL"),
        AppConfig::API_TIMEOUT_MS => option_env!("SCHOOL_API_TIMEOUT_MS"),
        AppConfig::TEACHER_ID => option_env!("SCHOOL_TEACHER_ID"),
        AppConfig::SESSION_DURATION_SECS => option_env!("SCHOOL_SESSION_DURATION_SECS"),
        AppConfig::SESSION_WARNING_SECS => option_env!("SCHOOL_SESSION_WARNING_SECS"),
        AppConfig::LOG_LEVEL => option_env!("SCHOOL_LOG_LEVEL"),
        _ => None,
    }
}
