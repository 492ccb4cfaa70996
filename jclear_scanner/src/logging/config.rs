//! Logging limits (compile time) and user preferences (runtime)

use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_LOG_EVENTS_PER_FILE, MAX_LOG_MESSAGE_LENGTH,
};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install the process-wide preferences. Fails if they were already set or
/// already read (first read freezes the environment defaults).
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Logging preferences already initialized".to_string())
}

fn preferences() -> &'static LoggingPreferences {
    RUNTIME_PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level.into()
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn log_performance_events() -> bool {
    preferences().log_performance_events
}

/// Capacity of [`super::MemoryLogger`]
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_events_per_file() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Cross-check the generated limits against each other
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }
    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err(format!(
            "Per-file event cap {} exceeds log buffer size {}",
            MAX_LOG_EVENTS_PER_FILE, LOG_BUFFER_SIZE
        ));
    }
    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

pub fn get_config_summary() -> String {
    let prefs = preferences();

    let rows = [
        ("Source", crate::config::build_info::source_info()),
        ("Log buffer size", LOG_BUFFER_SIZE.to_string()),
        ("Max events per file", MAX_LOG_EVENTS_PER_FILE.to_string()),
        ("Max message length", MAX_LOG_MESSAGE_LENGTH.to_string()),
        ("Min log level", prefs.min_log_level.as_str().to_string()),
        ("Structured logging", prefs.use_structured_logging.to_string()),
        ("Console logging", prefs.enable_console_logging.to_string()),
        ("Performance events", prefs.log_performance_events.to_string()),
    ];

    let mut summary = String::from("Logging Configuration:");
    for (label, value) in rows {
        summary.push_str(&format!("\n  {:<20} {}", format!("{}:", label), value));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits_validate() {
        assert!(validate_config().is_ok());
        assert!(get_error_buffer_size() > 0);
        assert!(get_max_log_events_per_file() <= get_error_buffer_size());
        assert!(get_max_log_message_length() >= 64);
    }

    #[test]
    fn test_config_summary() {
        let summary = get_config_summary();
        assert!(summary.starts_with("Logging Configuration:"));
        assert!(summary.contains("Log buffer size:"));
        assert!(summary.contains("Min log level:"));
    }
}
