//! Runtime preferences: TOML file, then environment, then built-in defaults

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading a runtime preferences file
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read runtime config '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid runtime config: {message}")]
    Parse { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::system::INITIALIZATION_FAILURE
    }
}

/// Value of `name` parsed with `parse`, or `default` when unset or malformed
fn env_or<T>(name: &str, default: T, parse: impl FnOnce(&str) -> Option<T>) -> T {
    env::var(name).ok().and_then(|v| parse(&v)).unwrap_or(default)
}

fn env_flag(name: &str, default: bool) -> bool {
    env_or(name, default, |v| v.parse().ok())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Reject scripts without the .jc extension
    pub require_script_extension: bool,

    /// Log size and throughput after reading a file
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_script_extension: env_flag(env_vars::REQUIRE_SCRIPT_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Count tokens per class, not just in total
    pub collect_detailed_metrics: bool,

    /// Emit each diagnostic as a log event too
    pub log_diagnostics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
            log_diagnostics: env_flag(env_vars::LEXICAL_LOG_DIAGNOSTICS, true),
        }
    }
}

/// How the driver renders tokens on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("json") {
            Some(OutputFormat::Json)
        } else if value.eq_ignore_ascii_case("text") || value.eq_ignore_ascii_case("plain") {
            Some(OutputFormat::Text)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPreferences {
    pub format: OutputFormat,

    /// Print a count line on stderr after a file scan
    pub show_summary: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            format: env_or(env_vars::OUTPUT_FORMAT, OutputFormat::Text, OutputFormat::parse),
            show_summary: env_flag(env_vars::OUTPUT_SHOW_SUMMARY, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// The global logger is only installed when set
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,

    /// Emit timing events for file reads and whole scans
    pub log_performance_events: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env_or(env_vars::LOGGING_MIN_LEVEL, LogLevel::Info, parse_log_level),
            log_performance_events: env_flag(env_vars::LOGGING_LOG_PERFORMANCE, true),
        }
    }
}

/// Level as written in config files and `JCLEAR_LOGGING_MIN_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        crate::logging::LogLevel::from(*self).as_str()
    }
}

impl From<LogLevel> for crate::logging::LogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warning => Self::Warning,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
        }
    }
}

/// Accepts names (`warn`/`warning`) and numeric levels `0..=3`
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_ascii_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub output: OutputPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML. Missing sections and keys fall back to
    /// the environment-derived defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `JCLEAR_RUNTIME_CONFIG` when set, otherwise use defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(env_vars::RUNTIME_CONFIG) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const RUNTIME_CONFIG: &str = "JCLEAR_RUNTIME_CONFIG";

    // File Processor
    pub const REQUIRE_SCRIPT_EXTENSION: &str = "JCLEAR_REQUIRE_SCRIPT_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "JCLEAR_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "JCLEAR_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_LOG_DIAGNOSTICS: &str = "JCLEAR_LEXICAL_LOG_DIAGNOSTICS";

    // Output
    pub const OUTPUT_FORMAT: &str = "JCLEAR_OUTPUT_FORMAT";
    pub const OUTPUT_SHOW_SUMMARY: &str = "JCLEAR_OUTPUT_SHOW_SUMMARY";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "JCLEAR_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "JCLEAR_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "JCLEAR_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "JCLEAR_LOGGING_LOG_PERFORMANCE";
}
