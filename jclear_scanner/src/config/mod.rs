//! Configuration module for the JClear scanner
//! Compile-time limits come from the TOML profile read by build.rs;
//! runtime preferences come from `JCLEAR_*` environment variables.

// Generated by build.rs from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{ConfigError, OutputFormat, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("JCLEAR_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("JCLEAR_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits_are_consistent() {
        use compile_time::file_processing::*;
        use compile_time::logging::*;

        assert!(MAX_FILE_SIZE > 0);
        assert!(LARGE_FILE_THRESHOLD <= MAX_FILE_SIZE);
        assert!(MAX_LINE_COUNT > 0);
        assert!(compile_time::lexical::MAX_DIAGNOSTICS_LOGGED > 0);
        assert!(MAX_LOG_EVENTS_PER_FILE <= LOG_BUFFER_SIZE);
        assert!(MAX_LOG_MESSAGE_LENGTH > 0);
    }

    #[test]
    fn test_build_info() {
        assert!(build_info::source_info().ends_with(".toml"));
        assert!(!build_info::profile().is_empty());
    }
}
