//! Log events emitted by the scanner, file processor and driver

use super::codes::{self, Code, ErrorMetadata};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// Verbosity ordering: `Error < Warning < Info < Debug`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LogLevel {
    #[serde(rename = "ERROR")]
    Error = 0,
    #[serde(rename = "WARN")]
    Warning = 1,
    #[serde(rename = "INFO")]
    Info = 2,
    #[serde(rename = "DEBUG")]
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Placeholder codes for events that carry no registry entry
const UNCODED_WARNING: Code = Code::new("W000");
const UNCODED_INFO: Code = Code::new("I000");
const UNCODED_DEBUG: Code = Code::new("D000");

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    /// Source line the event refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: truncate_message(message),
            line: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, UNCODED_WARNING, message)
    }

    pub fn warning_with_code(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, code, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, UNCODED_INFO, message)
    }

    /// Info-level event carrying a success code
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, UNCODED_DEBUG, message)
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    /// Registry entry for this event's code, if it has one
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        codes::get_error_metadata(self.code.as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Multi-line rendering with registry metadata and context
    pub fn format_detailed(&self) -> String {
        let mut out = self.to_string();

        if let Some(meta) = self.metadata() {
            let _ = write!(out, "\n  Category: {}", meta.category);
            let _ = write!(out, "\n  Severity: {}", meta.severity.as_str());
            if self.is_error() {
                let _ = write!(out, "\n  Recoverable: {}", meta.recoverable);
                let _ = write!(out, "\n  Requires halt: {}", meta.requires_halt);
            }
            let _ = write!(out, "\n  Description: {}", meta.description);
            let _ = write!(out, "\n  Recommended action: {}", meta.recommended_action);
        }

        if !self.context.is_empty() {
            out.push_str("\n  Context:");
            for (key, value) in &self.context {
                let _ = write!(out, "\n    {}: {}", key, value);
            }
        }

        out
    }

    /// One JSON object per event, enriched with registry metadata
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;

        if let Some(meta) = self.metadata() {
            value["category"] = meta.category.into();
            value["severity"] = meta.severity.as_str().into();
            if self.is_error() {
                value["error_metadata"] = serde_json::json!({
                    "recoverable": meta.recoverable,
                    "requires_halt": meta.requires_halt,
                    "description": meta.description,
                    "recommended_action": meta.recommended_action,
                });
            }
        }

        serde_json::to_string(&value)
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.level, self.code, self.message)?;
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
        }
        Ok(())
    }
}

fn truncate_message(message: &str) -> String {
    use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;

    if message.len() <= MAX_LOG_MESSAGE_LENGTH {
        return message.to_owned();
    }

    let mut end = MAX_LOG_MESSAGE_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "File not found");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E005");
        assert_eq!(event.message, "File not found");
        assert_eq!(event.category(), "FileProcessing");
        assert!(event.metadata().is_some());
    }

    #[test]
    fn test_uncoded_events_have_no_metadata() {
        let event = LogEvent::info("plain");
        assert_eq!(event.level, LogLevel::Info);
        assert!(event.metadata().is_none());
        assert_eq!(event.category(), "Unknown");
    }

    #[test]
    fn test_display_includes_line() {
        let event = LogEvent::error(codes::lexical::UNEXPECTED_CHARACTER, "Unexpected character.")
            .with_line(7);

        assert_eq!(
            event.to_string(),
            "[ERROR] E020 - Unexpected character. at line 7"
        );
        assert_eq!(event.format(), event.to_string());
    }

    #[test]
    fn test_detailed_format_orders_context() {
        let event = LogEvent::error(codes::lexical::UNTERMINATED_STRING, "Unterminated string.")
            .with_context("zeta", "1")
            .with_context("alpha", "2");
        let detailed = event.format_detailed();

        let alpha = detailed.find("alpha").unwrap();
        let zeta = detailed.find("zeta").unwrap();
        assert!(alpha < zeta);
        assert!(detailed.contains("Recoverable: true"));
        assert!(detailed.contains("Category: Lexical"));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::file_processing::PERMISSION_DENIED, "Access denied")
            .with_line(3)
            .with_context("file", "main.jc");

        let json = event.format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["code"], "E009");
        assert_eq!(value["line"], 3);
        assert_eq!(value["category"], "FileProcessing");
        assert_eq!(value["context"]["file"], "main.jc");
        assert_eq!(value["error_metadata"]["requires_halt"], true);
        assert!(value["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let json = LogEvent::debug("quiet").format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["level"], "DEBUG");
        assert!(value.get("line").is_none());
        assert!(value.get("context").is_none());
        assert!(value.get("error_metadata").is_none());
    }

    #[test]
    fn test_oversized_message_is_truncated() {
        use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;

        let long = "x".repeat(MAX_LOG_MESSAGE_LENGTH + 10);
        let event = LogEvent::info(&long);
        assert_eq!(event.message.len(), MAX_LOG_MESSAGE_LENGTH + 3);
        assert!(event.message.ends_with("..."));
    }
}
