//! Logging service and logger backends
//!
//! Every backend writes to stderr or memory. Stdout belongs to token output.

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of a single backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Backend and level picked from the runtime preferences
    pub fn with_config() -> Self {
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };
        Self::new(logger, config::get_min_log_level())
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, code: Code, message: &str) {
        self.log_event(LogEvent::error(code, message));
    }

    pub fn log_success(&self, code: Code, message: &str) {
        self.log_event(LogEvent::success(code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_warning(&self, message: &str) {
        self.log_event(LogEvent::warning(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// One human-readable line per event
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event);
    }
}

/// One JSON object per line
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event),
        }
    }
}

/// Ring buffer of captured events, sized by the generated log buffer limit
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(config::get_error_buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    // A poisoned lock still holds a usable event list
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn collect_where(&self, keep: impl Fn(&LogEvent) -> bool) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| keep(e)).cloned().collect()
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.collect_where(|_| true)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.collect_where(LogEvent::is_error)
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.collect_where(|e| e.code == code)
    }

    pub fn get_events_by_category(&self, category: &str) -> Vec<LogEvent> {
        self.collect_where(|e| e.category() == category)
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_error() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.lock()
            .iter()
            .any(|e| e.level == LogLevel::Info && e.code == code)
    }

    pub fn get_summary(&self) -> EventSummary {
        self.lock().iter().fold(EventSummary::default(), |mut s, e| {
            s.total_count += 1;
            match e.level {
                LogLevel::Error => s.error_count += 1,
                LogLevel::Warning => s.warning_count += 1,
                LogLevel::Info => s.info_count += 1,
                LogLevel::Debug => s.debug_count += 1,
            }
            s
        })
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }
}

pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Memory-backed service at debug level, plus a handle to inspect captured events
pub fn create_test_service() -> (LoggingService, Arc<MemoryLogger>) {
    let memory = Arc::new(MemoryLogger::new());
    let service = LoggingService::new(memory.clone(), LogLevel::Debug);
    (service, memory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger_captures_and_summarizes() {
        let (service, memory) = create_test_service();

        service.log_error(codes::lexical::UNEXPECTED_CHARACTER, "Unexpected character.");
        service.log_success(codes::success::TOKENIZATION_COMPLETE, "done");
        service.log_warning("careful");

        assert_eq!(memory.event_count(), 3);
        assert!(memory.has_error_with_code(codes::lexical::UNEXPECTED_CHARACTER));
        assert!(memory.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
        assert_eq!(memory.get_errors().len(), 1);

        assert_eq!(
            memory.get_summary(),
            EventSummary {
                total_count: 3,
                error_count: 1,
                warning_count: 1,
                info_count: 1,
                debug_count: 0,
            }
        );

        memory.clear();
        assert_eq!(memory.event_count(), 0);
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let memory = MemoryLogger::with_capacity(2);
        for message in ["first", "second", "third"] {
            memory.log(&LogEvent::info(message));
        }

        let messages: Vec<String> = memory.get_events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[test]
    fn test_log_level_filtering() {
        let memory = Arc::new(MemoryLogger::new());
        let mut service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_debug("hidden");
        service.log_info("hidden");
        service.log_warning("shown");
        service.log_error(codes::system::INTERNAL_ERROR, "shown");
        assert_eq!(memory.event_count(), 2);

        service.set_min_level(LogLevel::Info);
        assert_eq!(service.min_level(), LogLevel::Info);
        service.log_info("kept");
        assert_eq!(memory.event_count(), 3);
    }

    #[test]
    fn test_events_by_category() {
        let (service, memory) = create_test_service();

        service.log_error(codes::file_processing::FILE_NOT_FOUND, "missing");
        service.log_error(codes::lexical::UNTERMINATED_STRING, "Unterminated string.");

        assert_eq!(memory.get_events_by_category("Lexical").len(), 1);
        assert_eq!(
            memory
                .get_events_with_code(codes::file_processing::FILE_NOT_FOUND)
                .len(),
            1
        );
    }

    #[test]
    fn test_stderr_backends_do_not_panic() {
        let event = LogEvent::error(codes::system::INTERNAL_ERROR, "boom").with_line(1);
        ConsoleLogger.log(&event);
        StructuredLogger.log(&event);
    }
}
