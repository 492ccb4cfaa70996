//! Global logging module for the JClear scanner
//!
//! Provides thread-safe global logging with a per-thread file context and a
//! macro interface. Until [`init_global_logging`] is called every macro is a
//! no-op, which keeps library callers and tests free of console output.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

/// File currently being processed on this thread
#[derive(Debug, Clone)]
pub struct FileContext {
    pub file_path: PathBuf,
    /// Error events logged while this context was active
    pub error_events: usize,
}

/// Install the configured service as the process-wide logger
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    init_global_logging_with_service(Arc::new(service::create_configured_service()))?;

    log_success_with_context(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
        Vec::new(),
    );
    crate::log_debug!("Logging configuration", "summary" => config::get_config_summary());
    Ok(())
}

pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(Arc::as_ref)
}

pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Restores the previous file context when dropped, including on unwind
struct FileContextGuard {
    previous: Option<FileContext>,
}

impl Drop for FileContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        FILE_CONTEXT.with(|ctx| ctx.replace(previous));
    }
}

/// Run `f` with `file_path` as this thread's file context
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| {
        ctx.replace(Some(FileContext {
            file_path,
            error_events: 0,
        }))
    });
    let _guard = FileContextGuard { previous };
    f()
}

/// Count an error against the active file; false once the per-file cap is reached
fn admit_file_error() -> bool {
    FILE_CONTEXT.with(|ctx| match ctx.borrow_mut().as_mut() {
        Some(file_ctx) => {
            file_ctx.error_events += 1;
            file_ctx.error_events <= config::get_max_log_events_per_file()
        }
        None => true,
    })
}

/// Tag the event with the active file and hand it to the global logger
pub fn dispatch_event(event: LogEvent) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let event = match get_current_file_context() {
        Some(file_ctx) => event.with_context("file", &file_ctx.file_path.display().to_string()),
        None => event,
    };
    logger.log_event(event);
}

fn dispatch_with_pairs(mut event: LogEvent, context: Vec<(&str, &str)>) {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    dispatch_event(event);
}

/// Backs `log_error!`; subject to the per-file error cap
pub fn log_error_with_context(
    code: Code,
    message: &str,
    line: Option<usize>,
    context: Vec<(&str, &str)>,
) {
    if !admit_file_error() {
        return;
    }

    let event = LogEvent::error(code, message);
    let event = match line {
        Some(line) => event.with_line(line),
        None => event,
    };
    dispatch_with_pairs(event, context);
}

/// Backs `log_success!` and `log_performance!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch_with_pairs(LogEvent::success(code, message), context);
}

/// Backs `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch_with_pairs(LogEvent::info(message), context);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_file_context() {
        let file_path = PathBuf::from("nested/script.jc");

        let result = with_file_context(file_path.clone(), || {
            let context = get_current_file_context();
            assert_eq!(context.unwrap().file_path, file_path);
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_nested_context_is_restored() {
        with_file_context(PathBuf::from("outer.jc"), || {
            with_file_context(PathBuf::from("inner.jc"), || {
                let inner = get_current_file_context().unwrap();
                assert_eq!(inner.file_path, PathBuf::from("inner.jc"));
            });
            let outer = get_current_file_context().unwrap();
            assert_eq!(outer.file_path, PathBuf::from("outer.jc"));
        });
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_per_file_error_cap() {
        let cap = config::get_max_log_events_per_file();

        with_file_context(PathBuf::from("noisy.jc"), || {
            for _ in 0..cap {
                assert!(admit_file_error());
            }
            assert!(!admit_file_error());
        });

        // Outside a file context nothing is capped
        assert!(admit_file_error());
    }
}
