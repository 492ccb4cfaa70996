//! Logging macros
//!
//! Context values are anything `Display`; keys are string literals.
//! `log_error!` takes an optional `line = expr` before the context pairs.

/// Render `key => value` pairs and pass them as `Vec<(&str, &str)>` to `$sink`
#[doc(hidden)]
#[macro_export]
macro_rules! __with_log_context {
    ($sink:expr; $($key:expr => $value:expr),*) => {{
        let rendered: Vec<(&str, String)> = vec![$(($key, $value.to_string())),*];
        let pairs: Vec<(&str, &str)> = rendered.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $sink(pairs)
    }};
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, line = $line:expr $(, $key:expr => $value:expr)*) => {
        $crate::__with_log_context!(
            |ctx| $crate::logging::log_error_with_context($code, $message, Some($line), ctx);
            $($key => $value),*
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__with_log_context!(
            |ctx| $crate::logging::log_error_with_context($code, $message, None, ctx);
            $($key => $value),*
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__with_log_context!(
            |ctx| $crate::logging::log_success_with_context($code, $message, ctx);
            $($key => $value),*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__with_log_context!(
            |ctx| $crate::logging::log_info_with_context($message, ctx);
            $($key => $value),*
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)*) => {{
        #[allow(unused_mut)]
        let mut event = $crate::logging::LogEvent::warning($message);
        $(event = event.with_context($key, &$value.to_string());)*
        $crate::logging::dispatch_event(event);
    }};
}

/// Context values are not even rendered below debug level
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            #[allow(unused_mut)]
            let mut event = $crate::logging::LogEvent::debug($message);
            $(event = event.with_context($key, &$value.to_string());)*
            $crate::logging::dispatch_event(event);
        }
    };
}

/// Success event with a `duration_ms` context entry
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr $(, $key:expr => $value:expr)*) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0)
            $(, $key => $value)*
        )
    };
}
