//! Logging macros
//!
//! Context values are any `Display` type, written as `"key" => value`.
//! All macros are no-ops until the global logger is initialized.

/// Log an error with its code, optionally with a source span
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::error($code, $message).with_span($span),
            &[$(($key, format!("{}", $value))),*],
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::error($code, $message),
            &[$(($key, format!("{}", $value))),*],
        )
    };
}

/// Log a success code at info level
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::success($code, $message),
            &[$(($key, format!("{}", $value))),*],
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::info($message),
            &[$(($key, format!("{}", $value))),*],
        )
    };
}

/// Log a warning, with a warning code when one applies
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::warning_with_code($code, $message),
            &[$(($key, format!("{}", $value))),*],
        )
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::warning($message),
            &[$(($key, format!("{}", $value))),*],
        )
    };
}

/// Log a debug message; context is not even formatted when debug output is filtered
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::min_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::emit(
                $crate::logging::LogEvent::debug($message),
                &[$(($key, format!("{}", $value))),*],
            )
        }
    };
}
