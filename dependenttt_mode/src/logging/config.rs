//! Logging settings
//!
//! Limits are compile-time constants from the build profile. Preferences
//! are installed once at startup; until then the environment defaults apply.

use super::events::LogLevel;
use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH, SECURITY_MIN_LOG_LEVEL,
};
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

static PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install the process-wide logging preferences. Fails if already installed.
pub fn install_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    PREFERENCES
        .set(preferences)
        .map_err(|_| "logging preferences were already installed".to_string())
}

fn with_preferences<T>(read: impl FnOnce(&LoggingPreferences) -> T) -> T {
    match PREFERENCES.get() {
        Some(installed) => read(installed),
        None => read(&LoggingPreferences::default()),
    }
}

/// Least verbose level the build allows; errors and up to this level always pass
pub fn floor_level() -> LogLevel {
    [LogLevel::Error, LogLevel::Warning, LogLevel::Info]
        .get(SECURITY_MIN_LOG_LEVEL as usize)
        .copied()
        .unwrap_or(LogLevel::Debug)
}

/// Preferred level, raised to the build floor when it is stricter
pub fn min_level() -> LogLevel {
    with_preferences(|p| p.min_log_level.to_events_log_level()).max(floor_level())
}

pub fn console_enabled() -> bool {
    with_preferences(|p| p.enable_console_logging)
}

/// JSON lines instead of plain text on the console
pub fn structured_output() -> bool {
    with_preferences(|p| p.use_structured_logging)
}

pub fn forward_to_log() -> bool {
    with_preferences(|p| p.forward_to_log_crate)
}

/// Capacity of the in-memory logger
pub fn buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn max_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Re-check the compiled limits before the global service starts
pub fn validate() -> Result<(), String> {
    if !(100..=100_000).contains(&LOG_BUFFER_SIZE) {
        return Err(format!(
            "log buffer size {} is outside 100..=100000",
            LOG_BUFFER_SIZE
        ));
    }
    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("log message length limit is zero".to_string());
    }
    Ok(())
}
