// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// How a backslash inside a string literal is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapePolicy {
    /// The backslash and the character after it are both consumed,
    /// so `\"` does not close the string.
    #[default]
    Skip,
    /// The backslash is an ordinary character; `\"` closes the string.
    Literal,
    /// Meeting a backslash inside a string is a mode fault.
    Fault,
}

impl EscapePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscapePolicy::Skip => "skip",
            EscapePolicy::Literal => "literal",
            EscapePolicy::Fault => "fault",
        }
    }
}

impl fmt::Display for EscapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EscapePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(EscapePolicy::Skip),
            "literal" => Ok(EscapePolicy::Literal),
            "fault" => Ok(EscapePolicy::Fault),
            other => Err(format!(
                "unknown escape policy '{}' (expected skip, literal or fault)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModePreferences {
    /// Backslash handling inside string literals
    pub escape_policy: EscapePolicy,
}

impl Default for ModePreferences {
    fn default() -> Self {
        Self {
            escape_policy: env::var(env_vars::MODE_ESCAPE_POLICY)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightPreferences {
    /// Whether adjacent tokens with the same style are merged into one
    pub merge_adjacent: bool,

    /// Whether to collect per-style token metrics
    pub collect_metrics: bool,
}

impl Default for HighlightPreferences {
    fn default() -> Self {
        Self {
            merge_adjacent: env::var(env_vars::HIGHLIGHT_MERGE_ADJACENT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            collect_metrics: env::var(env_vars::HIGHLIGHT_COLLECT_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require the .dtt extension
    pub require_extension: bool,

    /// Whether to log read timings
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_extension: env::var(env_vars::REQUIRE_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether events are forwarded to the `log` facade instead of the console
    pub forward_to_log_crate: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            forward_to_log_crate: env::var(env_vars::LOGGING_FORWARD_TO_LOG)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
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

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

fn parse_log_level(s: &str) -> Option<LogLevel> {
    match s.to_lowercase().as_str() {
        "error" => Some(LogLevel::Error),
        "warning" | "warn" => Some(LogLevel::Warning),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub mode: ModePreferences,
    pub highlight: HighlightPreferences,
    pub file_processor: FileProcessorPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load preferences from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Mode
    pub const MODE_ESCAPE_POLICY: &str = "DTT_MODE_ESCAPE_POLICY";

    // Highlighting
    pub const HIGHLIGHT_MERGE_ADJACENT: &str = "DTT_HIGHLIGHT_MERGE_ADJACENT";
    pub const HIGHLIGHT_COLLECT_METRICS: &str = "DTT_HIGHLIGHT_COLLECT_METRICS";

    // File Processor
    pub const REQUIRE_EXTENSION: &str = "DTT_REQUIRE_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "DTT_ENABLE_PERFORMANCE_LOGGING";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "DTT_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "DTT_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "DTT_LOGGING_MIN_LEVEL";
    pub const LOGGING_FORWARD_TO_LOG: &str = "DTT_LOGGING_FORWARD_TO_LOG";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_policy_parsing() {
        assert_eq!("skip".parse::<EscapePolicy>(), Ok(EscapePolicy::Skip));
        assert_eq!(" Literal ".parse::<EscapePolicy>(), Ok(EscapePolicy::Literal));
        assert_eq!("FAULT".parse::<EscapePolicy>(), Ok(EscapePolicy::Fault));
        assert!("ignore".parse::<EscapePolicy>().is_err());
    }

    #[test]
    fn test_escape_policy_default_is_skip() {
        assert_eq!(EscapePolicy::default(), EscapePolicy::Skip);
    }

    #[test]
    fn test_escape_policy_serde_names() {
        let json = serde_json::to_string(&EscapePolicy::Literal).unwrap();
        assert_eq!(json, "\"literal\"");
        let parsed: EscapePolicy = serde_json::from_str("\"fault\"").unwrap();
        assert_eq!(parsed, EscapePolicy::Fault);
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(
            LogLevel::Warning.to_events_log_level(),
            crate::logging::LogLevel::Warning
        );
    }

    #[test]
    fn test_runtime_config_round_trips_through_json() {
        let config = RuntimeConfig {
            mode: ModePreferences {
                escape_policy: EscapePolicy::Fault,
            },
            ..RuntimeConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode.escape_policy, EscapePolicy::Fault);
    }
}
