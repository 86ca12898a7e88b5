//! Log events
//!
//! An event is a level, a code, a message and optional location and
//! key/value context. Console output uses the `Display` form; structured
//! output serializes the event together with its code metadata.

use super::codes::{Code, ErrorMetadata};
use crate::utils::Span;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Log severity levels, most severe first
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

// Placeholder codes for events logged without one
const UNCODED_WARNING: Code = Code::new("W000");
const UNCODED_INFO: Code = Code::new("I000");
const UNCODED_DEBUG: Code = Code::new("D000");

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    /// Warning without a specific code
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

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    /// Registry entry for this event's code
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        self.code.metadata()
    }

    pub fn category(&self) -> &'static str {
        self.code.category()
    }

    pub fn requires_halt(&self) -> bool {
        self.code.requires_halt()
    }

    /// One JSON object, with the code's classification added to error events
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let details = self
            .is_error()
            .then(|| self.metadata())
            .flatten()
            .map(|metadata| ErrorDetails {
                recoverable: metadata.recoverable,
                requires_halt: metadata.requires_halt,
                description: metadata.description,
                recommended_action: metadata.recommended_action,
            });

        serde_json::to_string(&JsonRecord {
            event: self,
            category: self.category(),
            severity: self.code.severity().as_str(),
            error_metadata: details,
        })
    }
}

#[derive(Serialize)]
struct ErrorDetails {
    recoverable: bool,
    requires_halt: bool,
    description: &'static str,
    recommended_action: &'static str,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    event: &'a LogEvent,
    category: &'static str,
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_metadata: Option<ErrorDetails>,
}

/// `[LEVEL] CODE - message at l:c (key=value, ...)`, with the message cut
/// to the compile-time length limit
impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - ", self.level, self.code)?;

        let limit = super::config::max_message_length();
        match self.message.char_indices().nth(limit) {
            Some((cut, _)) => write!(f, "{}...", &self.message[..cut])?,
            None => f.write_str(&self.message)?,
        }

        if let Some(span) = &self.span {
            write!(f, " at {}", span.start)?;
        }

        if !self.context.is_empty() {
            f.write_str(" (")?;
            for (index, (key, value)) in self.context.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            f.write_str(")")?;
        }

        Ok(())
    }
}
