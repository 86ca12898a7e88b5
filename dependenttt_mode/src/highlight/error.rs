use crate::config::compile_time::highlighting::MAX_DOCUMENT_LINES;
use crate::logging::{codes, Code};
use crate::mode::ModeError;

/// Highlighting driver errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    #[error("Line {line}: {source}")]
    Mode {
        line: u32,
        #[source]
        source: ModeError,
    },

    #[error("Too many lines: {lines} (max {MAX_DOCUMENT_LINES})")]
    TooManyLines { lines: usize },
}

impl HighlightError {
    pub fn error_code(&self) -> Code {
        match self {
            HighlightError::Mode { source, .. } => source.error_code(),
            HighlightError::TooManyLines { .. } => codes::highlighting::TOO_MANY_LINES,
        }
    }

    /// The mode error underneath, if any
    pub fn mode_error(&self) -> Option<&ModeError> {
        match self {
            HighlightError::Mode { source, .. } => Some(source),
            HighlightError::TooManyLines { .. } => None,
        }
    }
}
