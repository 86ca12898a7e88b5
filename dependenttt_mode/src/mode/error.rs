use crate::logging::{codes, Code};

/// Errors raised by modes and the mode registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    #[error("Backslash inside string literal at byte {offset} (escape policy 'fault')")]
    EscapeFault { offset: usize },

    #[error("Mode '{mode}' returned without consuming input at byte {offset}")]
    NoProgress { mode: String, offset: usize },

    #[error("Unknown mode: '{name}'")]
    UnknownMode { name: String },

    #[error("Mode '{name}' is already registered")]
    DuplicateMode { name: String },

    #[error("Bracket pair string {pairs:?} has an odd number of characters")]
    InvalidBracketPairs { pairs: String },
}

impl ModeError {
    pub fn error_code(&self) -> Code {
        match self {
            ModeError::EscapeFault { .. } => codes::mode::ESCAPE_FAULT,
            ModeError::NoProgress { .. } => codes::mode::NO_PROGRESS,
            ModeError::UnknownMode { .. } => codes::mode::UNKNOWN_MODE,
            ModeError::DuplicateMode { .. } => codes::mode::DUPLICATE_MODE,
            ModeError::InvalidBracketPairs { .. } => codes::mode::INVALID_BRACKET_PAIRS,
        }
    }
}
