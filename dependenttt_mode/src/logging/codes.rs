//! Event codes and their classification
//!
//! Every code logged by the crate is declared here. Error and success codes
//! carry registry metadata; the placeholder codes of uncoded events do not.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Short stable identifier such as `E020` or `I006`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Registry entry for one code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODES
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Mode and registry error codes
pub mod mode {
    use super::Code;

    pub const ESCAPE_FAULT: Code = Code::new("E020");
    pub const NO_PROGRESS: Code = Code::new("E021");
    pub const UNKNOWN_MODE: Code = Code::new("E022");
    pub const DUPLICATE_MODE: Code = Code::new("E023");
    pub const INVALID_BRACKET_PAIRS: Code = Code::new("E024");
}

/// Highlighting driver codes
pub mod highlighting {
    use super::Code;

    pub const TOO_MANY_LINES: Code = Code::new("E030");
    pub const LINE_TRUNCATED: Code = Code::new("W031");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const MODE_REGISTERED: Code = Code::new("I010");
    pub const HIGHLIGHT_COMPLETE: Code = Code::new("I011");
}

// ============================================================================
// REGISTRY
// ============================================================================

static REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Internal error",
                "Report the failure with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Initialization failure",
                "Check logging and configuration setup",
            ),
            // File processing
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "File not found",
                "Check the file path",
            ),
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Medium,
                true,
                false,
                "Invalid file extension",
                "Use a .dtt file or disable DTT_REQUIRE_EXTENSION",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "File exceeds the compile-time size limit",
                "Split the file or rebuild with a larger max_file_size",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Permission denied",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "File is not valid UTF-8",
                "Re-encode the file as UTF-8",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "I/O error while reading file",
                "Check the file system",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Path is empty or not a regular file",
                "Pass the path of a source file",
            ),
            // Mode
            ErrorMetadata::new(
                "E020",
                "Mode",
                Severity::Medium,
                true,
                false,
                "Backslash inside a string literal under the fault escape policy",
                "Switch DTT_MODE_ESCAPE_POLICY to skip or literal",
            ),
            ErrorMetadata::new(
                "E021",
                "Mode",
                Severity::Critical,
                false,
                true,
                "Mode returned without advancing the stream",
                "Fix the mode's token function",
            ),
            ErrorMetadata::new(
                "E022",
                "Registry",
                Severity::High,
                false,
                true,
                "No mode registered under the requested name",
                "Register the mode before looking it up",
            ),
            ErrorMetadata::new(
                "E023",
                "Registry",
                Severity::Medium,
                true,
                false,
                "A mode with this name is already registered",
                "Register each mode once",
            ),
            ErrorMetadata::new(
                "E024",
                "Mode",
                Severity::Medium,
                true,
                false,
                "Bracket pair string has an odd number of characters",
                "List brackets as consecutive open/close pairs",
            ),
            // Highlighting
            ErrorMetadata::new(
                "E030",
                "Highlighting",
                Severity::High,
                false,
                true,
                "Document exceeds the compile-time line limit",
                "Split the document or rebuild with a larger max_document_lines",
            ),
            ErrorMetadata::new(
                "W031",
                "Highlighting",
                Severity::Low,
                true,
                false,
                "Line exceeds the highlight length; the remainder is unstyled",
                "No action needed",
            ),
            // Success codes
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "Continue",
            ),
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File read successfully",
                "Continue to highlighting",
            ),
            ErrorMetadata::new(
                "I010",
                "Registry",
                Severity::Low,
                true,
                false,
                "Mode registered",
                "Continue",
            ),
            ErrorMetadata::new(
                "I011",
                "Highlighting",
                Severity::Low,
                true,
                false,
                "Document highlighted",
                "Continue",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

impl Code {
    /// Registry entry, if this code has one
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        registry().get(self.0)
    }

    /// Unregistered codes are treated as medium severity
    pub fn severity(&self) -> Severity {
        self.metadata().map_or(Severity::Medium, |m| m.severity)
    }

    pub fn category(&self) -> &'static str {
        self.metadata().map_or("Unknown", |m| m.category)
    }

    pub fn is_recoverable(&self) -> bool {
        self.metadata().map_or(true, |m| m.recoverable)
    }

    pub fn requires_halt(&self) -> bool {
        self.metadata().map_or(false, |m| m.requires_halt)
    }

    pub fn description(&self) -> &'static str {
        self.metadata().map_or("Unknown error", |m| m.description)
    }

    pub fn recommended_action(&self) -> &'static str {
        self.metadata()
            .map_or("No specific action available", |m| m.recommended_action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_code_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::INVALID_EXTENSION,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            mode::ESCAPE_FAULT,
            mode::NO_PROGRESS,
            mode::UNKNOWN_MODE,
            mode::DUPLICATE_MODE,
            mode::INVALID_BRACKET_PAIRS,
            highlighting::TOO_MANY_LINES,
            highlighting::LINE_TRUNCATED,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::FILE_PROCESSING_SUCCESS,
            success::MODE_REGISTERED,
            success::HIGHLIGHT_COMPLETE,
        ];

        for code in all {
            assert!(
                code.metadata().is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(mode::ESCAPE_FAULT.category(), "Mode");
        assert!(mode::ESCAPE_FAULT.is_recoverable());
        assert!(mode::NO_PROGRESS.requires_halt());
        assert_eq!(mode::NO_PROGRESS.severity(), Severity::Critical);
    }

    #[test]
    fn test_unknown_code_defaults() {
        let unknown = Code::new("E999");
        assert!(unknown.metadata().is_none());
        assert_eq!(unknown.description(), "Unknown error");
        assert_eq!(unknown.category(), "Unknown");
        assert_eq!(unknown.recommended_action(), "No specific action available");
        assert_eq!(unknown.severity(), Severity::Medium);
        assert!(unknown.is_recoverable());
        assert!(!unknown.requires_halt());
    }
}
