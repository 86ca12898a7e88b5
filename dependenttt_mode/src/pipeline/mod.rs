//! File to highlighted document, in one call
//!
//! Stage 1 reads and validates the file, stage 2 runs the highlighting
//! driver over it. Every event logged along the way carries the file
//! context.

use crate::config::RuntimeConfig;
use crate::file_processor::{FileMetadata, FileProcessor, FileProcessorError};
use crate::highlight::{HighlightError, HighlightedDocument, Highlighter};
use crate::logging::{self, Code};
use crate::mode::Mode;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    File(#[from] FileProcessorError),

    #[error("Highlighting failed: {0}")]
    Highlight(#[from] HighlightError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::File(e) => e.error_code(),
            PipelineError::Highlight(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub metadata: FileMetadata,
    pub source: String,
    pub document: HighlightedDocument,
    pub duration: Duration,
}

/// Read `file_path` and highlight it with `mode`
pub fn highlight_file(
    file_path: &str,
    mode: &dyn Mode,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting highlight pipeline",
            "file" => file_path,
            "mode" => mode.name());

        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;

        let document = Highlighter::with_preferences(mode, config.highlight.clone())
            .highlight_document(&file_result.source)?;

        Ok(PipelineResult {
            metadata: file_result.metadata,
            source: file_result.source,
            document,
            duration: start_time.elapsed(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EscapePolicy;
    use crate::logging::codes;
    use crate::mode::DependentttMode;
    use crate::tokens::Style;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_highlight_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.dtt");
        std::fs::write(&path, "axiom a # note\nlet n = 42\n").unwrap();

        let result = highlight_file(
            path.to_str().unwrap(),
            &DependentttMode::new(),
            &RuntimeConfig::default(),
        )
        .unwrap();

        assert_eq!(result.document.lines.len(), 3);
        let styles: Vec<_> = result.document.tokens().filter_map(|t| t.style).collect();
        assert_eq!(
            styles,
            vec![Style::Keyword, Style::Comment, Style::Keyword, Style::Number]
        );
        assert!(logging::current_file().is_none());
    }

    #[test]
    fn test_missing_file_maps_to_file_error() {
        let error = highlight_file(
            "/nonexistent/main.dtt",
            &DependentttMode::new(),
            &RuntimeConfig::default(),
        )
        .unwrap_err();

        assert_matches!(error, PipelineError::File(FileProcessorError::FileNotFound { .. }));
        assert_eq!(error.error_code(), codes::file_processing::FILE_NOT_FOUND);
    }

    #[test]
    fn test_escape_fault_maps_to_highlight_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("esc.dtt");
        std::fs::write(&path, "let s = \"a\\\"b\"").unwrap();

        let error = highlight_file(
            path.to_str().unwrap(),
            &DependentttMode::with_escape_policy(EscapePolicy::Fault),
            &RuntimeConfig::default(),
        )
        .unwrap_err();

        assert_matches!(error, PipelineError::Highlight(HighlightError::Mode { line: 1, .. }));
        assert_eq!(error.error_code(), codes::mode::ESCAPE_FAULT);
    }
}
