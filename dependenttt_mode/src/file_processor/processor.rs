//! Reading and validating dependenttt source files

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::config::compile_time::highlighting::MAX_DOCUMENT_LINES;
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::{codes, Code};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Extension of dependenttt source files
pub const SOURCE_EXTENSION: &str = "dtt";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .dtt, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path:?}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> Code {
        use codes::file_processing as fp;

        match self {
            Self::FileNotFound { .. } => fp::FILE_NOT_FOUND,
            Self::InvalidExtension { .. } => fp::INVALID_EXTENSION,
            Self::FileTooLarge { .. } => fp::FILE_TOO_LARGE,
            Self::PermissionDenied { .. } => fp::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => fp::INVALID_ENCODING,
            Self::IoError { .. } => fp::IO_ERROR,
            Self::InvalidPath { .. } => fp::INVALID_PATH,
            Self::TooManyLines { .. } => codes::highlighting::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        self.error_code().requires_halt()
    }

    pub fn is_recoverable(&self) -> bool {
        self.error_code().is_recoverable()
    }

    /// Classify an I/O failure on `path`
    fn from_io(path: &Path, error: &io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => Self::FileNotFound { path },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            ErrorKind::InvalidData => Self::InvalidEncoding { path },
            _ => Self::IoError {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// Log `error` under its code with the offending file, and hand it back
fn reject(error: FileProcessorError, message: &str, file_path: &str) -> FileProcessorError {
    log_error!(error.error_code(), message, "file" => file_path, "error" => &error);
    error
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_source_file: bool,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

        if self.size < 1024 {
            return format!("{} B", self.size);
        }

        let mut size = self.size as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit + 1 < UNITS.len() {
            size /= 1024.0;
            unit += 1;
        }
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// File contents ready for highlighting
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Reject files without the .dtt extension
    pub require_extension: bool,
    /// Add sizes and timings to the success event
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_extension: prefs.require_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_extension_required(mut self, required: bool) -> Self {
        self.require_extension = required;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    /// Read a source file, checking it against the compile-time limits
    pub fn process_file(&self, file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
        let started = Instant::now();
        log_debug!("Reading source file", "file" => file_path);

        let path = resolve(file_path)?;
        let mut metadata = self.inspect(&path, file_path)?;

        let source = fs::read_to_string(&path).map_err(|e| {
            reject(
                FileProcessorError::from_io(&path, &e),
                "Failed to read file",
                file_path,
            )
        })?;

        metadata.line_count = source.split('\n').count();
        if metadata.line_count > MAX_DOCUMENT_LINES {
            return Err(reject(
                FileProcessorError::TooManyLines {
                    lines: metadata.line_count,
                    max_lines: MAX_DOCUMENT_LINES,
                },
                "File exceeds maximum line count",
                file_path,
            ));
        }

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: started.elapsed(),
        };
        self.log_success(&result, file_path);
        Ok(result)
    }

    /// Size and extension checks on the resolved path
    fn inspect(&self, path: &Path, file_path: &str) -> Result<FileMetadata, FileProcessorError> {
        let size = fs::metadata(path)
            .map_err(|e| {
                reject(
                    FileProcessorError::from_io(path, &e),
                    "Failed to read file metadata",
                    file_path,
                )
            })?
            .len();

        if size > MAX_FILE_SIZE {
            return Err(reject(
                FileProcessorError::FileTooLarge {
                    size,
                    max_size: MAX_FILE_SIZE,
                },
                "File exceeds compile-time maximum size limit",
                file_path,
            ));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let is_source_file = extension.as_deref() == Some(SOURCE_EXTENSION);

        if self.require_extension && !is_source_file {
            return Err(reject(
                FileProcessorError::InvalidExtension { extension },
                "File does not have the .dtt extension",
                file_path,
            ));
        }

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size,
            extension,
            line_count: 0,
            is_source_file,
        })
    }

    fn log_success(&self, result: &FileProcessingResult, file_path: &str) {
        if !self.enable_performance_logging {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "File processed", "file" => file_path);
            return;
        }

        log_success!(codes::success::FILE_PROCESSING_SUCCESS, "File processed",
            "file" => file_path,
            "size" => result.metadata.human_readable_size(),
            "lines" => result.metadata.line_count,
            "chars" => result.char_count(),
            "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0));
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical path of an existing regular file
fn resolve(file_path: &str) -> Result<PathBuf, FileProcessorError> {
    let invalid = || FileProcessorError::InvalidPath {
        path: file_path.to_string(),
    };

    if file_path.is_empty() {
        return Err(reject(invalid(), "Empty file path provided", file_path));
    }

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(reject(
            FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            },
            "File not found",
            file_path,
        ));
    }
    if !path.is_file() {
        return Err(reject(invalid(), "Path is not a file", file_path));
    }

    path.canonicalize().map_err(|e| {
        reject(
            FileProcessorError::from_io(path, &e),
            "Failed to resolve path",
            file_path,
        )
    })
}
