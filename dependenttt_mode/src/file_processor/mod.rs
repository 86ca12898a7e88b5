//! File processor module with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::config::runtime::FileProcessorPreferences;
pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, SOURCE_EXTENSION,
};

/// Process a file with the environment's preferences
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    create_processor_from_preferences(&FileProcessorPreferences::default()).process_file(file_path)
}

/// Create a file processor from runtime preferences structure
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_process_file_with_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "let x = 1").unwrap();

        let result = process_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(result.source, "let x = 1");
    }

    #[test]
    fn test_max_file_size_is_positive() {
        assert!(get_max_file_size() > 0);
    }
}
