//! Configuration module for the dependenttt mode
//! Uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    EscapePolicy, FileProcessorPreferences, HighlightPreferences, LoggingPreferences,
    ModePreferences, RuntimeConfig,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("DTT_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("DTT_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;
    use super::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(file_processing::MAX_FILE_SIZE > 0);
        assert!(highlighting::MAX_DOCUMENT_LINES > 0);
        assert!(highlighting::MAX_HIGHLIGHT_LENGTH > 0);
        assert!(logging::LOG_BUFFER_SIZE >= 100);
        assert!(logging::SECURITY_MIN_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_build_info() {
        assert!(build_info::source_info().ends_with(".toml"));
        assert!(!build_info::profile().is_empty());
    }
}
