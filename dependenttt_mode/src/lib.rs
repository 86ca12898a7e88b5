//! Syntax highlighting mode for the dependenttt language.
//!
//! The mode itself lives in [`mode::dependenttt`]; the rest of the crate is
//! the host side of the contract (stream cursor, registry, highlighting
//! driver, folding, comment toggling) plus file processing and logging.

// Internal modules
pub mod config;
#[macro_use]
pub mod logging;
pub mod comment;
pub mod file_processor;
pub mod folding;
pub mod grammar;
pub mod highlight;
pub mod mode;
pub mod pipeline;
pub mod registry;
pub mod stream;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use highlight::{HighlightError, HighlightedDocument, Highlighter};
pub use mode::{DependentttMode, Mode, ModeError, ModeState, MODE_NAME};
pub use pipeline::{highlight_file, PipelineError, PipelineResult};
pub use registry::{register_mode, ModeRegistrar, ModeRegistry};
pub use stream::{LineStream, StringStream};
pub use tokens::{Style, StyledToken};
