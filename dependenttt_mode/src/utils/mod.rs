//! Shared location types used by the highlighter, folding and logging.

pub mod span;

pub use span::{Position, Span};
