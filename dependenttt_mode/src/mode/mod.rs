//! Syntax-highlighting modes
//!
//! A [`Mode`] classifies one token per call to [`Mode::token`]. The host
//! drives it across a line, carrying a [`ModeState`] from call to call
//! and from line to line. Besides tokenizing, a mode advertises the editor
//! behaviours that go with the language: auto-closed brackets, the line
//! comment marker, and the folding strategy.

pub mod brackets;
pub mod dependenttt;
pub mod error;

pub use brackets::BracketPairs;
pub use dependenttt::{DependentttMode, MODE_NAME};
pub use error::ModeError;

use crate::stream::StringStream;
use crate::tokens::Style;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-session state threaded through every token call.
///
/// dependenttt needs nothing between calls, so the state has no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModeState;

/// How the host computes fold ranges for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldStrategy {
    /// Fold between matching `{}` or `[]` pairs
    Brace,
    None,
}

impl FoldStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoldStrategy::Brace => "brace",
            FoldStrategy::None => "none",
        }
    }
}

impl fmt::Display for FoldStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Mode: Send + Sync {
    /// Name the mode is registered under
    fn name(&self) -> &'static str;

    fn start_state(&self) -> ModeState;

    /// Consume exactly one token from `stream` and classify it.
    ///
    /// Implementations must advance the stream unless it is already at
    /// end of line.
    fn token(
        &self,
        stream: &mut dyn StringStream,
        state: &mut ModeState,
    ) -> Result<Option<Style>, ModeError>;

    /// Auto-close pairs as consecutive open/close characters
    fn close_brackets(&self) -> &'static str {
        ""
    }

    fn line_comment(&self) -> Option<&'static str> {
        None
    }

    fn fold(&self) -> FoldStrategy {
        FoldStrategy::None
    }

    /// Parsed form of [`Mode::close_brackets`]
    fn bracket_pairs(&self) -> Result<BracketPairs, ModeError> {
        BracketPairs::parse(self.close_brackets())
    }
}
