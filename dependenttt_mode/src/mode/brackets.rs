//! Auto-close bracket pairs
//!
//! Modes advertise their pairs as one string of consecutive open/close
//! characters, e.g. `()[]{}""`.

use super::ModeError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketPairs {
    pairs: Vec<(char, char)>,
}

impl BracketPairs {
    pub fn parse(close_brackets: &str) -> Result<Self, ModeError> {
        let chars: Vec<char> = close_brackets.chars().collect();
        if chars.len() % 2 != 0 {
            return Err(ModeError::InvalidBracketPairs {
                pairs: close_brackets.to_string(),
            });
        }

        Ok(Self {
            pairs: chars.chunks(2).map(|pair| (pair[0], pair[1])).collect(),
        })
    }

    pub fn pairs(&self) -> &[(char, char)] {
        &self.pairs
    }

    /// Closing character to insert after typing `open`
    pub fn closing_for(&self, open: char) -> Option<char> {
        self.pairs
            .iter()
            .find(|(o, _)| *o == open)
            .map(|(_, close)| *close)
    }

    pub fn is_opening(&self, ch: char) -> bool {
        self.pairs.iter().any(|(o, _)| *o == ch)
    }

    pub fn is_closing(&self, ch: char) -> bool {
        self.pairs.iter().any(|(_, c)| *c == ch)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
