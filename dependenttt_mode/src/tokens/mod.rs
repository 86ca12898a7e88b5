//! Style labels and highlighted tokens
//!
//! A mode classifies each token into at most one [`Style`]. Unclassified
//! tokens carry `None` and are rendered unstyled by the host.

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Style label handed to the host's rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    String,
    Comment,
    Number,
    Keyword,
}

impl Style {
    /// Every style, in declaration order
    pub const ALL: [Style; 4] = [Style::String, Style::Comment, Style::Number, Style::Keyword];

    pub const fn as_str(self) -> &'static str {
        match self {
            Style::String => "string",
            Style::Comment => "comment",
            Style::Number => "number",
            Style::Keyword => "keyword",
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown style '{}'", s))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label used for tokens without a style
pub fn style_label(style: Option<Style>) -> &'static str {
    style.map(Style::as_str).unwrap_or("null")
}

/// One token of a highlighted line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledToken {
    pub text: String,
    pub style: Option<Style>,
    pub span: Span,
}

impl StyledToken {
    pub fn new(text: impl Into<String>, style: Option<Style>, span: Span) -> Self {
        Self {
            text: text.into(),
            style,
            span,
        }
    }

    pub fn is_styled(&self) -> bool {
        self.style.is_some()
    }

    /// Extend this token with an adjacent one of the same style
    pub fn absorb(&mut self, next: StyledToken) {
        debug_assert_eq!(self.style, next.style);
        debug_assert_eq!(self.span.end.offset, next.span.start.offset);
        self.text.push_str(&next.text);
        self.span = self.span.merge(next.span);
    }
}

impl fmt::Display for StyledToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:?}",
            self.span,
            style_label(self.style),
            self.text
        )
    }
}
