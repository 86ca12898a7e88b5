use crate::tokens::{Style, StyledToken};
use serde::Serialize;
use std::collections::BTreeMap;

/// Token statistics gathered while highlighting a document
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightMetrics {
    pub line_count: usize,
    pub total_tokens: usize,
    pub unstyled_tokens: usize,
    pub styled_tokens: BTreeMap<Style, usize>,
    /// Longest token in characters
    pub longest_token: usize,
    pub truncated_lines: usize,
}

impl HighlightMetrics {
    pub(crate) fn record_line(&mut self, tokens: &[StyledToken], truncated: bool) {
        self.line_count += 1;
        if truncated {
            self.truncated_lines += 1;
        }
        for token in tokens {
            self.record_token(token);
        }
    }

    fn record_token(&mut self, token: &StyledToken) {
        self.total_tokens += 1;
        match token.style {
            Some(style) => *self.styled_tokens.entry(style).or_insert(0) += 1,
            None => self.unstyled_tokens += 1,
        }
        self.longest_token = self.longest_token.max(token.text.chars().count());
    }

    pub fn count(&self, style: Style) -> usize {
        self.styled_tokens.get(&style).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Position, Span};

    fn token(text: &str, style: Option<Style>) -> StyledToken {
        StyledToken::new(text, style, Span::covering(Position::start(), text))
    }

    #[test]
    fn test_record_line() {
        let mut metrics = HighlightMetrics::default();
        metrics.record_line(
            &[
                token("let", Some(Style::Keyword)),
                token(" ", None),
                token("\"long string\"", Some(Style::String)),
            ],
            false,
        );
        metrics.record_line(&[], true);

        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.total_tokens, 3);
        assert_eq!(metrics.unstyled_tokens, 1);
        assert_eq!(metrics.count(Style::Keyword), 1);
        assert_eq!(metrics.count(Style::Number), 0);
        assert_eq!(metrics.longest_token, 13);
        assert_eq!(metrics.truncated_lines, 1);
    }
}
