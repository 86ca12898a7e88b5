//! Highlighting driver
//!
//! This is the host side of the mode contract: it walks each line with a
//! [`LineStream`], calls [`Mode::token`] until the line is exhausted and
//! records one [`StyledToken`] per call. Mode state is carried from line
//! to line.

mod error;
mod metrics;

pub use error::HighlightError;
pub use metrics::HighlightMetrics;

use crate::config::compile_time::highlighting::{MAX_DOCUMENT_LINES, MAX_HIGHLIGHT_LENGTH};
use crate::config::HighlightPreferences;
use crate::logging::codes;
use crate::mode::{Mode, ModeError, ModeState};
use crate::stream::{LineStream, StringStream};
use crate::tokens::{Style, StyledToken};
use crate::utils::{Position, Span};
use serde::Serialize;

/// Tokens of one source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedLine {
    /// 1-based line number
    pub number: u32,
    /// Byte offset of the line in the document
    pub offset: usize,
    pub text: String,
    pub tokens: Vec<StyledToken>,
    /// Whether the tail of the line was left unstyled because of its length
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedDocument {
    pub mode: String,
    pub lines: Vec<HighlightedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<HighlightMetrics>,
}

impl HighlightedDocument {
    pub fn tokens(&self) -> impl Iterator<Item = &StyledToken> {
        self.lines.iter().flat_map(|line| line.tokens.iter())
    }

    pub fn line(&self, number: u32) -> Option<&HighlightedLine> {
        self.lines.get(number.checked_sub(1)? as usize)
    }
}

impl HighlightedLine {
    /// Style of the token covering byte `index` of the line
    pub fn style_at(&self, index: usize) -> Option<Style> {
        let offset = self.offset + index;
        self.tokens
            .iter()
            .find(|token| token.span.contains(offset))
            .and_then(|token| token.style)
    }

    /// Document position of byte `index` of the line, or `None` when `index`
    /// is past the end or inside a character
    pub fn position_at(&self, index: usize) -> Option<Position> {
        let before = self.text.get(..index)?;
        Some(Position::line_start(self.offset, self.number).advance_str(before))
    }
}

/// Split text into lines on `\n` or `\r\n`, with the byte offset of each line
pub fn split_lines(text: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        lines.push((offset, line));
        offset += raw.len() + 1;
    }
    lines
}

/// Collapse runs of adjacent tokens that share a style
pub fn merge_adjacent(tokens: Vec<StyledToken>) -> Vec<StyledToken> {
    let mut merged: Vec<StyledToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match merged.last_mut() {
            Some(last) if last.style == token.style => last.absorb(token),
            _ => merged.push(token),
        }
    }
    merged
}

/// Drives a mode over lines and documents
pub struct Highlighter<'m> {
    mode: &'m dyn Mode,
    preferences: HighlightPreferences,
    max_highlight_length: usize,
    metrics: HighlightMetrics,
}

impl<'m> Highlighter<'m> {
    pub fn new(mode: &'m dyn Mode) -> Self {
        Self::with_preferences(mode, HighlightPreferences::default())
    }

    pub fn with_preferences(mode: &'m dyn Mode, preferences: HighlightPreferences) -> Self {
        Self {
            mode,
            preferences,
            max_highlight_length: MAX_HIGHLIGHT_LENGTH,
            metrics: HighlightMetrics::default(),
        }
    }

    /// Lower the per-line highlight limit; it can never exceed the compile-time maximum
    pub fn with_max_highlight_length(mut self, limit: usize) -> Self {
        self.max_highlight_length = limit.min(MAX_HIGHLIGHT_LENGTH);
        self
    }

    /// Metrics of the most recently highlighted document
    pub fn metrics(&self) -> &HighlightMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &HighlightPreferences {
        &self.preferences
    }

    /// Highlight a single line starting at `start`.
    ///
    /// Returns the tokens and whether the line was cut at the highlight limit.
    pub fn highlight_line(
        &self,
        line: &str,
        start: Position,
        state: &mut ModeState,
    ) -> Result<(Vec<StyledToken>, bool), ModeError> {
        let mut stream = LineStream::new(line);
        let mut tokens = Vec::new();
        let mut position = start;
        let mut truncated = false;

        while !stream.eol() {
            let mut style = None;
            if stream.pos() < self.max_highlight_length {
                style = self.mode.token(&mut stream, state)?;
                if stream.pos() == stream.start() {
                    return Err(ModeError::NoProgress {
                        mode: self.mode.name().to_string(),
                        offset: stream.pos(),
                    });
                }
            }

            // A token reaching past the limit loses its style along with the rest of the line
            if stream.pos() > self.max_highlight_length
                || stream.start() >= self.max_highlight_length
            {
                stream.consume_rest();
                style = None;
                truncated = true;
                log_warning!(code = codes::highlighting::LINE_TRUNCATED,
                    "Line exceeds highlight length; remainder left unstyled",
                    "line" => start.line,
                    "limit" => self.max_highlight_length);
            }

            let text = stream.current();
            let span = Span::covering(position, text);
            position = span.end;
            tokens.push(StyledToken::new(text, style, span));
            stream.advance_token();
        }

        let tokens = if self.preferences.merge_adjacent {
            merge_adjacent(tokens)
        } else {
            tokens
        };

        Ok((tokens, truncated))
    }

    /// Highlight a whole document, carrying the mode state across lines.
    ///
    /// Metrics start from zero for every document.
    pub fn highlight_document(&mut self, text: &str) -> Result<HighlightedDocument, HighlightError> {
        self.metrics = HighlightMetrics::default();
        let lines = split_lines(text);
        if lines.len() > MAX_DOCUMENT_LINES {
            let error = HighlightError::TooManyLines { lines: lines.len() };
            log_error!(error.error_code(), "Document exceeds maximum line count",
                "lines" => lines.len(),
                "max_lines" => MAX_DOCUMENT_LINES);
            return Err(error);
        }

        let mut state = self.mode.start_state();
        let mut highlighted = Vec::with_capacity(lines.len());

        for (index, (offset, line)) in lines.into_iter().enumerate() {
            let number = index as u32 + 1;
            let start = Position::line_start(offset, number);

            let (tokens, truncated) = self
                .highlight_line(line, start, &mut state)
                .map_err(|source| {
                    log_error!(source.error_code(), "Mode failed while highlighting",
                        "mode" => self.mode.name(),
                        "line" => number,
                        "error" => &source);
                    HighlightError::Mode {
                        line: number,
                        source,
                    }
                })?;

            if self.preferences.collect_metrics {
                self.metrics.record_line(&tokens, truncated);
            }

            highlighted.push(HighlightedLine {
                number,
                offset,
                text: line.to_string(),
                tokens,
                truncated,
            });
        }

        log_debug!("Document highlighted",
            "mode" => self.mode.name(),
            "lines" => highlighted.len());
        log_success!(codes::success::HIGHLIGHT_COMPLETE, "Highlighting complete",
            "mode" => self.mode.name(),
            "lines" => highlighted.len(),
            "tokens" => self.metrics.total_tokens);

        Ok(HighlightedDocument {
            mode: self.mode.name().to_string(),
            lines: highlighted,
            metrics: self
                .preferences
                .collect_metrics
                .then(|| self.metrics.clone()),
        })
    }
}

/// Highlight one line from a fresh start state
pub fn highlight_line(mode: &dyn Mode, line: &str) -> Result<Vec<StyledToken>, ModeError> {
    let mut state = mode.start_state();
    Highlighter::new(mode)
        .highlight_line(line, Position::start(), &mut state)
        .map(|(tokens, _)| tokens)
}

/// Highlight a document with default preferences
pub fn highlight_document(
    mode: &dyn Mode,
    text: &str,
) -> Result<HighlightedDocument, HighlightError> {
    Highlighter::new(mode).highlight_document(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EscapePolicy;
    use crate::mode::DependentttMode;
    use assert_matches::assert_matches;

    fn prefs(merge_adjacent: bool) -> HighlightPreferences {
        HighlightPreferences {
            merge_adjacent,
            collect_metrics: true,
        }
    }

    fn styles(tokens: &[StyledToken]) -> Vec<(&str, Option<Style>)> {
        tokens.iter().map(|t| (t.text.as_str(), t.style)).collect()
    }

    #[test]
    fn test_highlight_line() {
        let mode = DependentttMode::new();
        let tokens = highlight_line(&mode, "let x = 42 # answer").unwrap();

        assert_eq!(
            styles(&tokens),
            vec![
                ("let", Some(Style::Keyword)),
                (" ", None),
                ("x", None),
                (" ", None),
                ("=", None),
                (" ", None),
                ("42", Some(Style::Number)),
                (" ", None),
                ("# answer", Some(Style::Comment)),
            ]
        );
        assert_eq!(tokens[6].span.start.column, 9);
        assert_eq!(tokens[6].span.end.column, 11);
    }

    #[test]
    fn test_tokens_are_contiguous() {
        let mode = DependentttMode::new();
        let line = "axiom  ℕ : \"type\" {x1 2y}";
        let tokens = highlight_line(&mode, line).unwrap();

        let mut expected = 0;
        for token in &tokens {
            assert_eq!(token.span.start.offset, expected);
            assert_eq!(token.span.slice(line), Some(token.text.as_str()));
            expected = token.span.end.offset;
        }
        assert_eq!(expected, line.len());
    }

    #[test]
    fn test_document_lines_and_offsets() {
        let mode = DependentttMode::new();
        let doc = highlight_document(&mode, "block b {\r\n  rule r\n}").unwrap();

        assert_eq!(doc.mode, "dependenttt");
        assert_eq!(doc.lines.len(), 3);
        assert_eq!(doc.lines[0].text, "block b {");
        let rule = &doc.lines[1].tokens[1];
        assert_eq!(rule.text, "rule");
        assert_eq!(rule.style, Some(Style::Keyword));
        assert_eq!(rule.span.start.offset, 13);
        assert_eq!(rule.span.start.line, 2);
        assert_eq!(rule.span.start.column, 3);
        assert_eq!(doc.line(3).map(|l| l.text.as_str()), Some("}"));
        assert_eq!(doc.lines[2].offset, 20);
        assert_eq!(doc.lines[1].style_at(2), Some(Style::Keyword));
        assert_eq!(doc.lines[1].position_at(2).map(|p| p.column), Some(3));
        assert!(doc.line(0).is_none());
    }

    #[test]
    fn test_blank_lines_have_no_tokens() {
        let mode = DependentttMode::new();
        let doc = highlight_document(&mode, "let\n\nlet\n").unwrap();
        assert_eq!(doc.lines.len(), 4);
        assert!(doc.lines[1].tokens.is_empty());
        assert!(doc.lines[3].tokens.is_empty());
    }

    #[test]
    fn test_metrics() {
        let mode = DependentttMode::new();
        let doc = highlight_document(&mode, "declare n 12\n\"s\" # c").unwrap();
        let metrics = doc.metrics.unwrap();

        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.count(Style::Keyword), 1);
        assert_eq!(metrics.count(Style::Number), 1);
        assert_eq!(metrics.count(Style::String), 1);
        assert_eq!(metrics.count(Style::Comment), 1);
        assert_eq!(metrics.longest_token, 7);
    }

    #[test]
    fn test_metrics_can_be_disabled() {
        let mode = DependentttMode::new();
        let mut highlighter = Highlighter::with_preferences(
            &mode,
            HighlightPreferences {
                merge_adjacent: false,
                collect_metrics: false,
            },
        );
        let doc = highlighter.highlight_document("let").unwrap();
        assert!(doc.metrics.is_none());
        assert_eq!(highlighter.metrics().total_tokens, 0);
    }

    #[test]
    fn test_merge_adjacent() {
        let mode = DependentttMode::new();
        let highlighter = Highlighter::with_preferences(&mode, prefs(true));
        let (tokens, _) = highlighter
            .highlight_line("f (x) let", Position::start(), &mut ModeState)
            .unwrap();

        assert_eq!(
            styles(&tokens),
            vec![("f (x) ", None), ("let", Some(Style::Keyword))]
        );
        assert_eq!(tokens[0].span.len(), 6);
    }

    #[test]
    fn test_long_line_remainder_is_unstyled() {
        let mode = DependentttMode::new();
        let highlighter = Highlighter::new(&mode).with_max_highlight_length(8);
        let (tokens, truncated) = highlighter
            .highlight_line("let a = 1 let b = 2", Position::start(), &mut ModeState)
            .unwrap();

        assert!(truncated);
        let last = tokens.last().unwrap();
        assert_eq!(last.text, "1 let b = 2");
        assert_eq!(last.style, None);
        assert_eq!(last.span.start.offset, 8);
    }

    #[test]
    fn test_token_crossing_limit_is_unstyled() {
        let mode = DependentttMode::new();
        let highlighter = Highlighter::new(&mode).with_max_highlight_length(8);
        let line = "# a comment far longer than eight bytes";
        let (tokens, truncated) = highlighter
            .highlight_line(line, Position::start(), &mut ModeState)
            .unwrap();

        assert!(truncated);
        assert_eq!(styles(&tokens), vec![(line, None)]);
    }

    #[test]
    fn test_limit_splits_after_last_whole_token() {
        let mode = DependentttMode::new();
        let highlighter = Highlighter::new(&mode).with_max_highlight_length(8);
        let (tokens, truncated) = highlighter
            .highlight_line("let x \"string over\"", Position::start(), &mut ModeState)
            .unwrap();

        assert!(truncated);
        assert_eq!(
            styles(&tokens),
            vec![
                ("let", Some(Style::Keyword)),
                (" ", None),
                ("x", None),
                (" ", None),
                ("\"string over\"", None),
            ]
        );
        assert_eq!(tokens[4].span.start.offset, 6);
    }

    #[test]
    fn test_token_ending_at_limit_keeps_style() {
        let mode = DependentttMode::new();
        let highlighter = Highlighter::new(&mode).with_max_highlight_length(3);
        let (tokens, truncated) = highlighter
            .highlight_line("let", Position::start(), &mut ModeState)
            .unwrap();

        assert!(!truncated);
        assert_eq!(styles(&tokens), vec![("let", Some(Style::Keyword))]);
    }

    #[test]
    fn test_metrics_reset_between_documents() {
        let mode = DependentttMode::new();
        let mut highlighter = Highlighter::with_preferences(&mode, prefs(false));

        highlighter.highlight_document("let").unwrap();
        let second = highlighter.highlight_document("let").unwrap();
        let metrics = second.metrics.unwrap();

        assert_eq!(metrics.line_count, 1);
        assert_eq!(metrics.count(Style::Keyword), 1);
        assert_eq!(metrics.total_tokens, 1);
        assert_eq!(highlighter.metrics(), &metrics);
    }

    #[test]
    fn test_position_at_rejects_bad_index() {
        let mode = DependentttMode::new();
        let doc = highlight_document(&mode, "ℕ x").unwrap();
        let line = &doc.lines[0];

        assert_eq!(line.position_at(3).map(|p| p.column), Some(2));
        assert!(line.position_at(1).is_none());
        assert!(line.position_at(10).is_none());
    }

    #[test]
    fn test_limit_cannot_exceed_compile_time_maximum() {
        let mode = DependentttMode::new();
        let highlighter = Highlighter::new(&mode).with_max_highlight_length(usize::MAX);
        assert_eq!(highlighter.max_highlight_length, MAX_HIGHLIGHT_LENGTH);
    }

    #[test]
    fn test_mode_error_carries_line_number() {
        let mode = DependentttMode::with_escape_policy(EscapePolicy::Fault);
        let result = highlight_document(&mode, "let\n\"a\\b\"");

        assert_matches!(
            result,
            Err(HighlightError::Mode {
                line: 2,
                source: ModeError::EscapeFault { offset: 2 }
            })
        );
    }

    struct Stuck;

    impl Mode for Stuck {
        fn name(&self) -> &'static str {
            "stuck"
        }

        fn start_state(&self) -> ModeState {
            ModeState
        }

        fn token(
            &self,
            _stream: &mut dyn StringStream,
            _state: &mut ModeState,
        ) -> Result<Option<Style>, ModeError> {
            Ok(None)
        }
    }

    #[test]
    fn test_no_progress_is_an_error() {
        let result = highlight_line(&Stuck, "x");
        assert_matches!(
            result,
            Err(ModeError::NoProgress { mode, offset: 0 }) if mode == "stuck"
        );
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(
            split_lines("a\r\nbc\nd"),
            vec![(0, "a"), (3, "bc"), (6, "d")]
        );
        assert_eq!(split_lines(""), vec![(0, "")]);
    }

    #[test]
    fn test_document_serializes() {
        let mode = DependentttMode::new();
        let doc = highlight_document(&mode, "let").unwrap();
        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["mode"], "dependenttt");
        assert_eq!(json["lines"][0]["tokens"][0]["style"], "keyword");
        assert_eq!(json["metrics"]["styled_tokens"]["keyword"], 1);
    }
}
