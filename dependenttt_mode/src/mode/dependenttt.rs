//! The dependenttt highlighting mode

use super::{FoldStrategy, Mode, ModeError, ModeState};
use crate::config::{EscapePolicy, ModePreferences};
use crate::grammar::{self, keywords};
use crate::stream::StringStream;
use crate::tokens::Style;

pub const MODE_NAME: &str = "dependenttt";

const CLOSE_BRACKETS: &str = "()[]{}\"\"";
const LINE_COMMENT: &str = "#";

#[derive(Debug, Clone, Default)]
pub struct DependentttMode {
    escape_policy: EscapePolicy,
}

impl DependentttMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escape_policy(escape_policy: EscapePolicy) -> Self {
        Self { escape_policy }
    }

    pub fn with_preferences(preferences: &ModePreferences) -> Self {
        Self::with_escape_policy(preferences.escape_policy)
    }

    pub fn escape_policy(&self) -> EscapePolicy {
        self.escape_policy
    }

    /// Consume a string body after its opening quote
    fn eat_string(&self, stream: &mut dyn StringStream) -> Result<(), ModeError> {
        loop {
            match stream.next() {
                None | Some('"') => return Ok(()),
                Some('\\') => match self.escape_policy {
                    EscapePolicy::Skip => {
                        stream.next();
                    }
                    EscapePolicy::Literal => {}
                    EscapePolicy::Fault => {
                        return Err(ModeError::EscapeFault {
                            offset: stream.pos() - 1,
                        });
                    }
                },
                Some(_) => {}
            }
        }
    }
}

impl Mode for DependentttMode {
    fn name(&self) -> &'static str {
        MODE_NAME
    }

    fn start_state(&self) -> ModeState {
        ModeState
    }

    fn token(
        &self,
        stream: &mut dyn StringStream,
        _state: &mut ModeState,
    ) -> Result<Option<Style>, ModeError> {
        if stream.eat_space() {
            return Ok(None);
        }

        let Some(ch) = stream.next() else {
            return Ok(None);
        };

        match ch {
            '"' => {
                self.eat_string(stream)?;
                Ok(Some(Style::String))
            }
            '#' => {
                stream.skip_to_end();
                Ok(Some(Style::Comment))
            }
            c if grammar::is_digit(c) => {
                stream.eat_while(&grammar::is_digit);
                Ok(Some(Style::Number))
            }
            c if grammar::is_word_char(c) => {
                stream.eat_while(&grammar::is_word_char);
                Ok(keywords::lookup(stream.current()))
            }
            _ => Ok(None),
        }
    }

    fn close_brackets(&self) -> &'static str {
        CLOSE_BRACKETS
    }

    fn line_comment(&self) -> Option<&'static str> {
        Some(LINE_COMMENT)
    }

    fn fold(&self) -> FoldStrategy {
        FoldStrategy::Brace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::LineStream;
    use assert_matches::assert_matches;

    /// Run the mode over a line, collecting (text, style) pairs
    fn tokens_with(mode: &DependentttMode, line: &str) -> Vec<(String, Option<Style>)> {
        let mut stream = LineStream::new(line);
        let mut state = mode.start_state();
        let mut out = Vec::new();
        while !stream.eol() {
            let style = mode.token(&mut stream, &mut state).unwrap();
            out.push((stream.current().to_string(), style));
            stream.advance_token();
        }
        out
    }

    fn tokens(line: &str) -> Vec<(String, Option<Style>)> {
        tokens_with(&DependentttMode::new(), line)
    }

    fn single(line: &str) -> (Option<Style>, usize) {
        let mode = DependentttMode::new();
        let mut stream = LineStream::new(line);
        let style = mode.token(&mut stream, &mut ModeState).unwrap();
        (style, stream.pos())
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(single(" \t  "), (None, 4));
        assert_eq!(single("\u{a0}\u{a0}"), (None, 4));
    }

    #[test]
    fn test_keyword() {
        assert_eq!(single("declare"), (Some(Style::Keyword), 7));
        for word in ["block", "rule", "let", "axiom"] {
            assert_eq!(single(word), (Some(Style::Keyword), word.len()));
        }
    }

    #[test]
    fn test_identifier_is_unstyled() {
        assert_eq!(single("foobar"), (None, 6));
        assert_eq!(single("declared"), (None, 8));
        assert_eq!(single("Let"), (None, 3));
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(single("#comment to EOL"), (Some(Style::Comment), 15));
    }

    #[test]
    fn test_number_then_word() {
        assert_eq!(
            tokens("123abc"),
            vec![
                ("123".to_string(), Some(Style::Number)),
                ("abc".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_number_has_no_fraction() {
        assert_eq!(
            tokens("1.5"),
            vec![
                ("1".to_string(), Some(Style::Number)),
                (".".to_string(), None),
                ("5".to_string(), Some(Style::Number)),
            ]
        );
    }

    #[test]
    fn test_word_may_contain_digits() {
        assert_eq!(tokens("x1_y"), vec![("x1_y".to_string(), None)]);
    }

    #[test]
    fn test_string() {
        assert_eq!(single("\"hello\""), (Some(Style::String), 7));
        assert_eq!(single("\"\" rest"), (Some(Style::String), 2));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(single("\"unterminated"), (Some(Style::String), 13));
    }

    #[test]
    fn test_punctuation_is_single_character() {
        assert_eq!(
            tokens("{}:"),
            vec![
                ("{".to_string(), None),
                ("}".to_string(), None),
                (":".to_string(), None),
            ]
        );
        assert_eq!(single("λ"), (None, 2));
    }

    #[test]
    fn test_escape_skip_keeps_string_open() {
        let mode = DependentttMode::with_escape_policy(EscapePolicy::Skip);
        assert_eq!(
            tokens_with(&mode, r#""a\"b" x"#),
            vec![
                (r#""a\"b""#.to_string(), Some(Style::String)),
                (" ".to_string(), None),
                ("x".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_escape_at_end_of_line() {
        let mode = DependentttMode::with_escape_policy(EscapePolicy::Skip);
        assert_eq!(
            tokens_with(&mode, "\"abc\\"),
            vec![("\"abc\\".to_string(), Some(Style::String))]
        );
    }

    #[test]
    fn test_escape_literal_closes_on_escaped_quote() {
        let mode = DependentttMode::with_escape_policy(EscapePolicy::Literal);
        assert_eq!(
            tokens_with(&mode, r#""a\"b""#),
            vec![
                (r#""a\""#.to_string(), Some(Style::String)),
                ("b".to_string(), None),
                ("\"".to_string(), Some(Style::String)),
            ]
        );
    }

    #[test]
    fn test_escape_fault() {
        let mode = DependentttMode::with_escape_policy(EscapePolicy::Fault);
        let mut stream = LineStream::new(r#"  "ab\n""#);
        let mut state = ModeState;

        assert_eq!(mode.token(&mut stream, &mut state), Ok(None));
        stream.advance_token();
        assert_matches!(
            mode.token(&mut stream, &mut state),
            Err(ModeError::EscapeFault { offset: 5 })
        );
    }

    #[test]
    fn test_fault_policy_without_backslash_is_silent() {
        let mode = DependentttMode::with_escape_policy(EscapePolicy::Fault);
        assert_eq!(
            tokens_with(&mode, "\"ok\""),
            vec![("\"ok\"".to_string(), Some(Style::String))]
        );
    }

    #[test]
    fn test_tokens_partition_the_line() {
        let line = "declare f : (x : Nat) -> \"s\\\"t\" # done";
        let parts = tokens(line);
        let joined: String = parts.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(joined, line);
        assert!(parts.iter().all(|(text, _)| !text.is_empty()));
    }

    #[test]
    fn test_mode_hooks() {
        let mode = DependentttMode::new();
        assert_eq!(mode.name(), "dependenttt");
        assert_eq!(mode.close_brackets(), "()[]{}\"\"");
        assert_eq!(mode.line_comment(), Some("#"));
        assert_eq!(mode.fold(), FoldStrategy::Brace);
        assert_eq!(mode.bracket_pairs().unwrap().len(), 4);
    }

    #[test]
    fn test_empty_stream_returns_no_style() {
        assert_eq!(single(""), (None, 0));
    }
}
