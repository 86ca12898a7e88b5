//! Fold ranges for highlighted documents
//!
//! The `brace` strategy folds from just after the last `{` (or, failing
//! that, `[`) on a line to its matching closer. Brackets inside strings
//! and comments never count.

use crate::highlight::{HighlightedDocument, HighlightedLine};
use crate::mode::FoldStrategy;
use crate::tokens::Style;
use crate::utils::Position;
use serde::Serialize;
use std::fmt;

const BRACE_PAIRS: [(char, char); 2] = [('{', '}'), ('[', ']')];

/// Foldable region; `from` is just after the opener, `to` is at the closer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoldRange {
    pub from: Position,
    pub to: Position,
}

impl fmt::Display for FoldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

fn is_quiet(style: Option<Style>) -> bool {
    matches!(style, Some(Style::String) | Some(Style::Comment))
}

/// Byte index just after the last `open` on the line outside strings and comments
fn find_opening(line: &HighlightedLine, open: char) -> Option<usize> {
    line.text
        .rmatch_indices(open)
        .map(|(index, _)| index)
        .find(|&index| !is_quiet(line.style_at(index)))
        .map(|index| index + open.len_utf8())
}

/// Brace fold starting on `line` (1-based), if any
pub fn brace_range(doc: &HighlightedDocument, line: u32) -> Option<FoldRange> {
    let start_line = doc.line(line)?;

    let ((open, close), start_index) = BRACE_PAIRS
        .iter()
        .find_map(|&pair| find_opening(start_line, pair.0).map(|index| (pair, index)))?;

    let token_style = start_line.style_at(start_index - open.len_utf8());
    let mut depth = 1usize;

    for current in &doc.lines[(line - 1) as usize..] {
        let from = if current.number == line { start_index } else { 0 };

        for (index, ch) in current.text[from..].char_indices() {
            if ch != open && ch != close {
                continue;
            }
            let index = from + index;
            if current.style_at(index) != token_style {
                continue;
            }

            if ch == open {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    if current.number == line {
                        return None;
                    }
                    return Some(FoldRange {
                        from: start_line.position_at(start_index)?,
                        to: current.position_at(index)?,
                    });
                }
            }
        }
    }

    None
}

/// Fold range for `line` under the given strategy
pub fn fold_range(strategy: FoldStrategy, doc: &HighlightedDocument, line: u32) -> Option<FoldRange> {
    match strategy {
        FoldStrategy::Brace => brace_range(doc, line),
        FoldStrategy::None => None,
    }
}

/// Every fold range in the document, in line order
pub fn fold_ranges(strategy: FoldStrategy, doc: &HighlightedDocument) -> Vec<FoldRange> {
    doc.lines
        .iter()
        .filter_map(|line| fold_range(strategy, doc, line.number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::highlight_document;
    use crate::mode::DependentttMode;

    fn doc(text: &str) -> HighlightedDocument {
        highlight_document(&DependentttMode::new(), text).unwrap()
    }

    #[test]
    fn test_simple_block() {
        let doc = doc("block b {\n  rule r\n}");
        let range = brace_range(&doc, 1).unwrap();

        assert_eq!(range.from.line, 1);
        assert_eq!(range.from.column, 10);
        assert_eq!(range.from.offset, 9);
        assert_eq!(range.to.line, 3);
        assert_eq!(range.to.column, 1);
        assert_eq!(range.to.offset, 19);
    }

    #[test]
    fn test_nested_blocks() {
        let doc = doc("block a {\n  block b {\n  }\n}");
        assert_eq!(brace_range(&doc, 1).map(|r| r.to.line), Some(4));
        assert_eq!(brace_range(&doc, 2).map(|r| r.to.line), Some(3));
        assert_eq!(fold_ranges(FoldStrategy::Brace, &doc).len(), 2);
    }

    #[test]
    fn test_same_line_closer_does_not_fold() {
        let doc = doc("let x = {}\nlet y");
        assert_eq!(brace_range(&doc, 1), None);
    }

    #[test]
    fn test_missing_closer_does_not_fold() {
        let doc = doc("block b {\n  rule r");
        assert_eq!(brace_range(&doc, 1), None);
    }

    #[test]
    fn test_braces_in_strings_and_comments_are_ignored() {
        let doc = doc("rule r { # {\n  \"}\"\n  # }\n}");
        let range = brace_range(&doc, 1).unwrap();
        assert_eq!(range.from.column, 9);
        assert_eq!(range.to.line, 4);
    }

    #[test]
    fn test_square_brackets_when_no_brace() {
        let doc = doc("let xs = [\n  1\n]");
        let range = brace_range(&doc, 1).unwrap();
        assert_eq!(range.to.line, 3);
    }

    #[test]
    fn test_brace_preferred_over_bracket() {
        let doc = doc("let xs = { [\n]\n}");
        let range = brace_range(&doc, 1).unwrap();
        assert_eq!(range.from.column, 11);
        assert_eq!(range.to.line, 3);
    }

    #[test]
    fn test_no_strategy_no_folds() {
        let doc = doc("block b {\n}");
        assert!(fold_ranges(FoldStrategy::None, &doc).is_empty());
        assert_eq!(brace_range(&doc, 9), None);
        assert_eq!(brace_range(&doc, 0), None);
    }

    #[test]
    fn test_display() {
        let doc = doc("{\n}");
        assert_eq!(brace_range(&doc, 1).unwrap().to_string(), "1:2-2:1");
    }
}
