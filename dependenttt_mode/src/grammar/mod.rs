//! Lexical grammar of the dependenttt language

pub mod keywords;

pub use keywords::{is_reserved_keyword, keyword_table, Keyword};

/// Word characters: ASCII letters, digits and underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Number characters: ASCII decimal digits only
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_word_char('_'));
        assert!(is_word_char('Z'));
        assert!(is_word_char('7'));
        assert!(!is_word_char('λ'));
        assert!(!is_word_char('-'));
        assert!(is_digit('0'));
        assert!(!is_digit('٣'));
    }
}
