//! Reserved words of the dependenttt language
use crate::tokens::Style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

/// dependenttt keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    Block,
    Rule,
    Let,
    Axiom,
    Declare,
}

impl Keyword {
    /// Keywords in table order
    pub const ALL: [Keyword; 5] = [
        Keyword::Block,
        Keyword::Rule,
        Keyword::Let,
        Keyword::Axiom,
        Keyword::Declare,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Block => "block",
            Keyword::Rule => "rule",
            Keyword::Let => "let",
            Keyword::Axiom => "axiom",
            Keyword::Declare => "declare",
        }
    }
}

/// Case-sensitive
impl FromStr for Keyword {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Keyword::ALL
            .into_iter()
            .find(|keyword| keyword.as_str() == s)
            .ok_or_else(|| format!("'{}' is not a dependenttt keyword", s))
    }
}

const RESERVED: [&str; Keyword::ALL.len()] = {
    let mut words = [""; Keyword::ALL.len()];
    let mut index = 0;
    while index < words.len() {
        words[index] = Keyword::ALL[index].as_str();
        index += 1;
    }
    words
};

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static WORD_STYLES: OnceLock<HashMap<&'static str, Style>> = OnceLock::new();

fn define(table: &mut HashMap<&'static str, Style>, style: Style, words: &[&'static str]) {
    for word in words {
        table.insert(word, style);
    }
}

/// Word-to-style table, built on first use and read-only afterwards
pub fn keyword_table() -> &'static HashMap<&'static str, Style> {
    WORD_STYLES.get_or_init(|| {
        let mut table = HashMap::new();
        define(&mut table, Style::Keyword, &RESERVED);
        table
    })
}

/// Style of a complete word, if it is reserved
pub fn lookup(word: &str) -> Option<Style> {
    keyword_table().get(word).copied()
}

pub fn is_reserved_keyword(word: &str) -> bool {
    keyword_table().contains_key(word)
}

/// Words the language reserves, in table order
pub fn reserved_keywords() -> &'static [&'static str] {
    &RESERVED
}
