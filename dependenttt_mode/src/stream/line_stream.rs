use super::StringStream;

/// Reference [`StringStream`] over one line of text
#[derive(Debug, Clone)]
pub struct LineStream<'a> {
    line: &'a str,
    start: usize,
    pos: usize,
}

impl<'a> LineStream<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            start: 0,
            pos: 0,
        }
    }

    /// Mark the cursor position as the start of the next token
    pub fn advance_token(&mut self) {
        self.start = self.pos;
    }

    /// Whole line the stream runs over
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Unconsumed remainder of the line
    pub fn remaining(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Move the cursor to the end of the line without a token boundary
    pub(crate) fn consume_rest(&mut self) -> &'a str {
        let rest = self.remaining();
        self.pos = self.line.len();
        rest
    }
}

impl StringStream for LineStream<'_> {
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn eat_space(&mut self) -> bool {
        self.eat_while(&char::is_whitespace)
    }

    fn eat_while(&mut self, pred: &dyn Fn(char) -> bool) -> bool {
        let begin = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.pos > begin
    }

    fn skip_to_end(&mut self) {
        self.pos = self.line.len();
    }

    fn current(&self) -> &str {
        &self.line[self.start..self.pos]
    }

    fn eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn sol(&self) -> bool {
        self.pos == 0
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn start(&self) -> usize {
        self.start
    }
}
