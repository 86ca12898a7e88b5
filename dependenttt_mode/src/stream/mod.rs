//! Character cursor handed to modes by the host
//!
//! A mode only ever sees a [`StringStream`]. The host owns the cursor,
//! resets the token start between calls, and reads `current()` to learn
//! what the mode consumed.

pub mod line_stream;

pub use line_stream::LineStream;

/// Cursor over a single line of text.
///
/// Positions are byte offsets into the line. All consuming operations
/// advance by whole characters.
pub trait StringStream {
    /// Consume and return the next character, `None` at end of line
    fn next(&mut self) -> Option<char>;

    /// Next character without consuming it
    fn peek(&self) -> Option<char>;

    /// Consume contiguous whitespace; true if anything was consumed
    fn eat_space(&mut self) -> bool;

    /// Consume characters while `pred` holds; true if anything was consumed
    fn eat_while(&mut self, pred: &dyn Fn(char) -> bool) -> bool;

    /// Consume the rest of the line
    fn skip_to_end(&mut self);

    /// Text consumed since the current token started
    fn current(&self) -> &str;

    /// At end of line
    fn eol(&self) -> bool;

    /// At start of line
    fn sol(&self) -> bool;

    /// Byte offset of the cursor
    fn pos(&self) -> usize;

    /// Byte offset where the current token started
    fn start(&self) -> usize;
}
