//! Token types for the pattern lexer.

/// A token in a letter pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A run of one repeated ASCII letter, such as `yyyy`.
    Letters { letter: char, count: usize },
    /// Text between single quotes, with `''` unescaped.
    Literal(String),
    /// Any other character, printed as itself.
    Char(char),

    // Optional sections
    OptionalStart, // [
    OptionalEnd,   // ]

    /// `{`, `}` or `#`, which are kept for future use.
    Reserved(char),

    // End of input
    Eof,
}

/// A token with its character span in the pattern.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}
