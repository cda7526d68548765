//! Lexer for tokenizing letter patterns.
//!
//! Positions are character indices, so errors point at the same place for
//! any script. The lexer handles:
//! - runs of the same ASCII letter, which become one token with a count
//! - quoted text, where `''` stands for a single quote inside or outside
//!   the quotes
//! - the optional section brackets and the reserved characters

use crate::error::BuildError;
use crate::parser::pattern_error;
use crate::parser::tokens::{SpannedToken, Token};

/// A lexer for letter patterns.
pub struct Lexer<'a> {
    /// The pattern being tokenized, kept for error messages.
    pub(crate) pattern: &'a str,
    chars: Vec<char>,
    /// The current position in `chars`.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.chars().collect(),
            position: 0,
        }
    }

    /// Builds a pattern error at `position`.
    pub(crate) fn error(&self, position: usize, reason: impl Into<String>) -> BuildError {
        pattern_error(self.pattern, position, reason)
    }

    /// Returns the next token from the input.
    pub fn next_token(&mut self) -> Result<SpannedToken, BuildError> {
        let start = self.position;
        let Some(&ch) = self.chars.get(start) else {
            return Ok(SpannedToken {
                token: Token::Eof,
                start,
                end: start,
            });
        };

        let token = match ch {
            'A'..='Z' | 'a'..='z' => {
                let count = self.count_run(ch);
                Token::Letters { letter: ch, count }
            }
            '\'' => self.lex_quoted()?,
            '[' => {
                self.position += 1;
                Token::OptionalStart
            }
            ']' => {
                self.position += 1;
                Token::OptionalEnd
            }
            '{' | '}' | '#' => {
                self.position += 1;
                Token::Reserved(ch)
            }
            _ => {
                self.position += 1;
                Token::Char(ch)
            }
        };

        Ok(SpannedToken {
            token,
            start,
            end: self.position,
        })
    }

    /// Tokenizes the whole pattern, ending with [`Token::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>, BuildError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Consumes the run of `ch` at the current position and returns its
    /// length.
    fn count_run(&mut self, ch: char) -> usize {
        let start = self.position;
        while self.chars.get(self.position) == Some(&ch) {
            self.position += 1;
        }
        self.position - start
    }

    /// Lexes a quoted literal starting at the opening quote.
    fn lex_quoted(&mut self) -> Result<Token, BuildError> {
        let start = self.position;
        self.position += 1;
        if self.chars.get(self.position) == Some(&'\'') {
            self.position += 1;
            return Ok(Token::Char('\''));
        }
        let mut text = String::new();
        loop {
            match self.chars.get(self.position) {
                None => return Err(self.error(start, "pattern ends with an incomplete string literal")),
                Some('\'') if self.chars.get(self.position + 1) == Some(&'\'') => {
                    text.push('\'');
                    self.position += 2;
                }
                Some('\'') => {
                    self.position += 1;
                    return Ok(Token::Literal(text));
                }
                Some(&ch) => {
                    text.push(ch);
                    self.position += 1;
                }
            }
        }
    }
}
