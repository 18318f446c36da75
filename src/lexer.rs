//! Tokenizer for urltron text.
//!
//! The lexer splits the input on the six grammar delimiters. Each delimiter
//! becomes a token of its own and every maximal run of other characters becomes
//! one [`Token::Literal`]. Tokenizing never fails; structural problems surface
//! later, in the parser.
//!
//! ```rust
//! use urltron::{tokenize, Token};
//!
//! let mut lexer = tokenize("(a=1)");
//! assert_eq!(lexer.peek(), Some(Token::Open));
//! assert!(lexer.advance());
//! assert_eq!(lexer.peek(), Some(Token::Literal("a")));
//! ```

use crate::grammar;
use std::fmt;

/// An atomic lexical unit: a delimiter or a literal run borrowed from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// `@`
    ArrayStart,
    /// `(`
    Open,
    /// `)`
    Close,
    /// `=`
    Equals,
    /// `&`
    Ampersand,
    /// `,`
    Comma,
    /// A maximal run of non-delimiter characters.
    Literal(&'a str),
}

impl<'a> Token<'a> {
    fn from_delimiter(byte: u8) -> Option<Self> {
        match byte {
            grammar::ARRAY_START => Some(Token::ArrayStart),
            grammar::OPEN => Some(Token::Open),
            grammar::CLOSE => Some(Token::Close),
            grammar::EQUALS => Some(Token::Equals),
            grammar::AMPERSAND => Some(Token::Ampersand),
            grammar::COMMA => Some(Token::Comma),
            _ => None,
        }
    }

    /// Returns the text this token was read from.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::ArrayStart => "@",
            Token::Open => "(",
            Token::Close => ")",
            Token::Equals => "=",
            Token::Ampersand => "&",
            Token::Comma => ",",
            Token::Literal(s) => s,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cursor over the token stream of one input.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Splits `input` into tokens and positions the cursor on the first one.
    pub fn new(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let mut tokens = Vec::new();
        let mut literal_start = 0;

        // Delimiters are ASCII, so every split point is a char boundary.
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(token) = Token::from_delimiter(byte) {
                if literal_start < i {
                    tokens.push(Token::Literal(&input[literal_start..i]));
                }
                tokens.push(token);
                literal_start = i + 1;
            }
        }
        if literal_start < bytes.len() {
            tokens.push(Token::Literal(&input[literal_start..]));
        }

        Lexer {
            tokens,
            position: 0,
        }
    }

    /// Returns the current token, or `None` once the stream is exhausted.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    /// Moves past the current token. Returns `true` if a token remains.
    #[inline]
    pub fn advance(&mut self) -> bool {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        self.position < self.tokens.len()
    }

    /// Returns `true` once every token has been consumed.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Returns all tokens of the input, consumed or not.
    #[must_use]
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }
}

/// Splits `input` into a token stream. Never fails.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_object() {
        let lexer = tokenize("(a=1&b=hello+world)");
        assert_eq!(
            lexer.tokens(),
            &[
                Token::Open,
                Token::Literal("a"),
                Token::Equals,
                Token::Literal("1"),
                Token::Ampersand,
                Token::Literal("b"),
                Token::Equals,
                Token::Literal("hello+world"),
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_tokenize_array() {
        let lexer = tokenize("@(t,~,@())");
        assert_eq!(
            lexer.tokens(),
            &[
                Token::ArrayStart,
                Token::Open,
                Token::Literal("t"),
                Token::Comma,
                Token::Literal("~"),
                Token::Comma,
                Token::ArrayStart,
                Token::Open,
                Token::Close,
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_adjacent_delimiters_produce_no_empty_literals() {
        let lexer = tokenize("((==");
        assert_eq!(
            lexer.tokens(),
            &[Token::Open, Token::Open, Token::Equals, Token::Equals]
        );
    }

    #[test]
    fn test_non_ascii_literals() {
        let lexer = tokenize("caf\u{e9}=\u{1F600}");
        assert_eq!(
            lexer.tokens(),
            &[
                Token::Literal("caf\u{e9}"),
                Token::Equals,
                Token::Literal("\u{1F600}"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let lexer = tokenize("");
        assert!(lexer.is_exhausted());
        assert_eq!(lexer.peek(), None);
    }

    #[test]
    fn test_cursor() {
        let mut lexer = tokenize("a,b");
        assert_eq!(lexer.peek(), Some(Token::Literal("a")));
        assert!(lexer.advance());
        assert_eq!(lexer.peek(), Some(Token::Comma));
        assert!(lexer.advance());
        assert_eq!(lexer.peek(), Some(Token::Literal("b")));
        assert!(!lexer.advance());
        assert_eq!(lexer.peek(), None);
        assert!(!lexer.advance());
        assert!(lexer.is_exhausted());
    }
}
