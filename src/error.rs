//! Error types for urltron encoding and decoding.
//!
//! Every failure is local to a single call: a failed [`stringify`](crate::stringify)
//! or [`parse`](crate::parse) produces no partial output, only the error.
//!
//! ## Error Categories
//!
//! - **Encoding**: the root or some nested value cannot be represented
//! - **Grammar**: the parser met a token it did not expect, or ran out of tokens
//! - **Escapes**: a literal holds an invalid percent sequence or invalid UTF-8
//! - **Limits**: nesting exceeded [`Options::max_depth`](crate::Options::max_depth)
//!
//! ## Examples
//!
//! ```rust
//! use urltron::{parse, Error};
//!
//! let err = parse("(a=1,b=2)").unwrap_err();
//! assert!(matches!(err, Error::UnexpectedToken { .. }));
//! assert_eq!(err.to_string(), "unexpected token: expected `&`, found `,`");
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding urltron text.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The root handed to `stringify` cannot stand alone as a document.
    #[error("unsupported root type: {0} (only objects and arrays can be stringified)")]
    UnsupportedRootType(String),

    /// A value somewhere in the tree has no representation in the format.
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// The parser required a specific token and found another one.
    #[error("unexpected token: expected `{expected}`, found `{found}`")]
    UnexpectedToken { expected: String, found: String },

    /// The token stream ended while the parser still needed a token.
    #[error("unexpected end of input: expected `{expected}`")]
    TruncatedInput { expected: String },

    /// A literal contains a malformed percent escape or decodes to invalid UTF-8.
    #[error("malformed escape sequence in `{0}`")]
    MalformedEscape(String),

    /// Objects and arrays are nested deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an unexpected-token error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urltron::Error;
    ///
    /// let err = Error::unexpected_token("=", "&");
    /// assert!(err.to_string().contains("expected `=`"));
    /// ```
    pub fn unexpected_token(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Error::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a truncated-input error naming what the parser was waiting for.
    pub fn truncated(expected: impl fmt::Display) -> Self {
        Error::TruncatedInput {
            expected: expected.to_string(),
        }
    }

    /// Creates a malformed-escape error for the offending literal.
    pub fn malformed_escape(literal: &str) -> Self {
        Error::MalformedEscape(literal.to_string())
    }

    /// Creates an unsupported-root error carrying the root's type name.
    pub fn unsupported_root(type_name: &str) -> Self {
        Error::UnsupportedRootType(type_name.to_string())
    }

    /// Creates an unsupported-value error carrying the offending type name.
    pub fn unsupported_value(type_name: &str) -> Self {
        Error::UnsupportedValueType(type_name.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urltron::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
