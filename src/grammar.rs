//! The urltron wire format.
//!
//! This module documents the grammar shared by the encoder and the parser, and
//! holds the character classification both sides rely on.
//!
//! # Overview
//!
//! urltron text is built from six single-character delimiters and literal runs
//! of everything else. Every delimiter is either unreserved or a sub-delimiter
//! in URLs, so a document can follow `?` or `#` without further escaping.
//!
//! ```text
//! value    := object | array | "t" | "f" | "n" | number | string
//! object   := "(" [ pair { "&" pair } ] ")"
//! pair     := string [ "=" value ]
//! array    := "@" "(" [ value { "," value } ] ")"
//! number   := ["-"] digit { non-delimiter }
//! string   := ["~"] percent-encoded text, "+" for space
//! ```
//!
//! ## Objects
//!
//! Pairs are joined with `&`. A key without `=` means `true`, and `key=` means
//! the empty string. The root object drops its parentheses, so an encoded
//! document reads like a query string:
//!
//! ```text
//! limit=10&query=hello+world&fullTable
//! ```
//!
//! Nested objects keep them: `from=(table=users)`.
//!
//! ## Arrays
//!
//! `@(` opens an array, values are joined with `,`: `@(t,f,n,hello+world,1.234)`.
//! The empty array is `@()`.
//!
//! ## Primitives
//!
//! | Type | Wire form |
//! |------|-----------|
//! | Null (also NaN and infinities) | `n` |
//! | Booleans | `t`, `f` |
//! | Number | shortest round-trip decimal, e.g. `2.5`, `-3e+100` |
//! | String | verbatim when made of `A-Z a-z 0-9 . _ -`, percent-encoded otherwise |
//!
//! ## Strings
//!
//! A leading `~` (the escape marker) keeps a string from being read as a
//! keyword or a number:
//!
//! | String | Wire form |
//! |--------|-----------|
//! | `""` | `~` |
//! | `"t"` | `~t` |
//! | `"123"` | `~123` |
//! | `"true"` | `true` |
//! | `"a b"` | `a+b` |
//! | `"50%"` | `~50%25` |
//!
//! Percent-encoding covers every byte of the UTF-8 encoding outside the safe
//! set, so `~`, `+` and all delimiters inside a string are always escaped.
//!
//! # Decoding conveniences
//!
//! - A leading `?` or `#` is ignored, so `location.search` can be passed as is.
//! - Input that does not start with `@` or `(` is read as the body of an object.
//! - The empty string decodes to the empty object.

/// Opens an array; always followed by [`OPEN`].
pub const ARRAY_START: u8 = b'@';
/// Opens an object or the element list of an array.
pub const OPEN: u8 = b'(';
/// Closes an object or an array.
pub const CLOSE: u8 = b')';
/// Separates an object key from its value.
pub const EQUALS: u8 = b'=';
/// Separates object pairs.
pub const AMPERSAND: u8 = b'&';
/// Separates array elements.
pub const COMMA: u8 = b',';

/// Marks a literal as a string regardless of what it looks like.
pub const ESCAPE_MARKER: char = '~';

/// Returns `true` for the six bytes that split the input into tokens.
#[inline]
pub const fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        ARRAY_START | OPEN | CLOSE | EQUALS | AMPERSAND | COMMA
    )
}

/// Returns `true` for bytes that may appear unescaped inside a string literal.
#[inline]
pub const fn is_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-')
}

/// Returns `true` when the text is non-empty and made only of safe bytes.
#[inline]
pub fn is_safe_str(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_safe)
}

/// Returns `true` when the text starts like a number: an optional `-` then a digit.
#[inline]
pub fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    digits.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Returns `true` for the one-letter keywords `t`, `f` and `n`.
#[inline]
pub fn is_keyword(s: &str) -> bool {
    matches!(s, "t" | "f" | "n")
}
