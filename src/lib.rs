//! # urltron
//!
//! A compact, URL-safe serialization format for JSON-like values.
//!
//! ## What is urltron?
//!
//! urltron text can be placed after `?` or `#` in a URL as is, with no extra
//! escaping. A root object reads like a query string, and nesting stays readable:
//!
//! ```text
//! select=@(id,name,age)&from=(table=users)&where=@((field=age&op=%3E&val=20))&fullTable
//! ```
//!
//! ## Key Features
//!
//! - **Lossless**: objects and arrays of null, booleans, numbers and strings round-trip
//! - **Query-string shaped**: the root object drops its parentheses and `true` is a bare key
//! - **Serde compatible**: works with `#[derive(Serialize, Deserialize)]` types
//! - **Bounded**: a configurable depth limit guards the recursive parser
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ### Dynamic Values
//!
//! ```rust
//! use urltron::{parse, stringify, urltron};
//!
//! let value = urltron!({
//!     "limit": 10,
//!     "query": "hello world",
//!     "tags": ["rust", "url"]
//! });
//!
//! let text = stringify(&value).unwrap();
//! assert_eq!(text, "limit=10&query=hello+world&tags=@(rust,url)");
//! assert_eq!(parse(&text).unwrap(), value);
//! ```
//!
//! ### Typed Data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use urltron::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Query {
//!     page: u32,
//!     search: String,
//!     exact: bool,
//! }
//!
//! let query = Query { page: 2, search: "red shoes".to_string(), exact: true };
//!
//! let text = to_string(&query).unwrap();
//! assert_eq!(text, "page=2&search=red+shoes&exact");
//!
//! let back: Query = from_str(&format!("?{}", text)).unwrap();
//! assert_eq!(back, query);
//! ```
//!
//! ## What does not round-trip
//!
//! - NaN and infinite numbers encode as null
//! - Numbers are IEEE-754 doubles; integers beyond 2^53 lose precision
//! - Scalar roots can be encoded with [`Options::lenient`], but the parser
//!   reads text that does not open with `@` or `(` as an object body
//!
//! See the [`grammar`] module for the complete format.

pub mod de;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{Parser, ValueDeserializer};
pub use error::{Error, Result};
pub use lexer::{tokenize, Lexer, Token};
pub use map::Map;
pub use options::Options;
pub use ser::{Encoder, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Encodes a [`Value`] as a urltron document.
///
/// The root must be an object or an array; a root object is written without
/// its parentheses.
///
/// # Examples
///
/// ```rust
/// use urltron::{stringify, urltron};
///
/// assert_eq!(stringify(&urltron!({ "fullTable": true })).unwrap(), "fullTable");
/// assert_eq!(stringify(&urltron!({ "a": "" })).unwrap(), "a=");
/// assert_eq!(stringify(&urltron!([1, 2.5, -3e100])).unwrap(), "@(1,2.5,-3e+100)");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedRootType`] for a scalar root and
/// [`Error::DepthLimitExceeded`] for values nested deeper than the default limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify(value: &Value) -> Result<String> {
    stringify_with_options(value, &Options::default())
}

/// Encodes a [`Value`] with custom options.
///
/// # Examples
///
/// ```rust
/// use urltron::{stringify_with_options, Options, Value};
///
/// let text = stringify_with_options(&Value::from("123"), &Options::lenient()).unwrap();
/// assert_eq!(text, "~123");
/// ```
///
/// # Errors
///
/// See [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_with_options(value: &Value, options: &Options) -> Result<String> {
    let mut encoder = Encoder::new(options);
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Decodes urltron text into a [`Value`].
///
/// A leading `?` or `#` is skipped, and text that does not start with `@` or
/// `(` is read as the body of an object.
///
/// # Examples
///
/// ```rust
/// use urltron::{parse, Value};
///
/// assert_eq!(parse("?a=1").unwrap(), parse("(a=1)").unwrap());
/// assert_eq!(
///     parse("@(~123,true)").unwrap(),
///     Value::Array(vec![Value::from("123"), Value::from("true")])
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::UnexpectedToken`] or [`Error::TruncatedInput`] for text that
/// does not follow the grammar, [`Error::MalformedEscape`] for bad percent escapes,
/// and [`Error::DepthLimitExceeded`] for input nested deeper than the default limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(s: &str) -> Result<Value> {
    parse_with_options(s, &Options::default())
}

/// Decodes urltron text with custom options.
///
/// # Examples
///
/// ```rust
/// use urltron::{parse_with_options, Error, Options};
///
/// let options = Options::new().with_max_depth(2);
/// let err = parse_with_options("a=(b=(c=1))", &options).unwrap_err();
/// assert!(matches!(err, Error::DepthLimitExceeded { limit: 2 }));
/// ```
///
/// # Errors
///
/// See [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(s: &str, options: &Options) -> Result<Value> {
    let document = de::normalize(s);
    Parser::new(&document, options).parse_document()
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use urltron::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedValueType`] for map keys that cannot be strings.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a urltron string.
///
/// # Examples
///
/// ```rust
/// use urltron::to_string;
///
/// let text = to_string(&vec!["a b", "t"]).unwrap();
/// assert_eq!(text, "@(a+b,~t)");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or its root is a scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &Options::default())
}

/// Serialize any `T: Serialize` to a urltron string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be converted or encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    stringify_with_options(&to_value(value)?, options)
}

/// Serialize any `T: Serialize` to a writer in urltron format.
///
/// # Examples
///
/// ```rust
/// use urltron::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &[1, 2, 3]).unwrap();
/// assert_eq!(buffer, b"@(1,2,3)");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from urltron text.
///
/// # Examples
///
/// ```rust
/// use urltron::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("#x=1&y=-2").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid urltron or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &Options::default())
}

/// Deserialize an instance of type `T` from urltron text with custom options.
///
/// # Errors
///
/// Returns an error if the text is not valid urltron or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &Options) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse_with_options(s, options)?)
}

/// Deserialize an instance of type `T` from bytes of urltron text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid urltron,
/// or do not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of urltron text.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid urltron,
/// or it does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}
