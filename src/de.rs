//! urltron decoding.
//!
//! This module provides the [`Parser`] that rebuilds a [`Value`] tree from
//! urltron text, and the [`ValueDeserializer`] that feeds a [`Value`] into any
//! `T: Deserialize`.
//!
//! ## Overview
//!
//! - **Single pass**: recursive descent over the token stream with one token of
//!   lookahead and no backtracking
//! - **URL friendly**: a leading `?` or `#` is skipped, and bare `key=value&...`
//!   input is read as an object
//! - **Bounded**: nesting deeper than [`Options::max_depth`] is rejected before
//!   it can exhaust the stack
//!
//! ## Usage
//!
//! ```rust
//! use urltron::{parse, Value};
//!
//! let value = parse("?limit=10&query=hello+world&fullTable").unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("limit"), Some(&Value::from(10)));
//! assert_eq!(obj.get("query"), Some(&Value::from("hello world")));
//! assert_eq!(obj.get("fullTable"), Some(&Value::Bool(true)));
//! ```

use crate::grammar::{self, ESCAPE_MARKER};
use crate::lexer::{Lexer, Token};
use crate::value::{whole_as_i64, whole_as_u64};
use crate::{Error, Map, Options, Result, Value};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};
use std::borrow::Cow;

/// Applies the URL conveniences: strips one leading `?` or `#`, and wraps any
/// input that does not open an object or array in parentheses.
pub(crate) fn normalize(input: &str) -> Cow<'_, str> {
    let body = input.strip_prefix(['?', '#']).unwrap_or(input);
    match body.as_bytes().first() {
        Some(&grammar::ARRAY_START) | Some(&grammar::OPEN) => Cow::Borrowed(body),
        _ => Cow::Owned(format!("({})", body)),
    }
}

/// The urltron parser.
///
/// Works on already-normalized text; [`parse`](crate::parse) handles the
/// `?`/`#` prefix and the implicit root object.
pub struct Parser<'a, 'o> {
    lexer: Lexer<'a>,
    options: &'o Options,
    depth: usize,
}

impl<'a, 'o> Parser<'a, 'o> {
    pub fn new(input: &'a str, options: &'o Options) -> Self {
        Parser {
            lexer: Lexer::new(input),
            options,
            depth: 0,
        }
    }

    /// Parses one value and requires the token stream to end right after it.
    pub fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        match self.lexer.peek() {
            None => Ok(value),
            Some(token) => Err(Error::unexpected_token("end of input", token)),
        }
    }

    fn expect(&mut self, expected: Token<'a>) -> Result<()> {
        match self.lexer.peek() {
            Some(token) if token == expected => {
                self.lexer.advance();
                Ok(())
            }
            Some(token) => Err(Error::unexpected_token(expected, token)),
            None => Err(Error::truncated(expected)),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.lexer.peek() {
            Some(Token::Open) => self.parse_object(),
            Some(Token::ArrayStart) => self.parse_array(),
            Some(Token::Literal(literal)) => {
                self.lexer.advance();
                match literal {
                    "t" => Ok(Value::Bool(true)),
                    "f" => Ok(Value::Bool(false)),
                    "n" => Ok(Value::Null),
                    _ if grammar::looks_numeric(literal) => {
                        parse_number(literal).map(Value::Number)
                    }
                    _ => decode_string(literal).map(Value::String),
                }
            }
            Some(token) => Err(Error::unexpected_token("value", token)),
            None => Err(Error::truncated("value")),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.expect(Token::Open)?;

        let mut map = Map::new();
        loop {
            let key = match self.lexer.peek() {
                Some(Token::Close) => break,
                Some(Token::Literal(literal)) => {
                    self.lexer.advance();
                    decode_string(literal)?
                }
                Some(token) => return Err(Error::unexpected_token("key", token)),
                None => return Err(Error::truncated(Token::Close)),
            };

            let value = match self.lexer.peek() {
                // bare key
                Some(Token::Ampersand | Token::Close) => Value::Bool(true),
                _ => {
                    self.expect(Token::Equals)?;
                    match self.lexer.peek() {
                        Some(Token::Ampersand | Token::Close) => Value::String(String::new()),
                        _ => self.parse_value()?,
                    }
                }
            };

            if self.lexer.peek() != Some(Token::Close) {
                self.expect(Token::Ampersand)?;
            }
            // last write wins
            map.insert(key, value);
        }

        self.expect(Token::Close)?;
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.expect(Token::ArrayStart)?;
        self.expect(Token::Open)?;

        let mut elements = Vec::new();
        loop {
            match self.lexer.peek() {
                Some(Token::Close) => break,
                None => return Err(Error::truncated(Token::Close)),
                Some(_) => {}
            }

            elements.push(self.parse_value()?);

            if self.lexer.peek() != Some(Token::Close) {
                self.expect(Token::Comma)?;
            }
        }

        self.expect(Token::Close)?;
        self.depth -= 1;
        Ok(Value::Array(elements))
    }
}

/// Reads the longest numeric prefix of `literal`, like `parseFloat`:
/// `-?digits[.digits][(e|E)[+-]digits]`. Trailing characters are ignored.
pub(crate) fn parse_number(literal: &str) -> Result<f64> {
    let bytes = literal.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = if bytes.first() == Some(&b'-') { 1 } else { 0 };
    end = digits_from(end);

    // looks_numeric guarantees an integer digit, so `1.` and `1.e5` stay valid f64 syntax.
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    literal[..end]
        .parse::<f64>()
        .map_err(|_| Error::unexpected_token("number", literal))
}

/// Decodes a string literal: drops the escape marker, reads `+` as a space and
/// resolves percent escapes as UTF-8.
pub(crate) fn decode_string(literal: &str) -> Result<String> {
    let body = literal.strip_prefix(ESCAPE_MARKER).unwrap_or(literal);
    if !body.bytes().any(|b| b == b'%' || b == b'+') {
        return Ok(body.to_string());
    }

    let bytes = body.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).and_then(|b| hex_value(*b));
                let lo = bytes.get(i + 2).and_then(|b| hex_value(*b));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => decoded.push(hi << 4 | lo),
                    _ => return Err(Error::malformed_escape(literal)),
                }
                i += 3;
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded).map_err(|_| Error::malformed_escape(literal))
}

#[inline]
fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// Deserializer that feeds an owned [`Value`] into any `T: Deserialize`.
///
/// Whole numbers are offered as integers (`u64` when non-negative, `i64`
/// otherwise) so integer fields accept them; other numbers are offered as `f64`.
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

fn visit_number<'de, V>(n: f64, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if let Some(u) = whole_as_u64(n) {
        visitor.visit_u64(u)
    } else if let Some(i) = whole_as_i64(n) {
        visitor.visit_i64(i)
    } else {
        visitor.visit_f64(n)
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => visit_number(n, visitor),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) => {
                let mut entries = obj.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom(
                        "expected an object with a single key naming the enum variant",
                    )),
                }
            }
            other => Err(Error::custom(format!(
                "expected enum, found {}",
                other.type_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Deserializes object keys. Keys are always strings on the wire; integer and
/// boolean requests parse the key text so maps like `HashMap<u32, _>` work.
struct KeyDeserializer {
    key: String,
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident : $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let parsed: $ty = self.key.parse().map_err(|_| {
                    Error::custom(format!(
                        "invalid map key `{}`: expected {}",
                        self.key,
                        stringify!($ty)
                    ))
                })?;
                visitor.$visit(parsed)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.key.into_deserializer())
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
    }

    forward_to_deserialize_any! {
        i128 u128 f32 f64 char str string bytes byte_buf option unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(KeyDeserializer { key: self.variant })?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            // `(Variant)` decodes the bare key as `true`
            Value::Null | Value::Bool(true) => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_normalized(input: &str) -> Result<Value> {
        let options = Options::new();
        let document = normalize(input);
        Parser::new(&document, &options).parse_document()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "()");
        assert_eq!(normalize("?"), "()");
        assert_eq!(normalize("#a=1"), "(a=1)");
        assert_eq!(normalize("?@(1)"), "@(1)");
        assert_eq!(normalize("(a)"), "(a)");
        assert_eq!(normalize("??a"), "(?a)");
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("1").unwrap(), 1.0);
        assert_eq!(parse_number("-2.5").unwrap(), -2.5);
        assert_eq!(parse_number("-3e+100").unwrap(), -3e100);
        assert_eq!(parse_number("1.5e-10").unwrap(), 1.5e-10);
        assert_eq!(parse_number("12abc").unwrap(), 12.0);
        assert_eq!(parse_number("1.").unwrap(), 1.0);
        assert_eq!(parse_number("1e").unwrap(), 1.0);
        assert_eq!(parse_number("1.e5").unwrap(), 100000.0);
        assert_eq!(parse_number("-2.E-1x").unwrap(), -0.2);
        assert_eq!(parse_number("3.x").unwrap(), 3.0);
        assert_eq!(parse_number("7E2").unwrap(), 700.0);
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode_string("~").unwrap(), "");
        assert_eq!(decode_string("~t").unwrap(), "t");
        assert_eq!(decode_string("hello+world").unwrap(), "hello world");
        assert_eq!(decode_string("a%2Bb").unwrap(), "a+b");
        assert_eq!(decode_string("%7Etilde").unwrap(), "~tilde");
        assert_eq!(decode_string("%F0%9F%98%80").unwrap(), "\u{1F600}");
        assert_eq!(decode_string("caf\u{e9}").unwrap(), "caf\u{e9}");
        assert_eq!(decode_string("%2520").unwrap(), "%20");
    }

    #[test]
    fn test_decode_string_rejects_bad_escapes() {
        for literal in ["%", "%4", "%zz", "abc%G0", "%FF", "%C3"] {
            let err = decode_string(literal).unwrap_err();
            assert!(
                matches!(err, Error::MalformedEscape(ref l) if l == literal),
                "literal {:?} gave {:?}",
                literal,
                err
            );
        }
    }

    #[test]
    fn test_bare_key_and_empty_value() {
        let value = parse_normalized("a&b=&c=~&d").unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::Bool(true)));
        assert_eq!(obj.get("b"), Some(&Value::from("")));
        assert_eq!(obj.get("c"), Some(&Value::from("")));
        assert_eq!(obj.get("d"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_trailing_separators() {
        assert_eq!(
            parse_normalized("@(1,)").unwrap(),
            Value::Array(vec![Value::from(1)])
        );
        let value = parse_normalized("(a=1&)").unwrap();
        assert_eq!(value.as_object().map(Map::len), Some(1));
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            parse_normalized("(a=").unwrap_err(),
            Error::TruncatedInput { .. }
        ));
        assert!(matches!(
            parse_normalized("@(1").unwrap_err(),
            Error::TruncatedInput { .. }
        ));
        assert!(matches!(
            parse_normalized("@").unwrap_err(),
            Error::TruncatedInput { ref expected } if expected == "("
        ));
        assert!(matches!(
            parse_normalized("@x").unwrap_err(),
            Error::UnexpectedToken { ref expected, ref found } if expected == "(" && found == "x"
        ));
        assert!(matches!(
            parse_normalized("(=1)").unwrap_err(),
            Error::UnexpectedToken { ref expected, .. } if expected == "key"
        ));
        assert!(matches!(
            parse_normalized("(a==1)").unwrap_err(),
            Error::UnexpectedToken { ref expected, ref found } if expected == "value" && found == "="
        ));
        assert!(matches!(
            parse_normalized("@(1)2").unwrap_err(),
            Error::UnexpectedToken { ref expected, .. } if expected == "end of input"
        ));
    }

    #[test]
    fn test_depth_guard() {
        let options = Options::new().with_max_depth(3);
        assert!(Parser::new("@(@(@()))", &options).parse_document().is_ok());
        let err = Parser::new("@(@(@(@())))", &options)
            .parse_document()
            .unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 3 }));
    }

    #[test]
    fn test_value_deserializer_numbers() {
        use serde::Deserialize;

        let n = u8::deserialize(ValueDeserializer::new(Value::from(200))).unwrap();
        assert_eq!(n, 200);
        let n = i32::deserialize(ValueDeserializer::new(Value::from(-5))).unwrap();
        assert_eq!(n, -5);
        let n = f32::deserialize(ValueDeserializer::new(Value::from(1.5))).unwrap();
        assert_eq!(n, 1.5);
        assert!(u32::deserialize(ValueDeserializer::new(Value::from(1.5))).is_err());
    }
}
