//! urltron encoding.
//!
//! This module provides the [`Encoder`] that transcribes a [`Value`] tree into
//! urltron text, and the [`ValueSerializer`] that turns any `T: Serialize` into
//! a [`Value`] first.
//!
//! ## Overview
//!
//! The encoder walks the tree depth-first:
//!
//! - **Keywords**: null (and NaN or infinite numbers) becomes `n`, booleans `t` and `f`
//! - **Numbers**: shortest round-trip decimal, `1e+21` style beyond 21 digits
//! - **Strings**: verbatim when safe, `~`-marked when they look like a keyword or number,
//!   percent-encoded otherwise
//! - **Arrays**: `@(` elements joined with `,` `)`
//! - **Objects**: pairs joined with `&`, `key` alone for `true`, `key=` for `""`
//!
//! ## Usage
//!
//! ```rust
//! use urltron::{stringify, urltron};
//!
//! let value = urltron!({
//!     "select": ["id", "name"],
//!     "from": { "table": "users" },
//!     "fullTable": true
//! });
//! assert_eq!(
//!     stringify(&value).unwrap(),
//!     "select=@(id,name)&from=(table=users)&fullTable"
//! );
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use urltron::{Encoder, Options, Value};
//!
//! let options = Options::new();
//! let mut encoder = Encoder::new(&options);
//! encoder.encode(&Value::Array(vec![Value::from(1), Value::from(2.5)])).unwrap();
//! assert_eq!(encoder.into_inner(), "@(1,2.5)");
//! ```

use crate::grammar::{self, ESCAPE_MARKER};
use crate::{Error, Map, Options, Result, Value};
use serde::{ser, Serialize};

/// The urltron encoder.
///
/// Writes one document per [`Encoder::encode`] call into an internal buffer.
pub struct Encoder<'o> {
    output: String,
    options: &'o Options,
    depth: usize,
}

impl<'o> Encoder<'o> {
    pub fn new(options: &'o Options) -> Self {
        Encoder {
            output: String::with_capacity(64),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Encodes `value` as a document root.
    ///
    /// A root object is written without its surrounding parentheses. Scalar
    /// roots are rejected unless [`Options::scalar_root`] is set. A failed call
    /// leaves the buffer as it was, so the encoder stays usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRootType`] for a rejected scalar root and
    /// [`Error::DepthLimitExceeded`] when nesting exceeds [`Options::max_depth`].
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        let start = self.output.len();
        self.depth = 0;
        let result = match value {
            Value::Object(map) => self.encode_object(map, false),
            Value::Array(_) => self.encode_value(value),
            _ if self.options.scalar_root => self.encode_value(value),
            _ => Err(Error::unsupported_root(value.type_name())),
        };
        if result.is_err() {
            self.output.truncate(start);
            self.depth = 0;
        }
        result
    }

    fn encode_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.output.push('n'),
            Value::Bool(b) => self.output.push(if *b { 't' } else { 'f' }),
            Value::Number(n) => write_number(&mut self.output, *n)?,
            Value::String(s) => write_string(&mut self.output, s),
            Value::Array(arr) => self.encode_array(arr)?,
            Value::Object(map) => self.encode_object(map, true)?,
        }
        Ok(())
    }

    fn encode_array(&mut self, arr: &[Value]) -> Result<()> {
        self.enter()?;
        self.output.push(grammar::ARRAY_START as char);
        self.output.push(grammar::OPEN as char);
        for (i, element) in arr.iter().enumerate() {
            if i > 0 {
                self.output.push(grammar::COMMA as char);
            }
            self.encode_value(element)?;
        }
        self.output.push(grammar::CLOSE as char);
        self.depth -= 1;
        Ok(())
    }

    fn encode_object(&mut self, map: &Map, parenthesized: bool) -> Result<()> {
        self.enter()?;
        if parenthesized {
            self.output.push(grammar::OPEN as char);
        }
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.output.push(grammar::AMPERSAND as char);
            }
            write_string(&mut self.output, key);
            match value {
                // bare key
                Value::Bool(true) => {}
                Value::String(s) if s.is_empty() => self.output.push(grammar::EQUALS as char),
                _ => {
                    self.output.push(grammar::EQUALS as char);
                    self.encode_value(value)?;
                }
            }
        }
        if parenthesized {
            self.output.push(grammar::CLOSE as char);
        }
        self.depth -= 1;
        Ok(())
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
}

/// Encodes `value` as a nested value: objects keep their parentheses and any
/// variant is accepted at the top. Used by `Display`.
pub(crate) fn encode_nested(value: &Value) -> Result<String> {
    let options = Options::lenient().with_max_depth(usize::MAX);
    let mut encoder = Encoder::new(&options);
    encoder.encode_value(value)?;
    Ok(encoder.into_inner())
}

fn write_number(output: &mut String, n: f64) -> Result<()> {
    if n.is_finite() {
        output.push_str(&format_number(n)?);
    } else {
        output.push('n');
    }
    Ok(())
}

/// Formats a finite number the way ECMAScript's `Number.prototype.toString` does:
/// shortest round-trip digits, plain notation for decimal exponents in `[-7, 21)`,
/// exponent notation with an explicit sign otherwise.
pub(crate) fn format_number(n: f64) -> Result<String> {
    if n == 0.0 {
        // also -0
        return Ok("0".to_string());
    }

    // LowerExp yields the shortest round-trip digits, e.g. "1.2345e3".
    let scientific = format!("{:e}", n.abs());
    let unexpected = || Error::custom(format!("unexpected float formatting `{}`", scientific));
    let (mantissa, exponent) = scientific.split_once('e').ok_or_else(unexpected)?;
    let exponent: i32 = exponent.parse().map_err(|_| unexpected())?;
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let k = digits.len() as i32;
    let point = exponent + 1;
    let mut out = String::with_capacity(digits.len() + 8);
    if n < 0.0 {
        out.push('-');
    }

    if k <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((point - k) as usize));
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let e = point - 1;
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.abs().to_string());
    }
    Ok(out)
}

/// Writes a string literal, choosing between verbatim, marked and escaped forms.
pub(crate) fn write_string(output: &mut String, s: &str) {
    if s.is_empty() {
        output.push(ESCAPE_MARKER);
    } else if grammar::is_keyword(s) {
        output.push(ESCAPE_MARKER);
        output.push_str(s);
    } else if grammar::looks_numeric(s) {
        output.push(ESCAPE_MARKER);
        percent_encode(output, s);
    } else if grammar::is_safe_str(s) {
        output.push_str(s);
    } else {
        percent_encode(output, s);
    }
}

fn percent_encode(output: &mut String, s: &str) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    for byte in s.bytes() {
        if grammar::is_safe(byte) {
            output.push(byte as char);
        } else if byte == b' ' {
            output.push('+');
        } else {
            output.push('%');
            output.push(HEX[(byte >> 4) as usize] as char);
            output.push(HEX[(byte & 0x0F) as usize] as char);
        }
    }
}

/// Serializer that converts any `T: Serialize` into a [`Value`].
///
/// Integers and floats become [`Value::Number`]; unit, `None` and unit structs
/// become [`Value::Null`]; enum variants with data become single-key objects.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    next_key: Option<String>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<Value>,
}

pub struct SerializeStructVariant {
    name: String,
    map: Map,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        if !v.is_finite() {
            return self.serialize_f64(f64::from(v));
        }
        // Widen through the shortest f32 digits so 0.1f32 stays 0.1.
        let widened = v
            .to_string()
            .parse::<f64>()
            .map_err(|e| Error::custom(e.to_string()))?;
        self.serialize_f64(widened)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(
            v.iter().map(|b| Value::Number(*b as f64)).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::with_capacity(1);
        map.insert(variant.to_string(), value.serialize(ValueSerializer)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_string(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_string(),
            map: Map::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            next_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.name, Value::Array(self.vec));
        Ok(Value::Object(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.name, Value::Object(self.map));
        Ok(Value::Object(map))
    }
}

/// Serializes map keys. Strings, chars, integers and booleans are accepted;
/// integers and booleans are written in their decimal / `true`/`false` form.
struct MapKeySerializer;

fn key_must_be_a_string(kind: &str) -> Error {
    Error::unsupported_value(&format!("map key of type {}", kind))
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = ser::Impossible<String, Error>;
    type SerializeTuple = ser::Impossible<String, Error>;
    type SerializeTupleStruct = ser::Impossible<String, Error>;
    type SerializeTupleVariant = ser::Impossible<String, Error>;
    type SerializeMap = ser::Impossible<String, Error>;
    type SerializeStruct = ser::Impossible<String, Error>;
    type SerializeStructVariant = ser::Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(key_must_be_a_string("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(key_must_be_a_string("f64"))
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_must_be_a_string("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_a_string("option"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string("option"))
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_a_string("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Err(key_must_be_a_string(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_a_string("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_a_string("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_a_string(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_a_string(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_a_string("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_a_string(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_a_string(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_lenient(value: &Value) -> String {
        let options = Options::lenient();
        let mut encoder = Encoder::new(&options);
        encoder.encode(value).unwrap();
        encoder.into_inner()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0).unwrap(), "1");
        assert_eq!(format_number(-0.0).unwrap(), "0");
        assert_eq!(format_number(2.5).unwrap(), "2.5");
        assert_eq!(format_number(1.234).unwrap(), "1.234");
        assert_eq!(format_number(-3e100).unwrap(), "-3e+100");
        assert_eq!(format_number(1e21).unwrap(), "1e+21");
        assert_eq!(format_number(123456789012345680000.0).unwrap(), "123456789012345680000");
        assert_eq!(format_number(0.000001).unwrap(), "0.000001");
        assert_eq!(format_number(1e-7).unwrap(), "1e-7");
        assert_eq!(format_number(1.5e-10).unwrap(), "1.5e-10");
        assert_eq!(format_number(0.1 + 0.2).unwrap(), "0.30000000000000004");
        assert_eq!(format_number(1024.0).unwrap(), "1024");
        assert_eq!(format_number(f64::MAX).unwrap(), "1.7976931348623157e+308");
    }

    #[test]
    fn test_string_forms() {
        let cases = [
            ("", "~"),
            ("hello", "hello"),
            ("hello world", "hello+world"),
            ("t", "~t"),
            ("f", "~f"),
            ("n", "~n"),
            ("true", "true"),
            ("1.2", "~1.2"),
            ("0", "~0"),
            ("-5 apples", "~-5+apples"),
            ("~tilde", "%7Etilde"),
            ("a+b", "a%2Bb"),
            ("\u{1F600}", "%F0%9F%98%80"),
            ("http://example.com/a b.jpg", "http%3A%2F%2Fexample.com%2Fa+b.jpg"),
        ];
        for (input, expected) in cases {
            let mut out = String::new();
            write_string(&mut out, input);
            assert_eq!(out, expected, "encoding {:?}", input);
        }
    }

    #[test]
    fn test_non_finite_numbers_fold_to_null() {
        let value = Value::Array(vec![
            Value::Number(f64::NAN),
            Value::Number(f64::INFINITY),
            Value::Number(f64::NEG_INFINITY),
            Value::Null,
        ]);
        assert_eq!(encode_lenient(&value), "@(n,n,n,n)");
    }

    #[test]
    fn test_root_object_drops_parens() {
        let mut inner = Map::new();
        inner.insert("table".to_string(), Value::from("users"));
        let mut map = Map::new();
        map.insert("from".to_string(), Value::Object(inner));
        map.insert("empty".to_string(), Value::Object(Map::new()));
        assert_eq!(encode_lenient(&Value::Object(map)), "from=(table=users)&empty=()");
    }

    #[test]
    fn test_scalar_root_rejected_by_default() {
        let options = Options::new();
        let mut encoder = Encoder::new(&options);
        let err = encoder.encode(&Value::from(1)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedRootType(ref t) if t == "number"));
    }

    #[test]
    fn test_depth_limit() {
        let options = Options::new().with_max_depth(2);
        let nested = Value::Array(vec![Value::Array(vec![Value::Array(vec![])])]);
        let mut encoder = Encoder::new(&options);
        let err = encoder.encode(&nested).unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 2 }));

        let ok = Value::Array(vec![Value::Array(vec![])]);
        let mut encoder = Encoder::new(&options);
        assert!(encoder.encode(&ok).is_ok());
    }

    #[test]
    fn test_encoder_reusable_after_error() {
        let options = Options::new().with_max_depth(1);
        let mut encoder = Encoder::new(&options);

        let nested = Value::Array(vec![Value::Array(vec![])]);
        assert!(matches!(
            encoder.encode(&nested).unwrap_err(),
            Error::DepthLimitExceeded { limit: 1 }
        ));
        assert!(matches!(
            encoder.encode(&Value::Null).unwrap_err(),
            Error::UnsupportedRootType(_)
        ));

        encoder.encode(&Value::Array(vec![])).unwrap();
        assert_eq!(encoder.into_inner(), "@()");
    }

    #[test]
    fn test_f32_keeps_shortest_digits() {
        assert_eq!(0.1f32.serialize(ValueSerializer).unwrap(), Value::Number(0.1));
        assert_eq!((-2.5f32).serialize(ValueSerializer).unwrap(), Value::Number(-2.5));
        assert_eq!(
            1e-7f32.serialize(ValueSerializer).unwrap(),
            Value::Number(1e-7)
        );
        assert_eq!(
            f32::INFINITY.serialize(ValueSerializer).unwrap(),
            Value::Number(f64::INFINITY)
        );

        let options = Options::default();
        let mut encoder = Encoder::new(&options);
        encoder
            .encode(&vec![0.1f32, 16_777_216.0].serialize(ValueSerializer).unwrap())
            .unwrap();
        assert_eq!(encoder.into_inner(), "@(0.1,16777216)");
    }

    #[test]
    fn test_value_serializer_variants() {
        #[derive(Serialize)]
        enum Shape {
            Point,
            Circle(f64),
            Pair(i32, i32),
            Rect { w: u32, h: u32 },
        }

        assert_eq!(
            Shape::Point.serialize(ValueSerializer).unwrap(),
            Value::from("Point")
        );
        assert_eq!(
            Shape::Circle(1.5).serialize(ValueSerializer).unwrap().to_string(),
            "(Circle=1.5)"
        );
        assert_eq!(
            Shape::Pair(1, 2).serialize(ValueSerializer).unwrap().to_string(),
            "(Pair=@(1,2))"
        );
        assert_eq!(
            Shape::Rect { w: 3, h: 4 }
                .serialize(ValueSerializer)
                .unwrap()
                .to_string(),
            "(Rect=(w=3&h=4))"
        );
    }

    #[test]
    fn test_map_keys() {
        use std::collections::BTreeMap;

        let mut numeric = BTreeMap::new();
        numeric.insert(1u32, "one");
        numeric.insert(2u32, "two");
        assert_eq!(
            numeric.serialize(ValueSerializer).unwrap().to_string(),
            "(~1=one&~2=two)"
        );

        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], true);
        let err = bad.serialize(ValueSerializer).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueType(_)));
    }
}
