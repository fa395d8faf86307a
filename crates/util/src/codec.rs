//! Decoding JSON text into trees (or typed values) and encoding them back.
//!
//! The generic tree is [`serde_json::Value`] built with `preserve_order`, so
//! object members keep their source order through a decode/encode cycle.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::CodecError;

/// Layout of encoded output.
///
/// The default is compact output. With a non-empty `prefix` or `indent`,
/// every element starts on its own line beginning with `prefix` followed by
/// one `indent` per nesting level; the first line carries no prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions<'a> {
    pub prefix: &'a str,
    pub indent: &'a str,
}

impl<'a> EncodeOptions<'a> {
    pub fn indented(prefix: &'a str, indent: &'a str) -> Self {
        Self { prefix, indent }
    }

    fn is_compact(&self) -> bool {
        self.prefix.is_empty() && self.indent.is_empty()
    }
}

// ── Decode ────────────────────────────────────────────────────────────────

/// Decodes exactly one JSON document.
pub fn decode_from_str<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Decodes exactly one JSON document.
pub fn decode_from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes the first JSON document of a stream; anything after it is left
/// unread.
pub fn decode_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, CodecError> {
    let mut stream = serde_json::Deserializer::from_reader(reader).into_iter::<T>();
    match stream.next() {
        Some(value) => Ok(value?),
        None => Err(CodecError::EmptyInput),
    }
}

// ── Encode ────────────────────────────────────────────────────────────────

/// Encodes `value` as compact JSON.
pub fn encode_to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(value)?)
}

/// Encodes `value` as compact JSON.
pub fn encode_to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string(value)?)
}

/// Encodes `value` one element per line.
///
/// # Example
///
/// ```
/// use batchspec_util::encode_to_string_indent;
///
/// let out = encode_to_string_indent(&serde_json::json!({"a": [1]}), "> ", "  ").unwrap();
/// assert_eq!(out, "{\n>   \"a\": [\n>     1\n>   ]\n> }");
/// ```
pub fn encode_to_string_indent<T: Serialize + ?Sized>(
    value: &T,
    prefix: &str,
    indent: &str,
) -> Result<String, CodecError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let text = String::from_utf8(buf)?;
    if prefix.is_empty() {
        return Ok(text);
    }
    // Encoded strings never hold a raw newline, so every one is a line break.
    Ok(text.replace('\n', &format!("\n{prefix}")))
}

/// Encodes `value` with the given layout.
pub fn encode_with<T: Serialize + ?Sized>(
    value: &T,
    options: EncodeOptions<'_>,
) -> Result<String, CodecError> {
    if options.is_compact() {
        encode_to_string(value)
    } else {
        encode_to_string_indent(value, options.prefix, options.indent)
    }
}
