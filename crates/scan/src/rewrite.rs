//! Byte-level JSON rewrites built on [`scan`](crate::scan).
//!
//! Every rewrite walks the document one level at a time and re-scans the span
//! of each nested object or array it meets, so no tree is ever built. Output
//! is compact; scalars (numbers, strings with their escapes) are copied
//! byte-for-byte.

use crate::error::SyntaxError;
use crate::scanner::{scan, ValueKind};

/// Per-member decisions taken while re-emitting a document.
///
/// Only object members reach the hooks; array elements are always kept.
trait Rewrite {
    /// Drops the member before its value is looked at.
    fn skip(&mut self, _key: &[u8]) -> bool {
        false
    }

    fn write_key(&mut self, key: &[u8], out: &mut Vec<u8>) {
        out.extend_from_slice(key);
    }

    /// Drops the member after its value was rewritten.
    fn prune(&mut self, _rewritten: &[u8]) -> bool {
        false
    }
}

fn rewrite<R: Rewrite>(input: &[u8], rw: &mut R) -> Result<Vec<u8>, SyntaxError> {
    let mut out = Vec::with_capacity(input.len());
    rewrite_into(input, &mut out, rw)?;
    Ok(out)
}

fn rewrite_into<R: Rewrite>(
    input: &[u8],
    out: &mut Vec<u8>,
    rw: &mut R,
) -> Result<(), SyntaxError> {
    let (open, close) = match ValueKind::of(input) {
        Some(ValueKind::Object) => (b'{', b'}'),
        Some(ValueKind::Array) => (b'[', b']'),
        _ => {
            return scan(input, |_, value| {
                out.extend_from_slice(value);
                true
            })
        }
    };

    out.push(open);
    let mut first = true;
    let mut nested = Ok(());
    scan(input, |key, value| {
        let is_member = !key.is_empty();
        if is_member && rw.skip(key) {
            return true;
        }
        let mark = out.len();
        if !first {
            out.push(b',');
        }
        if is_member {
            rw.write_key(key, out);
            out.push(b':');
        }
        let start = out.len();
        if ValueKind::of(value).is_some_and(ValueKind::is_composite) {
            if let Err(err) = rewrite_into(value, out, rw) {
                nested = Err(err);
                return false;
            }
        } else {
            out.extend_from_slice(value);
        }
        if is_member && rw.prune(&out[start..]) {
            out.truncate(mark);
            return true;
        }
        first = false;
        true
    })?;
    nested?;
    out.push(close);
    Ok(())
}

fn into_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

// ── Field removal ─────────────────────────────────────────────────────────

struct RemoveFields<'f> {
    fields: &'f [&'f str],
}

impl Rewrite for RemoveFields<'_> {
    fn skip(&mut self, key: &[u8]) -> bool {
        self.fields.iter().any(|field| field.as_bytes() == key)
    }
}

/// Removes every object member whose key token is one of `fields`, at any
/// depth.
///
/// Keys are matched on the raw token, quotes included: pass `"\"plugins\""`
/// to drop a `plugins` member.
pub fn try_remove_fields(input: &str, fields: &[&str]) -> Result<String, SyntaxError> {
    rewrite(input.as_bytes(), &mut RemoveFields { fields }).map(into_string)
}

/// Like [`try_remove_fields`], but yields an empty string when `input` is not
/// valid JSON.
///
/// An empty result means the fields could not be removed, never that every
/// field was.
///
/// # Example
///
/// ```
/// use batchspec_scan::remove_fields;
///
/// assert_eq!(remove_fields(r#"{"a":1,"b":2}"#, &[r#""b""#]), r#"{"a":1}"#);
/// assert_eq!(remove_fields(r#"{"a":"#, &[r#""a""#]), "");
/// ```
pub fn remove_fields(input: &str, fields: &[&str]) -> String {
    try_remove_fields(input, fields).unwrap_or_else(|err| {
        tracing::debug!(%err, "field removal skipped: input is not valid JSON");
        String::new()
    })
}

// ── Empty member pruning ──────────────────────────────────────────────────

struct RemoveEmpty;

impl Rewrite for RemoveEmpty {
    fn prune(&mut self, rewritten: &[u8]) -> bool {
        matches!(rewritten, b"null" | b"\"\"" | b"{}" | b"[]")
    }
}

/// Removes object members whose value is `null`, `""`, `{}` or `[]`.
///
/// Members are judged after their own content was pruned, so an object that
/// only held empty members disappears as well and the result is a fixed
/// point. Array elements are kept.
///
/// # Example
///
/// ```
/// use batchspec_scan::remove_empty_fields;
///
/// let out = remove_empty_fields(br#"{"key":{"a":[1,2],"b":{},"c":{"d":null}}}"#).unwrap();
/// assert_eq!(out, br#"{"key":{"a":[1,2]}}"#);
/// ```
pub fn remove_empty_fields(input: &[u8]) -> Result<Vec<u8>, SyntaxError> {
    rewrite(input, &mut RemoveEmpty)
}

// ── Key case folding ──────────────────────────────────────────────────────

struct KeyFirstLower;

impl Rewrite for KeyFirstLower {
    fn write_key(&mut self, key: &[u8], out: &mut Vec<u8>) {
        let body = key.strip_prefix(b"\"").and_then(|k| k.strip_suffix(b"\""));
        let Some((first, rest)) = body.and_then(split_first_char) else {
            out.extend_from_slice(key);
            return;
        };
        out.push(b'"');
        let mut buf = [0u8; 4];
        for lower in first.to_lowercase() {
            out.extend_from_slice(lower.encode_utf8(&mut buf).as_bytes());
        }
        out.extend_from_slice(rest);
        out.push(b'"');
    }
}

/// Decodes the first UTF-8 code point of `bytes`.
fn split_first_char(bytes: &[u8]) -> Option<(char, &[u8])> {
    let width = match *bytes.first()? {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return None,
    };
    let head = std::str::from_utf8(bytes.get(..width)?).ok()?;
    let ch = head.chars().next()?;
    Some((ch, &bytes[width..]))
}

/// Lower-cases the first character of every object key, at any depth.
///
/// Only the first code point of each key changes; values are copied through.
///
/// # Example
///
/// ```
/// use batchspec_scan::key_first_lower;
///
/// assert_eq!(key_first_lower(br#"[{"Name":"X"}]"#).unwrap(), br#"[{"name":"X"}]"#);
/// ```
pub fn key_first_lower(input: &[u8]) -> Result<Vec<u8>, SyntaxError> {
    rewrite(input, &mut KeyFirstLower)
}

// ── Compaction ────────────────────────────────────────────────────────────

struct Identity;

impl Rewrite for Identity {}

/// Removes insignificant whitespace.
pub fn compact_bytes(input: &[u8]) -> Result<Vec<u8>, SyntaxError> {
    rewrite(input, &mut Identity)
}

/// Removes insignificant whitespace.
pub fn compact_string(input: &str) -> Result<String, SyntaxError> {
    compact_bytes(input.as_bytes()).map(into_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxErrorKind;

    fn lower(input: &str) -> String {
        String::from_utf8(key_first_lower(input.as_bytes()).unwrap()).unwrap()
    }

    fn prune(input: &str) -> String {
        String::from_utf8(remove_empty_fields(input.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn remove_single_field() {
        assert_eq!(remove_fields(r#"{"a":1,"b":2}"#, &[r#""b""#]), r#"{"a":1}"#);
        assert_eq!(remove_fields(r#"{"a":1,"b":2}"#, &[r#""a""#]), r#"{"b":2}"#);
    }

    #[test]
    fn remove_fields_at_every_depth() {
        let input = r#"{ "keep": { "drop": 1, "x": [ {"drop": true, "y": null} ] }, "drop": "z" }"#;
        assert_eq!(
            remove_fields(input, &[r#""drop""#]),
            r#"{"keep":{"x":[{"y":null}]}}"#
        );
    }

    #[test]
    fn remove_several_fields() {
        let input = r#"{"a":1,"b":2,"c":3,"d":4}"#;
        assert_eq!(remove_fields(input, &[r#""a""#, r#""c""#, r#""d""#]), r#"{"b":2}"#);
        assert_eq!(remove_fields(input, &[r#""a""#, r#""b""#, r#""c""#, r#""d""#]), "{}");
    }

    #[test]
    fn remove_fields_matches_quoted_token_only() {
        let input = r#"{"plugins":[1],"other":2}"#;
        assert_eq!(remove_fields(input, &["plugins"]), r#"{"plugins":[1],"other":2}"#);
        assert_eq!(remove_fields(input, &[r#""plugins""#]), r#"{"other":2}"#);
    }

    #[test]
    fn remove_fields_leaves_array_strings_alone() {
        let input = r#"["\"b\"", "b", {"b": 1}]"#;
        assert_eq!(remove_fields(input, &[r#""b""#]), r#"["\"b\"","b",{}]"#);
    }

    #[test]
    fn remove_fields_on_malformed_input_is_empty() {
        assert_eq!(remove_fields(r#"{"a":1"#, &[r#""a""#]), "");
        let err = try_remove_fields(r#"{"a":[1}"#, &[]).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedByte(b'}'));
    }

    #[test]
    fn remove_fields_keeps_scalars_verbatim() {
        let input = r#"{"n":1.50e+10,"s":"é\n","t":true}"#;
        assert_eq!(remove_fields(input, &[]), input);
    }

    #[test]
    fn key_first_lower_simple() {
        assert_eq!(lower(r#"{"Key":42}"#), r#"{"key":42}"#);
        assert_eq!(lower(r#"{"KEY":42}"#), r#"{"kEY":42}"#);
        assert_eq!(lower(r#"{"key":42}"#), r#"{"key":42}"#);
    }

    #[test]
    fn key_first_lower_nested() {
        assert_eq!(lower(r#"[{"Name":"x"}]"#), r#"[{"name":"x"}]"#);
        assert_eq!(
            lower(r#"{"Outer":{"Inner":[{"Deep":"Value"}]},"List":["Keep"]}"#),
            r#"{"outer":{"inner":[{"deep":"Value"}]},"list":["Keep"]}"#
        );
    }

    #[test]
    fn key_first_lower_unicode_and_edge_keys() {
        assert_eq!(lower(r#"{"Éclair":1}"#), r#"{"éclair":1}"#);
        assert_eq!(lower(r#"{"":1}"#), r#"{"":1}"#);
        assert_eq!(lower(r#"{"1A":1}"#), r#"{"1A":1}"#);
        assert_eq!(lower(r#"{"\u0041b":1}"#), r#"{"\u0041b":1}"#);
    }

    #[test]
    fn key_first_lower_scalar_document() {
        assert_eq!(lower(" \"Value\" "), "\"Value\"");
    }

    #[test]
    fn key_first_lower_rejects_malformed() {
        assert!(key_first_lower(b"{\"A\":}").is_err());
        assert!(key_first_lower(b"").is_err());
    }

    #[test]
    fn remove_empty_fields_multi_level() {
        assert_eq!(
            prune(r#"{"key":{"a":[1,2],"b":{},"c":{"d":null}}}"#),
            r#"{"key":{"a":[1,2]}}"#
        );
    }

    #[test]
    fn remove_empty_fields_kinds() {
        assert_eq!(
            prune(r#"{"a":null,"b":"","c":[],"d":{},"e":0,"f":false}"#),
            r#"{"e":0,"f":false}"#
        );
        assert_eq!(prune(r#"{"a":{"b":{"c":{"d":[]}}}}"#), "{}");
    }

    #[test]
    fn remove_empty_fields_keeps_array_elements() {
        assert_eq!(prune(r#"{"a":[null,{},[],""]}"#), r#"{"a":[null,{},[],""]}"#);
        assert_eq!(prune(r#"[{"a":null}]"#), "[{}]");
    }

    #[test]
    fn remove_empty_fields_is_a_fixed_point() {
        let once = prune(r#"{"x":{"y":{"z":""}},"w":[{"v":{}}],"u":1}"#);
        assert_eq!(once, r#"{"w":[{}],"u":1}"#);
        assert_eq!(prune(&once), once);
    }

    #[test]
    fn compact_removes_whitespace_only() {
        let input = "{ \"a\" : [ 1 , 2.0e1 ] ,\n\t\"b\" : { \"c\" : \"x y\" } }";
        assert_eq!(compact_string(input).unwrap(), r#"{"a":[1,2.0e1],"b":{"c":"x y"}}"#);
        assert_eq!(compact_bytes(b" [ ] ").unwrap(), b"[]");
        assert_eq!(compact_bytes(b" -0.5 ").unwrap(), b"-0.5");
    }

    #[test]
    fn compact_rejects_malformed() {
        let err = compact_string("{\"a\" 1}").unwrap_err();
        assert_eq!(err.offset, 5);
    }
}
