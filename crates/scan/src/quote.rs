//! JSON string literal quoting and unquoting.

use std::borrow::Cow;

use crate::error::{SyntaxError, SyntaxErrorKind};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Which characters [`quote`] escapes beyond the ones JSON requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteMode {
    /// Only `"`, `\` and control bytes below 0x20.
    #[default]
    Json,
    /// Everything outside printable ASCII.
    Ascii,
    /// Control, format, separator and private-use characters.
    Graphic,
}

/// Quotes an arbitrary byte string as a JSON string literal.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD. The result is always a
/// valid JSON string token.
///
/// # Examples
///
/// ```
/// use batchspec_scan::{quote, QuoteMode};
///
/// assert_eq!(quote(b"say \"hi\"", QuoteMode::Json), br#""say \"hi\"""#);
/// assert_eq!(quote("caf\u{e9}".as_bytes(), QuoteMode::Ascii), br#""caf\u00e9""#);
/// ```
pub fn quote(input: &[u8], mode: QuoteMode) -> Vec<u8> {
    let text = String::from_utf8_lossy(input);
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'"');
    for ch in text.chars() {
        match ch {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\u{08}' => out.extend_from_slice(b"\\b"),
            '\u{0C}' => out.extend_from_slice(b"\\f"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            c if (c as u32) < 0x20 || needs_escape(c, mode) => push_code_point_escape(&mut out, c),
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
    out
}

fn needs_escape(ch: char, mode: QuoteMode) -> bool {
    match mode {
        QuoteMode::Json => false,
        QuoteMode::Ascii => !ch.is_ascii() || ch == '\u{7f}',
        QuoteMode::Graphic => !is_graphic(ch),
    }
}

fn is_graphic(ch: char) -> bool {
    !(ch.is_control()
        || matches!(
            ch,
            '\u{00AD}'
                | '\u{200B}'..='\u{200F}'
                | '\u{2028}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{FEFF}'
                | '\u{E000}'..='\u{F8FF}'
                | '\u{F0000}'..='\u{10FFFF}'
        ))
}

fn push_code_point_escape(out: &mut Vec<u8>, ch: char) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        out.extend_from_slice(b"\\u");
        for shift in [12, 8, 4, 0] {
            out.push(HEX[usize::from((*unit >> shift) & 0xf)]);
        }
    }
}

/// Decodes a JSON string literal (quotes included) into its raw bytes.
///
/// When the literal holds no escape sequence the interior is returned
/// borrowed; otherwise escapes are decoded into a fresh buffer. Surrogate
/// escapes must come in high/low pairs.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use batchspec_scan::unquote;
///
/// assert!(matches!(unquote(br#""plain""#).unwrap(), Cow::Borrowed(b"plain")));
/// assert_eq!(unquote(br#""a\nb\u00e9""#).unwrap().as_ref(), "a\nb\u{e9}".as_bytes());
/// assert!(unquote(b"plain").is_err());
/// ```
pub fn unquote(input: &[u8]) -> Result<Cow<'_, [u8]>, SyntaxError> {
    let [b'"', body @ .., b'"'] = input else {
        return Err(SyntaxError::new(0, SyntaxErrorKind::NotQuoted));
    };
    // Offsets below are reported relative to `input`, past the opening quote.
    let at = |i: usize, kind| SyntaxError::new(i + 1, kind);

    if let Some(i) = body.iter().position(|&b| b < 0x20) {
        return Err(at(i, SyntaxErrorKind::ControlCharacter));
    }
    if !body.contains(&b'\\') {
        if let Some(i) = body.iter().position(|&b| b == b'"') {
            return Err(at(i, SyntaxErrorKind::UnexpectedByte(b'"')));
        }
        return Ok(Cow::Borrowed(body));
    }

    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        match body[i] {
            b'"' => return Err(at(i, SyntaxErrorKind::UnexpectedByte(b'"'))),
            b'\\' => {
                let simple = match body.get(i + 1) {
                    Some(b'"') => b'"',
                    Some(b'\\') => b'\\',
                    Some(b'/') => b'/',
                    Some(b'b') => 0x08,
                    Some(b'f') => 0x0c,
                    Some(b'n') => b'\n',
                    Some(b'r') => b'\r',
                    Some(b't') => b'\t',
                    Some(b'u') => {
                        let (ch, len) = read_unicode_escape(body, i).map_err(|kind| at(i, kind))?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                        i += len;
                        continue;
                    }
                    _ => return Err(at(i, SyntaxErrorKind::InvalidEscape)),
                };
                out.push(simple);
                i += 2;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Ok(Cow::Owned(out))
}

/// Reads `\uXXXX` (or a `\uXXXX\uXXXX` surrogate pair) starting at `i`.
/// Returns the character and the number of bytes consumed.
fn read_unicode_escape(body: &[u8], i: usize) -> Result<(char, usize), SyntaxErrorKind> {
    let high = read_hex4(body, i + 2)?;
    let code_point = match high {
        0xD800..=0xDBFF => {
            if body.get(i + 6) != Some(&b'\\') || body.get(i + 7) != Some(&b'u') {
                return Err(SyntaxErrorKind::InvalidSurrogate);
            }
            let low = read_hex4(body, i + 8)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(SyntaxErrorKind::InvalidSurrogate);
            }
            let cp = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(cp)
                .map(|ch| (ch, 12))
                .ok_or(SyntaxErrorKind::InvalidSurrogate);
        }
        0xDC00..=0xDFFF => return Err(SyntaxErrorKind::InvalidSurrogate),
        unit => unit,
    };
    char::from_u32(code_point)
        .map(|ch| (ch, 6))
        .ok_or(SyntaxErrorKind::InvalidEscape)
}

fn read_hex4(body: &[u8], start: usize) -> Result<u32, SyntaxErrorKind> {
    let digits = body.get(start..start + 4).ok_or(SyntaxErrorKind::InvalidEscape)?;
    digits.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(16).ok_or(SyntaxErrorKind::InvalidEscape)?;
        Ok(acc << 4 | digit)
    })
}
