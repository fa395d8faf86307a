//! One-level JSON scanner.
//!
//! [`scan`] walks the members of a top-level object (or the elements of a
//! top-level array) and hands each one to a visitor as raw byte spans. Nested
//! objects and arrays are validated and skipped as a single span; a visitor
//! that wants to look inside calls [`scan`] again on that span.
//!
//! Nothing is decoded and nothing is allocated.

use crate::error::{SyntaxError, SyntaxErrorKind};

/// Deepest nesting accepted inside a scanned document.
pub const MAX_DEPTH: usize = 512;

/// The JSON type of a raw value span, judged from its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl ValueKind {
    /// Classifies `span` by its first non-whitespace byte.
    ///
    /// Only the leading byte is inspected; the span is not validated.
    pub fn of(span: &[u8]) -> Option<ValueKind> {
        let first = span.iter().copied().find(|b| !is_whitespace(*b))?;
        match first {
            b'{' => Some(ValueKind::Object),
            b'[' => Some(ValueKind::Array),
            b'"' => Some(ValueKind::String),
            b'-' | b'0'..=b'9' => Some(ValueKind::Number),
            b't' | b'f' => Some(ValueKind::Bool),
            b'n' => Some(ValueKind::Null),
            _ => None,
        }
    }

    pub fn is_composite(self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Scans one JSON document from the start of `input`.
///
/// For an object, `visit` receives every member as `(key, value)` where `key`
/// is the raw key token including its quotes. For an array, every element is
/// passed with an empty key. A top-level scalar is passed once, also with an
/// empty key. Value spans are exact: no surrounding whitespace, nested content
/// verbatim.
///
/// Returning `false` from `visit` stops the scan; the rest of the input is
/// neither visited nor validated and no error is reported.
///
/// # Example
///
/// ```
/// use batchspec_scan::scan;
///
/// let mut seen = Vec::new();
/// scan(br#"{"a": 1, "b": [true, null]}"#, |key, value| {
///     seen.push((key.to_vec(), value.to_vec()));
///     true
/// })
/// .unwrap();
/// assert_eq!(seen[0], (b"\"a\"".to_vec(), b"1".to_vec()));
/// assert_eq!(seen[1], (b"\"b\"".to_vec(), b"[true, null]".to_vec()));
/// ```
pub fn scan<'a, F>(input: &'a [u8], mut visit: F) -> Result<(), SyntaxError>
where
    F: FnMut(&'a [u8], &'a [u8]) -> bool,
{
    let mut scanner = Scanner::new(input);
    scanner.skip_whitespace();
    let completed = match scanner.peek() {
        None => return Err(scanner.error(SyntaxErrorKind::UnexpectedEnd)),
        Some(b'{') => scanner.members(&mut visit)?,
        Some(b'[') => scanner.elements(&mut visit)?,
        Some(_) => {
            let value = scanner.skip_value(0)?;
            visit(&[], value)
        }
    };
    if completed {
        scanner.finish()?;
    }
    Ok(())
}

/// Cursor over a byte buffer that recognizes JSON syntax without decoding it.
pub struct Scanner<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.x
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(self.x, kind)
    }

    fn unexpected(&self) -> SyntaxError {
        match self.peek() {
            Some(b) => self.error(SyntaxErrorKind::UnexpectedByte(b)),
            None => self.error(SyntaxErrorKind::UnexpectedEnd),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    pub fn skip_whitespace(&mut self) {
        while self.x < self.data.len() && is_whitespace(self.data[self.x]) {
            self.x += 1;
        }
    }

    fn expect(&mut self, b: u8) -> Result<(), SyntaxError> {
        if self.peek() != Some(b) {
            return Err(self.unexpected());
        }
        self.x += 1;
        Ok(())
    }

    /// Requires that only whitespace remains.
    pub fn finish(&mut self) -> Result<(), SyntaxError> {
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(self.error(SyntaxErrorKind::TrailingData));
        }
        Ok(())
    }

    /// Visits the members of the object at the cursor. Returns `false` if the
    /// visitor stopped early.
    fn members<F>(&mut self, visit: &mut F) -> Result<bool, SyntaxError>
    where
        F: FnMut(&'a [u8], &'a [u8]) -> bool,
    {
        self.expect(b'{')?;
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            return Ok(true);
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected());
            }
            let key = self.skip_string()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            let value = self.skip_value(1)?;
            if !visit(key, value) {
                return Ok(false);
            }
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    return Ok(true);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Visits the elements of the array at the cursor. Returns `false` if the
    /// visitor stopped early.
    fn elements<F>(&mut self, visit: &mut F) -> Result<bool, SyntaxError>
    where
        F: FnMut(&'a [u8], &'a [u8]) -> bool,
    {
        self.expect(b'[')?;
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            return Ok(true);
        }
        loop {
            self.skip_whitespace();
            let value = self.skip_value(1)?;
            if !visit(&[], value) {
                return Ok(false);
            }
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    return Ok(true);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Validates the value at the cursor and returns its exact span.
    pub fn skip_value(&mut self, depth: usize) -> Result<&'a [u8], SyntaxError> {
        let start = self.x;
        match self.peek() {
            None => return Err(self.error(SyntaxErrorKind::UnexpectedEnd)),
            Some(b'{') => self.skip_object(depth)?,
            Some(b'[') => self.skip_array(depth)?,
            Some(b'"') => {
                self.skip_string()?;
            }
            Some(b'-' | b'0'..=b'9') => self.skip_number()?,
            Some(b't') => self.skip_literal(b"true")?,
            Some(b'f') => self.skip_literal(b"false")?,
            Some(b'n') => self.skip_literal(b"null")?,
            Some(_) => return Err(self.unexpected()),
        }
        Ok(&self.data[start..self.x])
    }

    fn skip_object(&mut self, depth: usize) -> Result<(), SyntaxError> {
        if depth >= MAX_DEPTH {
            return Err(self.error(SyntaxErrorKind::NestingTooDeep));
        }
        self.expect(b'{')?;
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            return Ok(());
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected());
            }
            self.skip_string()?;
            self.skip_whitespace();
            self.expect(b':')?;
            self.skip_whitespace();
            self.skip_value(depth + 1)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    return Ok(());
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn skip_array(&mut self, depth: usize) -> Result<(), SyntaxError> {
        if depth >= MAX_DEPTH {
            return Err(self.error(SyntaxErrorKind::NestingTooDeep));
        }
        self.expect(b'[')?;
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            return Ok(());
        }
        loop {
            self.skip_whitespace();
            self.skip_value(depth + 1)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    return Ok(());
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Skips a string token and returns its span, quotes included.
    fn skip_string(&mut self) -> Result<&'a [u8], SyntaxError> {
        let start = self.x;
        self.expect(b'"')?;
        loop {
            let Some(b) = self.peek() else {
                return Err(self.error(SyntaxErrorKind::UnexpectedEnd));
            };
            match b {
                b'"' => {
                    self.x += 1;
                    return Ok(&self.data[start..self.x]);
                }
                b'\\' => self.skip_escape()?,
                0x00..=0x1f => return Err(self.error(SyntaxErrorKind::ControlCharacter)),
                _ => self.x += 1,
            }
        }
    }

    fn skip_escape(&mut self) -> Result<(), SyntaxError> {
        let escaped = self.data.get(self.x + 1).copied();
        match escaped {
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                self.x += 2;
                Ok(())
            }
            Some(b'u') => {
                let digits = self.data.get(self.x + 2..self.x + 6);
                match digits {
                    Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => {
                        self.x += 6;
                        Ok(())
                    }
                    _ => Err(self.error(SyntaxErrorKind::InvalidEscape)),
                }
            }
            None => Err(SyntaxError::new(self.data.len(), SyntaxErrorKind::UnexpectedEnd)),
            Some(_) => Err(self.error(SyntaxErrorKind::InvalidEscape)),
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.x;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.x += 1;
        }
        self.x - start
    }

    fn skip_number(&mut self) -> Result<(), SyntaxError> {
        if self.peek() == Some(b'-') {
            self.x += 1;
        }
        match self.peek() {
            Some(b'0') => self.x += 1,
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => return Err(self.error(SyntaxErrorKind::InvalidNumber)),
        }
        if self.peek() == Some(b'.') {
            self.x += 1;
            if self.skip_digits() == 0 {
                return Err(self.error(SyntaxErrorKind::InvalidNumber));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.x += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.x += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.error(SyntaxErrorKind::InvalidNumber));
            }
        }
        Ok(())
    }

    fn skip_literal(&mut self, literal: &[u8]) -> Result<(), SyntaxError> {
        let end = self.x + literal.len();
        if self.data.get(self.x..end) != Some(literal) {
            return Err(self.error(SyntaxErrorKind::InvalidLiteral));
        }
        self.x = end;
        Ok(())
    }
}
