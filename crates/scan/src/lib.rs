//! batchspec-scan - a streaming JSON scanner and byte-level rewrites.
//!
//! The scanner reports the members of one object (or the elements of one
//! array) as raw byte spans; the rewrites re-emit a document while dropping
//! members, pruning empty ones or case-folding keys, without decoding it into
//! a tree.
//!
//! ```
//! use batchspec_scan::{compact_string, key_first_lower, remove_fields};
//!
//! assert_eq!(remove_fields(r#"{"a": 1, "b": 2}"#, &[r#""b""#]), r#"{"a":1}"#);
//! assert_eq!(key_first_lower(br#"{"Key":42}"#).unwrap(), br#"{"key":42}"#);
//! assert_eq!(compact_string("[ 1, 2 ]").unwrap(), "[1,2]");
//! ```

pub mod error;
pub mod quote;
pub mod rewrite;
pub mod scanner;

pub use error::{SyntaxError, SyntaxErrorKind};
pub use quote::{quote, unquote, QuoteMode};
pub use rewrite::{
    compact_bytes, compact_string, key_first_lower, remove_empty_fields, remove_fields,
    try_remove_fields,
};
pub use scanner::{scan, Scanner, ValueKind, MAX_DEPTH};
