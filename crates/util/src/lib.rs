//! batchspec-util - JSON tree helpers shared by the batchspec crates.
//!
//! Decoding and encoding go through `serde_json` with member order kept.
//! Equality is structural: numbers compare by value and object member order
//! is ignored. Patches follow RFC 6902 with RFC 6901 pointer paths.

mod codec;
mod diff;
mod error;
mod json_equal;
mod json_patch;
pub mod json_pointer;

pub use codec::{
    decode_from_reader, decode_from_slice, decode_from_str, encode_to_bytes, encode_to_string,
    encode_to_string_indent, encode_with, EncodeOptions,
};
pub use diff::diff;
pub use error::CodecError;
pub use json_equal::{deep_equal, equal_bytes, equal_strings, numbers_equal};
pub use json_patch::{create_patch, create_patch_from_strings, diff_values, PatchOperation};
