//! Structural equality of JSON trees and JSON texts.

mod deep_equal;

pub use deep_equal::{deep_equal, equal_bytes, equal_strings, numbers_equal};
