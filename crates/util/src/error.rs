//! Errors raised while decoding or encoding JSON trees.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no JSON document in input")]
    EmptyInput,
    #[error("encoded JSON is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
