use batchspec_util::CodecError;
use thiserror::Error;

/// Why an equivalence check could not reach a verdict.
#[derive(Debug, Error)]
pub enum EquivalenceError {
    #[error("decoding configuration JSON: {0}")]
    Configuration(#[source] CodecError),
    #[error("decoding API JSON: {0}")]
    Api(#[source] CodecError),
    #[error("encoding canonical JSON: {0}")]
    Encode(#[source] CodecError),
}
