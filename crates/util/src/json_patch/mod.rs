//! Minimal RFC 6902 patches between two JSON documents.
//!
//! The patch is built from `add`, `remove` and `replace` operations only.
//! Paths are RFC 6901 pointers. Applying the operations in order to the
//! source yields a document deep-equal to the destination.

mod walk;

pub(crate) use walk::{changes, Change};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::decode_from_slice;
use crate::error::CodecError;
use crate::json_pointer::format_json_pointer;

/// A single JSON Patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
}

impl PatchOperation {
    pub fn op_name(&self) -> &'static str {
        match self {
            PatchOperation::Add { .. } => "add",
            PatchOperation::Remove { .. } => "remove",
            PatchOperation::Replace { .. } => "replace",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. } => path,
        }
    }

    /// The new value carried by `add` and `replace`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                Some(value)
            }
            PatchOperation::Remove { .. } => None,
        }
    }
}

impl From<Change<'_>> for PatchOperation {
    fn from(change: Change<'_>) -> Self {
        match change {
            Change::Removed { path, .. } => {
                PatchOperation::Remove { path: format_json_pointer(&path) }
            }
            Change::Added { path, new } => PatchOperation::Add {
                path: format_json_pointer(&path),
                value: new.clone(),
            },
            Change::Replaced { path, new, .. } => PatchOperation::Replace {
                path: format_json_pointer(&path),
                value: new.clone(),
            },
        }
    }
}

/// Computes the operations that turn `src` into `dst`.
///
/// Deep-equal inputs (numbers compared by value, member order ignored)
/// produce an empty patch.
pub fn diff_values(src: &Value, dst: &Value) -> Vec<PatchOperation> {
    changes(src, dst).into_iter().map(PatchOperation::from).collect()
}

/// Decodes both documents and computes the operations that turn `a` into `b`.
///
/// # Example
///
/// ```
/// use batchspec_util::{create_patch, PatchOperation};
///
/// let patch = create_patch(br#"{"a":1}"#, br#"{"a":1,"b":2}"#).unwrap();
/// assert_eq!(patch, vec![PatchOperation::Add { path: "/b".into(), value: 2.into() }]);
/// ```
pub fn create_patch(a: &[u8], b: &[u8]) -> Result<Vec<PatchOperation>, CodecError> {
    let src: Value = decode_from_slice(a)?;
    let dst: Value = decode_from_slice(b)?;
    Ok(diff_values(&src, &dst))
}

pub fn create_patch_from_strings(a: &str, b: &str) -> Result<Vec<PatchOperation>, CodecError> {
    create_patch(a.as_bytes(), b.as_bytes())
}
