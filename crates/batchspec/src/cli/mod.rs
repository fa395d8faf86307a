//! Logic behind the `batchspec` command-line tool.
//!
//! Each command takes document text and returns the text to print, so the
//! binary only deals with arguments, files and exit codes.

use std::io::Read;
use std::path::Path;

use batchspec_scan::{
    compact_string, key_first_lower, quote, remove_empty_fields, try_remove_fields, QuoteMode,
    SyntaxError,
};
use batchspec_util::{encode_to_string_indent, CodecError, PatchOperation};
use thiserror::Error;

use crate::error::EquivalenceError;
use crate::shapes::ShapeKind;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Equivalence(#[from] EquivalenceError),
}

/// Reads a whole file, or standard input when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    let wrap = |source: std::io::Error| CliError::Read { path: path.display().to_string(), source };
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(wrap)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(wrap)
    }
}

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Equivalent,
    Different(Vec<PatchOperation>),
}

impl Verdict {
    /// Text printed for the verdict: `equivalent`, or the patch as indented JSON.
    pub fn render(&self) -> Result<String, CliError> {
        match self {
            Verdict::Equivalent => Ok("equivalent".to_string()),
            Verdict::Different(patch) => Ok(encode_to_string_indent(patch, "", "  ")?),
        }
    }
}

pub fn equivalent(shape: ShapeKind, configuration: &str, api: &str) -> Result<Verdict, CliError> {
    if shape.equivalent(configuration, api)? {
        return Ok(Verdict::Equivalent);
    }
    Ok(Verdict::Different(shape.explain(configuration, api)?))
}

/// Removes members named by `fields`, given without quotes.
pub fn remove_fields(input: &str, fields: &[String]) -> Result<String, CliError> {
    let quoted: Vec<String> = fields
        .iter()
        .map(|field| {
            String::from_utf8_lossy(&quote(field.as_bytes(), QuoteMode::Json)).into_owned()
        })
        .collect();
    let names: Vec<&str> = quoted.iter().map(String::as_str).collect();
    Ok(try_remove_fields(input, &names)?)
}

pub fn remove_empty(input: &str) -> Result<String, CliError> {
    let out = remove_empty_fields(input.as_bytes())?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn lower_keys(input: &str) -> Result<String, CliError> {
    let out = key_first_lower(input.as_bytes())?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn compact(input: &str) -> Result<String, CliError> {
    Ok(compact_string(input)?)
}

pub fn diff(a: &str, b: &str) -> Result<String, CliError> {
    Ok(batchspec_util::diff(a, b)?)
}
