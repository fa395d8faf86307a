//! Human-readable difference listing between two JSON texts.

use serde_json::Value;

use crate::codec::{decode_from_str, encode_to_string};
use crate::error::CodecError;
use crate::json_patch::{changes, Change};
use crate::json_pointer::format_json_pointer;

/// Lists the differences between `x` and `y`, one per line.
///
/// Lines read `- /path: old`, `+ /path: new` or `~ /path: old => new`, with
/// values in compact JSON and the document root shown as `(root)`. Returns
/// an empty string when the documents are deep-equal.
///
/// ```
/// let out = batchspec_util::diff(r#"{"a":1,"b":2}"#, r#"{"a":3}"#).unwrap();
/// assert_eq!(out, "- /b: 2\n~ /a: 1 => 3\n");
/// ```
pub fn diff(x: &str, y: &str) -> Result<String, CodecError> {
    let src: Value = decode_from_str(x)?;
    let dst: Value = decode_from_str(y)?;
    let mut out = String::new();
    for change in changes(&src, &dst) {
        let line = match change {
            Change::Removed { path, old } => {
                format!("- {}: {}", label(&path), encode_to_string(old)?)
            }
            Change::Added { path, new } => {
                format!("+ {}: {}", label(&path), encode_to_string(new)?)
            }
            Change::Replaced { path, old, new } => format!(
                "~ {}: {} => {}",
                label(&path),
                encode_to_string(old)?,
                encode_to_string(new)?
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn label(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        format_json_pointer(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_documents_render_nothing() {
        assert_eq!(diff(r#"{"a":[1,{"b":null}]}"#, r#"{"a":[1.0,{"b":null}]}"#).unwrap(), "");
    }

    #[test]
    fn root_and_array_changes() {
        assert_eq!(diff("1", "[1]").unwrap(), "~ (root): 1 => [1]\n");
        assert_eq!(diff("[1,2,3]", "[1]").unwrap(), "- /2: 3\n- /1: 2\n");
        assert_eq!(diff(r#"{"e":[]}"#, r#"{"e":[{"n":"A"}]}"#).unwrap(), "+ /e/0: {\"n\":\"A\"}\n");
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(diff("{", "{}").is_err());
    }
}
