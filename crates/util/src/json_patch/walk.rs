//! Recursive comparison of two trees into a flat list of changes.

use serde_json::{Map, Value};

use crate::json_equal::deep_equal;
use crate::json_pointer::Path;

/// One difference between a source and a destination tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Change<'a> {
    Removed { path: Path, old: &'a Value },
    Added { path: Path, new: &'a Value },
    Replaced { path: Path, old: &'a Value, new: &'a Value },
}

pub(crate) fn changes<'a>(src: &'a Value, dst: &'a Value) -> Vec<Change<'a>> {
    let mut out = Vec::new();
    walk(&mut out, &mut Vec::new(), src, dst);
    out
}

fn walk<'a>(out: &mut Vec<Change<'a>>, path: &mut Path, src: &'a Value, dst: &'a Value) {
    if deep_equal(src, dst) {
        return;
    }
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => walk_object(out, path, s, d),
        (Value::Array(s), Value::Array(d)) => walk_array(out, path, s, d),
        _ => out.push(Change::Replaced { path: path.clone(), old: src, new: dst }),
    }
}

fn walk_object<'a>(
    out: &mut Vec<Change<'a>>,
    path: &mut Path,
    src: &'a Map<String, Value>,
    dst: &'a Map<String, Value>,
) {
    for (key, old) in src {
        if !dst.contains_key(key) {
            out.push(Change::Removed { path: child(path, key), old });
        }
    }
    for (key, new) in dst {
        match src.get(key) {
            None => out.push(Change::Added { path: child(path, key), new }),
            Some(old) => {
                path.push(key.clone());
                walk(out, path, old, new);
                path.pop();
            }
        }
    }
}

fn walk_array<'a>(out: &mut Vec<Change<'a>>, path: &mut Path, src: &'a [Value], dst: &'a [Value]) {
    let common = src.len().min(dst.len());
    for (i, (old, new)) in src.iter().zip(dst).enumerate() {
        path.push(i.to_string());
        walk(out, path, old, new);
        path.pop();
    }
    // Trailing removals go last-first so earlier indices stay valid.
    for i in (common..src.len()).rev() {
        out.push(Change::Removed { path: child(path, &i.to_string()), old: &src[i] });
    }
    for (i, new) in dst.iter().enumerate().skip(common) {
        out.push(Change::Added { path: child(path, &i.to_string()), new });
    }
}

fn child(path: &Path, key: &str) -> Path {
    let mut p = path.clone();
    p.push(key.to_string());
    p
}
