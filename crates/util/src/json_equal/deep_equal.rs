use serde_json::{Number, Value};

/// Deep structural equality of two JSON trees.
///
/// Objects compare irrespective of member order, arrays element by element,
/// and numbers by value at float64 precision, so `1` equals `1.0`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use batchspec_util::deep_equal;
///
/// assert!(deep_equal(&json!({"a": [1, 2], "b": 1.0}), &json!({"b": 1, "a": [1, 2]})));
/// assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        _ => false,
    }
}

/// Compares two numbers exactly when both are integers, otherwise as `f64`.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Decodes both inputs and compares them with [`deep_equal`].
///
/// Returns `false` when either side is not valid JSON.
pub fn equal_bytes(a: &[u8], b: &[u8]) -> bool {
    match (serde_json::from_slice::<Value>(a), serde_json::from_slice::<Value>(b)) {
        (Ok(a), Ok(b)) => deep_equal(&a, &b),
        _ => false,
    }
}

/// String flavour of [`equal_bytes`].
pub fn equal_strings(a: &str, b: &str) -> bool {
    equal_bytes(a.as_bytes(), b.as_bytes())
}
