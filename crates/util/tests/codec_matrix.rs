use batchspec_util::{
    create_patch_from_strings, decode_from_str, deep_equal, diff, encode_to_string, encode_with,
    equal_strings, json_pointer::parse_json_pointer, EncodeOptions, PatchOperation,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-4000i32..4000).prop_map(|n| json!(f64::from(n) / 8.0)),
        "[a-z~/ \"]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 40, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-c~/]{1,3}", inner), 0..4)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Applies add/remove/replace operations the way RFC 6902 defines them.
fn apply(doc: &mut Value, patch: &[PatchOperation]) {
    for op in patch {
        let mut tokens = parse_json_pointer(op.path());
        let Some(last) = tokens.pop() else {
            *doc = op.value().cloned().unwrap_or(Value::Null);
            continue;
        };
        let mut parent = &mut *doc;
        for token in &tokens {
            parent = match parent {
                Value::Object(map) => map.get_mut(token).unwrap(),
                Value::Array(items) => &mut items[token.parse::<usize>().unwrap()],
                other => panic!("cannot descend into {other}"),
            };
        }
        match (op, parent) {
            (PatchOperation::Remove { .. }, Value::Object(map)) => {
                map.remove(&last);
            }
            (PatchOperation::Remove { .. }, Value::Array(items)) => {
                items.remove(last.parse::<usize>().unwrap());
            }
            (PatchOperation::Add { value, .. }, Value::Array(items)) => {
                items.insert(last.parse::<usize>().unwrap(), value.clone());
            }
            (PatchOperation::Replace { value, .. }, Value::Array(items)) => {
                items[last.parse::<usize>().unwrap()] = value.clone();
            }
            (
                PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. },
                Value::Object(map),
            ) => {
                map.insert(last, value.clone());
            }
            (op, parent) => panic!("{op:?} does not apply to {parent}"),
        }
    }
}

#[test]
fn equality_matrix() {
    let cases = [
        (r#"{"a":1,"b":[true,null]}"#, r#"{"b":[true,null],"a":1.0}"#, true),
        (r#"{"a":1}"#, r#"{"a":1,"b":null}"#, false),
        ("[1,2]", "[2,1]", false),
        (r#""x""#, r#""x""#, true),
        ("1e2", "100", true),
        ("{", "{", false),
    ];
    for (a, b, expected) in cases {
        assert_eq!(equal_strings(a, b), expected, "{a} vs {b}");
    }
}

#[test]
fn diff_lists_each_change() {
    let out = diff(
        r#"{"image":"a","vcpus":1,"env":[{"name":"A"}]}"#,
        r#"{"image":"b","env":[{"name":"A"},{"name":"B"}],"memory":2}"#,
    )
    .unwrap();
    assert_eq!(
        out,
        "- /vcpus: 1\n~ /image: \"a\" => \"b\"\n+ /env/1: {\"name\":\"B\"}\n+ /memory: 2\n"
    );
}

#[test]
fn patch_paths_escape_keys() {
    let patch = create_patch_from_strings(r#"{"a/b":{"c~d":1}}"#, r#"{"a/b":{"c~d":2}}"#).unwrap();
    assert_eq!(patch[0].path(), "/a~1b/c~0d");
}

proptest! {
    #[test]
    fn encode_decode_keeps_value(value in arb_json()) {
        let text = encode_to_string(&value).unwrap();
        let back: Value = decode_from_str(&text).unwrap();
        prop_assert!(deep_equal(&back, &value));
        let indented = encode_with(&value, EncodeOptions::indented("", "  ")).unwrap();
        let back: Value = decode_from_str(&indented).unwrap();
        prop_assert!(deep_equal(&back, &value));
    }

    #[test]
    fn patch_transforms_source_into_destination(a in arb_json(), b in arb_json()) {
        let patch = create_patch_from_strings(&a.to_string(), &b.to_string()).unwrap();
        prop_assert_eq!(patch.is_empty(), deep_equal(&a, &b));
        let mut doc = a.clone();
        apply(&mut doc, &patch);
        prop_assert!(deep_equal(&doc, &b), "patch {:?} gave {}", patch, doc);
    }
}
