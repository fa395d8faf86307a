//! Decides whether a configured document and the service's copy of it
//! describe the same job, once both are normalized.

use batchspec_util::{
    decode_from_slice, decode_from_str, deep_equal, diff_values, encode_to_bytes, CodecError,
    PatchOperation,
};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::EquivalenceError;
use crate::shapes::{
    ContainerProperties, EcsProperties, EksProperties, NodeProperties, Shape, ShapeKind,
};

/// Decodes `json` as `S` and reduces it. The empty string and `null` read
/// as `{}`.
pub fn reduced<S: Shape>(json: &str) -> Result<S, CodecError> {
    let text = if json.is_empty() { "{}" } else { json };
    let mut shape = decode_from_str::<Option<S>>(text)?.unwrap_or_default();
    shape.reduce();
    Ok(shape)
}

/// Re-encodes a reduced shape and decodes the result as a generic tree.
fn canonical<S: Shape>(shape: &S, side: &'static str) -> Result<Value, EquivalenceError> {
    let bytes = encode_to_bytes(shape).map_err(EquivalenceError::Encode)?;
    trace!(shape = S::NAME, side, canonical = %String::from_utf8_lossy(&bytes));
    decode_from_slice(&bytes).map_err(EquivalenceError::Encode)
}

fn canonical_pair<S: Shape>(
    configuration: &str,
    api: &str,
) -> Result<(Value, Value), EquivalenceError> {
    let config = reduced::<S>(configuration).map_err(EquivalenceError::Configuration)?;
    let observed = reduced::<S>(api).map_err(EquivalenceError::Api)?;
    Ok((canonical(&config, "configuration")?, canonical(&observed, "api")?))
}

/// Reports whether two documents of shape `S` are equivalent.
///
/// A decode failure on either side is an error rather than a `false`: the
/// caller cannot tell whether the documents differ.
///
/// ```
/// use batchspec::{equivalent, ContainerProperties};
///
/// let config = r#"{"image":"busybox","resourceRequirements":[]}"#;
/// let api = r#"{"image":"busybox"}"#;
/// assert!(equivalent::<ContainerProperties>(config, api).unwrap());
/// ```
pub fn equivalent<S: Shape>(configuration: &str, api: &str) -> Result<bool, EquivalenceError> {
    let (config, observed) = canonical_pair::<S>(configuration, api)?;
    let same = deep_equal(&config, &observed);
    if !same {
        debug!(
            shape = S::NAME,
            configuration = %config,
            api = %observed,
            "documents are not equivalent"
        );
    }
    Ok(same)
}

/// The patch turning the configured canonical form into the API's, for
/// diagnostics. Empty when the documents are equivalent.
pub fn explain<S: Shape>(
    configuration: &str,
    api: &str,
) -> Result<Vec<PatchOperation>, EquivalenceError> {
    let (config, observed) = canonical_pair::<S>(configuration, api)?;
    Ok(diff_values(&config, &observed))
}

pub fn equivalent_container_properties_json(
    configuration: &str,
    api: &str,
) -> Result<bool, EquivalenceError> {
    equivalent::<ContainerProperties>(configuration, api)
}

pub fn equivalent_ecs_properties_json(
    configuration: &str,
    api: &str,
) -> Result<bool, EquivalenceError> {
    equivalent::<EcsProperties>(configuration, api)
}

pub fn equivalent_eks_properties_json(
    configuration: &str,
    api: &str,
) -> Result<bool, EquivalenceError> {
    equivalent::<EksProperties>(configuration, api)
}

pub fn equivalent_node_properties_json(
    configuration: &str,
    api: &str,
) -> Result<bool, EquivalenceError> {
    equivalent::<NodeProperties>(configuration, api)
}

impl ShapeKind {
    pub fn equivalent(self, configuration: &str, api: &str) -> Result<bool, EquivalenceError> {
        match self {
            ShapeKind::Container => equivalent::<ContainerProperties>(configuration, api),
            ShapeKind::Ecs => equivalent::<EcsProperties>(configuration, api),
            ShapeKind::Eks => equivalent::<EksProperties>(configuration, api),
            ShapeKind::Node => equivalent::<NodeProperties>(configuration, api),
        }
    }

    pub fn explain(
        self,
        configuration: &str,
        api: &str,
    ) -> Result<Vec<PatchOperation>, EquivalenceError> {
        match self {
            ShapeKind::Container => explain::<ContainerProperties>(configuration, api),
            ShapeKind::Ecs => explain::<EcsProperties>(configuration, api),
            ShapeKind::Eks => explain::<EksProperties>(configuration, api),
            ShapeKind::Node => explain::<NodeProperties>(configuration, api),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_are_equivalent() {
        for kind in ShapeKind::ALL {
            assert!(kind.equivalent("", "").unwrap(), "{kind}");
            assert!(kind.equivalent("", "{}").unwrap(), "{kind}");
            assert!(kind.equivalent("{}", "").unwrap(), "{kind}");
        }
    }

    #[test]
    fn decode_errors_name_the_side() {
        let err = equivalent_container_properties_json("{bad json", "{}").unwrap_err();
        assert!(matches!(err, EquivalenceError::Configuration(_)));
        let err = equivalent_container_properties_json("{}", r#"{"vcpus":"x"}"#).unwrap_err();
        assert!(matches!(err, EquivalenceError::Api(_)));
        assert!(err.to_string().starts_with("decoding API JSON"));
    }

    #[test]
    fn explain_lists_real_differences() {
        let patch = ShapeKind::Container
            .explain(r#"{"image":"a","command":[]}"#, r#"{"image":"b"}"#)
            .unwrap();
        assert_eq!(
            patch,
            vec![PatchOperation::Replace { path: "/image".into(), value: "b".into() }]
        );
        assert!(ShapeKind::Container.explain(r#"{"command":[]}"#, "").unwrap().is_empty());
    }

    #[test]
    fn null_reads_as_empty_object() {
        for kind in ShapeKind::ALL {
            assert!(kind.equivalent("null", "{}").unwrap(), "{kind}");
            assert!(kind.equivalent("", " null ").unwrap(), "{kind}");
        }
        assert!(!equivalent_container_properties_json("null", r#"{"image":"x"}"#).unwrap());
    }

    #[test]
    fn whitespace_only_is_not_empty() {
        assert!(equivalent_ecs_properties_json("  ", "{}").is_err());
    }
}
