//! Typed projections of the job-definition documents compared for
//! equivalence, and the normalization applied to each before comparison.
//!
//! Every shape serializes its fields in wire-name alphabetical order with
//! absent fields omitted, which is the layout the service's own serializer
//! produces. Unknown fields are ignored on decode.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod container;
pub mod ecs;
pub mod eks;
pub mod node;

pub use container::ContainerProperties;
pub use ecs::EcsProperties;
pub use eks::EksProperties;
pub use node::NodeProperties;

/// A document shape that can be decoded, normalized and re-encoded.
pub trait Shape: Serialize + DeserializeOwned + Default {
    /// Name used in log events and error messages.
    const NAME: &'static str;

    /// Strips empty or defaulted substructure and sorts order-independent
    /// lists. Applying it twice has the same effect as applying it once.
    fn reduce(&mut self);
}

/// Runtime selector over the supported shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ShapeKind {
    Container,
    Ecs,
    Eks,
    Node,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] =
        [ShapeKind::Container, ShapeKind::Ecs, ShapeKind::Eks, ShapeKind::Node];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Container => ContainerProperties::NAME,
            ShapeKind::Ecs => EcsProperties::NAME,
            ShapeKind::Eks => EksProperties::NAME,
            ShapeKind::Node => NodeProperties::NAME,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape {0:?}, expected one of container, ecs, eks, node")]
pub struct UnknownShape(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "container" => Ok(ShapeKind::Container),
            "ecs" => Ok(ShapeKind::Ecs),
            "eks" => Ok(ShapeKind::Eks),
            "node" => Ok(ShapeKind::Node),
            other => Err(UnknownShape(other.to_string())),
        }
    }
}

/// A `name`/`value` pair, as used by container environments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl KeyValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: Some(name.into()), value: Some(value.into()) }
    }
}

pub(crate) trait Empty {
    fn is_empty(&self) -> bool;
}

impl<T> Empty for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<K, V> Empty for BTreeMap<K, V> {
    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

/// Treats an empty collection as absent.
pub(crate) fn none_if_empty<T: Empty>(field: &mut Option<T>) {
    if field.as_ref().is_some_and(Empty::is_empty) {
        *field = None;
    }
}

/// Sorts by `name`, stable and byte-ordered, entries without a name first.
pub(crate) fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> Option<&str>) {
    items.sort_by(|a, b| name(a).cmp(&name(b)));
}

/// Drops entries with no value, sorts the rest by name, and treats an
/// environment left empty as absent.
pub(crate) fn reduce_environment(environment: &mut Option<Vec<KeyValuePair>>) {
    if let Some(env) = environment {
        env.retain(|kv| kv.value.as_deref().is_some_and(|v| !v.is_empty()));
        sort_by_name(env, |kv| kv.name.as_deref());
    }
    none_if_empty(environment);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_kind_parses_and_displays() {
        for kind in ShapeKind::ALL {
            let name = match kind {
                ShapeKind::Container => "container",
                ShapeKind::Ecs => "ecs",
                ShapeKind::Eks => "eks",
                ShapeKind::Node => "node",
            };
            assert_eq!(name.parse::<ShapeKind>().unwrap(), kind);
        }
        assert_eq!(ShapeKind::Container.to_string(), "container properties");
        assert!("pod".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn none_if_empty_only_clears_empty() {
        let mut empty: Option<Vec<u8>> = Some(vec![]);
        let mut full = Some(vec![1u8]);
        let mut map: Option<BTreeMap<String, String>> = Some(BTreeMap::new());
        none_if_empty(&mut empty);
        none_if_empty(&mut full);
        none_if_empty(&mut map);
        assert_eq!(empty, None);
        assert_eq!(full, Some(vec![1]));
        assert_eq!(map, None);
    }

    #[test]
    fn environment_is_filtered_and_sorted() {
        let mut env = Some(vec![
            KeyValuePair::new("b", "2"),
            KeyValuePair::new("empty", ""),
            KeyValuePair { name: Some("none".into()), value: None },
            KeyValuePair::new("B", "3"),
            KeyValuePair::new("a", "1"),
        ]);
        reduce_environment(&mut env);
        let names: Vec<&str> =
            env.as_ref().unwrap().iter().map(|kv| kv.name.as_deref().unwrap()).collect();
        assert_eq!(names, ["B", "a", "b"]);

        let mut only_empty = Some(vec![KeyValuePair::new("x", "")]);
        reduce_environment(&mut only_empty);
        assert_eq!(only_empty, None);
    }

    #[test]
    fn sort_by_name_is_stable() {
        let mut items = vec![("b", 1), ("a", 2), ("b", 0), ("a", 1)];
        sort_by_name(&mut items, |item| Some(item.0));
        assert_eq!(items, [("a", 2), ("a", 1), ("b", 1), ("b", 0)]);
    }
}
