//! batchspec - structural equivalence of AWS Batch job-definition documents.
//!
//! A configured document and the one the service reports back are decoded
//! into a typed shape, normalized (empty collections dropped, environment
//! lists sorted, service defaults removed), re-encoded and compared as trees.
//!
//! ```
//! use batchspec::equivalent_container_properties_json;
//!
//! let config = r#"{"environment":[{"name":"A","value":"1"},{"name":"B","value":"2"}]}"#;
//! let api = r#"{"environment":[{"name":"B","value":"2"},{"name":"A","value":"1"}],"volumes":[]}"#;
//! assert!(equivalent_container_properties_json(config, api).unwrap());
//! ```

pub mod cli;
pub mod equivalence;
pub mod error;
pub mod shapes;

pub use equivalence::{
    equivalent, equivalent_container_properties_json, equivalent_ecs_properties_json,
    equivalent_eks_properties_json, equivalent_node_properties_json, explain, reduced,
};
pub use error::EquivalenceError;
pub use shapes::{
    ContainerProperties, EcsProperties, EksProperties, KeyValuePair, NodeProperties, Shape,
    ShapeKind,
};
