//! Node properties of a multi-node parallel job.

use serde::{Deserialize, Serialize};

use super::{none_if_empty, ContainerProperties, EcsProperties, EksProperties, Shape};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_node: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_range_properties: Option<Vec<NodeRangeProperty>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_nodes: Option<i64>,
}

impl Shape for NodeProperties {
    const NAME: &'static str = "node properties";

    fn reduce(&mut self) {
        for range in self.node_range_properties.iter_mut().flatten() {
            range.reduce();
        }
        none_if_empty(&mut self.node_range_properties);
    }
}

/// Properties applied to the nodes selected by `target_nodes` (`0:3`, `4:`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRangeProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs_properties: Option<EcsProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eks_properties: Option<EksProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_nodes: Option<String>,
}

impl NodeRangeProperty {
    fn reduce(&mut self) {
        if let Some(container) = &mut self.container {
            container.reduce();
        }
        if let Some(ecs) = &mut self.ecs_properties {
            ecs.reduce();
        }
        if let Some(eks) = &mut self.eks_properties {
            eks.reduce();
        }
        none_if_empty(&mut self.instance_types);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reduce_recurses_into_every_range() {
        let mut props: NodeProperties = serde_json::from_value(json!({
            "mainNode": 0,
            "numNodes": 2,
            "nodeRangeProperties": [
                {
                    "targetNodes": "0:",
                    "instanceTypes": [],
                    "container": {
                        "image": "busybox",
                        "environment": [{"name": "B", "value": "2"}, {"name": "A", "value": "1"}],
                        "mountPoints": [],
                    },
                },
                {
                    "targetNodes": "1:",
                    "eksProperties": {"podProperties": {"containers": [{"name": "c", "args": []}]}},
                    "ecsProperties": {"taskProperties": [{"containers": [], "volumes": []}]},
                },
            ],
        }))
        .unwrap();
        props.reduce();

        let ranges = props.node_range_properties.unwrap();
        assert_eq!(ranges[0].instance_types, None);
        let container = ranges[0].container.as_ref().unwrap();
        assert_eq!(container.mount_points, None);
        assert_eq!(container.environment.as_ref().unwrap()[0].name.as_deref(), Some("A"));

        let pod = ranges[1].eks_properties.as_ref().unwrap().pod_properties.as_ref().unwrap();
        assert_eq!(pod.containers.as_ref().unwrap()[0].args, None);
        let task = &ranges[1].ecs_properties.as_ref().unwrap().task_properties.as_ref().unwrap()[0];
        assert_eq!(task.containers, None);
        assert_eq!(task.volumes, None);
    }

    #[test]
    fn empty_range_list_is_absent() {
        let mut props: NodeProperties =
            serde_json::from_value(json!({"numNodes": 1, "nodeRangeProperties": []})).unwrap();
        props.reduce();
        assert_eq!(props, NodeProperties { num_nodes: Some(1), ..Default::default() });
    }
}
