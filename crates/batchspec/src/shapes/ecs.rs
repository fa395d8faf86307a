//! ECS properties: one or more tasks, each running a list of containers.

use serde::{Deserialize, Serialize};

use super::container::{
    EphemeralStorage, LinuxParameters, LogConfiguration, MountPoint, NetworkConfiguration,
    RepositoryCredentials, ResourceRequirement, RuntimePlatform, Secret, Ulimit, Volume,
};
use super::{none_if_empty, reduce_environment, KeyValuePair, Shape};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_properties: Option<Vec<EcsTaskProperties>>,
}

impl Shape for EcsProperties {
    const NAME: &'static str = "ECS properties";

    fn reduce(&mut self) {
        for task in self.task_properties.iter_mut().flatten() {
            task.reduce();
        }
        none_if_empty(&mut self.task_properties);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsTaskProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<TaskContainerProperties>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_execute_command: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephemeral_storage: Option<EphemeralStorage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipc_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_platform: Option<RuntimePlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<Volume>>,
}

impl EcsTaskProperties {
    fn reduce(&mut self) {
        for container in self.containers.iter_mut().flatten() {
            container.reduce();
        }
        none_if_empty(&mut self.containers);
        none_if_empty(&mut self.volumes);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContainerProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<TaskContainerDependency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<KeyValuePair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_parameters: Option<LinuxParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_points: Option<Vec<MountPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly_root_filesystem: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_credentials: Option<RepositoryCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_requirements: Option<Vec<ResourceRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<Secret>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ulimits: Option<Vec<Ulimit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl TaskContainerProperties {
    fn reduce(&mut self) {
        reduce_environment(&mut self.environment);
        none_if_empty(&mut self.command);
        none_if_empty(&mut self.depends_on);
        none_if_empty(&mut self.mount_points);
        none_if_empty(&mut self.resource_requirements);
        none_if_empty(&mut self.secrets);
        none_if_empty(&mut self.ulimits);
        if let Some(linux) = &mut self.linux_parameters {
            linux.reduce();
        }
        if let Some(log) = &mut self.log_configuration {
            log.reduce();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContainerDependency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reduce_each_task_container() {
        let mut props: EcsProperties = serde_json::from_value(json!({
            "taskProperties": [{
                "containers": [{
                    "name": "main",
                    "image": "busybox",
                    "command": [],
                    "dependsOn": [],
                    "environment": [{"name": "Z", "value": "1"}, {"name": "A", "value": "2"}],
                    "logConfiguration": {"logDriver": "awslogs", "options": {}},
                }],
                "volumes": [],
            }],
        }))
        .unwrap();
        props.reduce();
        let task = &props.task_properties.as_ref().unwrap()[0];
        assert_eq!(task.volumes, None);
        let container = &task.containers.as_ref().unwrap()[0];
        assert_eq!(container.command, None);
        assert_eq!(container.depends_on, None);
        let names: Vec<_> =
            container.environment.iter().flatten().map(|kv| kv.name.clone().unwrap()).collect();
        assert_eq!(names, ["A", "Z"]);
        assert_eq!(container.log_configuration.as_ref().unwrap().options, None);
    }

    #[test]
    fn reduce_prunes_empty_container_list() {
        let mut props: EcsProperties = serde_json::from_value(json!({
            "taskProperties": [{"containers": [], "platformVersion": "LATEST"}],
        }))
        .unwrap();
        props.reduce();
        let task = &props.task_properties.unwrap()[0];
        assert_eq!(task.containers, None);
        assert_eq!(task.platform_version.as_deref(), Some("LATEST"));
    }

    #[test]
    fn empty_task_list_is_absent() {
        let mut props: EcsProperties =
            serde_json::from_value(json!({"taskProperties": []})).unwrap();
        props.reduce();
        assert_eq!(props, EcsProperties::default());
    }

    #[test]
    fn task_order_is_kept() {
        let mut props: EcsProperties = serde_json::from_value(json!({
            "taskProperties": [{"taskRoleArn": "b"}, {"taskRoleArn": "a"}],
        }))
        .unwrap();
        props.reduce();
        let arns: Vec<_> =
            props.task_properties.unwrap().into_iter().map(|t| t.task_role_arn.unwrap()).collect();
        assert_eq!(arns, ["b", "a"]);
    }
}
