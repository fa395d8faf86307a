//! Container properties of a single-node job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{none_if_empty, reduce_environment, KeyValuePair, Shape};

/// Platform version the service assumes when none is given.
pub const DEFAULT_PLATFORM_VERSION: &str = "LATEST";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_execute_command: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<KeyValuePair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephemeral_storage: Option<EphemeralStorage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fargate_platform_configuration: Option<FargatePlatformConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_parameters: Option<LinuxParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_points: Option<Vec<MountPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly_root_filesystem: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_credentials: Option<RepositoryCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_requirements: Option<Vec<ResourceRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_platform: Option<RuntimePlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<Secret>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ulimits: Option<Vec<Ulimit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcpus: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<Volume>>,
}

impl Shape for ContainerProperties {
    const NAME: &'static str = "container properties";

    fn reduce(&mut self) {
        reduce_environment(&mut self.environment);
        none_if_empty(&mut self.command);
        none_if_empty(&mut self.mount_points);
        none_if_empty(&mut self.resource_requirements);
        none_if_empty(&mut self.secrets);
        none_if_empty(&mut self.ulimits);
        none_if_empty(&mut self.volumes);

        if self
            .fargate_platform_configuration
            .as_ref()
            .is_some_and(FargatePlatformConfiguration::is_default)
        {
            self.fargate_platform_configuration = None;
        }
        if let Some(linux) = &mut self.linux_parameters {
            linux.reduce();
        }
        if let Some(log) = &mut self.log_configuration {
            log.reduce();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralStorage {
    #[serde(rename = "sizeInGiB", skip_serializing_if = "Option::is_none")]
    pub size_in_gib: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FargatePlatformConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
}

impl FargatePlatformConfiguration {
    fn is_default(&self) -> bool {
        self.platform_version.as_deref() == Some(DEFAULT_PLATFORM_VERSION)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<Device>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_process_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_swap: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_memory_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swappiness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmpfs: Option<Vec<Tmpfs>>,
}

impl LinuxParameters {
    pub(crate) fn reduce(&mut self) {
        for device in self.devices.iter_mut().flatten() {
            none_if_empty(&mut device.permissions);
        }
        for tmpfs in self.tmpfs.iter_mut().flatten() {
            none_if_empty(&mut tmpfs.mount_options);
        }
        none_if_empty(&mut self.devices);
        none_if_empty(&mut self.tmpfs);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tmpfs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_options: Option<Vec<Secret>>,
}

impl LogConfiguration {
    pub(crate) fn reduce(&mut self) {
        none_if_empty(&mut self.options);
        none_if_empty(&mut self.secret_options);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_volume: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_public_ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_parameter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimePlatform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_from: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ulimit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_limit: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efs_volume_configuration: Option<EfsVolumeConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Host>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfsVolumeConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_config: Option<EfsAuthorizationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_system_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_encryption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_encryption_port: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfsAuthorizationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_point_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> ContainerProperties {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_wire_names() {
        let props = decode(json!({
            "image": "busybox",
            "vcpus": 1,
            "ephemeralStorage": {"sizeInGiB": 30},
            "resourceRequirements": [{"type": "MEMORY", "value": "512"}],
            "readonlyRootFilesystem": true,
            "unknownField": [1, 2],
        }));
        assert_eq!(props.image.as_deref(), Some("busybox"));
        assert_eq!(props.ephemeral_storage.unwrap().size_in_gib, Some(30));
        assert_eq!(props.resource_requirements.unwrap()[0].kind.as_deref(), Some("MEMORY"));
        assert_eq!(props.readonly_root_filesystem, Some(true));
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(serde_json::from_value::<ContainerProperties>(json!({"vcpus": "one"})).is_err());
        assert!(serde_json::from_value::<ContainerProperties>(json!({"command": "ls"})).is_err());
    }

    #[test]
    fn serializes_in_alphabetical_wire_order() {
        let props = ContainerProperties {
            vcpus: Some(2),
            image: Some("x".into()),
            command: Some(vec!["ls".into()]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&props).unwrap(),
            r#"{"command":["ls"],"image":"x","vcpus":2}"#
        );
    }

    #[test]
    fn reduce_prunes_empty_collections() {
        let mut props = decode(json!({
            "command": [],
            "environment": [],
            "mountPoints": [],
            "resourceRequirements": [],
            "secrets": [],
            "ulimits": [],
            "volumes": [],
            "image": "busybox",
        }));
        props.reduce();
        assert_eq!(
            props,
            ContainerProperties { image: Some("busybox".into()), ..Default::default() }
        );
    }

    #[test]
    fn reduce_drops_default_platform_version_only() {
        let mut latest =
            decode(json!({"fargatePlatformConfiguration": {"platformVersion": "LATEST"}}));
        latest.reduce();
        assert_eq!(latest.fargate_platform_configuration, None);

        let mut pinned =
            decode(json!({"fargatePlatformConfiguration": {"platformVersion": "1.4.0"}}));
        pinned.reduce();
        assert_eq!(
            pinned.fargate_platform_configuration.unwrap().platform_version.as_deref(),
            Some("1.4.0")
        );
    }

    #[test]
    fn reduce_nested_linux_and_log_configuration() {
        let mut props = decode(json!({
            "linuxParameters": {
                "devices": [{"hostPath": "/dev/xvdc", "permissions": []}],
                "tmpfs": [],
                "sharedMemorySize": 64,
            },
            "logConfiguration": {"logDriver": "awslogs", "options": {}, "secretOptions": []},
        }));
        props.reduce();
        let linux = props.linux_parameters.unwrap();
        assert_eq!(linux.tmpfs, None);
        assert_eq!(linux.devices.unwrap()[0].permissions, None);
        let log = props.log_configuration.unwrap();
        assert_eq!(log.options, None);
        assert_eq!(log.secret_options, None);
        assert_eq!(log.log_driver.as_deref(), Some("awslogs"));
    }

    #[test]
    fn reduce_keeps_command_order() {
        let mut props = decode(json!({"command": ["b", "a"]}));
        props.reduce();
        assert_eq!(props.command.unwrap(), ["b", "a"]);
    }
}
