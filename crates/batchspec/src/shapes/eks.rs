//! EKS properties: a Kubernetes pod specification.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{none_if_empty, sort_by_name, KeyValuePair, Shape};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_properties: Option<EksPodProperties>,
}

impl Shape for EksProperties {
    const NAME: &'static str = "EKS properties";

    fn reduce(&mut self) {
        if let Some(pod) = &mut self.pod_properties {
            pod.reduce();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksPodProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<EksContainer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_secrets: Option<Vec<ImagePullSecret>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_containers: Option<Vec<EksContainer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EksMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_process_namespace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<EksVolume>>,
}

impl EksPodProperties {
    fn reduce(&mut self) {
        if let Some(containers) = &mut self.containers {
            containers.iter_mut().for_each(EksContainer::reduce);
            sort_by_name(containers, |c| c.name.as_deref());
        }
        // Init containers run one after another; their order is significant.
        for container in self.init_containers.iter_mut().flatten() {
            container.reduce();
        }
        none_if_empty(&mut self.containers);
        none_if_empty(&mut self.init_containers);
        none_if_empty(&mut self.image_pull_secrets);
        none_if_empty(&mut self.volumes);

        if let Some(metadata) = &mut self.metadata {
            metadata.reduce();
        }
        if self.metadata.as_ref().is_some_and(EksMetadata::is_empty) {
            self.metadata = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<KeyValuePair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<EksResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_context: Option<EksSecurityContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_mounts: Option<Vec<EksVolumeMount>>,
}

impl EksContainer {
    fn reduce(&mut self) {
        none_if_empty(&mut self.args);
        none_if_empty(&mut self.command);
        if let Some(env) = &mut self.env {
            sort_by_name(env, |kv| kv.name.as_deref());
        }
        none_if_empty(&mut self.env);
        none_if_empty(&mut self.volume_mounts);

        if let Some(resources) = &mut self.resources {
            none_if_empty(&mut resources.limits);
            none_if_empty(&mut resources.requests);
        }
        if self.resources.as_ref().is_some_and(EksResources::is_empty) {
            self.resources = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EksResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<BTreeMap<String, String>>,
}

impl EksResources {
    fn is_empty(&self) -> bool {
        self.limits.is_none() && self.requests.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksSecurityContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_root_filesystem: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_as_group: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_as_non_root: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_as_user: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksVolumeMount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePullSecret {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EksMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl EksMetadata {
    fn reduce(&mut self) {
        none_if_empty(&mut self.annotations);
        none_if_empty(&mut self.labels);
    }

    fn is_empty(&self) -> bool {
        self.annotations.is_none() && self.labels.is_none() && self.namespace.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksVolume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<EksEmptyDir>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_path: Option<EksHostPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<EksSecret>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksEmptyDir {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EksHostPath {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksSecret {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}
