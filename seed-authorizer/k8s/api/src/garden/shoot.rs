use k8s_openapi::api::{autoscaling::v1::CrossVersionObjectReference, core::v1::ObjectReference};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// A managed cluster whose control plane runs on a seed.
#[derive(Clone, Debug, Default, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "Shoot",
    status = "ShootStatus",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ShootSpec {
    pub cloud_profile_name: Option<String>,
    pub dns: Option<Dns>,
    pub kubernetes: Option<Kubernetes>,
    #[serde(default)]
    pub resources: Vec<NamedResourceReference>,
    pub secret_binding_name: Option<String>,

    /// The seed the shoot is scheduled to.
    pub seed_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootStatus {
    /// The seed the shoot's control plane currently runs on. This differs from the spec while a
    /// control plane is migrated between seeds.
    pub seed_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Dns {
    #[serde(default)]
    pub providers: Vec<DnsProvider>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsProvider {
    pub secret_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Kubernetes {
    #[serde(rename = "kubeAPIServer")]
    pub kube_api_server: Option<KubeApiServerConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeApiServerConfig {
    pub audit_config: Option<AuditConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditConfig {
    pub audit_policy: Option<AuditPolicy>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditPolicy {
    pub config_map_ref: Option<ObjectReference>,
}

/// A named reference to an object in the shoot's namespace.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedResourceReference {
    pub name: String,
    pub resource_ref: CrossVersionObjectReference,
}

// === impl ShootSpec ===

impl ShootSpec {
    /// Returns the name of the config map holding the shoot's audit policy, if any.
    pub fn audit_policy_config_map(&self) -> Option<&str> {
        self.kubernetes
            .as_ref()?
            .kube_api_server
            .as_ref()?
            .audit_config
            .as_ref()?
            .audit_policy
            .as_ref()?
            .config_map_ref
            .as_ref()?
            .name
            .as_deref()
    }

    /// Iterates over the secrets referenced by the shoot's DNS providers.
    pub fn dns_secret_names(&self) -> impl Iterator<Item = &str> {
        self.dns
            .iter()
            .flat_map(|dns| dns.providers.iter())
            .filter_map(|p| p.secret_name.as_deref())
    }

    /// Iterates over the names of the objects of the given kind in the shoot's `resources`.
    pub fn resource_names<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.resources
            .iter()
            .filter(move |r| r.resource_ref.kind == kind)
            .map(|r| r.resource_ref.name.as_str())
    }
}
