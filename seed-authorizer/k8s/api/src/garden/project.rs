use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "Project",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    /// The namespace that holds the project's shoots.
    pub namespace: Option<String>,
}
