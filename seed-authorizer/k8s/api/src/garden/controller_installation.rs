use k8s_openapi::api::core::v1::ObjectReference;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Deploys a `ControllerRegistration`'s extension into a seed.
#[derive(Clone, Debug, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "ControllerInstallation",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ControllerInstallationSpec {
    pub registration_ref: ObjectReference,
    pub seed_ref: ObjectReference,
    pub deployment_ref: Option<ObjectReference>,
}
