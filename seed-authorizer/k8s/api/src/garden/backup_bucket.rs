use k8s_openapi::api::core::v1::SecretReference;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// An object-storage bucket that holds the backups of the shoots on a seed.
#[derive(Clone, Debug, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "BackupBucket",
    status = "BackupBucketStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct BackupBucketSpec {
    /// The credentials used to access the bucket.
    pub secret_ref: SecretReference,

    /// The seed the bucket is assigned to.
    pub seed_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupBucketStatus {
    /// Credentials generated by the provider extension, if any.
    pub generated_secret_ref: Option<SecretReference>,
}
