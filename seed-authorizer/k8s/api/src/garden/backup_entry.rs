use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// A shoot's backup location within a `BackupBucket`.
///
/// Backup entries are owned by their shoot through an owner reference.
#[derive(Clone, Debug, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "BackupEntry",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntrySpec {
    pub bucket_name: String,
    pub seed_name: Option<String>,
}
