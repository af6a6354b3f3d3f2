use k8s_openapi::api::core::v1::SecretReference;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// The namespace that holds the seed lease of every seed.
pub const SEED_LEASE_NAMESPACE: &str = "gardener-system-seed-lease";

/// A cluster that hosts the control planes of shoots.
#[derive(Clone, Debug, Default, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "Seed",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct SeedSpec {
    pub backup: Option<SeedBackup>,

    /// Credentials for the seed cluster itself.
    pub secret_ref: Option<SecretReference>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBackup {
    pub secret_ref: SecretReference,
}

/// Returns the name of the namespace in the garden cluster that belongs to the named seed.
pub fn garden_namespace(seed: &str) -> String {
    format!("seed-{seed}")
}

// === impl SeedSpec ===

impl SeedSpec {
    /// Iterates over all secrets referenced by the seed spec.
    pub fn secret_refs(&self) -> impl Iterator<Item = &SecretReference> {
        self.secret_ref
            .iter()
            .chain(self.backup.iter().map(|b| &b.secret_ref))
    }
}
