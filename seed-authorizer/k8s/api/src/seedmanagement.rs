//! Resources in the `seedmanagement.gardener.cloud/v1alpha1` API.

use crate::garden::SeedSpec;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Registers an existing shoot as a seed.
#[derive(Clone, Debug, Default, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "seedmanagement.gardener.cloud",
    version = "v1alpha1",
    kind = "ManagedSeed",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ManagedSeedSpec {
    /// The shoot, in the managed seed's namespace, that is registered as a seed.
    pub shoot: Option<ShootRef>,

    pub seed_template: Option<SeedTemplate>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ShootRef {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SeedTemplate {
    #[serde(default)]
    pub spec: SeedSpec,
}
