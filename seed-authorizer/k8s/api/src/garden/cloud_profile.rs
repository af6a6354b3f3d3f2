use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, CustomResource, Deserialize, Serialize)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "CloudProfile",
    schema = "disabled"
)]
pub struct CloudProfileSpec {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_provider_config() {
        let profile = serde_json::from_value::<CloudProfile>(serde_json::json!({
            "apiVersion": "core.gardener.cloud/v1beta1",
            "kind": "CloudProfile",
            "metadata": { "name": "aws" },
            "spec": {
                "type": "aws",
                "kubernetes": { "versions": [{ "version": "1.33.0" }] },
                "regions": [{ "name": "eu-west-1" }],
            },
        }))
        .expect("cloud profile must deserialize");
        assert_eq!(profile.metadata.name.as_deref(), Some("aws"));
        assert_eq!(profile.spec, CloudProfileSpec {});
    }
}
