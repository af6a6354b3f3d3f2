use crate::{
    graph::{EdgeClass, Ownership, Relations},
    named, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{ResourceExt, Shoot};

/// Backup entries and managed seeds point at shoots, so a shoot only replaces the edges derived
/// from its own spec and status.
static OWNED: &[EdgeClass] = &[
    EdgeClass::From(VertexKind::Namespace),
    EdgeClass::From(VertexKind::CloudProfile),
    EdgeClass::From(VertexKind::SecretBinding),
    EdgeClass::From(VertexKind::ShootState),
    EdgeClass::From(VertexKind::Secret),
    EdgeClass::From(VertexKind::ConfigMap),
    EdgeClass::To(VertexKind::Seed),
];

impl kubert::index::IndexNamespacedResource<Shoot> for Index {
    fn apply(&mut self, shoot: Shoot) {
        let namespace = shoot.namespace().unwrap_or_default();
        let name = shoot.name_unchecked();
        let mut relations = Relations::new(
            Vertex::new(VertexKind::Shoot, &namespace, &name),
            Ownership::Edges(OWNED),
        );

        let spec = &shoot.spec;

        // While a control plane migrates, both the source and the destination seed need access.
        let status_seed = shoot.status.as_ref().and_then(|s| s.seed_name.as_deref());
        for seed in [spec.seed_name.as_deref(), status_seed]
            .into_iter()
            .filter_map(named)
        {
            relations.to(Vertex::seed(seed));
        }

        relations
            .from(Vertex::cluster(VertexKind::Namespace, &namespace))
            .from(Vertex::new(VertexKind::ShootState, &namespace, &name));
        if let Some(profile) = named(spec.cloud_profile_name.as_deref()) {
            relations.from(Vertex::cluster(VertexKind::CloudProfile, profile));
        }
        if let Some(binding) = named(spec.secret_binding_name.as_deref()) {
            relations.from(Vertex::new(VertexKind::SecretBinding, &namespace, binding));
        }

        let secrets = spec
            .dns_secret_names()
            .chain(spec.resource_names("Secret"));
        for secret in secrets.filter(|n| !n.is_empty()) {
            relations.from(Vertex::new(VertexKind::Secret, &namespace, secret));
        }

        let config_maps = spec
            .resource_names("ConfigMap")
            .chain(spec.audit_policy_config_map());
        for config_map in config_maps.filter(|n| !n.is_empty()) {
            relations.from(Vertex::new(VertexKind::ConfigMap, &namespace, config_map));
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, namespace: String, name: String) {
        self.remove_vertex(Vertex::new(VertexKind::Shoot, namespace, name));
    }
}
