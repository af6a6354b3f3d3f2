use crate::{
    graph::{Ownership, Relations},
    named, secret_vertex, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{ManagedSeed, ResourceExt};

impl kubert::index::IndexNamespacedResource<ManagedSeed> for Index {
    fn apply(&mut self, managed_seed: ManagedSeed) {
        let namespace = managed_seed.namespace().unwrap_or_default();
        let vertex = Vertex::new(
            VertexKind::ManagedSeed,
            &namespace,
            managed_seed.name_unchecked(),
        );
        let mut relations = Relations::new(vertex, Ownership::Vertex);

        let spec = &managed_seed.spec;
        if let Some(shoot) = named(spec.shoot.as_ref().map(|s| s.name.as_str())) {
            relations.to(Vertex::new(VertexKind::Shoot, &namespace, shoot));
        }
        if let Some(template) = spec.seed_template.as_ref() {
            for secret in template
                .spec
                .secret_refs()
                .filter_map(|r| secret_vertex(r, &namespace))
            {
                relations.from(secret);
            }
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, namespace: String, name: String) {
        self.remove_vertex(Vertex::new(VertexKind::ManagedSeed, namespace, name));
    }
}
