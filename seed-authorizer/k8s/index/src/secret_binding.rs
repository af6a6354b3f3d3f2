use crate::{
    graph::{EdgeClass, Ownership, Relations},
    secret_vertex, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{ResourceExt, SecretBinding};

/// Shoots point at their binding, so a binding only replaces its secret.
static OWNED: &[EdgeClass] = &[EdgeClass::From(VertexKind::Secret)];

impl kubert::index::IndexNamespacedResource<SecretBinding> for Index {
    fn apply(&mut self, binding: SecretBinding) {
        let namespace = binding.namespace().unwrap_or_default();
        let vertex = Vertex::new(VertexKind::SecretBinding, &namespace, binding.name_unchecked());
        let mut relations = Relations::new(vertex, Ownership::Edges(OWNED));

        if let Some(secret) = secret_vertex(&binding.secret_ref, &namespace) {
            relations.from(secret);
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, namespace: String, name: String) {
        self.remove_vertex(Vertex::new(VertexKind::SecretBinding, namespace, name));
    }
}
