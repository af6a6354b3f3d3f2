use crate::{
    graph::{EdgeClass, Ownership, Relations},
    secret_vertex, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{garden::seed, ResourceExt, Seed};

/// Every other kind points at seeds, so a seed only replaces the objects it grants access to.
static OWNED: &[EdgeClass] = &[
    EdgeClass::From(VertexKind::Namespace),
    EdgeClass::From(VertexKind::Lease),
    EdgeClass::From(VertexKind::Secret),
];

impl kubert::index::IndexClusterResource<Seed> for Index {
    fn apply(&mut self, obj: Seed) {
        let name = obj.name_unchecked();
        let mut relations = Relations::new(Vertex::seed(&name), Ownership::Edges(OWNED));

        relations
            .from(Vertex::cluster(
                VertexKind::Namespace,
                seed::garden_namespace(&name),
            ))
            .from(Vertex::new(
                VertexKind::Lease,
                seed::SEED_LEASE_NAMESPACE,
                &name,
            ));
        for secret in obj.spec.secret_refs().filter_map(|r| secret_vertex(r, "")) {
            relations.from(secret);
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, name: String) {
        self.remove_vertex(Vertex::seed(name));
    }
}
