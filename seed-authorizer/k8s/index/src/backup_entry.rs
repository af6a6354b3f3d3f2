use crate::{
    graph::{Ownership, Relations},
    named, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{garden, BackupEntry, Resource, ResourceExt, Shoot};

impl kubert::index::IndexNamespacedResource<BackupEntry> for Index {
    fn apply(&mut self, entry: BackupEntry) {
        let namespace = entry.namespace().unwrap_or_default();
        let vertex = Vertex::new(VertexKind::BackupEntry, &namespace, entry.name_unchecked());
        let mut relations = Relations::new(vertex, Ownership::Vertex);

        if !entry.spec.bucket_name.is_empty() {
            relations.to(Vertex::cluster(
                VertexKind::BackupBucket,
                &entry.spec.bucket_name,
            ));
        }
        if let Some(seed) = named(entry.spec.seed_name.as_deref()) {
            relations.to(Vertex::seed(seed));
        }
        for owner in entry.owner_references() {
            if is_shoot(&owner.api_version, &owner.kind) && !owner.name.is_empty() {
                relations.from(Vertex::new(VertexKind::Shoot, &namespace, &owner.name));
            }
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, namespace: String, name: String) {
        self.remove_vertex(Vertex::new(VertexKind::BackupEntry, namespace, name));
    }
}

fn is_shoot(api_version: &str, kind: &str) -> bool {
    kind == Shoot::kind(&()) && api_version.split('/').next() == Some(garden::GROUP)
}
