use crate::{
    graph::{EdgeClass, Ownership, Relations},
    named, secret_vertex, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{BackupBucket, ResourceExt};

/// Entries point at their bucket, so a bucket only replaces its secrets and its seed.
static OWNED: &[EdgeClass] = &[
    EdgeClass::From(VertexKind::Secret),
    EdgeClass::To(VertexKind::Seed),
];

impl kubert::index::IndexClusterResource<BackupBucket> for Index {
    fn apply(&mut self, bucket: BackupBucket) {
        let vertex = Vertex::cluster(VertexKind::BackupBucket, bucket.name_unchecked());
        let mut relations = Relations::new(vertex, Ownership::Edges(OWNED));

        // Bucket credentials always carry a namespace.
        if let Some(secret) = secret_vertex(&bucket.spec.secret_ref, "") {
            relations.from(secret);
        }
        if let Some(secret) = bucket
            .status
            .as_ref()
            .and_then(|s| s.generated_secret_ref.as_ref())
            .and_then(|r| secret_vertex(r, ""))
        {
            relations.from(secret);
        }
        if let Some(seed) = named(bucket.spec.seed_name.as_deref()) {
            relations.to(Vertex::seed(seed));
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, name: String) {
        self.remove_vertex(Vertex::cluster(VertexKind::BackupBucket, name));
    }
}
