use crate::{
    graph::{EdgeClass, Ownership, Relations},
    named, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{Project, ResourceExt};

static OWNED: &[EdgeClass] = &[EdgeClass::To(VertexKind::Namespace)];

impl kubert::index::IndexClusterResource<Project> for Index {
    fn apply(&mut self, project: Project) {
        let vertex = Vertex::cluster(VertexKind::Project, project.name_unchecked());
        let mut relations = Relations::new(vertex, Ownership::Edges(OWNED));

        if let Some(ns) = named(project.spec.namespace.as_deref()) {
            relations.to(Vertex::cluster(VertexKind::Namespace, ns));
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, name: String) {
        self.remove_vertex(Vertex::cluster(VertexKind::Project, name));
    }
}
