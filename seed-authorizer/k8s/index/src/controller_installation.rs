use crate::{
    graph::{Ownership, Relations},
    named, Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{ControllerInstallation, ResourceExt};

impl kubert::index::IndexClusterResource<ControllerInstallation> for Index {
    fn apply(&mut self, installation: ControllerInstallation) {
        let vertex = Vertex::cluster(
            VertexKind::ControllerInstallation,
            installation.name_unchecked(),
        );
        let mut relations = Relations::new(vertex, Ownership::Vertex);

        let spec = &installation.spec;
        if let Some(seed) = named(spec.seed_ref.name.as_deref()) {
            relations.to(Vertex::seed(seed));
        }
        if let Some(registration) = named(spec.registration_ref.name.as_deref()) {
            relations.from(Vertex::cluster(
                VertexKind::ControllerRegistration,
                registration,
            ));
        }
        if let Some(deployment) = named(
            spec.deployment_ref
                .as_ref()
                .and_then(|r| r.name.as_deref()),
        ) {
            relations.from(Vertex::cluster(VertexKind::ControllerDeployment, deployment));
        }

        self.update_vertex(relations);
    }

    fn delete(&mut self, name: String) {
        self.remove_vertex(Vertex::cluster(VertexKind::ControllerInstallation, name));
    }
}
