//! Kinds that derive no edges of their own. Their vertices exist so that the objects referring to
//! them can be related to seeds; they are removed along with their objects.

use crate::{
    graph::{Ownership, Relations},
    Index,
};
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::{CloudProfile, ControllerRegistration, ResourceExt};

impl kubert::index::IndexClusterResource<CloudProfile> for Index {
    fn apply(&mut self, profile: CloudProfile) {
        let vertex = Vertex::cluster(VertexKind::CloudProfile, profile.name_unchecked());
        self.update_vertex(Relations::new(vertex, Ownership::Edges(&[])));
    }

    fn delete(&mut self, name: String) {
        self.remove_vertex(Vertex::cluster(VertexKind::CloudProfile, name));
    }
}

impl kubert::index::IndexClusterResource<ControllerRegistration> for Index {
    fn apply(&mut self, registration: ControllerRegistration) {
        let vertex = Vertex::cluster(
            VertexKind::ControllerRegistration,
            registration.name_unchecked(),
        );
        self.update_vertex(Relations::new(vertex, Ownership::Edges(&[])));
    }

    fn delete(&mut self, name: String) {
        self.remove_vertex(Vertex::cluster(VertexKind::ControllerRegistration, name));
    }
}
