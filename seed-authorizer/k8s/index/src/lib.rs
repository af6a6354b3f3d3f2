//! Gardener seed dependency graph
//!
//! The index watches Gardener resources and records, for each object, the objects it is related
//! to. A seed is permitted to act on an object when a path leads from the object's vertex to the
//! seed's vertex:
//!
//! ```text
//! [ Secret ] -> [ SecretBinding ] -> [ Shoot ] -> [ Seed ]
//!                                       ^
//!                  [ BackupEntry ] -----+----> [ BackupBucket ] -> [ Seed ]
//! ```
//!
//! Each watched kind has a handler that derives the object's edges from its current state. Kinds
//! that other objects point at (e.g. `Seed`, `Shoot`) only replace the edges they derive
//! themselves, so that edges derived from other objects survive their updates.
//!
//! The graph is guarded by its own lock, separate from the lock `kubert` holds while it dispatches
//! watch events, so that lookups are never blocked behind the processing of an unrelated event.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod backup_bucket;
mod backup_entry;
mod controller_installation;
pub mod graph;
mod lookup;
mod managed_seed;
pub mod metrics;
mod project;
mod referenced;
mod secret_binding;
mod seed;
mod shoot;

#[cfg(test)]
mod tests;

pub use self::{
    graph::{Graph, SharedGraph},
    lookup::Reader,
    metrics::GraphMetrics,
};
use self::{graph::Relations, metrics::Operation};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use prometheus_client::registry::Registry;
use seed_authorizer_core::{Vertex, VertexKind};
use seed_authorizer_k8s_api::SecretReference;
use std::sync::Arc;
use tokio::time;

pub type SharedIndex = Arc<RwLock<Index>>;

/// Applies watch events to the dependency graph.
///
/// Implements `kubert`'s index traits for every watched Gardener kind.
#[derive(Debug)]
pub struct Index {
    graph: SharedGraph,
    metrics: GraphMetrics,
}

// === impl Index ===

impl Index {
    /// Creates an empty graph, registering its metrics, and returns a read handle along with the
    /// index that updates it.
    pub fn new(prom: &mut Registry) -> (Reader, SharedIndex) {
        let graph = Graph::shared();
        let metrics = GraphMetrics::register(prom);
        metrics::register(prom, graph.clone());

        let reader = Reader::new(graph.clone(), metrics.clone());
        let index = Self { graph, metrics };
        (reader, Arc::new(RwLock::new(index)))
    }

    /// Replaces the edges an object derives with those described by `relations`.
    ///
    /// The graph is only locked for writing when the edges actually changed, so that resyncs of
    /// unchanged objects do not block lookups.
    fn update_vertex(&self, relations: Relations) {
        let start = time::Instant::now();
        let kind = relations.vertex().kind;

        let graph = self.graph.upgradable_read();
        if graph.is_current(&relations) {
            tracing::trace!(vertex = %relations.vertex(), "Unchanged");
        } else {
            let mut graph = RwLockUpgradableReadGuard::upgrade(graph);
            graph.replace(&relations);
            tracing::debug!(
                vertex = %relations.vertex(),
                edges = relations.edge_count(),
                "Updated"
            );
        }

        self.metrics
            .observe_update(kind, Operation::CreateOrUpdate, start);
    }

    /// Removes an object's vertex along with every edge touching it.
    fn remove_vertex(&self, vertex: Vertex) {
        let start = time::Instant::now();

        if self.graph.write().delete_vertex(&vertex) {
            tracing::debug!(%vertex, "Deleted");
        } else {
            tracing::trace!(%vertex, "Not found");
        }

        self.metrics
            .observe_update(vertex.kind, Operation::Delete, start);
    }
}

/// Builds the vertex of a referenced secret. The namespace defaults to `namespace` when the
/// reference omits it.
fn secret_vertex(secret_ref: &SecretReference, namespace: &str) -> Option<Vertex> {
    let name = secret_ref.name.as_deref().filter(|n| !n.is_empty())?;
    let namespace = secret_ref
        .namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
        .unwrap_or(namespace);
    Some(Vertex::new(VertexKind::Secret, namespace, name))
}

/// Treats empty references as absent.
fn named(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}
