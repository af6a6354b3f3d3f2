use crate::{graph::SharedGraph, metrics::GraphMetrics};
use seed_authorizer_core::{Reachability, Vertex};
use tokio::time;

/// A read handle to the dependency graph, used by the authorizer.
#[derive(Clone, Debug)]
pub struct Reader {
    graph: SharedGraph,
    metrics: GraphMetrics,
}

// === impl Reader ===

impl Reader {
    pub(crate) fn new(graph: SharedGraph, metrics: GraphMetrics) -> Self {
        Self { graph, metrics }
    }

    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }
}

impl Reachability for Reader {
    fn has_path_from(&self, from: &Vertex, to: &Vertex) -> bool {
        let start = time::Instant::now();
        let found = self.graph.read().has_path_from(from, to);
        self.metrics.observe_path_check(from.kind, to.kind, start);
        found
    }
}
