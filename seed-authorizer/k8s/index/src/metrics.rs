use crate::graph::SharedGraph;
use prometheus_client::{
    collector::Collector,
    encoding::{DescriptorEncoder, EncodeLabelSet, EncodeMetric},
    metrics::{
        family::Family,
        gauge::ConstGauge,
        histogram::{exponential_buckets, Histogram},
        MetricType,
    },
    registry::{Registry, Unit},
};
use seed_authorizer_core::VertexKind;
use tokio::time;

/// Observes the latency of graph mutations and path queries.
#[derive(Clone, Debug)]
pub struct GraphMetrics {
    updates: Family<UpdateLabels, Histogram>,
    path_checks: Family<PathCheckLabels, Histogram>,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub(crate) enum Operation {
    CreateOrUpdate,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct UpdateLabels {
    kind: &'static str,
    operation: &'static str,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct PathCheckLabels {
    from_kind: &'static str,
    to_kind: &'static str,
}

/// Reports the size of the graph when scraped.
#[derive(Debug)]
struct Instrumented(SharedGraph);

/// Registers a collector that reports the number of vertices (by kind) and edges in the graph.
pub fn register(reg: &mut Registry, graph: SharedGraph) {
    reg.register_collector(Box::new(Instrumented(graph)));
}

// === impl GraphMetrics ===

impl GraphMetrics {
    pub fn register(reg: &mut Registry) -> Self {
        // Graph mutations are in-memory hash set operations; the buckets range from 10us to ~2.6s.
        let updates = Family::<UpdateLabels, Histogram>::new_with_constructor(|| {
            Histogram::new(exponential_buckets(0.00001, 4.0, 10))
        });
        reg.register_with_unit(
            "graph_update_duration",
            "Histogram of the time spent applying an object's changes to the graph",
            Unit::Seconds,
            updates.clone(),
        );

        let path_checks = Family::<PathCheckLabels, Histogram>::new_with_constructor(|| {
            Histogram::new(exponential_buckets(0.00001, 4.0, 10))
        });
        reg.register_with_unit(
            "graph_path_check_duration",
            "Histogram of the time spent searching the graph for a path between two vertices",
            Unit::Seconds,
            path_checks.clone(),
        );

        Self {
            updates,
            path_checks,
        }
    }

    pub(crate) fn observe_update(&self, kind: VertexKind, op: Operation, start: time::Instant) {
        self.updates
            .get_or_create(&UpdateLabels {
                kind: kind.as_str(),
                operation: op.as_str(),
            })
            .observe(start.elapsed().as_secs_f64());
    }

    pub(crate) fn observe_path_check(
        &self,
        from_kind: VertexKind,
        to_kind: VertexKind,
        start: time::Instant,
    ) {
        self.path_checks
            .get_or_create(&PathCheckLabels {
                from_kind: from_kind.as_str(),
                to_kind: to_kind.as_str(),
            })
            .observe(start.elapsed().as_secs_f64());
    }
}

impl Default for GraphMetrics {
    /// Builds metrics that are not exposed through any registry.
    fn default() -> Self {
        Self::register(&mut Registry::default())
    }
}

// === impl Operation ===

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Self::CreateOrUpdate => "CreateOrUpdate",
            Self::Delete => "Delete",
        }
    }
}

// === impl Instrumented ===

impl Collector for Instrumented {
    fn encode(&self, mut encoder: DescriptorEncoder<'_>) -> Result<(), std::fmt::Error> {
        let graph = self.0.read();

        let mut vertices_encoder = encoder.encode_descriptor(
            "graph_vertices",
            "The number of vertices in the graph",
            None,
            MetricType::Gauge,
        )?;
        let counts = graph.vertex_counts();
        for kind in VertexKind::ALL {
            let labels = [("kind", kind.as_str())];
            let vertices = ConstGauge::new(counts.get(&kind).copied().unwrap_or(0) as i64);
            let vertices_encoder = vertices_encoder.encode_family(&labels)?;
            vertices.encode(vertices_encoder)?;
        }

        let edges = ConstGauge::new(graph.edge_count() as i64);
        let edges_encoder = encoder.encode_descriptor(
            "graph_edges",
            "The number of edges in the graph",
            None,
            MetricType::Gauge,
        )?;
        edges.encode(edges_encoder)?;

        Ok(())
    }
}
