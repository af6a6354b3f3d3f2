//! The dependency graph: a directed graph of object identities.
//!
//! Edges point from an object towards the objects its authorization is derived from, so that a
//! seed may access an object when a path leads from the object to the seed. The graph may contain
//! cycles.
//!
//! Vertices are created lazily when they are first referenced by an edge. The graph is not
//! compacted: a vertex that loses all of its edges remains until its own object is deleted.

use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use parking_lot::RwLock;
use seed_authorizer_core::{Vertex, VertexKind};
use std::{collections::VecDeque, sync::Arc};

pub type SharedGraph = Arc<RwLock<Graph>>;

#[derive(Debug, Default)]
pub struct Graph {
    vertices: HashMap<Vertex, Edges>,
}

/// Adjacency sets for a single vertex.
#[derive(Debug, Default)]
struct Edges {
    outgoing: HashSet<Vertex>,
    incoming: HashSet<Vertex>,
}

/// Describes which of a vertex's edges are derived from the vertex's own object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Ownership {
    /// Every edge touching the vertex is derived from its object; no other kind points at it.
    Vertex,

    /// Only edges of the listed classes are derived from the object. Other edges touching the
    /// vertex belong to other objects and must be preserved.
    Edges(&'static [EdgeClass]),
}

/// A class of edges touching a vertex, distinguished by direction and the other vertex's kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EdgeClass {
    /// Edges from vertices of the given kind into the vertex.
    From(VertexKind),

    /// Edges from the vertex to vertices of the given kind.
    To(VertexKind),
}

/// The edges derived from a single object's current state.
#[derive(Clone, Debug)]
pub(crate) struct Relations {
    vertex: Vertex,
    ownership: Ownership,
    outgoing: HashSet<Vertex>,
    incoming: HashSet<Vertex>,
}

// === impl Graph ===

impl Graph {
    pub fn shared() -> SharedGraph {
        Arc::new(RwLock::new(Self::default()))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(|e| e.outgoing.len()).sum()
    }

    /// Counts the vertices of each kind.
    pub fn vertex_counts(&self) -> HashMap<VertexKind, usize> {
        let mut counts = HashMap::default();
        for v in self.vertices.keys() {
            *counts.entry(v.kind).or_default() += 1;
        }
        counts
    }

    pub fn contains(&self, vertex: &Vertex) -> bool {
        self.vertices.contains_key(vertex)
    }

    pub fn outgoing<'a>(&'a self, vertex: &Vertex) -> impl Iterator<Item = &'a Vertex> + 'a {
        self.vertices
            .get(vertex)
            .into_iter()
            .flat_map(|e| e.outgoing.iter())
    }

    pub fn incoming<'a>(&'a self, vertex: &Vertex) -> impl Iterator<Item = &'a Vertex> + 'a {
        self.vertices
            .get(vertex)
            .into_iter()
            .flat_map(|e| e.incoming.iter())
    }

    /// Iterates over all edges as `(source, target)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.vertices
            .iter()
            .flat_map(|(from, e)| e.outgoing.iter().map(move |to| (from, to)))
    }

    /// Returns true iff a directed path leads from `from` to `to`.
    ///
    /// The search is breadth-first and tracks visited vertices, so it terminates on cyclic
    /// graphs in `O(vertices + edges)`.
    pub fn has_path_from(&self, from: &Vertex, to: &Vertex) -> bool {
        if !self.vertices.contains_key(from) {
            return false;
        }
        if from == to {
            return true;
        }

        let mut visited = HashSet::<&Vertex>::default();
        visited.insert(from);
        let mut queue = VecDeque::new();
        queue.push_back(from);

        while let Some(v) = queue.pop_front() {
            for next in self.outgoing(v) {
                if next == to {
                    return true;
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        false
    }

    pub(crate) fn get_or_create_vertex(&mut self, vertex: &Vertex) {
        if !self.vertices.contains_key(vertex) {
            self.vertices.insert(vertex.clone(), Edges::default());
        }
    }

    /// Adds an edge, creating either vertex as needed. Duplicate edges are ignored.
    pub(crate) fn add_edge(&mut self, from: &Vertex, to: &Vertex) {
        self.get_or_create_vertex(to);
        self.vertices
            .entry(from.clone())
            .or_default()
            .outgoing
            .insert(to.clone());
        if let Some(e) = self.vertices.get_mut(to) {
            e.incoming.insert(from.clone());
        }
    }

    /// Removes a vertex and every edge touching it.
    ///
    /// Returns false if the vertex did not exist.
    pub(crate) fn delete_vertex(&mut self, vertex: &Vertex) -> bool {
        let edges = match self.vertices.remove(vertex) {
            Some(edges) => edges,
            None => return false,
        };

        for to in edges.outgoing.iter() {
            if let Some(e) = self.vertices.get_mut(to) {
                e.incoming.remove(vertex);
            }
        }
        for from in edges.incoming.iter() {
            if let Some(e) = self.vertices.get_mut(from) {
                e.outgoing.remove(vertex);
            }
        }
        true
    }

    /// Removes all edges from vertices of `kind` into `to`.
    pub(crate) fn delete_incoming_edges(&mut self, kind: VertexKind, to: &Vertex) {
        let sources = match self.vertices.get_mut(to) {
            Some(e) => {
                let sources = e
                    .incoming
                    .iter()
                    .filter(|v| v.kind == kind)
                    .cloned()
                    .collect::<Vec<_>>();
                e.incoming.retain(|v| v.kind != kind);
                sources
            }
            None => return,
        };

        for from in sources {
            if let Some(e) = self.vertices.get_mut(&from) {
                e.outgoing.remove(to);
            }
        }
    }

    /// Removes all edges from `from` to vertices of `kind`.
    pub(crate) fn delete_outgoing_edges(&mut self, from: &Vertex, kind: VertexKind) {
        let targets = match self.vertices.get_mut(from) {
            Some(e) => {
                let targets = e
                    .outgoing
                    .iter()
                    .filter(|v| v.kind == kind)
                    .cloned()
                    .collect::<Vec<_>>();
                e.outgoing.retain(|v| v.kind != kind);
                targets
            }
            None => return,
        };

        for to in targets {
            if let Some(e) = self.vertices.get_mut(&to) {
                e.incoming.remove(from);
            }
        }
    }

    /// Returns true if the vertex exists and its owned edges are exactly those described by
    /// `relations`.
    pub(crate) fn is_current(&self, relations: &Relations) -> bool {
        let edges = match self.vertices.get(&relations.vertex) {
            Some(edges) => edges,
            None => return false,
        };

        let owned_outgoing = edges
            .outgoing
            .iter()
            .filter(|v| relations.owns(EdgeClass::To(v.kind)))
            .count();
        let owned_incoming = edges
            .incoming
            .iter()
            .filter(|v| relations.owns(EdgeClass::From(v.kind)))
            .count();

        owned_outgoing == relations.outgoing.len()
            && owned_incoming == relations.incoming.len()
            && relations.outgoing.iter().all(|v| edges.outgoing.contains(v))
            && relations.incoming.iter().all(|v| edges.incoming.contains(v))
    }

    /// Replaces the vertex's owned edges with those described by `relations`.
    pub(crate) fn replace(&mut self, relations: &Relations) {
        let Relations {
            vertex,
            ownership,
            outgoing,
            incoming,
        } = relations;

        match ownership {
            Ownership::Vertex => {
                self.delete_vertex(vertex);
            }
            Ownership::Edges(classes) => {
                for class in classes.iter() {
                    match *class {
                        EdgeClass::From(kind) => self.delete_incoming_edges(kind, vertex),
                        EdgeClass::To(kind) => self.delete_outgoing_edges(vertex, kind),
                    }
                }
            }
        }

        self.get_or_create_vertex(vertex);
        for to in outgoing.iter() {
            self.add_edge(vertex, to);
        }
        for from in incoming.iter() {
            self.add_edge(from, vertex);
        }
    }
}

// === impl Relations ===

impl Relations {
    pub(crate) fn new(vertex: Vertex, ownership: Ownership) -> Self {
        Self {
            vertex,
            ownership,
            outgoing: HashSet::default(),
            incoming: HashSet::default(),
        }
    }

    pub(crate) fn vertex(&self) -> &Vertex {
        &self.vertex
    }

    /// Records an edge from this object's vertex to `to`.
    pub(crate) fn to(&mut self, to: Vertex) -> &mut Self {
        debug_assert!(
            self.owns(EdgeClass::To(to.kind)),
            "{} does not own edges to {}",
            self.vertex.kind,
            to.kind
        );
        self.outgoing.insert(to);
        self
    }

    /// Records an edge from `from` to this object's vertex.
    pub(crate) fn from(&mut self, from: Vertex) -> &mut Self {
        debug_assert!(
            self.owns(EdgeClass::From(from.kind)),
            "{} does not own edges from {}",
            self.vertex.kind,
            from.kind
        );
        self.incoming.insert(from);
        self
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    fn owns(&self, class: EdgeClass) -> bool {
        match self.ownership {
            Ownership::Vertex => true,
            Ownership::Edges(classes) => classes.contains(&class),
        }
    }
}
