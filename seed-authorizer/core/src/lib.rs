//! Authorization of requests made by seeds.
//!
//! Every seed's gardenlet authenticates with the same class of credential, so static role-based
//! policy cannot tell a seed's own objects apart from those of any other seed. The [`Authorizer`]
//! resolves this by extracting the calling seed's identity and, for verbs that mutate or read
//! seed-specific objects, requiring that the requested object be related to the seed in the
//! dependency graph.
//!
//! This crate is independent of Kubernetes client machinery: the graph is consumed only through
//! the [`Reachability`] trait.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod attributes;
mod authorizer;
pub mod graph;
pub mod identity;
pub mod policy;

pub use self::{
    attributes::{Attributes, Request, ResourceAttributes, UserInfo},
    authorizer::{Authorizer, Decision},
    graph::{Reachability, Vertex, VertexKind},
    identity::{identify, SeedIdentity},
};
