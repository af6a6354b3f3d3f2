use crate::{
    attributes::{Attributes, Request, ResourceAttributes},
    graph::{Reachability, Vertex},
    identity::{self, SeedIdentity},
    policy::{self, Policy},
};
use std::fmt;

/// The outcome of authorizing a single request.
///
/// Seeds are never denied here: requests that are not explicitly allowed are left to the next
/// authorizer in the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    NoOpinion { reason: String },
}

/// Authorizes requests made by seeds against the objects related to them.
#[derive(Clone, Debug)]
pub struct Authorizer<G> {
    graph: G,
}

// === impl Decision ===

impl Decision {
    fn no_opinion(reason: impl ToString) -> Self {
        Self::NoOpinion {
            reason: reason.to_string(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::Allow => "",
            Self::NoOpinion { reason } => reason,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => f.write_str("allow"),
            Self::NoOpinion { .. } => f.write_str("no-opinion"),
        }
    }
}

// === impl Authorizer ===

impl<G: Reachability> Authorizer<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    pub fn authorize(&self, attrs: &Attributes) -> Decision {
        let seed = match identity::identify(&attrs.user.name, &attrs.user.groups) {
            Some(seed) => seed,
            None => return Decision::no_opinion("caller is not a seed"),
        };

        let req = match &attrs.request {
            Request::Resource(req) => req,
            Request::NonResource { .. } => {
                return Decision::no_opinion("non-resource requests are not handled")
            }
        };

        if is_cluster_identity(req) || is_leader_election_lease(req) {
            tracing::trace!(%seed, request = %req, "allowed");
            return Decision::Allow;
        }

        let policy = match policy::lookup(&req.api_group, &req.resource) {
            Some(policy) => policy,
            None => {
                tracing::info!(
                    %seed,
                    user = %attrs.user.name,
                    request = %req,
                    "Unhandled resource request"
                );
                return Decision::no_opinion(format_args!(
                    "unhandled resource request: {}",
                    req.group_resource()
                ));
            }
        };

        let decision = self.check(&seed, policy, req);
        match &decision {
            Decision::Allow => tracing::trace!(%seed, request = %req, "allowed"),
            Decision::NoOpinion { reason } => tracing::debug!(%seed, request = %req, %reason),
        }
        decision
    }

    fn check(&self, seed: &SeedIdentity, policy: &Policy, req: &ResourceAttributes) -> Decision {
        if !policy.allows_subresource(&req.subresource) {
            return Decision::no_opinion(format_args!(
                "only the following subresources are allowed for this resource type: [{}]",
                policy.subresources.join(", ")
            ));
        }

        if policy.always_allows(&req.verb) {
            return Decision::Allow;
        }

        let kind = match policy.kind {
            Some(kind) if policy.checks_graph(&req.verb) => kind,
            _ => {
                return Decision::no_opinion(format_args!(
                    "only the following verbs are allowed for this resource type: [{}]",
                    policy.verbs().join(", ")
                ))
            }
        };

        if req.name.is_empty() {
            return Decision::no_opinion("no object name found");
        }

        // Shared credentials cannot be matched against a single seed, so they may not be
        // restricted here.
        let seed = match seed.name() {
            Some(name) => name,
            None => return Decision::Allow,
        };

        let from = Vertex::new(kind, &req.namespace, &req.name);
        if self.graph.has_path_from(&from, &Vertex::seed(seed)) {
            return Decision::Allow;
        }

        tracing::info!(%seed, %from, request = %req, "No relationship found");
        Decision::no_opinion(format_args!(
            "no relationship found between seed '{seed}' and this object"
        ))
    }
}

fn is_cluster_identity(req: &ResourceAttributes) -> bool {
    req.api_group == policy::CORE_GROUP
        && req.resource == "configmaps"
        && req.subresource.is_empty()
        && req.verb == "get"
        && req.namespace == policy::CLUSTER_IDENTITY_NAMESPACE
        && req.name == policy::CLUSTER_IDENTITY_CONFIG_MAP
}

fn is_leader_election_lease(req: &ResourceAttributes) -> bool {
    req.api_group == policy::COORDINATION_GROUP
        && req.resource == "leases"
        && req.subresource.is_empty()
        && req.name == policy::GARDENLET_LEADER_ELECTION_LEASE
        && matches!(req.verb.as_str(), "create" | "get" | "watch" | "update")
}
