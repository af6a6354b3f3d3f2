//! The fixed, per-resource authorization policy applied to seed callers.

use crate::graph::VertexKind;

pub const CORE_GROUP: &str = "";
pub const GARDEN_GROUP: &str = "core.gardener.cloud";
pub const SEED_MANAGEMENT_GROUP: &str = "seedmanagement.gardener.cloud";
pub const COORDINATION_GROUP: &str = "coordination.k8s.io";
pub const EVENTS_GROUP: &str = "events.k8s.io";

/// The namespace holding the cluster-identity config map.
pub const CLUSTER_IDENTITY_NAMESPACE: &str = "kube-system";

/// The config map that records the garden cluster's identity.
pub const CLUSTER_IDENTITY_CONFIG_MAP: &str = "cluster-identity";

/// The lease used by gardenlets for leader election.
pub const GARDENLET_LEADER_ELECTION_LEASE: &str = "gardenlet-leader-election";

/// Describes what a seed may do with a single resource type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    /// The graph vertex kind used when a verb requires a relationship check. Unset for resources
    /// that never consult the graph.
    pub kind: Option<VertexKind>,

    /// Verbs allowed without consulting the graph.
    pub always_allowed: &'static [&'static str],

    /// Verbs allowed only when the requested object is related to the caller's seed.
    pub graph_checked: &'static [&'static str],

    /// Subresources that may be requested at all.
    pub subresources: &'static [&'static str],
}

const NONE: &[&str] = &[];
const READ: &[&str] = &["get", "list", "watch"];
const CREATE_READ: &[&str] = &["create", "get", "list", "watch"];
const UPDATE: &[&str] = &["update", "patch"];
const STATUS: &[&str] = &["status"];

static BACKUP_BUCKETS: Policy = Policy {
    kind: Some(VertexKind::BackupBucket),
    always_allowed: CREATE_READ,
    graph_checked: &["update", "patch", "delete"],
    subresources: STATUS,
};

static BACKUP_ENTRIES: Policy = Policy {
    kind: Some(VertexKind::BackupEntry),
    always_allowed: CREATE_READ,
    graph_checked: UPDATE,
    subresources: STATUS,
};

static CLOUD_PROFILES: Policy = Policy {
    kind: Some(VertexKind::CloudProfile),
    always_allowed: &["get"],
    graph_checked: NONE,
    subresources: NONE,
};

static CONFIG_MAPS: Policy = Policy {
    kind: Some(VertexKind::ConfigMap),
    always_allowed: NONE,
    graph_checked: &["get"],
    subresources: NONE,
};

static CONTROLLER_DEPLOYMENTS: Policy = Policy {
    kind: Some(VertexKind::ControllerDeployment),
    always_allowed: NONE,
    graph_checked: &["get"],
    subresources: NONE,
};

static CONTROLLER_INSTALLATIONS: Policy = Policy {
    kind: Some(VertexKind::ControllerInstallation),
    always_allowed: READ,
    graph_checked: UPDATE,
    subresources: STATUS,
};

static CONTROLLER_REGISTRATIONS: Policy = Policy {
    kind: Some(VertexKind::ControllerRegistration),
    always_allowed: READ,
    graph_checked: NONE,
    subresources: NONE,
};

static EVENTS: Policy = Policy {
    kind: None,
    always_allowed: &["create"],
    graph_checked: NONE,
    subresources: NONE,
};

static LEASES: Policy = Policy {
    kind: Some(VertexKind::Lease),
    always_allowed: &["create"],
    graph_checked: &["get", "update"],
    subresources: NONE,
};

static MANAGED_SEEDS: Policy = Policy {
    kind: Some(VertexKind::ManagedSeed),
    always_allowed: READ,
    graph_checked: UPDATE,
    subresources: STATUS,
};

static NAMESPACES: Policy = Policy {
    kind: Some(VertexKind::Namespace),
    always_allowed: &["get"],
    graph_checked: NONE,
    subresources: NONE,
};

static PROJECTS: Policy = Policy {
    kind: Some(VertexKind::Project),
    always_allowed: &["get"],
    graph_checked: NONE,
    subresources: NONE,
};

static SECRETS: Policy = Policy {
    kind: Some(VertexKind::Secret),
    always_allowed: &["create"],
    graph_checked: &["get", "update", "patch", "delete"],
    subresources: NONE,
};

static SECRET_BINDINGS: Policy = Policy {
    kind: Some(VertexKind::SecretBinding),
    always_allowed: &["get"],
    graph_checked: NONE,
    subresources: NONE,
};

static SEEDS: Policy = Policy {
    kind: Some(VertexKind::Seed),
    always_allowed: &[
        "create", "update", "patch", "delete", "get", "list", "watch",
    ],
    graph_checked: NONE,
    subresources: STATUS,
};

static SHOOTS: Policy = Policy {
    kind: Some(VertexKind::Shoot),
    always_allowed: READ,
    graph_checked: UPDATE,
    subresources: STATUS,
};

static SHOOT_STATES: Policy = Policy {
    kind: Some(VertexKind::ShootState),
    always_allowed: &["create"],
    graph_checked: &["get", "update", "patch"],
    subresources: NONE,
};

/// Finds the policy for a group and resource, e.g. `("core.gardener.cloud", "shoots")`.
pub fn lookup(group: &str, resource: &str) -> Option<&'static Policy> {
    let policy = match (group, resource) {
        (GARDEN_GROUP, "backupbuckets") => &BACKUP_BUCKETS,
        (GARDEN_GROUP, "backupentries") => &BACKUP_ENTRIES,
        (GARDEN_GROUP, "cloudprofiles") => &CLOUD_PROFILES,
        (GARDEN_GROUP, "controllerdeployments") => &CONTROLLER_DEPLOYMENTS,
        (GARDEN_GROUP, "controllerinstallations") => &CONTROLLER_INSTALLATIONS,
        (GARDEN_GROUP, "controllerregistrations") => &CONTROLLER_REGISTRATIONS,
        (GARDEN_GROUP, "projects") => &PROJECTS,
        (GARDEN_GROUP, "secretbindings") => &SECRET_BINDINGS,
        (GARDEN_GROUP, "seeds") => &SEEDS,
        (GARDEN_GROUP, "shoots") => &SHOOTS,
        (GARDEN_GROUP, "shootstates") => &SHOOT_STATES,
        (SEED_MANAGEMENT_GROUP, "managedseeds") => &MANAGED_SEEDS,
        (COORDINATION_GROUP, "leases") => &LEASES,
        (CORE_GROUP, "configmaps") => &CONFIG_MAPS,
        (CORE_GROUP, "namespaces") => &NAMESPACES,
        (CORE_GROUP, "secrets") => &SECRETS,
        (CORE_GROUP, "events") | (EVENTS_GROUP, "events") => &EVENTS,
        _ => return None,
    };
    Some(policy)
}

// === impl Policy ===

impl Policy {
    pub fn allows_subresource(&self, subresource: &str) -> bool {
        subresource.is_empty() || self.subresources.contains(&subresource)
    }

    pub fn always_allows(&self, verb: &str) -> bool {
        self.always_allowed.contains(&verb)
    }

    pub fn checks_graph(&self, verb: &str) -> bool {
        self.graph_checked.contains(&verb)
    }

    /// Lists every verb this policy may allow, for diagnostics.
    pub fn verbs(&self) -> Vec<&'static str> {
        let mut verbs = self
            .always_allowed
            .iter()
            .chain(self.graph_checked)
            .copied()
            .collect::<Vec<_>>();
        verbs.sort_unstable();
        verbs.dedup();
        verbs
    }
}
