use std::fmt;

/// The closed set of object kinds that may appear as vertices in the dependency graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexKind {
    BackupBucket,
    BackupEntry,
    CloudProfile,
    ConfigMap,
    ControllerDeployment,
    ControllerInstallation,
    ControllerRegistration,
    Lease,
    ManagedSeed,
    Namespace,
    Project,
    Secret,
    SecretBinding,
    Seed,
    Shoot,
    ShootState,
}

/// Identifies a single vertex. Cluster-scoped kinds use an empty namespace.
///
/// Vertices carry nothing but their identity; everything else about an object is read from the
/// object itself when its relationships are derived.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub kind: VertexKind,
    pub namespace: String,
    pub name: String,
}

/// Answers reachability queries against the dependency graph.
pub trait Reachability {
    /// Returns true iff a directed path leads from `from` to `to`.
    ///
    /// Returns false when `from` is not a known vertex. Queries never create vertices.
    fn has_path_from(&self, from: &Vertex, to: &Vertex) -> bool;
}

// === impl VertexKind ===

impl VertexKind {
    pub const ALL: [VertexKind; 16] = [
        Self::BackupBucket,
        Self::BackupEntry,
        Self::CloudProfile,
        Self::ConfigMap,
        Self::ControllerDeployment,
        Self::ControllerInstallation,
        Self::ControllerRegistration,
        Self::Lease,
        Self::ManagedSeed,
        Self::Namespace,
        Self::Project,
        Self::Secret,
        Self::SecretBinding,
        Self::Seed,
        Self::Shoot,
        Self::ShootState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackupBucket => "BackupBucket",
            Self::BackupEntry => "BackupEntry",
            Self::CloudProfile => "CloudProfile",
            Self::ConfigMap => "ConfigMap",
            Self::ControllerDeployment => "ControllerDeployment",
            Self::ControllerInstallation => "ControllerInstallation",
            Self::ControllerRegistration => "ControllerRegistration",
            Self::Lease => "Lease",
            Self::ManagedSeed => "ManagedSeed",
            Self::Namespace => "Namespace",
            Self::Project => "Project",
            Self::Secret => "Secret",
            Self::SecretBinding => "SecretBinding",
            Self::Seed => "Seed",
            Self::Shoot => "Shoot",
            Self::ShootState => "ShootState",
        }
    }
}

impl fmt::Display for VertexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// === impl Vertex ===

impl Vertex {
    pub fn new(kind: VertexKind, namespace: impl ToString, name: impl ToString) -> Self {
        Self {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Builds a vertex for a cluster-scoped object.
    pub fn cluster(kind: VertexKind, name: impl ToString) -> Self {
        Self::new(kind, "", name)
    }

    pub fn seed(name: impl ToString) -> Self {
        Self::cluster(VertexKind::Seed, name)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}:{}", self.kind, self.name)
        } else {
            write!(f, "{}:{}/{}", self.kind, self.namespace, self.name)
        }
    }
}

impl<R: Reachability + ?Sized> Reachability for std::sync::Arc<R> {
    fn has_path_from(&self, from: &Vertex, to: &Vertex) -> bool {
        (**self).has_path_from(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Vertex::seed("seed-1").to_string(), "Seed:seed-1");
        assert_eq!(
            Vertex::new(VertexKind::Shoot, "garden-dev", "foo").to_string(),
            "Shoot:garden-dev/foo"
        );
    }

    #[test]
    fn kinds_are_distinct() {
        let names = VertexKind::ALL
            .iter()
            .map(VertexKind::as_str)
            .collect::<std::collections::BTreeSet<_>>();
        assert_eq!(names.len(), VertexKind::ALL.len());
    }
}
