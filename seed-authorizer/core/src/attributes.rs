use std::{collections::BTreeMap, fmt};

/// Describes a single API request that is subject to authorization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    pub user: UserInfo,
    pub request: Request,
}

/// The authenticated caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub name: String,
    pub uid: String,
    pub groups: Vec<String>,
    pub extra: BTreeMap<String, Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// A request against an API resource.
    Resource(ResourceAttributes),

    /// A request against a non-resource URL, e.g. `/healthz`.
    NonResource { verb: String, path: String },
}

/// Identifies the resource a request targets. Empty strings denote absent values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceAttributes {
    pub verb: String,
    pub api_group: String,
    pub api_version: String,
    pub resource: String,
    pub subresource: String,
    pub namespace: String,
    pub name: String,
}

// === impl Request ===

impl Default for Request {
    fn default() -> Self {
        Self::NonResource {
            verb: String::new(),
            path: String::new(),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(attrs) => attrs.fmt(f),
            Self::NonResource { verb, path } => write!(f, "{verb} {path}"),
        }
    }
}

// === impl ResourceAttributes ===

impl ResourceAttributes {
    /// The group-qualified resource, e.g. `shoots.core.gardener.cloud`.
    pub fn group_resource(&self) -> String {
        if self.api_group.is_empty() {
            return self.resource.clone();
        }
        format!("{}.{}", self.resource, self.api_group)
    }
}

impl fmt::Display for ResourceAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.group_resource())?;
        if !self.subresource.is_empty() {
            write!(f, "/{}", self.subresource)?;
        }
        match (self.namespace.is_empty(), self.name.is_empty()) {
            (true, true) => Ok(()),
            (true, false) => write!(f, " {}", self.name),
            (false, true) => write!(f, " {}/*", self.namespace),
            (false, false) => write!(f, " {}/{}", self.namespace, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_resource() {
        let attrs = ResourceAttributes {
            verb: "update".to_string(),
            api_group: "core.gardener.cloud".to_string(),
            api_version: "v1beta1".to_string(),
            resource: "shoots".to_string(),
            subresource: "status".to_string(),
            namespace: "garden-dev".to_string(),
            name: "foo".to_string(),
        };
        assert_eq!(
            attrs.to_string(),
            "update shoots.core.gardener.cloud/status garden-dev/foo"
        );
    }

    #[test]
    fn display_core_group() {
        let attrs = ResourceAttributes {
            verb: "get".to_string(),
            resource: "namespaces".to_string(),
            name: "garden".to_string(),
            ..Default::default()
        };
        assert_eq!(attrs.to_string(), "get namespaces garden");
    }
}
