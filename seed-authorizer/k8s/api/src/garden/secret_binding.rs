use k8s_openapi::{api::core::v1::SecretReference, NamespaceResourceScope};
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Binds a secret holding infrastructure credentials to the shoots of a project.
///
/// Unlike most Gardener resources, a `SecretBinding` has no `spec`: its fields live at the top
/// level of the object, so `kube::Resource` is implemented by hand.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretBinding {
    pub metadata: ObjectMeta,

    /// The secret holding the credentials. When the namespace is omitted, the secret lives in
    /// the binding's namespace.
    pub secret_ref: SecretReference,
}

impl kube::Resource for SecretBinding {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "SecretBinding".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        super::GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        super::VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "secretbindings".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
