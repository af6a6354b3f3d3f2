#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Typed views of the Gardener resources from which the seed dependency graph is built.
//!
//! Gardener owns these resource definitions; the types here only deserialize the fields that
//! establish relationships between objects. Unknown fields are ignored.

pub mod garden;
pub mod seedmanagement;

pub use self::{
    garden::{
        BackupBucket, BackupEntry, CloudProfile, ControllerInstallation, ControllerRegistration,
        Project, SecretBinding, Seed, Shoot,
    },
    seedmanagement::ManagedSeed,
};
pub use k8s_openapi::{
    api::{
        self,
        authorization::v1::{
            NonResourceAttributes, ResourceAttributes, SubjectAccessReview,
            SubjectAccessReviewSpec, SubjectAccessReviewStatus,
        },
        core::v1::{ObjectReference, SecretReference},
    },
    apimachinery::pkg::apis::meta::v1::OwnerReference,
};
pub use kube::{
    api::{ObjectMeta, ResourceExt},
    Client, Error, Resource,
};
