//! Resources in the `core.gardener.cloud/v1beta1` API.

pub mod backup_bucket;
pub mod backup_entry;
pub mod cloud_profile;
pub mod controller_installation;
pub mod controller_registration;
pub mod project;
pub mod secret_binding;
pub mod seed;
pub mod shoot;

pub use self::{
    backup_bucket::{BackupBucket, BackupBucketSpec, BackupBucketStatus},
    backup_entry::{BackupEntry, BackupEntrySpec},
    cloud_profile::{CloudProfile, CloudProfileSpec},
    controller_installation::{ControllerInstallation, ControllerInstallationSpec},
    controller_registration::{ControllerRegistration, ControllerRegistrationSpec},
    project::{Project, ProjectSpec},
    secret_binding::SecretBinding,
    seed::{Seed, SeedSpec},
    shoot::{Shoot, ShootSpec, ShootStatus},
};

pub const GROUP: &str = "core.gardener.cloud";
pub const VERSION: &str = "v1beta1";
