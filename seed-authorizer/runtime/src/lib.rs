#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use seed_authorizer_core as core;
pub use seed_authorizer_k8s_api as k8s;
pub use seed_authorizer_k8s_index as index;

mod access_review;
mod args;
mod setup;

pub use self::{
    access_review::{AccessReview, ReviewMetrics},
    args::Args,
    setup::setup,
};
