//! AWS provider access.
//!
//! This module handles all provider-facing operations:
//! - [`api`] - the traits the orchestrators are written against
//! - [`cli`] - command execution for the `aws` CLI
//! - [`ec2`], [`rds`], [`beanstalk`] - per-service calls and response parsing
//! - [`snapshot`] - recorded network responses for offline classification

pub mod api;
mod beanstalk;
pub mod cli;
pub mod ec2;
pub mod rds;
mod snapshot;

// Re-export public types and functions
pub use api::{AccountApi, DatabaseApi, EnvironmentApi, NetworkApi, SecurityGroupApi};
pub use cli::{list_profiles, AwsCli};
pub use snapshot::SnapshotProvider;
