//! Create an Elastic Beanstalk environment and a linked RDS database.
//!
//! - [`aws`] - provider traits and the `aws` CLI implementation
//! - [`processing`] - public/private subnet partitioning
//! - [`provisioning`] - environment and database creation
//! - [`commands`] - the CLI commands built on top

pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod provisioning;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use models::{SubnetMap, SubnetPartition, Visibility};
pub use processing::{classify_subnets, partition, subnet_partition};
