//! Subnet classification logic.
//!
//! - [`partition`] - splitting a VPC's subnets into public and private
//!
//! Route tables classify themselves through [`crate::models::RouteTable::is_public`].

mod partition;

// Re-export public functions
pub use partition::{classify_subnets, partition, subnet_partition};
