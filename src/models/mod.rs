//! Domain models for the AWS resources the tool reads and creates.
//!
//! - [`Vpc`] and [`Tag`] - virtual networks
//! - [`Subnet`] and [`SubnetMap`] - subnets keyed by id
//! - [`RouteTable`], [`Route`] and [`Association`] - routing topology
//! - [`database`] - RDS request and response shapes
//! - [`environment`] - Elastic Beanstalk request and response shapes

pub mod database;
pub mod environment;
mod route_table;
mod subnet;
mod vpc;

// Re-export public types
pub use route_table::{Association, Route, RouteTable, DEFAULT_ROUTE_CIDR};
pub use subnet::{Subnet, SubnetMap, SubnetPartition, Visibility};
pub use vpc::{Tag, Vpc};
