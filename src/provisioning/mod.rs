//! Resource creation on top of the provider traits.
//!
//! - [`environment`] - Elastic Beanstalk environment and its variables
//! - [`database`] - RDS instance, security group and subnet group
//! - [`wait`] - readiness polling shared by both

pub mod database;
pub mod environment;
mod password;
mod wait;

pub use database::{DatabaseInitializer, Engine};
pub use environment::{option_settings, EnvironmentInitializer};
pub use password::generate_secure_password;
pub use wait::Poll;
