//! Configuration: runtime constants, the provisioning YAML and the
//! one-time global config file.
//!
//! - [`provision`] - `ElasticBeanstalk` / `RDS` settings
//! - [`global`] - application name, default region and profile

mod global;
mod provision;

use std::time::Duration;

pub use global::{GlobalConfig, GLOBAL_CONFIG_PATH};
pub use provision::{
    BeanstalkConfig, LoadBalancerConfig, ManagedUpdatesConfig, PostgresConfig, ProvisionConfig,
    RdsConfig, DEFAULT_CONFIG_YAML,
};

/// Interval between readiness checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long to wait for a new database to report its host.
pub const DB_HOST_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Readiness checks before giving up on a new environment.
pub const ENVIRONMENT_MAX_ATTEMPTS: u32 = 100;

/// Length of the generated database master password.
pub const PASSWORD_LENGTH: usize = 32;

/// Region used for account-wide lookups before a region is chosen.
pub const BOOTSTRAP_REGION: &str = "us-east-1";
