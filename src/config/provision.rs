//! Provisioning settings read from YAML.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults shipped with the binary.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("default_config.yml");

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProvisionConfig {
    #[serde(rename = "ElasticBeanstalk")]
    pub elastic_beanstalk: BeanstalkConfig,
    #[serde(rename = "RDS")]
    pub rds: RdsConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BeanstalkConfig {
    pub solution_stack_name: String,
    pub num_processes: Option<u32>,
    /// Comma separated, e.g. `t3.small,t3.medium`.
    pub instance_types: Option<String>,
    pub iam_instance_profile: Option<String>,
    pub proxy_server: Option<String>,
    #[serde(default = "default_true")]
    pub instance_public_subnets: bool,
    #[serde(default)]
    pub associate_public_ip_address: bool,
    pub load_balancer: Option<LoadBalancerConfig>,
    pub managed_updates: Option<ManagedUpdatesConfig>,
}

impl BeanstalkConfig {
    /// Instance family of the first configured instance type (`t3.small` -> `t3`).
    pub fn instance_family(&self) -> Option<&str> {
        self.instance_types
            .as_deref()?
            .split(',')
            .map(str::trim)
            .find(|t| !t.is_empty())
            .and_then(|t| t.split('.').next())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancerConfig {
    pub load_balancer_type: String,
    pub min_size: u32,
    pub max_size: u32,
    #[serde(rename = "ELBScheme")]
    pub elb_scheme: Option<String>,
    #[serde(default = "default_true")]
    pub public_subnets: bool,
    #[serde(rename = "SSLCertificateId")]
    pub ssl_certificate_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedUpdatesConfig {
    pub preferred_start_time: String,
    pub service_role_for_managed_updates: String,
    pub update_level: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RdsConfig {
    pub allocated_storage: u32,
    #[serde(rename = "DBInstanceClass")]
    pub db_instance_class: String,
    pub master_username: String,
    pub backup_retention_period: u32,
    #[serde(rename = "MultiAZ")]
    pub multi_az: bool,
    pub auto_minor_version_upgrade: bool,
    pub publicly_accessible: bool,
    pub storage_type: String,
    pub storage_encrypted: bool,
    pub copy_tags_to_snapshot: bool,
    pub monitoring_interval: u32,
    pub deletion_protection: bool,
    pub max_allocated_storage: u32,
    pub postgres: PostgresConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PostgresConfig {
    #[serde(rename = "DBName")]
    pub db_name: String,
    pub engine: String,
    pub engine_version: String,
    pub port: u16,
    #[serde(rename = "DBParameterGroupName")]
    pub db_parameter_group_name: Option<String>,
    pub license_model: Option<String>,
}

impl ProvisionConfig {
    /// Load from `path`, or the embedded defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<ProvisionConfig> {
        match path {
            Some(path) => {
                log::info!("Reading provisioning config: {}", path.display());
                let yaml = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_yaml(&yaml)
            }
            None => {
                log::info!("Using default provisioning config");
                Self::from_yaml(DEFAULT_CONFIG_YAML)
            }
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<ProvisionConfig> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ProvisionConfig::load(None).expect("default config");
        let eb = &config.elastic_beanstalk;
        assert_eq!(eb.instance_family(), Some("t3"));
        assert!(eb.instance_public_subnets);
        let lb = eb.load_balancer.as_ref().expect("load balancer section");
        assert_eq!(lb.elb_scheme.as_deref(), Some("public"));
        assert_eq!(lb.ssl_certificate_id, None);
        assert_eq!(config.rds.postgres.port, 5432);
        assert_eq!(config.rds.db_instance_class, "db.t3.micro");
    }

    #[test]
    fn test_minimal_config() {
        let yaml = r#"
ElasticBeanstalk:
  SolutionStackName: "stack"
RDS:
  AllocatedStorage: 5
  DBInstanceClass: "db.t3.micro"
  MasterUsername: "root"
  BackupRetentionPeriod: 0
  MultiAZ: false
  AutoMinorVersionUpgrade: false
  PubliclyAccessible: false
  StorageType: "gp2"
  StorageEncrypted: false
  CopyTagsToSnapshot: false
  MonitoringInterval: 0
  DeletionProtection: false
  MaxAllocatedStorage: 10
  Postgres:
    DBName: "db"
    Engine: "postgres"
    EngineVersion: "15"
    Port: 5433
"#;
        let config = ProvisionConfig::from_yaml(yaml).expect("minimal config");
        let eb = &config.elastic_beanstalk;
        assert!(eb.instance_public_subnets);
        assert!(!eb.associate_public_ip_address);
        assert_eq!(eb.load_balancer, None);
        assert_eq!(eb.instance_family(), None);
        assert_eq!(config.rds.postgres.license_model, None);
    }

    #[test]
    fn test_instance_family_skips_blanks() {
        let mut eb = ProvisionConfig::load(None)
            .expect("default config")
            .elastic_beanstalk;
        eb.instance_types = Some(" , m5.large,t3.small".to_string());
        assert_eq!(eb.instance_family(), Some("m5"));
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let err = ProvisionConfig::from_yaml("RDS: {}").expect_err("should fail");
        assert!(matches!(err, Error::Yaml(_)));
    }
}
