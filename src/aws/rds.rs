//! RDS calls: subnet groups and DB instances.

use super::api::DatabaseApi;
use super::cli::{parse_json, AwsCli};
use crate::error::Result;
use crate::models::database::{CreateDbInstance, DbInstance, DbSubnetGroup};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
struct DescribeDbSubnetGroups {
    #[serde(rename = "DBSubnetGroups", default)]
    db_subnet_groups: Vec<DbSubnetGroup>,
}

#[derive(Deserialize, Debug, Default)]
struct DescribeDbInstances {
    #[serde(rename = "DBInstances", default)]
    db_instances: Vec<serde_json::Value>,
}

pub fn parse_db_subnet_groups(output: &str) -> Result<Vec<DbSubnetGroup>> {
    Ok(parse_json::<DescribeDbSubnetGroups>("rds describe-db-subnet-groups", output)?.db_subnet_groups)
}

/// Instances without a readable identifier are skipped.
pub fn parse_db_instances(output: &str) -> Result<Vec<DbInstance>> {
    let response: DescribeDbInstances = parse_json("rds describe-db-instances", output)?;
    Ok(response
        .db_instances
        .iter()
        .filter_map(DbInstance::from_json)
        .collect())
}

fn bool_flag(name: &str, value: bool) -> String {
    if value {
        format!("--{name}")
    } else {
        format!("--no-{name}")
    }
}

/// Where `create-db-instance` reads [`create_db_instance_input`] from.
const STDIN_INPUT: &str = "file:///dev/stdin";

/// Arguments for `rds create-db-instance`.
///
/// The master password is not among them; it is sent on stdin by
/// [`create_db_instance_input`].
pub fn create_db_instance_args(request: &CreateDbInstance) -> Vec<String> {
    let p = &request.params;
    let pg = &p.postgres;
    let mut args = vec![
        "--cli-input-json".to_string(),
        STDIN_INPUT.to_string(),
        "--db-instance-identifier".to_string(),
        request.identifier.clone(),
        "--db-subnet-group-name".to_string(),
        request.db_subnet_group_name.clone(),
        "--allocated-storage".to_string(),
        p.allocated_storage.to_string(),
        "--db-instance-class".to_string(),
        p.db_instance_class.clone(),
        "--master-username".to_string(),
        p.master_username.clone(),
        "--backup-retention-period".to_string(),
        p.backup_retention_period.to_string(),
        bool_flag("multi-az", p.multi_az),
        bool_flag("auto-minor-version-upgrade", p.auto_minor_version_upgrade),
        bool_flag("publicly-accessible", p.publicly_accessible),
        "--storage-type".to_string(),
        p.storage_type.clone(),
        bool_flag("storage-encrypted", p.storage_encrypted),
        bool_flag("copy-tags-to-snapshot", p.copy_tags_to_snapshot),
        "--monitoring-interval".to_string(),
        p.monitoring_interval.to_string(),
        bool_flag("deletion-protection", p.deletion_protection),
        "--max-allocated-storage".to_string(),
        p.max_allocated_storage.to_string(),
        "--db-name".to_string(),
        pg.db_name.clone(),
        "--engine".to_string(),
        pg.engine.clone(),
        "--engine-version".to_string(),
        pg.engine_version.clone(),
        "--port".to_string(),
        pg.port.to_string(),
    ];
    if let Some(group) = &pg.db_parameter_group_name {
        args.extend(["--db-parameter-group-name".to_string(), group.clone()]);
    }
    if let Some(license) = &pg.license_model {
        args.extend(["--license-model".to_string(), license.clone()]);
    }
    if !request.vpc_security_group_ids.is_empty() {
        args.push("--vpc-security-group-ids".to_string());
        args.extend(request.vpc_security_group_ids.iter().cloned());
    }
    args
}

/// `--cli-input-json` document carrying the master password.
pub fn create_db_instance_input(request: &CreateDbInstance) -> String {
    serde_json::json!({ "MasterUserPassword": request.master_password }).to_string()
}

impl DatabaseApi for AwsCli {
    fn list_db_subnet_groups(&self) -> Result<Vec<DbSubnetGroup>> {
        parse_db_subnet_groups(&self.call("rds", "describe-db-subnet-groups", &[])?)
    }

    fn create_db_subnet_group(
        &self,
        name: &str,
        description: &str,
        subnet_ids: &[String],
    ) -> Result<()> {
        let mut args = vec![
            "--db-subnet-group-name".to_string(),
            name.to_string(),
            "--db-subnet-group-description".to_string(),
            description.to_string(),
            "--subnet-ids".to_string(),
        ];
        args.extend(subnet_ids.iter().cloned());
        self.call("rds", "create-db-subnet-group", &args)?;
        Ok(())
    }

    fn list_db_instances(&self) -> Result<Vec<DbInstance>> {
        parse_db_instances(&self.call("rds", "describe-db-instances", &[])?)
    }

    fn create_db_instance(&self, request: &CreateDbInstance) -> Result<()> {
        self.call_with_input(
            "rds",
            "create-db-instance",
            &create_db_instance_args(request),
            &create_db_instance_input(request),
        )?;
        Ok(())
    }
}
