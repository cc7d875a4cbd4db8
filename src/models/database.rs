//! RDS request and response shapes.

use crate::config::RdsConfig;
use serde::{Deserialize, Serialize};

/// A DB subnet group as returned by `rds describe-db-subnet-groups`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DbSubnetGroup {
    #[serde(rename = "DBSubnetGroupName")]
    pub name: String,
    #[serde(rename = "VpcId")]
    pub vpc_id: String,
}

/// The parts of a DB instance the tool cares about.
///
/// `endpoint_address` is read best-effort: it is `None` until RDS has
/// assigned a host, and a malformed endpoint is treated the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbInstance {
    pub identifier: String,
    pub endpoint_address: Option<String>,
}

impl DbInstance {
    /// Build from one element of the `DBInstances` array.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let identifier = value.get("DBInstanceIdentifier")?.as_str()?.to_string();
        let endpoint_address = value
            .pointer("/Endpoint/Address")
            .and_then(|a| a.as_str())
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        Some(DbInstance {
            identifier,
            endpoint_address,
        })
    }
}

/// Everything `rds create-db-instance` is called with.
#[derive(Debug, Clone)]
pub struct CreateDbInstance {
    pub identifier: String,
    pub master_password: String,
    pub vpc_security_group_ids: Vec<String>,
    pub db_subnet_group_name: String,
    pub params: RdsConfig,
}
