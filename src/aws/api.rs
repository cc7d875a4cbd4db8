//! Provider traits.
//!
//! The orchestrators only see these traits; [`super::AwsCli`] implements all
//! of them, [`super::SnapshotProvider`] only the read-only network side.

use crate::error::Result;
use crate::models::database::{CreateDbInstance, DbInstance, DbSubnetGroup};
use crate::models::environment::{
    CreateEnvironment, EnvironmentDescription, EnvironmentResources, OptionSetting,
};
use crate::models::{RouteTable, Subnet, Vpc};
use std::collections::BTreeSet;

/// Read-only VPC topology.
pub trait NetworkApi {
    fn list_vpcs(&self) -> Result<Vec<Vpc>>;
    /// Subnets of one VPC.
    fn list_subnets(&self, vpc_id: &str) -> Result<Vec<Subnet>>;
    /// All route tables of the region, any VPC.
    fn list_route_tables(&self) -> Result<Vec<RouteTable>>;
    /// Availability zones of the region offering `family` (e.g. `t3`).
    fn list_instance_family_zones(&self, family: &str) -> Result<BTreeSet<String>>;
}

pub trait SecurityGroupApi {
    /// Returns the new group id.
    fn create_security_group(&self, name: &str, description: &str, vpc_id: &str)
        -> Result<String>;
    /// Allow TCP `port` into `group_id` from members of `source_group_id`.
    fn authorize_ingress_from_group(
        &self,
        group_id: &str,
        port: u16,
        source_group_id: &str,
    ) -> Result<()>;
}

pub trait AccountApi {
    fn list_regions(&self) -> Result<Vec<String>>;
}

pub trait DatabaseApi {
    fn list_db_subnet_groups(&self) -> Result<Vec<DbSubnetGroup>>;
    fn create_db_subnet_group(
        &self,
        name: &str,
        description: &str,
        subnet_ids: &[String],
    ) -> Result<()>;
    fn list_db_instances(&self) -> Result<Vec<DbInstance>>;
    fn create_db_instance(&self, request: &CreateDbInstance) -> Result<()>;
}

pub trait EnvironmentApi {
    fn list_applications(&self) -> Result<Vec<String>>;
    /// Non-deleted environments of an application.
    fn list_environments(&self, application_name: &str) -> Result<Vec<EnvironmentDescription>>;
    fn create_environment(&self, request: &CreateEnvironment) -> Result<()>;
    fn describe_environment_resources(&self, environment_name: &str)
        -> Result<EnvironmentResources>;
    fn launch_configuration_security_groups(&self, name: &str) -> Result<Vec<String>>;
    /// Security groups of the latest version of a launch template.
    fn launch_template_security_groups(&self, launch_template_id: &str) -> Result<Vec<String>>;
    fn update_environment(
        &self,
        application_name: &str,
        environment_name: &str,
        option_settings: &[OptionSetting],
    ) -> Result<()>;
}
