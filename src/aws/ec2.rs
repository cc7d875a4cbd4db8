//! EC2 calls: VPC topology, instance type offerings, regions and security groups.

use super::api::{AccountApi, NetworkApi, SecurityGroupApi};
use super::cli::{parse_json, AwsCli};
use crate::error::Result;
use crate::models::{RouteTable, Subnet, Vpc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct DescribeVpcs {
    #[serde(default)]
    vpcs: Vec<Vpc>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct DescribeSubnets {
    #[serde(default)]
    subnets: Vec<Subnet>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct DescribeRouteTables {
    #[serde(default)]
    route_tables: Vec<RouteTable>,
}

/// One `(instance type, zone)` pair from `describe-instance-type-offerings`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceTypeOffering {
    pub instance_type: String,
    /// Availability zone when queried with `--location-type availability-zone`.
    pub location: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstanceTypeOfferings {
    #[serde(default)]
    instance_type_offerings: Vec<InstanceTypeOffering>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Region {
    region_name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeRegions {
    #[serde(default)]
    regions: Vec<Region>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CreateSecurityGroupOutput {
    group_id: String,
}

pub fn parse_vpcs(output: &str) -> Result<Vec<Vpc>> {
    Ok(parse_json::<DescribeVpcs>("ec2 describe-vpcs", output)?.vpcs)
}

pub fn parse_subnets(output: &str) -> Result<Vec<Subnet>> {
    Ok(parse_json::<DescribeSubnets>("ec2 describe-subnets", output)?.subnets)
}

pub fn parse_route_tables(output: &str) -> Result<Vec<RouteTable>> {
    Ok(parse_json::<DescribeRouteTables>("ec2 describe-route-tables", output)?.route_tables)
}

pub fn parse_instance_type_offerings(output: &str) -> Result<Vec<InstanceTypeOffering>> {
    Ok(parse_json::<DescribeInstanceTypeOfferings>(
        "ec2 describe-instance-type-offerings",
        output,
    )?
    .instance_type_offerings)
}

/// True when `instance_type` (e.g. `t3.micro`) belongs to `family` (e.g. `t3`).
///
/// A full instance type passed as `family` matches only itself.
pub fn is_in_family(instance_type: &str, family: &str) -> bool {
    if family.contains('.') {
        return instance_type == family;
    }
    instance_type.split('.').next() == Some(family)
}

/// Zones offering at least one instance type of `family`.
pub fn zones_offering_family(offerings: &[InstanceTypeOffering], family: &str) -> BTreeSet<String> {
    offerings
        .iter()
        .filter(|o| is_in_family(&o.instance_type, family))
        .map(|o| o.location.clone())
        .collect()
}

/// `--filters` value selecting the instance types of `family`.
fn family_filter(family: &str) -> String {
    if family.contains('.') {
        format!("Name=instance-type,Values={family}")
    } else {
        format!("Name=instance-type,Values={family}.*")
    }
}

impl AwsCli {
    pub(crate) fn describe_vpcs_raw(&self) -> Result<String> {
        self.call("ec2", "describe-vpcs", &[])
    }

    pub(crate) fn describe_subnets_raw(&self, vpc_id: Option<&str>) -> Result<String> {
        let args = match vpc_id {
            Some(vpc_id) => vec![
                "--filters".to_string(),
                format!("Name=vpc-id,Values={vpc_id}"),
            ],
            None => vec![],
        };
        self.call("ec2", "describe-subnets", &args)
    }

    pub(crate) fn describe_route_tables_raw(&self) -> Result<String> {
        self.call("ec2", "describe-route-tables", &[])
    }

    pub(crate) fn describe_instance_type_offerings_raw(&self, family: &str) -> Result<String> {
        self.call(
            "ec2",
            "describe-instance-type-offerings",
            &[
                "--location-type".to_string(),
                "availability-zone".to_string(),
                "--filters".to_string(),
                family_filter(family),
            ],
        )
    }
}

impl NetworkApi for AwsCli {
    fn list_vpcs(&self) -> Result<Vec<Vpc>> {
        parse_vpcs(&self.describe_vpcs_raw()?)
    }

    fn list_subnets(&self, vpc_id: &str) -> Result<Vec<Subnet>> {
        parse_subnets(&self.describe_subnets_raw(Some(vpc_id))?)
    }

    fn list_route_tables(&self) -> Result<Vec<RouteTable>> {
        parse_route_tables(&self.describe_route_tables_raw()?)
    }

    fn list_instance_family_zones(&self, family: &str) -> Result<BTreeSet<String>> {
        let offerings =
            parse_instance_type_offerings(&self.describe_instance_type_offerings_raw(family)?)?;
        let zones = zones_offering_family(&offerings, family);
        log::debug!(
            "instance family {family} offered in {} zone(s) of {}",
            zones.len(),
            self.region()
        );
        Ok(zones)
    }
}

impl SecurityGroupApi for AwsCli {
    fn create_security_group(
        &self,
        name: &str,
        description: &str,
        vpc_id: &str,
    ) -> Result<String> {
        let tags = json!([{
            "ResourceType": "security-group",
            "Tags": [{"Key": "Name", "Value": name}],
        }]);
        let output: CreateSecurityGroupOutput = self.call_json(
            "ec2",
            "create-security-group",
            &[
                "--group-name".to_string(),
                name.to_string(),
                "--description".to_string(),
                description.to_string(),
                "--vpc-id".to_string(),
                vpc_id.to_string(),
                "--tag-specifications".to_string(),
                tags.to_string(),
            ],
        )?;
        log::info!("Created security group {} ({name})", output.group_id);
        Ok(output.group_id)
    }

    fn authorize_ingress_from_group(
        &self,
        group_id: &str,
        port: u16,
        source_group_id: &str,
    ) -> Result<()> {
        self.call(
            "ec2",
            "authorize-security-group-ingress",
            &[
                "--group-id".to_string(),
                group_id.to_string(),
                "--ip-permissions".to_string(),
                ingress_permissions(port, source_group_id),
            ],
        )?;
        Ok(())
    }
}

fn ingress_permissions(port: u16, source_group_id: &str) -> String {
    json!([{
        "IpProtocol": "tcp",
        "FromPort": port,
        "ToPort": port,
        "UserIdGroupPairs": [{"GroupId": source_group_id}],
    }])
    .to_string()
}

impl AccountApi for AwsCli {
    fn list_regions(&self) -> Result<Vec<String>> {
        let regions: DescribeRegions = self.call_json("ec2", "describe-regions", &[])?;
        Ok(regions.regions.into_iter().map(|r| r.region_name).collect())
    }
}
