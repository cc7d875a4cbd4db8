//! Public/private subnet partitioning.
//!
//! A subnet explicitly associated with a route table takes that table's
//! classification; every other subnet of the VPC takes the main table's.

use crate::aws::NetworkApi;
use crate::error::{Error, Result};
use crate::models::{RouteTable, SubnetMap, SubnetPartition, Visibility};

/// Classify `working` (subnet id -> zone) using the route tables of `vpc_id`.
///
/// Tables of other VPCs are ignored. Associations naming a subnet that is not
/// in `working` (filtered out earlier, or already claimed) are no-ops.
/// Without a main association the leftover subnets are private.
pub fn classify_subnets(
    vpc_id: &str,
    mut working: SubnetMap,
    route_tables: &[RouteTable],
) -> SubnetPartition {
    let mut partition = SubnetPartition::default();
    let mut main_visibility = Visibility::Private;

    for route_table in route_tables.iter().filter(|rt| rt.vpc_id == vpc_id) {
        let visibility = Visibility::from_public(route_table.is_public());
        log::debug!(
            "route table {} is {visibility} ({} association(s))",
            route_table.route_table_id,
            route_table.associations.len()
        );

        for association in &route_table.associations {
            if association.main {
                main_visibility = visibility;
            }
            let Some(subnet_id) = &association.subnet_id else {
                continue;
            };
            match working.remove_entry(subnet_id) {
                Some((subnet_id, zone)) => {
                    partition.bucket_mut(visibility).insert(subnet_id, zone);
                }
                None => log::debug!(
                    "skipping association of {subnet_id} with {}: not in working set",
                    route_table.route_table_id
                ),
            }
        }
    }

    if !working.is_empty() {
        log::debug!(
            "{} subnet(s) of {vpc_id} follow the main route table ({main_visibility})",
            working.len()
        );
    }
    partition.bucket_mut(main_visibility).append(&mut working);
    partition
}

/// Both buckets for `vpc_id`, restricted to zones offering `instance_family`
/// when one is given.
pub fn subnet_partition<A: NetworkApi + ?Sized>(
    api: &A,
    vpc_id: &str,
    instance_family: Option<&str>,
) -> Result<SubnetPartition> {
    if !api.list_vpcs()?.iter().any(|vpc| vpc.vpc_id == vpc_id) {
        return Err(Error::not_found("VPC", vpc_id));
    }

    let mut working: SubnetMap = api
        .list_subnets(vpc_id)?
        .into_iter()
        .filter(|s| s.vpc_id == vpc_id)
        .map(|s| (s.subnet_id, s.availability_zone))
        .collect();

    // Filter before classifying so excluded subnets land in neither bucket.
    if let Some(family) = instance_family {
        let zones = api.list_instance_family_zones(family)?;
        working.retain(|subnet_id, zone| {
            let supported = zones.contains(zone.as_str());
            if !supported {
                log::debug!("dropping {subnet_id}: {zone} does not offer {family}");
            }
            supported
        });
    }

    let route_tables = api.list_route_tables()?;
    let partition = classify_subnets(vpc_id, working, &route_tables);
    log::info!(
        "{vpc_id}: {} public, {} private subnet(s)",
        partition.public.len(),
        partition.private.len()
    );
    Ok(partition)
}

/// The `visibility` bucket of [`subnet_partition`].
pub fn partition<A: NetworkApi + ?Sized>(
    api: &A,
    vpc_id: &str,
    visibility: Visibility,
    instance_family: Option<&str>,
) -> Result<SubnetMap> {
    Ok(subnet_partition(api, vpc_id, instance_family)?.into_bucket(visibility))
}
