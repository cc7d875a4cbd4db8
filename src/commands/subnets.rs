//! `subnets`: print the public/private classification of a VPC.

use crate::aws::{AwsCli, NetworkApi, SnapshotProvider};
use crate::cli::SubnetsArgs;
use crate::config::{GlobalConfig, BOOTSTRAP_REGION, GLOBAL_CONFIG_PATH};
use crate::error::Result;
use crate::models::{SubnetPartition, Visibility};
use crate::output::{print_partition, print_vpcs};
use crate::processing::{partition, subnet_partition};
use std::path::Path;

pub fn run(args: &SubnetsArgs, profile: Option<String>, region: Option<String>) -> Result<()> {
    let global = GlobalConfig::read(Path::new(GLOBAL_CONFIG_PATH))?;
    let region = region
        .or_else(|| global.as_ref().map(|g| g.default_region.clone()))
        .unwrap_or_else(|| {
            log::warn!("No region given, using {BOOTSTRAP_REGION}");
            BOOTSTRAP_REGION.to_string()
        });
    let profile = profile.or_else(|| global.map(|g| g.profile));
    let cli = AwsCli::new(region, profile);

    match &args.snapshot {
        Some(dir) => {
            let snapshot =
                SnapshotProvider::read_or_record(dir, &cli, args.instance_family.as_deref())?;
            show(&snapshot, args)
        }
        None => show(&cli, args),
    }
}

fn show<A: NetworkApi + ?Sized>(api: &A, args: &SubnetsArgs) -> Result<()> {
    match &args.vpc_id {
        Some(vpc_id) => {
            let partition = classify(
                api,
                vpc_id,
                args.visibility,
                args.instance_family.as_deref(),
            )?;
            print_partition(vpc_id, &partition);
        }
        None => print_vpcs(&api.list_vpcs()?),
    }
    Ok(())
}

/// Both buckets, or only the requested one.
pub fn classify<A: NetworkApi + ?Sized>(
    api: &A,
    vpc_id: &str,
    visibility: Option<Visibility>,
    instance_family: Option<&str>,
) -> Result<SubnetPartition> {
    let Some(visibility) = visibility else {
        return subnet_partition(api, vpc_id, instance_family);
    };
    let mut only = SubnetPartition::default();
    *only.bucket_mut(visibility) = partition(api, vpc_id, visibility, instance_family)?;
    Ok(only)
}
