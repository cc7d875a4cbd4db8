//! Integration tests for eb-create-environment
//!
//! These tests classify the recorded network in the test snapshot through the
//! public API, the same way the `subnets` command does.

use eb_create_environment::aws::{NetworkApi, SnapshotProvider};
use eb_create_environment::{partition, subnet_partition, Error, Visibility};
use std::collections::BTreeSet;
use std::path::Path;

const SNAPSHOT: &str = "src/tests/test_data/snapshot_01";

fn snapshot() -> SnapshotProvider {
    SnapshotProvider::read(Path::new(SNAPSHOT)).expect("Failed to read snapshot")
}

fn ids(map: &eb_create_environment::SubnetMap) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn test_partition_both_visibilities() {
    let api = snapshot();
    let public = partition(&api, "vpc-1", Visibility::Public, None).expect("public");
    let private = partition(&api, "vpc-1", Visibility::Private, None).expect("private");
    assert_eq!(ids(&public), vec!["subnet-a", "subnet-c"]);
    assert_eq!(ids(&private), vec!["subnet-b", "subnet-d"]);
    assert_eq!(public.get("subnet-c").map(String::as_str), Some("us-east-1c"));
}

#[test]
fn test_public_main_table() {
    let api = snapshot();
    let partition = subnet_partition(&api, "vpc-2", None).expect("partition");
    assert_eq!(ids(&partition.public), vec!["subnet-x"]);
    assert_eq!(ids(&partition.private), vec!["subnet-y"]);
}

#[test]
fn test_partition_is_disjoint_and_covers_the_vpc() {
    let api = snapshot();
    for vpc in api.list_vpcs().expect("vpcs") {
        let partition = subnet_partition(&api, &vpc.vpc_id, None).expect("partition");
        let public: BTreeSet<&String> = partition.public.keys().collect();
        let private: BTreeSet<&String> = partition.private.keys().collect();
        assert!(public.is_disjoint(&private), "{} overlaps", vpc.vpc_id);

        let all: BTreeSet<String> = api
            .list_subnets(&vpc.vpc_id)
            .expect("subnets")
            .into_iter()
            .map(|s| s.subnet_id)
            .collect();
        assert_eq!(
            partition.all_subnet_ids().into_iter().collect::<BTreeSet<_>>(),
            all
        );
    }
}

#[test]
fn test_family_filter_only_removes_subnets() {
    let api = snapshot();
    let unfiltered = subnet_partition(&api, "vpc-1", None).expect("unfiltered");
    let filtered = subnet_partition(&api, "vpc-1", Some("t3")).expect("filtered");
    assert!(filtered.public.keys().all(|id| unfiltered.public.contains_key(id)));
    assert!(filtered.private.keys().all(|id| unfiltered.private.contains_key(id)));
    assert_eq!(ids(&filtered.public), vec!["subnet-a"]);
    assert_eq!(ids(&filtered.private), vec!["subnet-b", "subnet-d"]);

    let none = subnet_partition(&api, "vpc-1", Some("c7g")).expect("no zones");
    assert!(none.is_empty());
}

#[test]
fn test_partition_is_deterministic() {
    let api = snapshot();
    let first = subnet_partition(&api, "vpc-1", Some("t3")).expect("first");
    let second = subnet_partition(&api, "vpc-1", Some("t3")).expect("second");
    assert_eq!(first, second);
}

#[test]
fn test_unknown_vpc() {
    let err = partition(&snapshot(), "vpc-missing", Visibility::Public, None)
        .expect_err("unknown vpc");
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.to_string(), "VPC not found: vpc-missing");
}
