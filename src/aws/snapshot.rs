//! Recorded network responses.
//!
//! A snapshot directory holds the raw JSON output of `describe-vpcs`,
//! `describe-subnets`, `describe-route-tables` and, optionally,
//! `describe-instance-type-offerings`. It lets the subnet classification be
//! rerun offline against exactly what the provider returned.

use super::api::NetworkApi;
use super::cli::AwsCli;
use super::ec2::{
    parse_instance_type_offerings, parse_route_tables, parse_subnets, parse_vpcs,
    zones_offering_family, InstanceTypeOffering,
};
use crate::error::{Error, Result};
use crate::models::{RouteTable, Subnet, Vpc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const VPCS_FILE: &str = "vpcs.json";
const SUBNETS_FILE: &str = "subnets.json";
const ROUTE_TABLES_FILE: &str = "route_tables.json";
const OFFERINGS_FILE: &str = "instance_type_offerings.json";

/// Read-only [`NetworkApi`] over a snapshot directory.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    dir: PathBuf,
    vpcs: Vec<Vpc>,
    subnets: Vec<Subnet>,
    route_tables: Vec<RouteTable>,
    offerings: Option<Vec<InstanceTypeOffering>>,
}

impl SnapshotProvider {
    /// Read a snapshot directory.
    pub fn read(dir: &Path) -> Result<SnapshotProvider> {
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "snapshot directory does not exist: {}",
                dir.display()
            )));
        }
        log::info!("Reading network snapshot: {}", dir.display());
        let offerings_path = dir.join(OFFERINGS_FILE);
        let offerings = if offerings_path.exists() {
            Some(parse_instance_type_offerings(&std::fs::read_to_string(
                offerings_path,
            )?)?)
        } else {
            None
        };
        Ok(SnapshotProvider {
            dir: dir.to_path_buf(),
            vpcs: parse_vpcs(&read_file(dir, VPCS_FILE)?)?,
            subnets: parse_subnets(&read_file(dir, SUBNETS_FILE)?)?,
            route_tables: parse_route_tables(&read_file(dir, ROUTE_TABLES_FILE)?)?,
            offerings,
        })
    }

    /// Read the snapshot in `dir`, or record one from `cli` when `dir` has none.
    ///
    /// Instance type offerings are only recorded when `instance_family` is given.
    pub fn read_or_record(
        dir: &Path,
        cli: &AwsCli,
        instance_family: Option<&str>,
    ) -> Result<SnapshotProvider> {
        if dir.join(VPCS_FILE).exists() {
            return Self::read(dir);
        }
        log::warn!("Snapshot not found, recording to: {}", dir.display());
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(VPCS_FILE), cli.describe_vpcs_raw()?)?;
        std::fs::write(dir.join(SUBNETS_FILE), cli.describe_subnets_raw(None)?)?;
        std::fs::write(
            dir.join(ROUTE_TABLES_FILE),
            cli.describe_route_tables_raw()?,
        )?;
        if let Some(family) = instance_family {
            std::fs::write(
                dir.join(OFFERINGS_FILE),
                cli.describe_instance_type_offerings_raw(family)?,
            )?;
        }
        Self::read(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn read_file(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))
}

impl NetworkApi for SnapshotProvider {
    fn list_vpcs(&self) -> Result<Vec<Vpc>> {
        Ok(self.vpcs.clone())
    }

    fn list_subnets(&self, vpc_id: &str) -> Result<Vec<Subnet>> {
        Ok(self
            .subnets
            .iter()
            .filter(|s| s.vpc_id == vpc_id)
            .cloned()
            .collect())
    }

    fn list_route_tables(&self) -> Result<Vec<RouteTable>> {
        Ok(self.route_tables.clone())
    }

    fn list_instance_family_zones(&self, family: &str) -> Result<BTreeSet<String>> {
        let offerings = self.offerings.as_ref().ok_or_else(|| {
            Error::Config(format!(
                "snapshot {} has no {OFFERINGS_FILE}",
                self.dir.display()
            ))
        })?;
        Ok(zones_offering_family(offerings, family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SNAPSHOT: &str = "src/tests/test_data/snapshot_01";

    #[test]
    fn test_read_snapshot() {
        let snapshot = SnapshotProvider::read(Path::new(TEST_SNAPSHOT)).expect("snapshot");
        assert_eq!(snapshot.list_vpcs().expect("vpcs").len(), 2);
        assert_eq!(snapshot.list_subnets("vpc-1").expect("subnets").len(), 4);
        assert_eq!(snapshot.list_subnets("vpc-2").expect("subnets").len(), 2);
        assert!(snapshot.list_subnets("vpc-9").expect("subnets").is_empty());
        assert_eq!(snapshot.list_route_tables().expect("tables").len(), 5);
        assert_eq!(
            snapshot
                .list_instance_family_zones("t3")
                .expect("zones")
                .len(),
            2
        );
    }

    #[test]
    fn test_read_missing_dir() {
        let err = SnapshotProvider::read(Path::new("src/tests/test_data/no_such_snapshot"))
            .expect_err("missing");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_read_without_offerings() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in [VPCS_FILE, SUBNETS_FILE, ROUTE_TABLES_FILE] {
            std::fs::copy(Path::new(TEST_SNAPSHOT).join(name), dir.path().join(name))
                .expect("copy fixture");
        }
        let snapshot = SnapshotProvider::read(dir.path()).expect("snapshot");
        assert!(matches!(
            snapshot.list_instance_family_zones("t3"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_read_or_record_prefers_existing() {
        // The CLI is never invoked when the snapshot already exists.
        let cli = AwsCli::new("us-east-1", Some("unused".to_string()));
        let snapshot = SnapshotProvider::read_or_record(Path::new(TEST_SNAPSHOT), &cli, Some("t3"))
            .expect("snapshot");
        assert_eq!(snapshot.dir(), Path::new(TEST_SNAPSHOT));
    }
}
