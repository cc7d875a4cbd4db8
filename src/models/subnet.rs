//! AWS subnet data model and the public/private partition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Subnet id -> availability zone, ordered by id.
pub type SubnetMap = BTreeMap<String, String>;

/// Represents a subnet as returned by `ec2 describe-subnets`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub subnet_id: String,
    pub availability_zone: String,
    /// VPC owning this subnet.
    pub vpc_id: String,
}

/// Which side of the partition a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn from_public(want_public: bool) -> Self {
        if want_public {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Two disjoint buckets covering every classified subnet of a VPC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubnetPartition {
    pub public: SubnetMap,
    pub private: SubnetMap,
}

impl SubnetPartition {
    /// Bucket for the requested visibility.
    pub fn bucket(&self, visibility: Visibility) -> &SubnetMap {
        match visibility {
            Visibility::Public => &self.public,
            Visibility::Private => &self.private,
        }
    }

    pub fn into_bucket(self, visibility: Visibility) -> SubnetMap {
        match visibility {
            Visibility::Public => self.public,
            Visibility::Private => self.private,
        }
    }

    pub fn bucket_mut(&mut self, visibility: Visibility) -> &mut SubnetMap {
        match visibility {
            Visibility::Public => &mut self.public,
            Visibility::Private => &mut self.private,
        }
    }

    /// All subnet ids regardless of visibility, sorted.
    pub fn all_subnet_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .public
            .keys()
            .chain(self.private.keys())
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.public.len() + self.private.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
