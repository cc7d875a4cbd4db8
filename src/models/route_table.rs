//! Route table data model and the public/private classifier.

use serde::{Deserialize, Serialize};

/// IPv4 default route destination.
pub const DEFAULT_ROUTE_CIDR: &str = "0.0.0.0/0";

/// Id prefix of internet gateways. `GatewayId` also carries `local` and
/// virtual private gateways (`vgw-`).
pub const INTERNET_GATEWAY_PREFIX: &str = "igw-";

/// A single route entry of a route table.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    pub destination_cidr_block: Option<String>,
    /// Gateway target: an internet gateway, a virtual private gateway or `local`.
    pub gateway_id: Option<String>,
    pub nat_gateway_id: Option<String>,
}

impl Route {
    /// Default route targeting an internet gateway.
    pub fn is_default_via_internet_gateway(&self) -> bool {
        self.destination_cidr_block.as_deref() == Some(DEFAULT_ROUTE_CIDR)
            && self
                .gateway_id
                .as_deref()
                .is_some_and(|g| g.starts_with(INTERNET_GATEWAY_PREFIX))
    }
}

/// Links a route table to a subnet, or marks it as the VPC's main table.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Association {
    #[serde(default)]
    pub main: bool,
    pub subnet_id: Option<String>,
}

/// Represents a route table as returned by `ec2 describe-route-tables`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RouteTable {
    pub route_table_id: String,
    pub vpc_id: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

impl RouteTable {
    /// A route table is public iff it routes `0.0.0.0/0` through an internet gateway.
    pub fn is_public(&self) -> bool {
        self.routes.iter().any(Route::is_default_via_internet_gateway)
    }
}
