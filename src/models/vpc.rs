//! AWS Virtual Private Cloud (VPC) data model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key/value tag attached to an EC2 resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Represents a VPC as returned by `ec2 describe-vpcs`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    /// Identifier, e.g. `vpc-0a1b2c3d`.
    pub vpc_id: String,
    /// True for the account's default VPC in the region.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Vpc {
    /// Human name: the `Name` tag, else `"Default"` for the default VPC.
    pub fn display_name(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == "Name")
            .map(|t| t.value.as_str())
            .or(if self.is_default { Some("Default") } else { None })
    }
}

impl fmt::Display for Vpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name() {
            Some(name) => write!(f, "{} ({name})", self.vpc_id),
            None => write!(f, "{}", self.vpc_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vpc(is_default: bool, name: Option<&str>) -> Vpc {
        Vpc {
            vpc_id: "vpc-1".to_string(),
            is_default,
            tags: name
                .map(|n| {
                    vec![
                        Tag {
                            key: "Owner".to_string(),
                            value: "ops".to_string(),
                        },
                        Tag {
                            key: "Name".to_string(),
                            value: n.to_string(),
                        },
                    ]
                })
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_display_name_prefers_name_tag() {
        assert_eq!(vpc(true, Some("shared")).display_name(), Some("shared"));
    }

    #[test]
    fn test_display_name_default_vpc() {
        assert_eq!(vpc(true, None).display_name(), Some("Default"));
        assert_eq!(vpc(true, None).to_string(), "vpc-1 (Default)");
    }

    #[test]
    fn test_display_name_unnamed() {
        assert_eq!(vpc(false, None).display_name(), None);
        assert_eq!(vpc(false, None).to_string(), "vpc-1");
    }
}
