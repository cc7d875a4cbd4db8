//! Terminal output utilities.
//!
//! Provides formatting helpers and the tables printed by the `subnets` command.

use crate::models::{SubnetPartition, Visibility, Vpc};
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

const ID_WIDTH: usize = 26;
const ZONE_WIDTH: usize = 14;
const VISIBILITY_WIDTH: usize = 10;

/// One row per VPC: id, default flag and `Name` tag.
pub fn vpc_rows(vpcs: &[Vpc]) -> Vec<String> {
    vpcs.iter()
        .map(|vpc| {
            [
                format_field(&vpc.vpc_id, ID_WIDTH),
                format_field(if vpc.is_default { "default" } else { "" }, VISIBILITY_WIDTH),
                format_field(vpc.display_name().unwrap_or(""), 0),
            ]
            .join(",")
        })
        .collect()
}

/// One row per subnet, public first, each bucket ordered by subnet id.
pub fn partition_rows(partition: &SubnetPartition) -> Vec<String> {
    [Visibility::Public, Visibility::Private]
        .into_iter()
        .flat_map(move |visibility| {
            partition
                .bucket(visibility)
                .iter()
                .map(move |(subnet_id, zone)| {
                    [
                        format_field(visibility, VISIBILITY_WIDTH),
                        format_field(subnet_id, ID_WIDTH),
                        format_field(zone, ZONE_WIDTH),
                    ]
                    .join(",")
                })
        })
        .collect()
}

pub fn print_vpcs(vpcs: &[Vpc]) {
    println!("{}", "Current VPCs:".bold());
    for row in vpc_rows(vpcs) {
        println!("{row}");
    }
}

pub fn print_partition(vpc_id: &str, partition: &SubnetPartition) {
    println!(
        "{} {} ({} public, {} private)",
        "Subnets of".bold(),
        vpc_id.cyan(),
        partition.public.len().to_string().green(),
        partition.private.len().to_string().yellow()
    );
    println!(
        "{}",
        [
            format_field("visibility", VISIBILITY_WIDTH),
            format_field("subnet_id", ID_WIDTH),
            format_field("zone", ZONE_WIDTH),
        ]
        .iter()
        .join(",")
    );
    for row in partition_rows(partition) {
        println!("{row}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_partition_rows_public_first() {
        let partition = SubnetPartition {
            public: [("subnet-c".to_string(), "z1".to_string())].into(),
            private: [
                ("subnet-b".to_string(), "z2".to_string()),
                ("subnet-a".to_string(), "z1".to_string()),
            ]
            .into(),
        };
        let rows = partition_rows(&partition);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("\"public\"") && rows[0].contains("\"subnet-c\""));
        assert!(rows[1].contains("\"private\"") && rows[1].contains("\"subnet-a\""));
        assert!(rows[2].contains("\"subnet-b\""));
    }

    #[test]
    fn test_vpc_rows() {
        let vpcs = vec![Vpc {
            vpc_id: "vpc-1".to_string(),
            is_default: false,
            tags: vec![Tag {
                key: "Name".to_string(),
                value: "app".to_string(),
            }],
        }];
        let rows = vpc_rows(&vpcs);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].ends_with(",\"app\""));
        assert!(rows[0].contains("\"vpc-1\""));
    }
}
