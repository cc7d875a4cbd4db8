//! Output formatting for VPC and subnet data.
//!
//! - [`terminal`] - terminal tables with colors

mod terminal;

pub use terminal::{format_field, partition_rows, print_partition, print_vpcs, vpc_rows};
