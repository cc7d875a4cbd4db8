//! CLI argument parsing with clap derive

use crate::models::environment::ServerTier;
use crate::models::Visibility;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Set up linked Elastic Beanstalk and RDS instances
#[derive(Parser, Debug)]
#[command(name = "eb-create-environment", version)]
pub struct Cli {
    /// Provisioning config file (defaults are built in)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Elastic Beanstalk application name
    #[arg(short, long, alias = "application_name")]
    pub application_name: Option<String>,

    /// Elastic Beanstalk environment name
    #[arg(short, long, alias = "environment_name")]
    pub environment_name: Option<String>,

    /// AWS profile from your credential file
    #[arg(short, long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region
    #[arg(short, long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Environment tier
    #[arg(long, value_enum, default_value_t)]
    pub tier: ServerTier,

    /// Skip setup of the environment, which must exist already
    #[arg(long, conflicts_with = "no_db")]
    pub db_only: bool,

    /// Skip setup of the database
    #[arg(long)]
    pub no_db: bool,

    /// Print the default provisioning config and exit
    #[arg(long)]
    pub print_default_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show which subnets of a VPC are public and which are private
    Subnets(SubnetsArgs),
}

#[derive(Args, Debug)]
pub struct SubnetsArgs {
    /// VPC to classify; lists the VPCs of the region when omitted
    pub vpc_id: Option<String>,

    /// Only show one side of the partition
    #[arg(long, value_enum)]
    pub visibility: Option<Visibility>,

    /// Keep only subnets in zones offering this instance family (e.g. `t3`)
    #[arg(long)]
    pub instance_family: Option<String>,

    /// Read the network from this snapshot directory, recording it first if empty
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}
