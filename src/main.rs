use clap::Parser;
use eb_create_environment::cli::{Cli, Command};
use eb_create_environment::commands::{self, TerminalPrompter};
use eb_create_environment::config::DEFAULT_CONFIG_YAML;
use eb_create_environment::logging;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    logging::init()?;
    let cli = Cli::parse();
    log::info!("#Start main()");

    if cli.print_default_config {
        print!("{DEFAULT_CONFIG_YAML}");
        return Ok(());
    }

    match &cli.command {
        Some(Command::Subnets(args)) => {
            commands::subnets::run(args, cli.profile.clone(), cli.region.clone())?
        }
        None => commands::setup::run(&cli, &TerminalPrompter)?,
    }
    Ok(())
}
