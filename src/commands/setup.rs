//! The default command: create an environment and link a new database to it.

use super::prompt::{choose, Prompter};
use crate::aws::{
    list_profiles, AccountApi, AwsCli, DatabaseApi, EnvironmentApi, NetworkApi, SecurityGroupApi,
};
use crate::cli::Cli;
use crate::config::{
    GlobalConfig, ProvisionConfig, BOOTSTRAP_REGION, DB_HOST_TIMEOUT, ENVIRONMENT_MAX_ATTEMPTS,
    GLOBAL_CONFIG_PATH, POLL_INTERVAL,
};
use crate::error::{Error, Result};
use crate::models::environment::ServerTier;
use crate::output::print_vpcs;
use crate::provisioning::{DatabaseInitializer, EnvironmentInitializer, Poll};
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the environment variable holding the database URL.
pub const DATABASE_URL_VARIABLE: &str = "DATABASE_URL";

/// What to set up, once profile, region and application are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupPlan {
    pub application_name: String,
    pub environment_name: Option<String>,
    pub server_tier: ServerTier,
    pub db_only: bool,
    pub no_db: bool,
}

/// How long to wait for new resources.
#[derive(Debug, Clone, Copy)]
pub struct Waits {
    pub environment: Poll,
    pub database: Poll,
}

impl Default for Waits {
    fn default() -> Self {
        Waits {
            environment: Poll::attempts(POLL_INTERVAL, ENVIRONMENT_MAX_ATTEMPTS),
            database: Poll::new(POLL_INTERVAL, DB_HOST_TIMEOUT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    pub environment_name: String,
    pub vpc_id: String,
    pub application_security_group_id: String,
    /// Set when a database was created.
    pub database_url: Option<String>,
}

/// Run the whole flow against the real provider.
pub fn run<P: Prompter + ?Sized>(cli: &Cli, prompter: &P) -> Result<()> {
    let global_path = Path::new(GLOBAL_CONFIG_PATH);
    let global = GlobalConfig::read(global_path)?;
    let config = ProvisionConfig::load(cli.config.as_deref())?;

    // Flags win over the global config file.
    let given_profile = cli
        .profile
        .clone()
        .or_else(|| global.as_ref().map(|g| g.profile.clone()));
    let given_region = cli
        .region
        .clone()
        .or_else(|| global.as_ref().map(|g| g.default_region.clone()));
    let given_application = cli
        .application_name
        .clone()
        .or_else(|| global.as_ref().map(|g| g.application_name.clone()));

    let profile = choose(prompter, "profile", given_profile, list_profiles()?)?;
    let bootstrap = AwsCli::new(BOOTSTRAP_REGION, Some(profile.clone()));
    let region = choose(prompter, "region", given_region, bootstrap.list_regions()?)?;
    let api = AwsCli::new(region.as_str(), Some(profile.clone()));
    let application_name = choose(
        prompter,
        "application",
        given_application,
        api.list_applications()?,
    )?;

    let plan = SetupPlan {
        application_name: application_name.clone(),
        environment_name: cli.environment_name.clone(),
        server_tier: cli.tier,
        db_only: cli.db_only,
        no_db: cli.no_db,
    };
    let outcome = run_setup(&api, prompter, &config, plan, &Waits::default())?;

    if global.is_none() {
        GlobalConfig {
            application_name,
            default_region: region,
            profile,
        }
        .write(global_path)?;
    }
    println!(
        "{} {}",
        "Environment setup complete:".green(),
        outcome.environment_name
    );
    Ok(())
}

/// Create (or reuse, with `db_only`) the environment, then its database.
pub fn run_setup<A, P>(
    api: &A,
    prompter: &P,
    config: &ProvisionConfig,
    mut plan: SetupPlan,
    waits: &Waits,
) -> Result<SetupOutcome>
where
    A: NetworkApi + SecurityGroupApi + DatabaseApi + EnvironmentApi + ?Sized,
    P: Prompter + ?Sized,
{
    if plan.db_only {
        resolve_existing_environment(api, prompter, &mut plan)?;
    }
    let environment_name = match plan.environment_name.clone().filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => prompter.input("Input new environment name (lowercase-with-dashes)")?,
    };
    if environment_name.is_empty() {
        return Err(Error::Config("an environment name is required".to_string()));
    }
    let cname_prefix = if plan.db_only {
        None
    } else {
        Some(prompter.input("Input new CNAME prefix (lowercase-with-dashes)")?)
    };
    let vpc_id = select_vpc(api, prompter)?;

    let environment = EnvironmentInitializer::new(
        api,
        &config.elastic_beanstalk,
        &plan.application_name,
        &environment_name,
        &vpc_id,
    )
    .with_cname_prefix(cname_prefix)
    .with_server_tier(plan.server_tier);

    if !plan.db_only {
        log::info!("Launching EB environment {environment_name}");
        environment.set_up_environment()?;
        log::info!("Waiting for EB environment to finish launching");
    }
    let application_security_group_id = environment.wait_for_environment(&waits.environment)?;
    log::info!("EB environment {} ready", environment_name.green());

    let mut outcome = SetupOutcome {
        environment_name: environment_name.clone(),
        vpc_id: vpc_id.clone(),
        application_security_group_id: application_security_group_id.clone(),
        database_url: None,
    };
    if plan.no_db {
        return Ok(outcome);
    }

    log::info!("Setting up database");
    let database = DatabaseInitializer::new(
        api,
        &config.rds,
        &vpc_id,
        &environment_name,
        &application_security_group_id,
    );
    let database_url = database.create_db(&waits.database)?;
    log::info!("Database ready. Linking database to EB environment.");
    environment.update_environment_variables(&BTreeMap::from([(
        DATABASE_URL_VARIABLE.to_string(),
        database_url.clone(),
    )]))?;
    outcome.database_url = Some(database_url);
    Ok(outcome)
}

/// With `--db-only`, the environment must already exist. Offer to create it
/// otherwise, which drops `db_only`.
fn resolve_existing_environment<A, P>(api: &A, prompter: &P, plan: &mut SetupPlan) -> Result<()>
where
    A: EnvironmentApi + ?Sized,
    P: Prompter + ?Sized,
{
    let mut existing: Vec<String> = api
        .list_environments(&plan.application_name)?
        .into_iter()
        .map(|env| env.environment_name)
        .collect();
    existing.sort();

    let name = match plan.environment_name.clone().filter(|n| !n.is_empty()) {
        Some(name) => name,
        None if existing.is_empty() => {
            prompter.input("Input environment name (lowercase-with-dashes)")?
        }
        None => {
            let index = prompter.select("Select existing environment", &existing)?;
            existing
                .get(index)
                .cloned()
                .ok_or_else(|| Error::Config(format!("invalid environment selection: {index}")))?
        }
    };

    if !existing.contains(&name) {
        let create = prompter.confirm(&format!(
            "Ignore --db-only flag and create new environment named {name}?"
        ))?;
        if !create {
            return Err(Error::not_found("environment", name));
        }
        log::warn!("Environment {name} does not exist, it will be created");
        plan.db_only = false;
    }
    plan.environment_name = Some(name);
    Ok(())
}

fn select_vpc<A, P>(api: &A, prompter: &P) -> Result<String>
where
    A: NetworkApi + ?Sized,
    P: Prompter + ?Sized,
{
    let vpcs = api.list_vpcs()?;
    print_vpcs(&vpcs);
    match vpcs.as_slice() {
        [] => Err(Error::Config("no VPCs in that region".to_string())),
        [vpc] => {
            if prompter.confirm(&format!("Using VPC {vpc}. Continue?"))? {
                Ok(vpc.vpc_id.clone())
            } else {
                Err(Error::Config("cancelled".to_string()))
            }
        }
        _ => {
            let items: Vec<String> = vpcs.iter().map(|vpc| vpc.to_string()).collect();
            let index = prompter.select("Select VPC", &items)?;
            vpcs.get(index)
                .map(|vpc| vpc.vpc_id.clone())
                .ok_or_else(|| Error::Config(format!("invalid VPC selection: {index}")))
        }
    }
}
