//! RDS database creation for an environment.

use super::password::generate_secure_password;
use super::wait::Poll;
use crate::aws::{DatabaseApi, NetworkApi, SecurityGroupApi};
use crate::config::{RdsConfig, PASSWORD_LENGTH};
use crate::error::{Error, Result};
use crate::models::database::CreateDbInstance;
use crate::processing::subnet_partition;

/// Database engines with a parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Postgres,
}

/// Creates the database of one environment and builds its connection URL.
pub struct DatabaseInitializer<'a, A: ?Sized> {
    api: &'a A,
    config: &'a RdsConfig,
    engine: Engine,
    vpc_id: String,
    environment_name: String,
    application_security_group_id: String,
    password: String,
}

impl<'a, A> DatabaseInitializer<'a, A>
where
    A: NetworkApi + SecurityGroupApi + DatabaseApi + ?Sized,
{
    pub fn new(
        api: &'a A,
        config: &'a RdsConfig,
        vpc_id: &str,
        environment_name: &str,
        application_security_group_id: &str,
    ) -> Self {
        DatabaseInitializer {
            api,
            config,
            engine: Engine::Postgres,
            vpc_id: vpc_id.to_string(),
            environment_name: environment_name.to_string(),
            application_security_group_id: application_security_group_id.to_string(),
            password: generate_secure_password(PASSWORD_LENGTH),
        }
    }

    /// `{environment}-db`, used for the instance and its security group.
    pub fn identifier(&self) -> String {
        format!("{}-db", self.environment_name)
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    fn port(&self) -> u16 {
        match self.engine {
            Engine::Postgres => self.config.postgres.port,
        }
    }

    /// Security group admitting the application's group on the database port.
    pub fn create_db_security_group(&self) -> Result<String> {
        let name = self.identifier();
        let group_id = self.api.create_security_group(
            &name,
            &format!("Database security group for {}", self.environment_name),
            &self.vpc_id,
        )?;
        self.api.authorize_ingress_from_group(
            &group_id,
            self.port(),
            &self.application_security_group_id,
        )?;
        Ok(group_id)
    }

    /// First existing DB subnet group of the VPC.
    pub fn db_subnet_group(&self) -> Result<Option<String>> {
        Ok(self
            .api
            .list_db_subnet_groups()?
            .into_iter()
            .find(|group| group.vpc_id == self.vpc_id)
            .map(|group| group.name))
    }

    /// `default-{vpc}` over every subnet of the VPC, public and private.
    pub fn create_db_subnet_group(&self) -> Result<String> {
        let subnet_ids = subnet_partition(self.api, &self.vpc_id, None)?.all_subnet_ids();
        if subnet_ids.is_empty() {
            return Err(Error::NoValidSubnets("the database subnet group"));
        }
        let name = format!("default-{}", self.vpc_id);
        log::info!(
            "Creating DB subnet group {name} with {} subnet(s)",
            subnet_ids.len()
        );
        self.api.create_db_subnet_group(
            &name,
            &format!("All subnets for {}", self.vpc_id),
            &subnet_ids,
        )?;
        Ok(name)
    }

    /// Create the instance, wait for its host and return the connection URL.
    ///
    /// The URL has an empty host when the database did not report one in time.
    pub fn create_db(&self, poll: &Poll) -> Result<String> {
        let security_group_id = self.create_db_security_group()?;
        let db_subnet_group_name = match self.db_subnet_group()? {
            Some(name) => {
                log::info!("Using existing DB subnet group {name}");
                name
            }
            None => self.create_db_subnet_group()?,
        };
        let request = CreateDbInstance {
            identifier: self.identifier(),
            master_password: self.password.clone(),
            vpc_security_group_ids: vec![security_group_id],
            db_subnet_group_name,
            params: self.config.clone(),
        };
        log::info!("Creating database {}", request.identifier);
        self.api.create_db_instance(&request).inspect_err(|e| {
            if e.is_validation() {
                log::error!("{:#?}", request.params);
            }
        })?;
        let host = self.host_from_response(poll)?;
        Ok(self.db_url(&host))
    }

    /// Poll for the instance's endpoint address; empty on timeout.
    pub fn host_from_response(&self, poll: &Poll) -> Result<String> {
        let identifier = self.identifier();
        let host = poll.until(&format!("database {identifier}"), || {
            Ok(self
                .api
                .list_db_instances()?
                .into_iter()
                .find(|db| db.identifier == identifier)
                .and_then(|db| db.endpoint_address))
        })?;
        Ok(host.unwrap_or_default())
    }

    pub fn db_url(&self, host: &str) -> String {
        match self.engine {
            Engine::Postgres => format!(
                "postgres://{user}:{password}@{host}:{port}/{db}?sslmode=require",
                user = self.config.master_username,
                password = self.password,
                port = self.port(),
                db = self.config.postgres.db_name,
            ),
        }
    }
}
