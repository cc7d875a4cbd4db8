//! In-memory provider and scripted prompts used by the unit tests.

use crate::aws::{AccountApi, DatabaseApi, EnvironmentApi, NetworkApi, SecurityGroupApi};
use crate::commands::Prompter;
use crate::error::{Error, Result};
use crate::models::database::{CreateDbInstance, DbInstance, DbSubnetGroup};
use crate::models::environment::{
    CreateEnvironment, EnvironmentDescription, EnvironmentResources, OptionSetting,
};
use crate::models::{Association, Route, RouteTable, Subnet, Vpc, DEFAULT_ROUTE_CIDR};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Default)]
pub(crate) struct FakeAws {
    pub vpcs: Vec<Vpc>,
    pub subnets: Vec<Subnet>,
    pub route_tables: Vec<RouteTable>,
    pub family_zones: BTreeMap<String, BTreeSet<String>>,
    pub fail_route_tables: Cell<bool>,

    pub created_security_groups: RefCell<Vec<(String, String, String)>>,
    pub ingress: RefCell<Vec<(String, u16, String)>>,

    pub db_subnet_groups: RefCell<Vec<DbSubnetGroup>>,
    pub created_db_subnet_groups: RefCell<Vec<(String, String, Vec<String>)>>,
    pub db_instances: RefCell<Vec<DbInstance>>,
    pub created_db_instances: RefCell<Vec<CreateDbInstance>>,
    /// Endpoint given to instances created through the fake.
    pub db_endpoint: Option<String>,
    pub reject_db_instance: Cell<bool>,
    pub describe_db_calls: Cell<u32>,

    pub applications: Vec<String>,
    pub environments: RefCell<Vec<EnvironmentDescription>>,
    pub created_environments: RefCell<Vec<CreateEnvironment>>,
    pub reject_environment: Cell<bool>,
    pub resources: EnvironmentResources,
    pub launch_configuration_groups: Vec<String>,
    pub launch_template_groups: Vec<String>,
    pub updates: RefCell<Vec<(String, String, Vec<OptionSetting>)>>,
    pub regions: Vec<String>,
}

fn route(destination: &str, gateway: Option<&str>) -> Route {
    Route {
        destination_cidr_block: Some(destination.to_string()),
        gateway_id: gateway.map(str::to_string),
        nat_gateway_id: None,
    }
}

fn subnet(subnet_id: &str, zone: &str, vpc_id: &str) -> Subnet {
    Subnet {
        subnet_id: subnet_id.to_string(),
        availability_zone: zone.to_string(),
        vpc_id: vpc_id.to_string(),
    }
}

impl FakeAws {
    /// `vpc-1` with `subnet-a` (z1) on public `rt-pub` and `subnet-b` (z2)
    /// following the private main table `rt-main`.
    pub fn example() -> FakeAws {
        FakeAws {
            vpcs: vec![Vpc {
                vpc_id: "vpc-1".to_string(),
                is_default: true,
                tags: vec![],
            }],
            subnets: vec![subnet("subnet-a", "z1", "vpc-1"), subnet("subnet-b", "z2", "vpc-1")],
            route_tables: vec![
                RouteTable {
                    route_table_id: "rt-pub".to_string(),
                    vpc_id: "vpc-1".to_string(),
                    routes: vec![
                        route("10.0.0.0/16", Some("local")),
                        route(DEFAULT_ROUTE_CIDR, Some("igw-1")),
                    ],
                    associations: vec![Association {
                        main: false,
                        subnet_id: Some("subnet-a".to_string()),
                    }],
                },
                RouteTable {
                    route_table_id: "rt-main".to_string(),
                    vpc_id: "vpc-1".to_string(),
                    routes: vec![route("10.0.0.0/16", Some("local"))],
                    associations: vec![Association {
                        main: true,
                        subnet_id: None,
                    }],
                },
            ],
            family_zones: BTreeMap::from([(
                "t3".to_string(),
                BTreeSet::from(["z1".to_string(), "z2".to_string()]),
            )]),
            db_endpoint: Some("staging-db.abc.us-east-1.rds.amazonaws.com".to_string()),
            applications: vec!["shop".to_string()],
            resources: EnvironmentResources {
                launch_configurations: vec!["awseb-lc".to_string()],
                launch_templates: vec![],
            },
            launch_configuration_groups: vec!["sg-app".to_string()],
            regions: vec!["us-east-1".to_string(), "eu-west-1".to_string()],
            ..Default::default()
        }
    }
}

impl NetworkApi for FakeAws {
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
        if self.fail_route_tables.get() {
            return Err(Error::Upstream("Rate exceeded".to_string()));
        }
        Ok(self.route_tables.clone())
    }

    fn list_instance_family_zones(&self, family: &str) -> Result<BTreeSet<String>> {
        Ok(self.family_zones.get(family).cloned().unwrap_or_default())
    }
}

impl SecurityGroupApi for FakeAws {
    fn create_security_group(
        &self,
        name: &str,
        description: &str,
        vpc_id: &str,
    ) -> Result<String> {
        self.created_security_groups.borrow_mut().push((
            name.to_string(),
            description.to_string(),
            vpc_id.to_string(),
        ));
        Ok(format!("sg-{name}"))
    }

    fn authorize_ingress_from_group(
        &self,
        group_id: &str,
        port: u16,
        source_group_id: &str,
    ) -> Result<()> {
        self.ingress.borrow_mut().push((
            group_id.to_string(),
            port,
            source_group_id.to_string(),
        ));
        Ok(())
    }
}

impl AccountApi for FakeAws {
    fn list_regions(&self) -> Result<Vec<String>> {
        Ok(self.regions.clone())
    }
}

impl DatabaseApi for FakeAws {
    fn list_db_subnet_groups(&self) -> Result<Vec<DbSubnetGroup>> {
        Ok(self.db_subnet_groups.borrow().clone())
    }

    fn create_db_subnet_group(
        &self,
        name: &str,
        description: &str,
        subnet_ids: &[String],
    ) -> Result<()> {
        self.created_db_subnet_groups.borrow_mut().push((
            name.to_string(),
            description.to_string(),
            subnet_ids.to_vec(),
        ));
        Ok(())
    }

    fn list_db_instances(&self) -> Result<Vec<DbInstance>> {
        self.describe_db_calls.set(self.describe_db_calls.get() + 1);
        Ok(self.db_instances.borrow().clone())
    }

    fn create_db_instance(&self, request: &CreateDbInstance) -> Result<()> {
        if self.reject_db_instance.get() {
            return Err(Error::Validation(
                "Invalid type for parameter AllocatedStorage".to_string(),
            ));
        }
        self.created_db_instances.borrow_mut().push(request.clone());
        self.db_instances.borrow_mut().push(DbInstance {
            identifier: request.identifier.clone(),
            endpoint_address: self.db_endpoint.clone(),
        });
        Ok(())
    }
}

impl EnvironmentApi for FakeAws {
    fn list_applications(&self) -> Result<Vec<String>> {
        Ok(self.applications.clone())
    }

    fn list_environments(&self, _application_name: &str) -> Result<Vec<EnvironmentDescription>> {
        Ok(self.environments.borrow().clone())
    }

    fn create_environment(&self, request: &CreateEnvironment) -> Result<()> {
        if self.reject_environment.get() {
            return Err(Error::Validation(
                "No Solution Stack named 'x' found".to_string(),
            ));
        }
        self.created_environments.borrow_mut().push(request.clone());
        self.environments.borrow_mut().push(EnvironmentDescription {
            environment_name: request.environment_name.clone(),
            status: "Ready".to_string(),
        });
        Ok(())
    }

    fn describe_environment_resources(
        &self,
        _environment_name: &str,
    ) -> Result<EnvironmentResources> {
        Ok(self.resources.clone())
    }

    fn launch_configuration_security_groups(&self, _name: &str) -> Result<Vec<String>> {
        Ok(self.launch_configuration_groups.clone())
    }

    fn launch_template_security_groups(&self, _launch_template_id: &str) -> Result<Vec<String>> {
        Ok(self.launch_template_groups.clone())
    }

    fn update_environment(
        &self,
        application_name: &str,
        environment_name: &str,
        option_settings: &[OptionSetting],
    ) -> Result<()> {
        self.updates.borrow_mut().push((
            application_name.to_string(),
            environment_name.to_string(),
            option_settings.to_vec(),
        ));
        Ok(())
    }
}

/// Answers prompts from fixed queues and records every question asked.
#[derive(Default)]
pub(crate) struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<usize>>,
    confirmations: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn with_selections(selections: &[usize]) -> Self {
        ScriptedPrompter::default().selections(selections)
    }

    pub fn inputs(self, inputs: &[&str]) -> Self {
        self.inputs
            .borrow_mut()
            .extend(inputs.iter().map(|s| s.to_string()));
        self
    }

    pub fn selections(self, selections: &[usize]) -> Self {
        self.selections.borrow_mut().extend(selections);
        self
    }

    pub fn confirmations(self, confirmations: &[bool]) -> Self {
        self.confirmations.borrow_mut().extend(confirmations);
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next<T>(&self, queue: &RefCell<VecDeque<T>>, prompt: &str) -> Result<T> {
        self.asked.borrow_mut().push(prompt.to_string());
        queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Config(format!("unexpected prompt: {prompt}")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.next(&self.inputs, prompt)
    }

    fn select(&self, prompt: &str, _items: &[String]) -> Result<usize> {
        self.next(&self.selections, prompt)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.next(&self.confirmations, prompt)
    }
}
