//! Elastic Beanstalk environment creation.

use super::wait::Poll;
use crate::aws::{EnvironmentApi, NetworkApi};
use crate::config::BeanstalkConfig;
use crate::error::{Error, Result};
use crate::models::environment::{
    CreateEnvironment, OptionSetting, ServerTier, ENVIRONMENT_VARIABLES_NAMESPACE,
};
use crate::models::{SubnetMap, Visibility};
use crate::processing::partition;
use itertools::Itertools;
use std::collections::BTreeMap;

const VPC: &str = "aws:ec2:vpc";
const ENVIRONMENT: &str = "aws:elasticbeanstalk:environment";
const LOAD_BALANCER: &str = "aws:elb:loadbalancer";
const AUTOSCALING_GROUP: &str = "aws:autoscaling:asg";
const MANAGED_ACTIONS: &str = "aws:elasticbeanstalk:managedactions";

/// Option settings for a new environment in `vpc_id`.
///
/// Options without a configured value are left out. `ELBSubnets` is only set
/// when load balancer subnets are given.
pub fn option_settings(
    config: &BeanstalkConfig,
    vpc_id: &str,
    instance_subnets: &SubnetMap,
    load_balancer_subnets: Option<&SubnetMap>,
) -> Vec<OptionSetting> {
    let mut settings = Vec::new();
    if let Some(n) = config.num_processes {
        settings.push(OptionSetting::new(
            "aws:elasticbeanstalk:container:python",
            "NumProcesses",
            n.to_string(),
        ));
    }
    if let Some(types) = &config.instance_types {
        settings.push(OptionSetting::new("aws:ec2:instances", "InstanceTypes", types));
    }
    if let Some(profile) = &config.iam_instance_profile {
        settings.push(OptionSetting::new(
            "aws:autoscaling:launchconfiguration",
            "IamInstanceProfile",
            profile,
        ));
    }
    if let Some(proxy) = &config.proxy_server {
        settings.push(OptionSetting::new(
            "aws:elasticbeanstalk:environment:proxy",
            "ProxyServer",
            proxy,
        ));
    }
    settings.push(OptionSetting::new(VPC, "VPCId", vpc_id));
    if let Some(subnets) = load_balancer_subnets {
        settings.push(OptionSetting::new(VPC, "ELBSubnets", subnets.keys().join(",")));
    }
    settings.push(OptionSetting::new(
        VPC,
        "Subnets",
        instance_subnets.keys().join(","),
    ));
    settings.push(OptionSetting::new(
        VPC,
        "AssociatePublicIpAddress",
        config.associate_public_ip_address.to_string(),
    ));

    match &config.load_balancer {
        Some(lb) => {
            settings.push(OptionSetting::new(ENVIRONMENT, "EnvironmentType", "LoadBalanced"));
            settings.push(OptionSetting::new(
                ENVIRONMENT,
                "LoadBalancerType",
                &lb.load_balancer_type,
            ));
            settings.push(OptionSetting::new(LOAD_BALANCER, "LoadBalancerHTTPPort", "80"));
            settings.push(OptionSetting::new(
                AUTOSCALING_GROUP,
                "MinSize",
                lb.min_size.to_string(),
            ));
            settings.push(OptionSetting::new(
                AUTOSCALING_GROUP,
                "MaxSize",
                lb.max_size.to_string(),
            ));
            if let Some(scheme) = &lb.elb_scheme {
                settings.push(OptionSetting::new(VPC, "ELBScheme", scheme));
            }
            // Replaced by the application's own health check after the first deploy.
            settings.push(OptionSetting::new("aws:elb:healthcheck", "Target", "/"));
        }
        None => {
            settings.push(OptionSetting::new(ENVIRONMENT, "EnvironmentType", "SingleInstance"));
        }
    }

    match &config.managed_updates {
        Some(updates) => {
            settings.push(OptionSetting::new(MANAGED_ACTIONS, "ManagedActionsEnabled", "true"));
            settings.push(OptionSetting::new(
                MANAGED_ACTIONS,
                "PreferredStartTime",
                &updates.preferred_start_time,
            ));
            settings.push(OptionSetting::new(
                MANAGED_ACTIONS,
                "ServiceRoleForManagedUpdates",
                &updates.service_role_for_managed_updates,
            ));
            settings.push(OptionSetting::new(
                "aws:elasticbeanstalk:managedactions:platformupdate",
                "UpdateLevel",
                &updates.update_level,
            ));
        }
        None => {
            settings.push(OptionSetting::new(MANAGED_ACTIONS, "ManagedActionsEnabled", "false"));
        }
    }

    if let Some(certificate) = config
        .load_balancer
        .as_ref()
        .and_then(|lb| lb.ssl_certificate_id.as_ref())
    {
        settings.push(OptionSetting::new(LOAD_BALANCER, "LoadBalancerHTTPSPort", "443"));
        settings.push(OptionSetting::new(LOAD_BALANCER, "SSLCertificateId", certificate));
    }
    settings
}

/// Creates one environment of an existing application and waits for it.
pub struct EnvironmentInitializer<'a, A: ?Sized> {
    api: &'a A,
    config: &'a BeanstalkConfig,
    application_name: String,
    environment_name: String,
    cname_prefix: Option<String>,
    vpc_id: String,
    server_tier: ServerTier,
}

impl<'a, A> EnvironmentInitializer<'a, A>
where
    A: NetworkApi + EnvironmentApi + ?Sized,
{
    pub fn new(
        api: &'a A,
        config: &'a BeanstalkConfig,
        application_name: &str,
        environment_name: &str,
        vpc_id: &str,
    ) -> Self {
        EnvironmentInitializer {
            api,
            config,
            application_name: application_name.to_string(),
            environment_name: environment_name.to_string(),
            cname_prefix: None,
            vpc_id: vpc_id.to_string(),
            server_tier: ServerTier::default(),
        }
    }

    pub fn with_cname_prefix(mut self, cname_prefix: Option<String>) -> Self {
        self.cname_prefix = cname_prefix.filter(|p| !p.is_empty());
        self
    }

    pub fn with_server_tier(mut self, server_tier: ServerTier) -> Self {
        self.server_tier = server_tier;
        self
    }

    pub fn environment_name(&self) -> &str {
        &self.environment_name
    }

    /// Subnets for the instances, restricted to zones offering the
    /// configured instance family.
    pub fn instance_subnets(&self) -> Result<SubnetMap> {
        let subnets = partition(
            self.api,
            &self.vpc_id,
            Visibility::from_public(self.config.instance_public_subnets),
            self.config.instance_family(),
        )?;
        if subnets.is_empty() {
            return Err(Error::NoValidSubnets("instances"));
        }
        Ok(subnets)
    }

    /// Subnets for the load balancer, or `None` without a load balancer.
    pub fn load_balancer_subnets(&self) -> Result<Option<SubnetMap>> {
        let Some(lb) = &self.config.load_balancer else {
            return Ok(None);
        };
        let subnets = partition(
            self.api,
            &self.vpc_id,
            Visibility::from_public(lb.public_subnets),
            None,
        )?;
        if subnets.is_empty() {
            return Err(Error::NoValidSubnets("the load balancer"));
        }
        Ok(Some(subnets))
    }

    /// Request `CreateEnvironment`. The sample application is deployed.
    pub fn set_up_environment(&self) -> Result<()> {
        let instance_subnets = self.instance_subnets()?;
        log::info!(
            "Using the following subnets for instances: {}",
            instance_subnets.keys().join(", ")
        );
        let load_balancer_subnets = self.load_balancer_subnets()?;
        if let Some(subnets) = &load_balancer_subnets {
            log::info!(
                "Using the following subnets for the load balancer: {}",
                subnets.keys().join(", ")
            );
        }

        let request = CreateEnvironment {
            application_name: self.application_name.clone(),
            environment_name: self.environment_name.clone(),
            cname_prefix: self.cname_prefix.clone(),
            tier: self.server_tier.tier(),
            solution_stack_name: self.config.solution_stack_name.clone(),
            option_settings: option_settings(
                self.config,
                &self.vpc_id,
                &instance_subnets,
                load_balancer_subnets.as_ref(),
            ),
        };
        log::info!(
            "Creating environment {} in application {}",
            request.environment_name,
            request.application_name
        );
        self.api.create_environment(&request).inspect_err(|e| {
            if e.is_validation() {
                for (i, setting) in request.option_settings.iter().enumerate() {
                    log::error!("{i} {setting}");
                }
            }
        })
    }

    /// Block until the environment is `Ready`, then return its security group.
    pub fn wait_for_environment(&self, poll: &Poll) -> Result<String> {
        let what = format!("environment {}", self.environment_name);
        let ready = poll.until(&what, || {
            Ok(self
                .api
                .list_environments(&self.application_name)?
                .into_iter()
                .find(|env| env.environment_name == self.environment_name && env.is_ready()))
        })?;
        if ready.is_none() {
            return Err(Error::Timeout {
                what,
                waited: poll.budget(),
            });
        }
        log::info!("Environment {} is ready", self.environment_name);
        self.security_group()
    }

    /// First security group of the environment's launch configuration, or of
    /// its launch template when it has no launch configuration.
    pub fn security_group(&self) -> Result<String> {
        let resources = self
            .api
            .describe_environment_resources(&self.environment_name)?;
        let groups = match (
            resources.launch_configurations.first(),
            resources.launch_templates.first(),
        ) {
            (Some(name), _) => self.api.launch_configuration_security_groups(name)?,
            (None, Some(id)) => self.api.launch_template_security_groups(id)?,
            (None, None) => vec![],
        };
        let group = groups
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found("security group of environment", &self.environment_name))?;
        log::info!("Application security group: {group}");
        Ok(group)
    }

    /// Set environment variables on the environment.
    pub fn update_environment_variables(&self, variables: &BTreeMap<String, String>) -> Result<()> {
        let settings: Vec<OptionSetting> = variables
            .iter()
            .map(|(name, value)| OptionSetting::new(ENVIRONMENT_VARIABLES_NAMESPACE, name, value))
            .collect();
        log::info!(
            "Updating environment variables of {}: {}",
            self.environment_name,
            variables.keys().join(", ")
        );
        self.api
            .update_environment(&self.application_name, &self.environment_name, &settings)
    }
}
