//! Elastic Beanstalk calls, plus the autoscaling / launch template lookups
//! needed to find an environment's security group.

use super::api::EnvironmentApi;
use super::cli::{parse_json, AwsCli};
use crate::error::{Error, Result};
use crate::models::environment::{
    CreateEnvironment, EnvironmentDescription, EnvironmentResources, OptionSetting,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Application {
    application_name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeApplications {
    #[serde(default)]
    applications: Vec<Application>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeEnvironments {
    #[serde(default)]
    environments: Vec<EnvironmentDescription>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Named {
    name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct WithId {
    id: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct RawEnvironmentResources {
    #[serde(default)]
    launch_configurations: Vec<Named>,
    #[serde(default)]
    launch_templates: Vec<WithId>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeEnvironmentResources {
    environment_resources: RawEnvironmentResources,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct LaunchConfiguration {
    #[serde(default)]
    security_groups: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeLaunchConfigurations {
    #[serde(default)]
    launch_configurations: Vec<LaunchConfiguration>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeLaunchTemplateVersions {
    #[serde(default)]
    launch_template_versions: Vec<Value>,
}

pub fn parse_environment_resources(output: &str) -> Result<EnvironmentResources> {
    let raw: DescribeEnvironmentResources =
        parse_json("elasticbeanstalk describe-environment-resources", output)?;
    Ok(EnvironmentResources {
        launch_configurations: raw
            .environment_resources
            .launch_configurations
            .into_iter()
            .map(|lc| lc.name)
            .collect(),
        launch_templates: raw
            .environment_resources
            .launch_templates
            .into_iter()
            .map(|lt| lt.id)
            .collect(),
    })
}

/// Security groups of the first launch template version, either set directly
/// or on its first network interface.
pub fn parse_launch_template_security_groups(output: &str) -> Result<Vec<String>> {
    let response: DescribeLaunchTemplateVersions =
        parse_json("ec2 describe-launch-template-versions", output)?;
    let Some(data) = response
        .launch_template_versions
        .first()
        .and_then(|v| v.get("LaunchTemplateData"))
    else {
        return Ok(vec![]);
    };
    let groups = data
        .get("SecurityGroupIds")
        .or_else(|| data.pointer("/NetworkInterfaces/0/Groups"))
        .and_then(Value::as_array)
        .map(|groups| {
            groups
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Ok(groups)
}

fn to_json<T: Serialize + ?Sized>(what: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Json {
        what: what.to_string(),
        path: String::new(),
        message: e.to_string(),
    })
}

/// Arguments for `elasticbeanstalk create-environment`.
///
/// No version label is passed, so the environment starts with the sample app.
pub fn create_environment_args(request: &CreateEnvironment) -> Result<Vec<String>> {
    let tier = to_json("tier", &request.tier)?;
    let mut args = vec![
        "--application-name".to_string(),
        request.application_name.clone(),
        "--environment-name".to_string(),
        request.environment_name.clone(),
        "--tier".to_string(),
        tier,
        "--solution-stack-name".to_string(),
        request.solution_stack_name.clone(),
        "--option-settings".to_string(),
        to_json("option settings", &request.option_settings)?,
    ];
    if let Some(prefix) = &request.cname_prefix {
        args.extend(["--cname-prefix".to_string(), prefix.clone()]);
    }
    Ok(args)
}

impl EnvironmentApi for AwsCli {
    fn list_applications(&self) -> Result<Vec<String>> {
        let response: DescribeApplications =
            self.call_json("elasticbeanstalk", "describe-applications", &[])?;
        Ok(response
            .applications
            .into_iter()
            .map(|a| a.application_name)
            .collect())
    }

    fn list_environments(&self, application_name: &str) -> Result<Vec<EnvironmentDescription>> {
        let response: DescribeEnvironments = self.call_json(
            "elasticbeanstalk",
            "describe-environments",
            &[
                "--application-name".to_string(),
                application_name.to_string(),
                "--no-include-deleted".to_string(),
            ],
        )?;
        Ok(response.environments)
    }

    fn create_environment(&self, request: &CreateEnvironment) -> Result<()> {
        self.call(
            "elasticbeanstalk",
            "create-environment",
            &create_environment_args(request)?,
        )?;
        Ok(())
    }

    fn describe_environment_resources(
        &self,
        environment_name: &str,
    ) -> Result<EnvironmentResources> {
        parse_environment_resources(&self.call(
            "elasticbeanstalk",
            "describe-environment-resources",
            &[
                "--environment-name".to_string(),
                environment_name.to_string(),
            ],
        )?)
    }

    fn launch_configuration_security_groups(&self, name: &str) -> Result<Vec<String>> {
        let response: DescribeLaunchConfigurations = self.call_json(
            "autoscaling",
            "describe-launch-configurations",
            &[
                "--launch-configuration-names".to_string(),
                name.to_string(),
            ],
        )?;
        Ok(response
            .launch_configurations
            .into_iter()
            .next()
            .map(|lc| lc.security_groups)
            .unwrap_or_default())
    }

    fn launch_template_security_groups(&self, launch_template_id: &str) -> Result<Vec<String>> {
        parse_launch_template_security_groups(&self.call(
            "ec2",
            "describe-launch-template-versions",
            &[
                "--launch-template-id".to_string(),
                launch_template_id.to_string(),
                "--versions".to_string(),
                "$Latest".to_string(),
            ],
        )?)
    }

    fn update_environment(
        &self,
        application_name: &str,
        environment_name: &str,
        option_settings: &[OptionSetting],
    ) -> Result<()> {
        self.call(
            "elasticbeanstalk",
            "update-environment",
            &[
                "--application-name".to_string(),
                application_name.to_string(),
                "--environment-name".to_string(),
                environment_name.to_string(),
                "--option-settings".to_string(),
                to_json("option settings", option_settings)?,
            ],
        )?;
        Ok(())
    }
}
