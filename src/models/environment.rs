//! Elastic Beanstalk request and response shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace holding the environment variables of an environment.
pub const ENVIRONMENT_VARIABLES_NAMESPACE: &str = "aws:elasticbeanstalk:application:environment";

/// One `(namespace, option name) = value` configuration option.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct OptionSetting {
    pub namespace: String,
    pub option_name: String,
    pub value: String,
}

impl OptionSetting {
    pub fn new(namespace: &str, option_name: &str, value: impl Into<String>) -> Self {
        OptionSetting {
            namespace: namespace.to_string(),
            option_name: option_name.to_string(),
            value: value.into(),
        }
    }
}

impl fmt::Display for OptionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}={}", self.namespace, self.option_name, self.value)
    }
}

/// Environment tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ServerTier {
    #[default]
    Web,
    Worker,
}

/// Tier structure sent to `create-environment`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Tier {
    pub name: String,
    #[serde(rename = "Type")]
    pub tier_type: String,
}

impl ServerTier {
    pub fn tier(self) -> Tier {
        let (name, tier_type) = match self {
            ServerTier::Web => ("WebServer", "Standard"),
            ServerTier::Worker => ("Worker", "SQS/HTTP"),
        };
        Tier {
            name: name.to_string(),
            tier_type: tier_type.to_string(),
        }
    }
}

/// Everything `elasticbeanstalk create-environment` is called with.
#[derive(Debug, Clone)]
pub struct CreateEnvironment {
    pub application_name: String,
    pub environment_name: String,
    pub cname_prefix: Option<String>,
    pub tier: Tier,
    pub solution_stack_name: String,
    pub option_settings: Vec<OptionSetting>,
}

/// An environment as returned by `elasticbeanstalk describe-environments`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentDescription {
    pub environment_name: String,
    #[serde(default)]
    pub status: String,
}

impl EnvironmentDescription {
    pub fn is_ready(&self) -> bool {
        self.status == "Ready"
    }
}

/// Compute resources backing an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentResources {
    /// Launch configuration names.
    pub launch_configurations: Vec<String>,
    /// Launch template ids.
    pub launch_templates: Vec<String>,
}
