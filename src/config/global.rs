//! The one-time global config file shared with the `eb` CLI.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative to the working directory.
pub const GLOBAL_CONFIG_PATH: &str = ".elasticbeanstalk/config.yml";

const REQUIRED_KEYS: [&str; 3] = ["application_name", "default_region", "profile"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub application_name: String,
    pub default_region: String,
    pub profile: String,
}

#[derive(Serialize, Deserialize, Default)]
struct RawGlobal {
    application_name: Option<String>,
    default_region: Option<String>,
    profile: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct GlobalFile<T> {
    global: T,
}

impl GlobalConfig {
    /// Read the file if it exists. All keys are required; missing ones are
    /// reported together.
    pub fn read(path: &Path) -> Result<Option<GlobalConfig>> {
        if !path.exists() {
            log::debug!("No global config at {}", path.display());
            return Ok(None);
        }
        log::info!("Reading global config: {}", path.display());
        let yaml = std::fs::read_to_string(path)?;
        let file: GlobalFile<RawGlobal> = serde_yaml::from_str(&yaml)?;
        let raw = file.global;

        let present = [
            raw.application_name.is_some(),
            raw.default_region.is_some(),
            raw.profile.is_some(),
        ];
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(key, _)| *key)
            .collect();

        match (raw.application_name, raw.default_region, raw.profile) {
            (Some(application_name), Some(default_region), Some(profile)) => {
                Ok(Some(GlobalConfig {
                    application_name,
                    default_region,
                    profile,
                }))
            }
            _ => Err(Error::Config(format!(
                "missing global config key(s): {}",
                missing.join(", ")
            ))),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let yaml = serde_yaml::to_string(&GlobalFile { global: self })?;
        log::warn!("Writing global config: {}", path.display());
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_absent_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yml");
        assert_eq!(GlobalConfig::read(&path).expect("read"), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".elasticbeanstalk").join("config.yml");
        let config = GlobalConfig {
            application_name: "shop".to_string(),
            default_region: "eu-west-1".to_string(),
            profile: "default".to_string(),
        };
        config.write(&path).expect("write");
        assert_eq!(GlobalConfig::read(&path).expect("read"), Some(config));
    }

    #[test]
    fn test_keeps_unrelated_keys_readable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "branch-defaults:\n  main:\n    environment: shop-prod\nglobal:\n  application_name: shop\n  default_region: us-east-2\n  profile: ops\n  sc: git\n",
        )
        .expect("write fixture");
        let config = GlobalConfig::read(&path).expect("read").expect("present");
        assert_eq!(config.default_region, "us-east-2");
    }

    #[test]
    fn test_missing_keys_reported_together() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "global:\n  application_name: shop\n").expect("write fixture");
        let err = GlobalConfig::read(&path).expect_err("missing keys");
        assert_eq!(
            err.to_string(),
            "configuration error: missing global config key(s): default_region, profile"
        );
    }
}
