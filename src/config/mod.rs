// ABOUTME: Configuration types and parsing for vitrin.yml.
// ABOUTME: Handles YAML parsing, token indirection, and classifier rule overrides.

mod token;

pub use token::TokenValue;

use crate::error::{Error, Result};
use crate::types::ClassifierRules;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "vitrin.yml";
pub const CONFIG_FILENAME_ALT: &str = "vitrin.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".vitrin/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiEndpoint,

    #[serde(default)]
    pub token: Option<TokenValue>,

    #[serde(default = "default_local_prefix")]
    pub local_prefix: String,

    #[serde(default = "default_object_hosts")]
    pub object_hosts: Vec<String>,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

/// Where the storefront API lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEndpoint {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix under which the sign/upload/delete endpoints are mounted.
    #[serde(default)]
    pub base_path: String,
}

fn default_port() -> u16 {
    80
}

fn default_local_prefix() -> String {
    ClassifierRules::default().local_prefix
}

fn default_object_hosts() -> Vec<String> {
    ClassifierRules::default().object_hosts
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Classification rules derived from this configuration.
    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules {
            local_prefix: self.local_prefix.clone(),
            object_hosts: self.object_hosts.clone(),
        }
    }
}

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, template_yaml())?;

    Ok(())
}

fn template_yaml() -> &'static str {
    r#"api:
  host: shop.example.com
  port: 8080
  base_path: /admin/api

# token:
#   env: VITRIN_TOKEN

local_prefix: /uploads/

request_timeout: 30s
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses() {
        let config = Config::from_yaml(template_yaml()).unwrap();
        assert_eq!(config.api.host, "shop.example.com");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.local_prefix, "/uploads/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
