//! Configuration for sessions.
//!
//! Use [`SparklessConfig`] to configure a session from code, a JSON document or
//! environment variables, then create a session with
//! [`SparkSession::from_config`](crate::SparkSession::from_config).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::EngineError;

pub const ENV_APP_NAME: &str = "SPARKLESS_APP_NAME";
pub const ENV_CASE_SENSITIVE: &str = "SPARKLESS_CASE_SENSITIVE";
/// Prefix for extra session keys: `SPARKLESS_CONF_spark.foo=bar` sets `spark.foo`.
pub const ENV_CONF_PREFIX: &str = "SPARKLESS_CONF_";

pub const KEY_APP_NAME: &str = "spark.app.name";
pub const KEY_CASE_SENSITIVE: &str = "spark.sql.caseSensitive";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklessConfig {
    pub app_name: Option<String>,
    pub case_sensitive: bool,
    pub extra: HashMap<String, String>,
}

impl SparklessConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut config = SparklessConfig::default();
        for (key, value) in vars {
            if key == ENV_APP_NAME {
                config.app_name = Some(value);
            } else if key == ENV_CASE_SENSITIVE {
                config.case_sensitive = parse_flag(&value);
            } else if let Some(conf_key) = key.strip_prefix(ENV_CONF_PREFIX) {
                config.extra.insert(conf_key.to_string(), value);
            }
        }
        config
    }

    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Flatten into session config keys.
    pub fn to_session_config(&self) -> HashMap<String, String> {
        let mut out = self.extra.clone();
        if let Some(name) = &self.app_name {
            out.insert(KEY_APP_NAME.to_string(), name.clone());
        }
        out.insert(
            KEY_CASE_SENSITIVE.to_string(),
            self.case_sensitive.to_string(),
        );
        out
    }
}

pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
