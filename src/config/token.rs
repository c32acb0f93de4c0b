// ABOUTME: API token value with environment variable indirection.
// ABOUTME: Keeps secrets out of vitrin.yml by referencing the environment.

use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl TokenValue {
    pub fn resolve(&self) -> Result<String> {
        match self {
            TokenValue::Literal(s) => Ok(s.clone()),
            TokenValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(_) => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}
