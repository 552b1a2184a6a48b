//! Response rendering and persistence configuration

use crate::persist::DEFAULT_ARTIFACT_PATH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Shape of a tuning response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// `[mysqld]` option file fragment
    #[default]
    #[serde(alias = "cnf")]
    Text,
    /// Flat JSON object of parameters
    Json,
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "cnf" => Ok(ResponseFormat::Text),
            "json" => Ok(ResponseFormat::Json),
            _ => Err(format!("Invalid response format: {}", s)),
        }
    }
}

impl ResponseFormat {
    /// Label used in metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
            ResponseFormat::Json => "json",
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when the request does not ask for one
    pub default_format: ResponseFormat,
    /// Write every rendered result to `path`
    pub persist: bool,
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: ResponseFormat::Text,
            persist: false,
            path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
        }
    }
}
