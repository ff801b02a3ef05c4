//! Configuration System
//!
//! Layered configuration for the registries and logging: built-in defaults,
//! the user's global config file, an optional explicit file, then
//! `TABSYNC__`-prefixed environment variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// What a creation event does when its id is already tracked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPolicy {
    /// The incoming record replaces the tracked one, frames and metadata included
    #[default]
    Replace,
    /// The incoming record replaces the tracked one, but keeps the tracked
    /// frames and metadata when the incoming record carries none
    PreserveAuxiliary,
}

impl CreationPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CreationPolicy::Replace => "replace",
            CreationPolicy::PreserveAuxiliary => "preserve_auxiliary",
        }
    }
}

/// Registry behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub creation_policy: CreationPolicy,

    /// Enumerate windows and tabs right after attaching to the bindings
    #[serde(default = "default_true")]
    pub synchronize_on_connect: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            creation_policy: CreationPolicy::default(),
            synchronize_on_connect: default_true(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabsyncConfig {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TabsyncConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        self.logging.validate().map_err(ApiError::ConfigError)
    }
}
