//! Configuration loading facade.

use super::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file};
use super::TabsyncConfig;
use crate::error::ApiError;
use config::{File, FileFormat};
use std::path::Path;

/// Loads [`TabsyncConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then environment variables.
    pub fn load() -> Result<TabsyncConfig, ApiError> {
        Self::load_layers(None)
    }

    /// Like [`load`](Self::load), with `path` layered between the global file
    /// and the environment. The file must exist.
    pub fn load_with_file(path: &Path) -> Result<TabsyncConfig, ApiError> {
        Self::load_layers(Some(path))
    }

    /// Defaults plus a single file; the global file and environment are ignored.
    pub fn load_from_file(path: &Path) -> Result<TabsyncConfig, ApiError> {
        let config = builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize::<TabsyncConfig>()?;
        config.validate()?;
        Ok(config)
    }

    fn load_layers(path: Option<&Path>) -> Result<TabsyncConfig, ApiError> {
        let mut builder = global_file::add_to_builder(builder_with_defaults()?)?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config = environment::add_to_builder(builder)
            .build()?
            .try_deserialize::<TabsyncConfig>()?;
        config.validate()?;
        Ok(config)
    }
}
