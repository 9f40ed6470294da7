//! Config loader: assembles defaults, files and environment into one config.

use super::merge;
use super::sources::{environment, global_file, workspace_file};
use super::QdTestGenConfig;
use config::{ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{QDTESTGEN_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<QdTestGenConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        let config: QdTestGenConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file, skipping the global and
    /// workspace files. The file is read as TOML whatever its extension.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<QdTestGenConfig, ConfigError> {
        let source = File::from(path.to_path_buf())
            .format(FileFormat::Toml)
            .required(true);
        let builder = merge::builder_with_defaults()?.add_source(source);
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
