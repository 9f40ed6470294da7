//! CLI route: single route table and run context. Dispatches to the generator and presentation.

use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_generation_json, format_generation_text, format_plan_json, format_plan_text,
};
use crate::config::{ConfigLoader, QdTestGenConfig};
use crate::emit::{DirectSink, GenerationReport, Generator, MemorySink, StagedSink};
use crate::error::GenError;
use crate::plan::GenerationPlan;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: workspace root and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: QdTestGenConfig,
}

/// Overrides a `generate` invocation applies on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub out_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub file_limit: Option<usize>,
    pub max_chunk: Option<usize>,
    pub staged: bool,
    pub lock_suite_covers_delegation: bool,
}

impl GenerateOverrides {
    fn apply(&self, config: &mut QdTestGenConfig) {
        if let Some(ref dir) = self.out_dir {
            config.generator.output_dir = dir.clone();
        }
        if let Some(ref prefix) = self.prefix {
            config.generator.prefix = prefix.clone();
        }
        if let Some(limit) = self.file_limit {
            config.generator.file_limit = limit;
        }
        if let Some(chunk) = self.max_chunk {
            config.generator.max_chunk = chunk;
        }
        if self.staged {
            config.generator.staged = true;
        }
        if self.lock_suite_covers_delegation {
            config.generator.lock_suite_covers_delegation = true;
        }
    }
}

fn validated(config: &QdTestGenConfig) -> Result<(), GenError> {
    config.validate().map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        GenError::Config(format!(
            "Configuration validation failed:\n{}",
            msgs.join("\n")
        ))
    })
}

fn check_format(format: &str) -> Result<(), GenError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(GenError::Config(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GenError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    /// Create run context from an already assembled configuration.
    pub fn with_config(workspace_root: PathBuf, config: QdTestGenConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &QdTestGenConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, GenError> {
        match command {
            Commands::Generate {
                out_dir,
                prefix,
                file_limit,
                max_chunk,
                staged,
                with_lock_suite_delegation,
                format,
            } => {
                check_format(format)?;
                let overrides = GenerateOverrides {
                    out_dir: out_dir.clone(),
                    prefix: prefix.clone(),
                    file_limit: *file_limit,
                    max_chunk: *max_chunk,
                    staged: *staged,
                    lock_suite_covers_delegation: *with_lock_suite_delegation,
                };
                let report = self.generate(&overrides)?;
                if format == "json" {
                    format_generation_json(&report)
                } else {
                    Ok(format_generation_text(&report))
                }
            }
            Commands::Plan { format } => {
                check_format(format)?;
                let report = self.plan()?;
                if format == "json" {
                    format_plan_json(&report)
                } else {
                    Ok(format_plan_text(&report))
                }
            }
            Commands::Config { command } => match command {
                ConfigCommands::Show => Ok(toml::to_string_pretty(&self.config)?),
                ConfigCommands::Validate => {
                    validated(&self.config)?;
                    Ok("Configuration is valid".to_string())
                }
            },
        }
    }

    /// Write the output pool for the loaded config plus `overrides`.
    pub fn generate(&self, overrides: &GenerateOverrides) -> Result<GenerationReport, GenError> {
        let mut config = self.config.clone();
        overrides.apply(&mut config);
        validated(&config)?;

        let plan = GenerationPlan::from_catalog(&config.catalog, config.plan_options());
        let generator = Generator::new(config.generator_settings())?;
        let pool = config.output_pool(&self.workspace_root);
        info!(
            dir = %pool.dir().display(),
            files = pool.file_limit(),
            staged = config.generator.staged,
            "Generating test instantiations"
        );

        if config.generator.staged {
            generator.run(&plan, &mut StagedSink::new(pool))
        } else {
            generator.run(&plan, &mut DirectSink::new(pool))
        }
    }

    /// Dry run: schedule every shard in memory.
    pub fn plan(&self) -> Result<GenerationReport, GenError> {
        validated(&self.config)?;
        let plan = GenerationPlan::from_catalog(&self.config.catalog, self.config.plan_options());
        let generator = Generator::new(self.config.generator_settings())?;
        let mut sink = MemorySink::new(self.config.generator.file_limit);
        generator.run(&plan, &mut sink)
    }
}
