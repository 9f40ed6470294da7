//! Configuration System
//!
//! Layered configuration for a generation run: output pool, shard limits,
//! file preamble, the parameter catalog and logging. Loaded through
//! `ConfigLoader` and validated as a whole before anything is written.

use crate::catalog::Catalog;
use crate::emit::{GeneratorSettings, OutputPool, Preamble, FILE_LIMIT};
use crate::logging::LoggingConfig;
use crate::plan::PlanOptions;
use crate::shard::{ShardLimits, HARD_CEILING, MAX_CHUNK};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod facade;
mod merge;
pub mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QdTestGenConfig {
    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub preamble: Preamble,

    #[serde(default)]
    pub catalog: Catalog,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output pool and shard limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Output directory, relative paths resolve against the workspace root
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_file_limit")]
    pub file_limit: usize,

    #[serde(default = "default_max_chunk")]
    pub max_chunk: usize,

    #[serde(default = "default_hard_ceiling")]
    pub hard_ceiling: usize,

    /// Render everything in memory and replace outputs only after success
    #[serde(default)]
    pub staged: bool,

    /// Also instantiate the plain lock suite for every delegation list
    #[serde(default)]
    pub lock_suite_covers_delegation: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    "generated_test".to_string()
}

fn default_extension() -> String {
    ".cpp".to_string()
}

fn default_file_limit() -> usize {
    FILE_LIMIT
}

fn default_max_chunk() -> usize {
    MAX_CHUNK
}

fn default_hard_ceiling() -> usize {
    HARD_CEILING
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            prefix: default_prefix(),
            extension: default_extension(),
            file_limit: default_file_limit(),
            max_chunk: default_max_chunk(),
            hard_ceiling: default_hard_ceiling(),
            staged: false,
            lock_suite_covers_delegation: false,
        }
    }
}

impl GeneratorSection {
    pub fn limits(&self) -> ShardLimits {
        ShardLimits {
            max_chunk: self.max_chunk,
            hard_ceiling: self.hard_ceiling,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.file_limit == 0 {
            return Err("file_limit must be at least 1".to_string());
        }
        if self.prefix.is_empty() {
            return Err("prefix cannot be empty".to_string());
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(format!("prefix '{}' must not contain a path separator", self.prefix));
        }
        self.limits().validate()
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Generator(String),
    Preamble(String),
    Catalog(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generator(msg) => write!(f, "Generator: {}", msg),
            ValidationError::Preamble(msg) => write!(f, "Preamble: {}", msg),
            ValidationError::Catalog(msg) => write!(f, "Catalog: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_catalog(catalog: &Catalog) -> Vec<String> {
    let mut problems = Vec::new();
    let axes = [
        ("locks", &catalog.locks),
        ("starvation_policies", &catalog.starvation_policies),
        (
            "atomic_instruction_policies",
            &catalog.atomic_instruction_policies,
        ),
    ];
    for (axis, values) in axes {
        let mut seen = HashSet::new();
        for value in values {
            if value.as_str().trim().is_empty() {
                problems.push(format!("{} contains an empty name", axis));
            } else if !seen.insert(value) {
                problems.push(format!("{} lists '{}' more than once", axis, value));
            }
        }
    }
    let templates = [
        ("delegation_template", &catalog.delegation_template),
        ("buffer_queue.template", &catalog.buffer_queue.template),
        ("entry_queue.template", &catalog.entry_queue.template),
        (
            "dual_buffer_queue.template",
            &catalog.dual_buffer_queue.template,
        ),
    ];
    for (field, template) in templates {
        if template.trim().is_empty() {
            problems.push(format!("{} cannot be empty", field));
        }
    }
    problems
}

impl QdTestGenConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.generator.validate() {
            errors.push(ValidationError::Generator(e));
        }
        if let Err(e) = self.preamble.validate() {
            errors.push(ValidationError::Preamble(e));
        }
        errors.extend(
            validate_catalog(&self.catalog)
                .into_iter()
                .map(ValidationError::Catalog),
        );
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            file_limit: self.generator.file_limit,
            limits: self.generator.limits(),
            preamble: self.preamble.clone(),
        }
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            lock_suite_covers_delegation: self.generator.lock_suite_covers_delegation,
        }
    }

    /// Output pool with `output_dir` resolved against `workspace_root`.
    pub fn output_pool(&self, workspace_root: &Path) -> OutputPool {
        let dir = if self.generator.output_dir.is_absolute() {
            self.generator.output_dir.clone()
        } else {
            workspace_root.join(&self.generator.output_dir)
        };
        OutputPool::new(
            dir,
            self.generator.prefix.clone(),
            self.generator.extension.clone(),
            self.generator.file_limit,
        )
    }
}
