//! Merge rules: defaults, override order, conflict handling.
//!
//! Scalar generator settings get explicit defaults here; table sections
//! (`catalog`, `preamble`, `logging`) fall back to their serde defaults
//! field by field.

use crate::emit::FILE_LIMIT;
use crate::shard::{HARD_CEILING, MAX_CHUNK};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("generator.output_dir", ".")?
        .set_default("generator.prefix", "generated_test")?
        .set_default("generator.extension", ".cpp")?
        .set_default("generator.file_limit", FILE_LIMIT as i64)?
        .set_default("generator.max_chunk", MAX_CHUNK as i64)?
        .set_default("generator.hard_ceiling", HARD_CEILING as i64)?
        .set_default("generator.staged", false)?
        .set_default("generator.lock_suite_covers_delegation", false)
}
