//! CLI parse: clap types for qdtestgen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// qdtestgen - generate sharded typed-test instantiations for the lock and queue suite
#[derive(Parser, Debug)]
#[command(name = "qdtestgen")]
#[command(version)]
#[command(about = "Generate sharded typed-test instantiations for lock and delegation variants")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config lookup and relative output paths)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the instantiation files
    Generate {
        /// Output directory (overrides generator.output_dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Output file name prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Number of output files
        #[arg(long)]
        file_limit: Option<usize>,
        /// Maximum types per instantiation
        #[arg(long)]
        max_chunk: Option<usize>,
        /// Replace outputs only after the whole run succeeded
        #[arg(long)]
        staged: bool,
        /// Also instantiate the lock suite for every delegation list
        #[arg(long)]
        with_lock_suite_delegation: bool,
        /// Summary format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show every shard and its target file without writing anything
    Plan {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the effective configuration
    Validate,
}
