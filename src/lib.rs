//! qdtestgen: typed-test instantiation generator
//!
//! Enumerates every lock, queue and delegation-lock configuration of the QD
//! lock suite, splits the resulting type lists into bounded shards and
//! distributes the shards round-robin over a fixed pool of source files.

pub mod builder;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod logging;
pub mod plan;
pub mod shard;
pub mod types;
