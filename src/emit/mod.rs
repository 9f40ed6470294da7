//! File Writer / Round-Robin Scheduler
//!
//! Drives one generation run: initializes the output pool, splits every type
//! list of the plan into shards and emits each shard to output
//! `counter mod file_limit`, advancing the counter once per shard.

pub mod render;
pub mod sink;

pub use render::{render_shard, type_list_ident, Preamble};
pub use sink::{DirectSink, MemorySink, OutputPool, OutputSink, StagedSink};

use crate::error::{GenError, Result};
use crate::plan::{GenerationPlan, TestSuite};
use crate::shard::{split_type_list, Shard, ShardLimits};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Default number of output files.
pub const FILE_LIMIT: usize = 8;

/// Run-scoped monotonic shard counter.
///
/// Passed by value through every emission; its value names the shard's
/// type list and picks the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GenerationCounter(u64);

impl GenerationCounter {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// # Panics
    ///
    /// Panics if `file_limit` is zero.
    pub fn file_index(self, file_limit: usize) -> usize {
        (self.0 % file_limit as u64) as usize
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Where one shard went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardRecord {
    pub counter: GenerationCounter,
    pub file_index: usize,
    pub suite: TestSuite,
    pub name: String,
    pub type_list: String,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub files: Vec<PathBuf>,
    pub file_limit: usize,
    pub shards: Vec<ShardRecord>,
    pub total_types: usize,
}

impl GenerationReport {
    /// Number of shards written to each output, indexed by file.
    pub fn shards_per_file(&self) -> Vec<usize> {
        let mut counts = vec![0; self.file_limit];
        for record in &self.shards {
            counts[record.file_index] += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub file_limit: usize,
    pub limits: ShardLimits,
    pub preamble: Preamble,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            file_limit: FILE_LIMIT,
            limits: ShardLimits::default(),
            preamble: Preamble::default(),
        }
    }
}

/// Emit one shard to its round-robin target and return the advanced counter.
pub fn emit_shard<S: OutputSink>(
    sink: &mut S,
    counter: GenerationCounter,
    file_limit: usize,
    suite: TestSuite,
    shard: &Shard,
) -> Result<(GenerationCounter, ShardRecord)> {
    if file_limit == 0 {
        return Err(GenError::InvalidSettings(
            "file_limit must be at least 1".to_string(),
        ));
    }
    let file_index = counter.file_index(file_limit);
    sink.append(file_index, &render_shard(counter, suite, shard))?;
    debug!(
        counter = counter.value(),
        file_index,
        suite = %suite,
        shard = %shard.name,
        len = shard.len(),
        "Emitted shard"
    );
    let record = ShardRecord {
        counter,
        file_index,
        suite,
        name: shard.name.clone(),
        type_list: type_list_ident(counter),
        len: shard.len(),
    };
    Ok((counter.next(), record))
}

pub struct Generator {
    settings: GeneratorSettings,
}

impl Generator {
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        if settings.file_limit == 0 {
            return Err(GenError::InvalidSettings(
                "file_limit must be at least 1".to_string(),
            ));
        }
        settings.limits.validate().map_err(GenError::InvalidSettings)?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Run the whole plan against `sink`.
    ///
    /// Aborts on the first error. With a direct sink, outputs already
    /// initialized or appended to stay as they are.
    #[instrument(skip_all, fields(file_limit = self.settings.file_limit))]
    pub fn run<S: OutputSink>(
        &self,
        plan: &GenerationPlan,
        sink: &mut S,
    ) -> Result<GenerationReport> {
        let file_limit = self.settings.file_limit;
        sink.initialize(&self.settings.preamble.render())?;

        let mut counter = GenerationCounter::default();
        let mut shards = Vec::new();
        for suite_plan in &plan.suites {
            for list in &suite_plan.lists {
                for shard in split_type_list(list, self.settings.limits)? {
                    let (next, record) =
                        emit_shard(sink, counter, file_limit, suite_plan.suite, &shard)?;
                    counter = next;
                    shards.push(record);
                }
            }
        }

        let files = sink.finish()?;
        info!(
            shards = shards.len(),
            types = plan.total_types(),
            files = files.len(),
            "Generation complete"
        );
        Ok(GenerationReport {
            files,
            file_limit,
            shards,
            total_types: plan.total_types(),
        })
    }
}
