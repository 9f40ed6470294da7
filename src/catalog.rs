//! Parameter Catalog
//!
//! Base configuration axes for the generated suite: lock implementations,
//! starvation and atomic-instruction policies, and the numeric shapes of the
//! three queue families. Pure data; the builder turns it into type lists.
//! Any axis may be empty, which simply yields empty products downstream.

use crate::types::PolicyValue;
use serde::{Deserialize, Serialize};

/// Complete set of axes enumerated by one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Lock implementations, used directly and as the server lock of delegation variants
    pub locks: Vec<PolicyValue>,

    /// Starvation policies crossed into every delegation variant
    pub starvation_policies: Vec<PolicyValue>,

    /// Atomic-instruction policies crossed into the dual buffer queue family
    pub atomic_instruction_policies: Vec<PolicyValue>,

    /// Template name of the composite lock + queue + starvation type
    pub delegation_template: String,

    pub buffer_queue: BufferQueueShape,

    pub entry_queue: EntryQueueShape,

    pub dual_buffer_queue: DualBufferQueueShape,
}

/// Single-parameter family: `buffer_queue<SIZE>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferQueueShape {
    pub template: String,
    pub sizes: Vec<u64>,
}

/// Two-parameter family: `entry_queue<ENTRIES, BUFFER_SIZE>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryQueueShape {
    pub template: String,
    pub entries: Vec<u64>,
    pub buffer_sizes: Vec<u64>,
}

/// Two-parameter family crossed with the atomic-instruction policy:
/// `dual_buffer_queue<SIZE, CHUNK, POLICY>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualBufferQueueShape {
    pub template: String,
    /// Paired (size, chunk) values; the pairs are fixed, not crossed with each other.
    pub shapes: Vec<DualBufferDimensions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualBufferDimensions {
    pub size: u64,
    pub chunk: u64,
}

impl DualBufferDimensions {
    pub const fn new(size: u64, chunk: u64) -> Self {
        Self { size, chunk }
    }
}

fn policies(names: &[&str]) -> Vec<PolicyValue> {
    names.iter().map(|name| PolicyValue::new(*name)).collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            locks: policies(&[
                "extended_lock<pthreads_lock>",
                "extended_lock<tatas_lock>",
                "mcs_lock",
                "extended_lock<mutex_lock>",
                "futex_lock",
                "mcs_futex_lock",
                "ticket_futex_lock",
            ]),
            starvation_policies: policies(&[
                "starvation_policy_t::starvation_free",
                "starvation_policy_t::may_starve",
            ]),
            atomic_instruction_policies: policies(&[
                "atomic_instruction_policy_t::use_fetch_and_add",
                "atomic_instruction_policy_t::use_compare_and_swap",
            ]),
            buffer_queue: BufferQueueShape::default(),
            entry_queue: EntryQueueShape::default(),
            dual_buffer_queue: DualBufferQueueShape::default(),
            delegation_template: "qdlock_impl".to_string(),
        }
    }
}

impl Default for BufferQueueShape {
    fn default() -> Self {
        Self {
            template: "buffer_queue".to_string(),
            sizes: vec![262144, 262139],
        }
    }
}

impl Default for EntryQueueShape {
    fn default() -> Self {
        Self {
            template: "entry_queue".to_string(),
            entries: vec![4096],
            buffer_sizes: vec![32],
        }
    }
}

impl Default for DualBufferQueueShape {
    fn default() -> Self {
        Self {
            template: "dual_buffer_queue".to_string(),
            shapes: vec![
                DualBufferDimensions::new(16384, 7),
                DualBufferDimensions::new(16384, 8),
                DualBufferDimensions::new(16000, 7),
                DualBufferDimensions::new(16000, 8),
                DualBufferDimensions::new(4096, 32),
                DualBufferDimensions::new(6144, 24),
            ],
        }
    }
}

impl Catalog {
    /// Catalog with every axis empty.
    pub fn empty() -> Self {
        Self {
            locks: Vec::new(),
            starvation_policies: Vec::new(),
            atomic_instruction_policies: Vec::new(),
            buffer_queue: BufferQueueShape {
                sizes: Vec::new(),
                ..BufferQueueShape::default()
            },
            entry_queue: EntryQueueShape {
                entries: Vec::new(),
                buffer_sizes: Vec::new(),
                ..EntryQueueShape::default()
            },
            dual_buffer_queue: DualBufferQueueShape {
                shapes: Vec::new(),
                ..DualBufferQueueShape::default()
            },
            delegation_template: Catalog::default().delegation_template,
        }
    }
}
