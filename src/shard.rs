//! Type-List Shard Splitter
//!
//! Splits a named type list into bounded shards so that no single generated
//! instantiation binds more types than the downstream compiler tolerates.

use crate::error::{GenError, Result};
use crate::types::{TypeExpression, TypeList};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default number of types per shard.
pub const MAX_CHUNK: usize = 16;

/// Largest shard a single instantiation may ever bind.
pub const HARD_CEILING: usize = 50;

/// Size limits applied by the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardLimits {
    pub max_chunk: usize,
    pub hard_ceiling: usize,
}

impl Default for ShardLimits {
    fn default() -> Self {
        Self {
            max_chunk: MAX_CHUNK,
            hard_ceiling: HARD_CEILING,
        }
    }
}

impl ShardLimits {
    /// Reject limits no catalog could satisfy. A `max_chunk` above the
    /// ceiling is only caught when a list actually produces such a shard.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_chunk == 0 {
            return Err("max_chunk must be at least 1".to_string());
        }
        if self.hard_ceiling == 0 {
            return Err("hard_ceiling must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Bounded slice of a type list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    pub name: String,
    pub types: Vec<TypeExpression>,
}

impl Shard {
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Split `list` into shards of at most `limits.max_chunk` types.
///
/// A list that fits keeps its name. Otherwise every piece, the trailing
/// partial one included, is named `{name}{index}` counting from zero.
/// An empty list yields no shards.
pub fn split_type_list(list: &TypeList, limits: ShardLimits) -> Result<Vec<Shard>> {
    if limits.max_chunk == 0 {
        return Err(GenError::InvalidSettings(
            "max_chunk must be at least 1".to_string(),
        ));
    }
    if list.is_empty() {
        return Ok(Vec::new());
    }

    let shards: Vec<Shard> = if list.len() <= limits.max_chunk {
        vec![Shard {
            name: list.name.clone(),
            types: list.types.clone(),
        }]
    } else {
        list.types
            .chunks(limits.max_chunk)
            .enumerate()
            .map(|(index, chunk)| Shard {
                name: format!("{}{}", list.name, index),
                types: chunk.to_vec(),
            })
            .collect()
    };

    for shard in &shards {
        if shard.len() > limits.hard_ceiling {
            return Err(GenError::ShardTooLarge {
                name: shard.name.clone(),
                len: shard.len(),
                ceiling: limits.hard_ceiling,
            });
        }
    }

    trace!(list = %list.name, types = list.len(), shards = shards.len(), "Split type list");
    Ok(shards)
}
