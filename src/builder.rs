//! Type Expression Builder
//!
//! Composes opaque type expressions from catalog axes by exhaustive Cartesian
//! products. The leftmost axis varies slowest, so output order is stable for a
//! given catalog.

use crate::catalog::Catalog;
use crate::types::{PolicyValue, TypeExpression, TypeList};
use serde::{Deserialize, Serialize};

/// Name of the plain lock list.
pub const STANDARD_LOCKS: &str = "StandardLocks";

/// Queue families a delegation variant can be built on, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueFamily {
    BufferQueue,
    EntryQueue,
    DualBufferQueue,
}

impl QueueFamily {
    pub const ALL: [QueueFamily; 3] = [
        QueueFamily::BufferQueue,
        QueueFamily::EntryQueue,
        QueueFamily::DualBufferQueue,
    ];

    /// Name of the type list holding this family's delegation variants.
    pub fn list_name(self) -> &'static str {
        match self {
            QueueFamily::BufferQueue => "BufferQueue",
            QueueFamily::EntryQueue => "EntryQueue",
            QueueFamily::DualBufferQueue => "DualBufferQueue",
        }
    }

    /// Every queue configuration of this family.
    pub fn queue_types(self, catalog: &Catalog) -> Vec<TypeExpression> {
        match self {
            QueueFamily::BufferQueue => {
                let shape = &catalog.buffer_queue;
                shape
                    .sizes
                    .iter()
                    .map(|size| TypeExpression::new(format!("{}<{}>", shape.template, size)))
                    .collect()
            }
            QueueFamily::EntryQueue => {
                let shape = &catalog.entry_queue;
                product(&shape.entries, &shape.buffer_sizes)
                    .map(|(entries, buffer)| {
                        TypeExpression::new(format!("{}<{}, {}>", shape.template, entries, buffer))
                    })
                    .collect()
            }
            QueueFamily::DualBufferQueue => {
                let shape = &catalog.dual_buffer_queue;
                product(&shape.shapes, &catalog.atomic_instruction_policies)
                    .map(|(dims, policy)| {
                        TypeExpression::new(format!(
                            "{}<{}, {}, {}>",
                            shape.template, dims.size, dims.chunk, policy
                        ))
                    })
                    .collect()
            }
        }
    }

    /// Delegation variants of every catalog lock over this family's queues.
    pub fn delegation_list(self, catalog: &Catalog) -> TypeList {
        let queues = self.queue_types(catalog);
        TypeList::new(
            self.list_name(),
            delegation_types(
                &catalog.delegation_template,
                &catalog.locks,
                &queues,
                &catalog.starvation_policies,
            ),
        )
    }
}

/// The plain lock implementations as a type list.
pub fn standard_locks(catalog: &Catalog) -> TypeList {
    TypeList::new(
        STANDARD_LOCKS,
        catalog.locks.iter().map(TypeExpression::from).collect(),
    )
}

/// One composite type per (lock, queue, starvation) triple.
pub fn delegation_types(
    template: &str,
    locks: &[PolicyValue],
    queues: &[TypeExpression],
    starvation: &[PolicyValue],
) -> Vec<TypeExpression> {
    let mut types = Vec::with_capacity(locks.len() * queues.len() * starvation.len());
    for (lock, queue) in product(locks, queues) {
        for policy in starvation {
            types.push(TypeExpression::new(format!(
                "{}<{}, {}, {}>",
                template, lock, queue, policy
            )));
        }
    }
    types
}

fn product<'a, A, B>(left: &'a [A], right: &'a [B]) -> impl Iterator<Item = (&'a A, &'a B)> + 'a {
    left.iter()
        .flat_map(move |a| right.iter().map(move |b| (a, b)))
}
