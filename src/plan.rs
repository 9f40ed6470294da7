//! Generation plan: which type lists each test suite is instantiated for, in
//! emission order.

use crate::builder::{standard_locks, QueueFamily};
use crate::catalog::Catalog;
use crate::types::TypeList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed-test suite templates registered by the consuming test harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestSuite {
    LockTest,
    DelegationTest,
}

impl TestSuite {
    pub fn as_str(self) -> &'static str {
        match self {
            TestSuite::LockTest => "LockTest",
            TestSuite::DelegationTest => "DelegationTest",
        }
    }
}

impl fmt::Display for TestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Also run the plain lock suite over every delegation list.
    pub lock_suite_covers_delegation: bool,
}

/// One suite and the lists it is instantiated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuitePlan {
    pub suite: TestSuite,
    pub lists: Vec<TypeList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    pub suites: Vec<SuitePlan>,
}

impl GenerationPlan {
    /// Build the plan for `catalog`: plain locks first, then the delegation
    /// variants over buffer, entry and dual buffer queues.
    pub fn from_catalog(catalog: &Catalog, options: PlanOptions) -> Self {
        let delegation: Vec<TypeList> = QueueFamily::ALL
            .iter()
            .map(|family| family.delegation_list(catalog))
            .collect();

        let mut lock_lists = vec![standard_locks(catalog)];
        if options.lock_suite_covers_delegation {
            lock_lists.extend(delegation.iter().cloned());
        }

        Self {
            suites: vec![
                SuitePlan {
                    suite: TestSuite::LockTest,
                    lists: lock_lists,
                },
                SuitePlan {
                    suite: TestSuite::DelegationTest,
                    lists: delegation,
                },
            ],
        }
    }

    pub fn total_types(&self) -> usize {
        self.suites
            .iter()
            .flat_map(|suite| suite.lists.iter())
            .map(TypeList::len)
            .sum()
    }
}
