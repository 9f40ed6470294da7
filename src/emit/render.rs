//! Text rendering for generated sources: the per-file preamble and the
//! (type-list declaration, suite instantiation) pair emitted per shard.

use crate::emit::GenerationCounter;
use crate::plan::TestSuite;
use crate::shard::Shard;
use serde::{Deserialize, Serialize};

/// Fixed header written at the top of every output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preamble {
    /// Header providing the suite templates and every lock and queue
    pub include: String,
    pub library_namespace: String,
    pub locks_namespace: String,
    pub queues_namespace: String,
}

impl Default for Preamble {
    fn default() -> Self {
        Self {
            include: "lock.hpp".to_string(),
            library_namespace: "qd".to_string(),
            locks_namespace: "locks".to_string(),
            queues_namespace: "queues".to_string(),
        }
    }
}

impl Preamble {
    pub fn validate(&self) -> Result<(), String> {
        if self.include.trim().is_empty() {
            return Err("include cannot be empty".to_string());
        }
        if self.library_namespace.trim().is_empty() {
            return Err("library_namespace cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = format!("#include <{}>\n", self.include);
        let lib = &self.library_namespace;
        for nested in [&self.locks_namespace, &self.queues_namespace] {
            if !nested.is_empty() {
                out.push_str(&format!("using namespace {}::{};\n", lib, nested));
            }
        }
        out.push_str(&format!("using namespace {};\n", lib));
        out
    }
}

/// Identifier the type-list declaration binds for a given counter value.
pub fn type_list_ident(counter: GenerationCounter) -> String {
    format!("GeneratedTypes{}", counter.value())
}

/// Declaration plus instantiation for one shard.
///
/// The instantiation macro takes the instance prefix, the suite template and
/// the type-list identifier, in that order.
pub fn render_shard(counter: GenerationCounter, suite: TestSuite, shard: &Shard) -> String {
    let ident = type_list_ident(counter);
    let types: Vec<&str> = shard.types.iter().map(|t| t.as_str()).collect();

    let mut out = String::from("typedef ::testing::Types <\n");
    out.push_str(&types.join(", \n"));
    out.push('\n');
    out.push_str(&format!("> {};\n", ident));
    out.push_str(&format!(
        "INSTANTIATE_TYPED_TEST_CASE_P({}, {}, {});\n",
        shard.name, suite, ident
    ));
    out
}
