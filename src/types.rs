//! Core value types: policy names, opaque type expressions and named type lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic name of one configuration constant, e.g. a starvation policy or a lock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyValue(String);

impl PolicyValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolicyValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One fully parameterized type, rendered as the target language spells it.
///
/// The contents are opaque: nothing downstream parses them, only identity
/// and count matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeExpression(String);

impl TypeExpression {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&PolicyValue> for TypeExpression {
    fn from(value: &PolicyValue) -> Self {
        Self::new(value.as_str())
    }
}

/// Named, ordered sequence of type expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeList {
    pub name: String,
    pub types: Vec<TypeExpression>,
}

impl TypeList {
    pub fn new(name: impl Into<String>, types: Vec<TypeExpression>) -> Self {
        Self {
            name: name.into(),
            types,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
