//! Opaque identifier tokens.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Leading marker the host uses for symbolic identifiers, as in `:save_button`.
pub const NAMESPACE_MARKER: char = ':';

fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Identifier of a semantic element, held in its canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    /// Convert a host value into an identifier.
    ///
    /// Strings are kept verbatim; any other JSON value uses its compact JSON text.
    pub fn from_value(value: &Value) -> Self {
        Self(canonical_text(value))
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier with one leading namespace marker removed.
    pub fn name(&self) -> &str {
        self.0.strip_prefix(NAMESPACE_MARKER).unwrap_or(&self.0)
    }

    /// Exact-match test against a client filter.
    ///
    /// `"foo"` and `":foo"` select the same element; prefixes never match.
    pub fn matches(&self, filter: &str) -> bool {
        let wanted = filter.strip_prefix(NAMESPACE_MARKER).unwrap_or(filter);
        self.name() == wanted || self.0 == filter
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Key of a sub-graph (a compiled script) in the host's scene store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphKey(String);

/// Conventional key of the top-level sub-graph.
pub const DEFAULT_ROOT_GRAPH_KEY: &str = "_root_";

impl GraphKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn from_value(value: &Value) -> Self {
        Self(canonical_text(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GraphKey {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_GRAPH_KEY)
    }
}

impl fmt::Display for GraphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GraphKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GraphKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
