//! Raw snapshot records as copied out of the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One registry row in whatever shape the host stored it.
///
/// Shapes are decoded by the engine; this type carries them untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRegistryEntry {
    pub key: Value,
    pub value: Value,
}

impl RawRegistryEntry {
    pub fn new(key: Value, value: Value) -> Self {
        Self { key, value }
    }
}
