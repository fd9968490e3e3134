//! Registry snapshot decoding.
//!
//! The host registry has stored elements in two shapes over time:
//!
//! - **flat**: key `[scene, element_id]`, value is one element record
//! - **nested**: key is a sub-graph key, value is
//!   `{"elements": {id: record, ...}, "timestamp": n}`
//!
//! Both may be present in the same snapshot. Each row is decoded by the
//! shape it actually fits; rows that fit neither are skipped and counted.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use scenelens_protocols::error::IntrospectionError;
use scenelens_protocols::host::{RawRegistryEntry, RegistrySource};
use scenelens_protocols::types::{Bounds, ElementId, GraphKey, SemanticElement};

use crate::bounded::read_bounded;

/// Decoded registry content.
#[derive(Debug, Clone, Default)]
pub struct RegistryRead {
    /// Every decoded element, duplicates included.
    pub elements: Vec<SemanticElement>,
    /// Rows or nested entries that matched no known shape.
    pub skipped: usize,
    /// False when the host has no semantic registry at all.
    pub present: bool,
}

impl RegistryRead {
    pub fn absent() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordShape {
    Nested(NestedRecord),
    Flat(ElementRecord),
}

#[derive(Debug, Deserialize)]
struct NestedRecord {
    elements: Map<String, Value>,
    #[serde(default, alias = "registered_at")]
    timestamp: u64,
}

#[derive(Debug, Deserialize)]
struct ElementRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    clickable: bool,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    z_index: Option<i32>,
    #[serde(alias = "local_bounds")]
    bounds: Bounds,
    #[serde(default, alias = "timestamp")]
    registered_at: Option<u64>,
    #[serde(default, alias = "graph_key")]
    owner: Option<Value>,
}

impl ElementRecord {
    fn into_element(self, id: ElementId, owner: GraphKey, registered_at: u64) -> SemanticElement {
        SemanticElement {
            id,
            kind: self.kind,
            clickable: self.clickable,
            label: self.label,
            role: self.role,
            description: self.description,
            z_index: self.z_index,
            local_bounds: self.bounds,
            owning_graph: owner,
            registered_at,
        }
    }
}

/// Decodes raw registry rows into semantic elements.
pub struct RegistryReader;

impl RegistryReader {
    /// Take a bounded snapshot from `source` and decode it.
    pub async fn snapshot(
        source: Arc<dyn RegistrySource>,
        timeout: Duration,
    ) -> Result<RegistryRead, IntrospectionError> {
        let raw = read_bounded("registry read", timeout, move || source.read_registry()).await?;
        let read = Self::decode(raw);
        if read.skipped > 0 {
            warn!(
                skipped = read.skipped,
                decoded = read.elements.len(),
                "Skipped registry entries with unknown shape"
            );
        }
        Ok(read)
    }

    /// Decode a copied registry. `None` yields an absent registry with no elements.
    pub fn decode(raw: Option<Vec<RawRegistryEntry>>) -> RegistryRead {
        let Some(rows) = raw else {
            return RegistryRead::absent();
        };

        let mut read = RegistryRead {
            present: true,
            ..Default::default()
        };
        for row in rows {
            Self::decode_row(row, &mut read);
        }
        read
    }

    fn decode_row(row: RawRegistryEntry, read: &mut RegistryRead) {
        let shape = match serde_json::from_value::<RecordShape>(row.value) {
            Ok(shape) => shape,
            Err(e) => {
                debug!(key = %row.key, error = %e, "Registry value matches no known shape");
                read.skipped += 1;
                return;
            }
        };

        match (&row.key, shape) {
            (Value::Array(parts), RecordShape::Flat(record)) if parts.len() == 2 => {
                let scene = GraphKey::from_value(&parts[0]);
                let id = ElementId::from_value(&parts[1]);
                let owner = record
                    .owner
                    .as_ref()
                    .map(GraphKey::from_value)
                    .unwrap_or(scene);
                let registered_at = record.registered_at.unwrap_or(0);
                read.elements.push(record.into_element(id, owner, registered_at));
            }
            (key @ (Value::String(_) | Value::Number(_)), RecordShape::Nested(nested)) => {
                let owner = GraphKey::from_value(key);
                for (raw_id, value) in nested.elements {
                    match serde_json::from_value::<ElementRecord>(value) {
                        Ok(record) => read.elements.push(record.into_element(
                            ElementId::new(raw_id),
                            owner.clone(),
                            nested.timestamp,
                        )),
                        Err(e) => {
                            debug!(graph_key = %owner, element_id = %raw_id, error = %e, "Malformed nested element");
                            read.skipped += 1;
                        }
                    }
                }
            }
            (key, _) => {
                debug!(key = %key, "Registry key does not fit its record shape");
                read.skipped += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "registry_reader_tests.rs"]
mod tests;
