//! In-process live viewport.
//!
//! The store an embedding GUI writes registrations and sub-graphs into, and
//! the engine reads from. Reads copy everything out under a short read lock,
//! so the engine never observes a half-applied write.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info};

use scenelens_protocols::error::HostError;
use scenelens_protocols::host::{RawRegistryEntry, RegistrySource, TopologySource};
use scenelens_protocols::types::{Bounds, GraphKey, GraphNode, SemanticElement, TransformOp};

/// Scene file loading errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene file: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk scene description.
///
/// A `null` registry or graph list describes a host without that store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default = "empty_rows")]
    pub registry: Option<Vec<RawRegistryEntry>>,
    #[serde(default = "empty_graphs")]
    pub graphs: Option<Vec<GraphNode>>,
}

fn empty_rows() -> Option<Vec<RawRegistryEntry>> {
    Some(Vec::new())
}

fn empty_graphs() -> Option<Vec<GraphNode>> {
    Some(Vec::new())
}

#[derive(Serialize)]
struct ElementRecordOut<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    clickable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    z_index: Option<i32>,
    bounds: &'a Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<u64>,
}

fn element_record(element: &SemanticElement, timestamp: Option<u64>) -> Value {
    let record = ElementRecordOut {
        kind: &element.kind,
        clickable: element.clickable,
        label: element.label.as_deref(),
        role: element.role.as_deref(),
        description: element.description.as_deref(),
        z_index: element.z_index,
        bounds: &element.local_bounds,
        timestamp,
    };
    serde_json::to_value(record).unwrap_or(Value::Null)
}

/// Shared, concurrently mutated registry and scene store.
pub struct LiveViewport {
    registry: RwLock<Option<BTreeMap<String, RawRegistryEntry>>>,
    graphs: RwLock<Option<BTreeMap<GraphKey, GraphNode>>>,
    clock: AtomicU64,
}

impl LiveViewport {
    /// Empty viewport with both stores enabled.
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Some(BTreeMap::new())),
            graphs: RwLock::new(Some(BTreeMap::new())),
            clock: AtomicU64::new(0),
        }
    }

    pub fn from_scene(scene: SceneFile) -> Self {
        let viewport = Self::new();
        let mut latest = 0;

        match scene.registry {
            Some(rows) => {
                for row in rows {
                    latest = latest.max(row_timestamp(&row.value));
                    viewport.insert_raw(row);
                }
            }
            None => viewport.disable_registry(),
        }
        match scene.graphs {
            Some(nodes) => {
                for node in nodes {
                    viewport.put_graph(node);
                }
            }
            None => viewport.disable_topology(),
        }

        viewport.clock.store(latest, Ordering::SeqCst);
        viewport
    }

    pub fn load_scene_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        let scene: SceneFile = serde_json::from_str(&content)?;
        let viewport = Self::from_scene(scene);
        info!(
            path = %path.display(),
            rows = viewport.registry_len(),
            graphs = viewport.graph_len(),
            "Loaded scene file"
        );
        Ok(viewport)
    }

    /// Advance the registration clock.
    pub fn next_timestamp(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Register one element in the flat `[scene, id]` shape. Returns its timestamp.
    pub fn register_element(&self, element: &SemanticElement) -> u64 {
        let timestamp = self.next_timestamp();
        self.insert_raw(RawRegistryEntry::new(
            json!([element.owning_graph.as_str(), element.id.as_str()]),
            element_record(element, Some(timestamp)),
        ));
        timestamp
    }

    /// Replace a sub-graph's registrations in the nested shape. Returns the shared timestamp.
    pub fn register_graph_elements(&self, graph: &GraphKey, elements: &[SemanticElement]) -> u64 {
        let timestamp = self.next_timestamp();
        let map: serde_json::Map<String, Value> = elements
            .iter()
            .map(|el| (el.id.as_str().to_string(), element_record(el, None)))
            .collect();
        self.insert_raw(RawRegistryEntry::new(
            json!(graph.as_str()),
            json!({"elements": map, "timestamp": timestamp}),
        ));
        timestamp
    }

    /// Store a row verbatim, overwriting any row with the same key.
    ///
    /// Re-enables a disabled registry.
    pub fn insert_raw(&self, entry: RawRegistryEntry) {
        let key = entry.key.to_string();
        let mut guard = self.registry.write();
        guard.get_or_insert_with(BTreeMap::new).insert(key, entry);
    }

    pub fn disable_registry(&self) {
        *self.registry.write() = None;
    }

    pub fn put_graph(&self, node: GraphNode) {
        debug!(graph_key = %node.key, children = node.children.len(), "Graph updated");
        let mut guard = self.graphs.write();
        guard
            .get_or_insert_with(BTreeMap::new)
            .insert(node.key.clone(), node);
    }

    pub fn remove_graph(&self, key: &GraphKey) -> Option<GraphNode> {
        self.graphs.write().as_mut().and_then(|g| g.remove(key))
    }

    /// Replace a known graph's transform list. Returns false for unknown keys.
    pub fn set_transforms(&self, key: &GraphKey, ops: Vec<TransformOp>) -> bool {
        let mut guard = self.graphs.write();
        match guard.as_mut().and_then(|g| g.get_mut(key)) {
            Some(node) => {
                node.transform_ops = ops;
                true
            }
            None => false,
        }
    }

    pub fn disable_topology(&self) {
        *self.graphs.write() = None;
    }

    pub fn registry_len(&self) -> usize {
        self.registry.read().as_ref().map_or(0, BTreeMap::len)
    }

    pub fn graph_len(&self) -> usize {
        self.graphs.read().as_ref().map_or(0, BTreeMap::len)
    }
}

impl Default for LiveViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrySource for LiveViewport {
    fn read_registry(&self) -> Result<Option<Vec<RawRegistryEntry>>, HostError> {
        Ok(self
            .registry
            .read()
            .as_ref()
            .map(|rows| rows.values().cloned().collect()))
    }
}

impl TopologySource for LiveViewport {
    fn read_topology(&self) -> Result<Option<Vec<GraphNode>>, HostError> {
        Ok(self
            .graphs
            .read()
            .as_ref()
            .map(|nodes| nodes.values().cloned().collect()))
    }
}

fn row_timestamp(value: &Value) -> u64 {
    ["timestamp", "registered_at"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_u64))
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "live_tests.rs"]
mod tests;
