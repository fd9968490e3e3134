//! Collaborator trait definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RawRegistryEntry;
use crate::error::HostError;
use crate::types::GraphNode;

/// Read access to the host's semantic element registry.
///
/// Reads may block; callers bound them with a timeout.
pub trait RegistrySource: Send + Sync {
    /// Copy every registry row. `Ok(None)` means the host runs without a
    /// semantic registry.
    fn read_registry(&self) -> Result<Option<Vec<RawRegistryEntry>>, HostError>;
}

/// Read access to the host's scene/script store.
pub trait TopologySource: Send + Sync {
    /// Copy every sub-graph record. `Ok(None)` means the store is unavailable.
    fn read_topology(&self) -> Result<Option<Vec<GraphNode>>, HostError>;
}

/// What a synthetic pointer event should do at its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerIntent {
    Click,
    Move,
}

/// Delivers synthetic pointer input at absolute screen coordinates.
#[async_trait]
pub trait InputDispatcher: Send + Sync {
    async fn dispatch(&self, x: i32, y: i32, intent: PointerIntent) -> Result<(), HostError>;
}
