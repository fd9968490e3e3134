//! Non-fatal findings attached to query results.

use serde::{Deserialize, Serialize};

use super::GraphKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    NoRegistry,
    NoTopology,
    DepthLimitExceeded,
    SkippedRegistryEntries,
    ApproximatePosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_key: Option<GraphKey>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            graph_key: None,
        }
    }

    pub fn for_graph(mut self, key: GraphKey) -> Self {
        self.graph_key = Some(key);
        self
    }
}
