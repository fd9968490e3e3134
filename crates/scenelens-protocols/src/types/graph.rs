//! Scene graph node records.

use serde::{Deserialize, Serialize};

use super::{GraphKey, Offset};

/// One entry of a sub-graph's transform list.
///
/// Only `translate` contributes to accumulated offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    Translate { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    Rotate { radians: f64 },
    #[serde(other)]
    Unknown,
}

impl TransformOp {
    pub fn translation(&self) -> Option<Offset> {
        match self {
            Self::Translate { x, y } => Some(Offset::new(*x, *y)),
            _ => None,
        }
    }

    /// True for ops that change geometry in ways a pure offset cannot express.
    ///
    /// Unrecognised ops (skew, matrix, ...) count as distorting.
    pub fn distorts(&self) -> bool {
        match self {
            Self::Scale { x, y } => *x != 1.0 || *y != 1.0,
            Self::Rotate { radians } => *radians != 0.0,
            Self::Translate { .. } => false,
            Self::Unknown => true,
        }
    }
}

/// A sub-graph as exposed by the host's scene store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub key: GraphKey,

    /// Child sub-graph keys in paint order.
    #[serde(default)]
    pub children: Vec<GraphKey>,

    #[serde(default, rename = "transforms")]
    pub transform_ops: Vec<TransformOp>,

    /// Present in the live render table.
    #[serde(default = "default_rendered")]
    pub rendered: bool,
}

fn default_rendered() -> bool {
    true
}

impl GraphNode {
    pub fn new(key: impl Into<GraphKey>) -> Self {
        Self {
            key: key.into(),
            children: Vec::new(),
            transform_ops: Vec::new(),
            rendered: true,
        }
    }

    pub fn with_child(mut self, child: impl Into<GraphKey>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_transform(mut self, op: TransformOp) -> Self {
        self.transform_ops.push(op);
        self
    }

    pub fn translated(self, x: f64, y: f64) -> Self {
        self.with_transform(TransformOp::Translate { x, y })
    }
}
