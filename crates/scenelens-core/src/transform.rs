//! Ancestor transform accumulation.
//!
//! An element's local bounds live in its owning sub-graph's space. The
//! offset into viewport space is the sum of the translate ops of every
//! ancestor, from the immediate parent up to (not including) the root.
//!
//! The parent chain comes from a live, externally mutated store and may be
//! malformed or cyclic, so the walk is iterative and capped by a depth
//! limit. Hitting the cap still returns the partial sum.

use serde::Serialize;
use tracing::warn;

use scenelens_protocols::types::{GraphKey, Offset, TransformOp};

use crate::topology::Topology;

pub const DEFAULT_DEPTH_LIMIT: usize = 10;

/// One ancestor visited by the walk and what it contributed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AncestorStep {
    pub key: GraphKey,
    pub dx: f64,
    pub dy: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub distorted: bool,
}

/// Result of walking one owner's ancestor chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulation {
    pub offset: Offset,
    /// Ancestors in walk order, nearest first.
    pub ancestors: Vec<AncestorStep>,
    /// Some ancestor scales or rotates; the offset ignores it.
    pub distorted: bool,
    /// The walk stopped at the depth limit before reaching the root.
    pub depth_limited: bool,
    /// No topology was available; the offset is zero by fallback.
    pub topology_missing: bool,
}

impl Accumulation {
    /// Zero offset used when the scene store could not be read.
    pub fn without_topology() -> Self {
        Self {
            topology_missing: true,
            ..Default::default()
        }
    }

    pub fn is_approximate(&self) -> bool {
        self.distorted || self.depth_limited || self.topology_missing
    }
}

/// Translate part of an op list, and whether any op distorts.
pub fn translate_component(ops: &[TransformOp]) -> (Offset, bool) {
    ops.iter().fold((Offset::ZERO, false), |(offset, distorted), op| {
        let offset = match op.translation() {
            Some(t) => offset + t,
            None => offset,
        };
        (offset, distorted || op.distorts())
    })
}

/// Walks parent chains of one topology snapshot.
pub struct TransformAccumulator<'a> {
    topology: &'a Topology,
    root: &'a GraphKey,
    depth_limit: usize,
}

impl<'a> TransformAccumulator<'a> {
    pub fn new(topology: &'a Topology, root: &'a GraphKey, depth_limit: usize) -> Self {
        Self {
            topology,
            root,
            depth_limit,
        }
    }

    /// Sum ancestor translations for an element owned by `owner`.
    pub fn accumulate(&self, owner: &GraphKey) -> Accumulation {
        let mut acc = Accumulation::default();
        if owner == self.root {
            return acc;
        }

        let mut current = owner;
        while let Some(parent) = self.topology.parent_of(current) {
            if parent == self.root {
                break;
            }
            if acc.ancestors.len() >= self.depth_limit {
                acc.depth_limited = true;
                warn!(
                    graph_key = %owner,
                    depth = self.depth_limit,
                    stopped_at = %current,
                    "Ancestor chain exceeded depth limit, offset is partial"
                );
                break;
            }

            let (step, distorted) = translate_component(self.topology.transforms_of(parent));
            acc.offset += step;
            acc.distorted |= distorted;
            acc.ancestors.push(AncestorStep {
                key: parent.clone(),
                dx: step.dx,
                dy: step.dy,
                distorted,
            });
            current = parent;
        }

        acc
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
