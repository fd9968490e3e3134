//! Duplicate registration resolution.
//!
//! The host registry only appends or overwrites; a replaced sub-graph leaves
//! its old registrations behind. One entry per id survives, picked by:
//!
//! 1. entries owned by the root graph outrank all others;
//! 2. otherwise the latest registration timestamp wins.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::trace;

use scenelens_protocols::types::{ElementId, GraphKey, SemanticElement};

pub struct VersionResolver {
    root: GraphKey,
}

impl VersionResolver {
    pub fn new(root: GraphKey) -> Self {
        Self { root }
    }

    /// Whether `candidate` should replace `incumbent`.
    ///
    /// Equal rank keeps the incumbent, so the first row read wins exact ties.
    pub fn outranks(&self, candidate: &SemanticElement, incumbent: &SemanticElement) -> bool {
        let candidate_root = candidate.owning_graph == self.root;
        let incumbent_root = incumbent.owning_graph == self.root;
        match (candidate_root, incumbent_root) {
            (true, false) => true,
            (false, true) => false,
            _ => candidate.registered_at > incumbent.registered_at,
        }
    }

    /// Collapse duplicates to one entry per id, ordered by id.
    pub fn resolve(&self, entries: Vec<SemanticElement>) -> Vec<SemanticElement> {
        let mut winners: HashMap<ElementId, SemanticElement> = HashMap::with_capacity(entries.len());

        for entry in entries {
            match winners.entry(entry.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(mut slot) => {
                    if self.outranks(&entry, slot.get()) {
                        trace!(
                            element_id = %entry.id,
                            winner = %entry.owning_graph,
                            loser = %slot.get().owning_graph,
                            "Replacing stale registration"
                        );
                        slot.insert(entry);
                    }
                }
            }
        }

        let mut resolved: Vec<_> = winners.into_values().collect();
        resolved.sort_by(|a, b| a.id.cmp(&b.id));
        resolved
    }
}
