//! Scene graph topology snapshot.
//!
//! Rebuilt from scratch for every query: the host mutates its scene store
//! every frame and sends no change notifications.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use scenelens_protocols::error::IntrospectionError;
use scenelens_protocols::host::TopologySource;
use scenelens_protocols::types::{GraphKey, GraphNode, TransformOp};

use crate::bounded::read_bounded;

/// Child-to-parent map plus per-node transforms, taken from one snapshot.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    parents: HashMap<GraphKey, GraphKey>,
    transforms: HashMap<GraphKey, Vec<TransformOp>>,
    rendered: HashSet<GraphKey>,
}

impl Topology {
    /// Build from copied node records.
    ///
    /// A child claimed by several parents keeps the first claim seen.
    pub fn build(nodes: Vec<GraphNode>) -> Self {
        let mut topology = Self::default();

        for node in nodes {
            for child in node.children {
                if child == node.key {
                    debug!(graph_key = %child, "Ignoring self-parenting child entry");
                    continue;
                }
                match topology.parents.get(&child) {
                    Some(existing) if *existing != node.key => {
                        debug!(
                            graph_key = %child,
                            kept = %existing,
                            ignored = %node.key,
                            "Sub-graph has more than one parent"
                        );
                    }
                    Some(_) => {}
                    None => {
                        topology.parents.insert(child, node.key.clone());
                    }
                }
            }
            if node.rendered {
                topology.rendered.insert(node.key.clone());
            }
            topology.transforms.insert(node.key, node.transform_ops);
        }

        topology
    }

    /// Take a bounded snapshot from `source`. `Ok(None)` when the store is unavailable.
    pub async fn snapshot(
        source: Arc<dyn TopologySource>,
        timeout: Duration,
    ) -> Result<Option<Self>, IntrospectionError> {
        let nodes = read_bounded("topology read", timeout, move || source.read_topology()).await?;
        Ok(nodes.map(Self::build))
    }

    pub fn parent_of(&self, key: &GraphKey) -> Option<&GraphKey> {
        self.parents.get(key)
    }

    pub fn transforms_of(&self, key: &GraphKey) -> &[TransformOp] {
        self.transforms.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_rendered(&self, key: &GraphKey) -> bool {
        self.rendered.contains(key)
    }

    /// Number of known sub-graphs.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenelens_protocols::error::HostError;

    fn sample() -> Vec<GraphNode> {
        vec![
            GraphNode::new("_root_").with_child("g1"),
            GraphNode::new("g1").translated(300.0, 100.0).with_child("g2"),
            GraphNode::new("g2"),
        ]
    }

    #[test]
    fn test_build_parent_map() {
        let topology = Topology::build(sample());
        assert_eq!(topology.parent_of(&"g2".into()), Some(&GraphKey::new("g1")));
        assert_eq!(topology.parent_of(&"g1".into()), Some(&GraphKey::new("_root_")));
        assert_eq!(topology.parent_of(&"_root_".into()), None);
        assert_eq!(topology.len(), 3);
    }

    #[test]
    fn test_transforms_lookup() {
        let topology = Topology::build(sample());
        assert_eq!(
            topology.transforms_of(&"g1".into()),
            &[TransformOp::Translate { x: 300.0, y: 100.0 }]
        );
        assert!(topology.transforms_of(&"g2".into()).is_empty());
        assert!(topology.transforms_of(&"unknown".into()).is_empty());
    }

    #[test]
    fn test_rendered_flag() {
        let mut nodes = sample();
        nodes[2].rendered = false;
        let topology = Topology::build(nodes);
        assert!(topology.is_rendered(&"g1".into()));
        assert!(!topology.is_rendered(&"g2".into()));
    }

    #[test]
    fn test_first_parent_claim_wins() {
        let topology = Topology::build(vec![
            GraphNode::new("a").with_child("shared"),
            GraphNode::new("b").with_child("shared"),
        ]);
        assert_eq!(topology.parent_of(&"shared".into()), Some(&GraphKey::new("a")));
    }

    #[test]
    fn test_self_parenting_ignored() {
        let topology = Topology::build(vec![GraphNode::new("loop").with_child("loop")]);
        assert!(topology.parent_of(&"loop".into()).is_none());
    }

    #[test]
    fn test_child_without_own_record() {
        let topology = Topology::build(vec![GraphNode::new("_root_").with_child("ghost")]);
        assert_eq!(topology.parent_of(&"ghost".into()), Some(&GraphKey::new("_root_")));
        assert!(!topology.is_rendered(&"ghost".into()));
    }

    #[test]
    fn test_empty() {
        let topology = Topology::build(vec![]);
        assert!(topology.is_empty());
    }

    struct Store(Option<Vec<GraphNode>>);

    impl TopologySource for Store {
        fn read_topology(&self) -> Result<Option<Vec<GraphNode>>, HostError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_snapshot_present() {
        let topology = Topology::snapshot(Arc::new(Store(Some(sample()))), Duration::from_secs(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(topology.len(), 3);
    }

    #[tokio::test]
    async fn test_snapshot_unavailable() {
        let topology = Topology::snapshot(Arc::new(Store(None)), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(topology.is_none());
    }
}
