use super::*;
use scenelens_protocols::types::{Bounds, GraphNode, Point};

fn root() -> GraphKey {
    GraphKey::new("_root_")
}

/// `_root_ -> g1 (translate 300,100) -> g2`
fn two_level() -> Topology {
    Topology::build(vec![
        GraphNode::new("_root_").with_child("g1"),
        GraphNode::new("g1").translated(300.0, 100.0).with_child("g2"),
        GraphNode::new("g2").translated(5.0, 5.0),
    ])
}

/// A straight chain `_root_ -> n{len} -> ... -> n1 -> n0`, each translating by (1, 2).
fn chain(len: usize) -> Topology {
    let mut nodes = vec![GraphNode::new("_root_").with_child(format!("n{}", len))];
    for i in (1..=len).rev() {
        nodes.push(
            GraphNode::new(format!("n{}", i))
                .translated(1.0, 2.0)
                .with_child(format!("n{}", i - 1)),
        );
    }
    nodes.push(GraphNode::new("n0"));
    Topology::build(nodes)
}

#[test]
fn test_root_owner_has_zero_offset() {
    let topology = two_level();
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT).accumulate(&root);
    assert_eq!(acc.offset, Offset::ZERO);
    assert!(acc.ancestors.is_empty());
    assert!(!acc.is_approximate());
}

#[test]
fn test_orphan_owner_has_zero_offset() {
    let topology = two_level();
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("detached"));
    assert_eq!(acc.offset, Offset::ZERO);
    assert!(!acc.depth_limited);
}

#[test]
fn test_direct_child_of_root_has_zero_offset() {
    let topology = two_level();
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("g1"));
    assert_eq!(acc.offset, Offset::ZERO);
}

#[test]
fn test_save_button_example() {
    let topology = two_level();
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("g2"));
    assert_eq!(acc.offset, Offset::new(300.0, 100.0));
    assert_eq!(acc.ancestors.len(), 1);
    assert_eq!(acc.ancestors[0].key.as_str(), "g1");

    let absolute = Bounds::new(10.0, 20.0, 100.0, 30.0).translate(acc.offset);
    assert_eq!(absolute, Bounds::new(310.0, 120.0, 100.0, 30.0));
    assert_eq!(absolute.center(), Some(Point::new(360.0, 135.0)));
}

#[test]
fn test_owner_own_transform_not_counted() {
    // g2 translates by (5,5) itself; only ancestors contribute.
    let topology = two_level();
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("g2"));
    assert_eq!(acc.offset, Offset::new(300.0, 100.0));
}

#[test]
fn test_multi_level_sum() {
    let topology = chain(5);
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("n0"));
    assert_eq!(acc.offset, Offset::new(5.0, 10.0));
    assert_eq!(acc.ancestors.len(), 5);
    assert_eq!(acc.ancestors[0].key.as_str(), "n1");
    assert_eq!(acc.ancestors[4].key.as_str(), "n5");
    assert!(!acc.depth_limited);
}

#[test]
fn test_exactly_limit_ancestors_completes() {
    let topology = chain(10);
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, 10).accumulate(&GraphKey::new("n0"));
    assert_eq!(acc.ancestors.len(), 10);
    assert!(!acc.depth_limited);
    assert_eq!(acc.offset, Offset::new(10.0, 20.0));
}

#[test]
fn test_eleven_deep_chain_hits_guard() {
    let topology = chain(11);
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, 10).accumulate(&GraphKey::new("n0"));
    assert!(acc.depth_limited);
    assert!(acc.is_approximate());
    assert_eq!(acc.ancestors.len(), 10);
    assert_eq!(acc.offset, Offset::new(10.0, 20.0));
}

#[test]
fn test_cycle_terminates() {
    let topology = Topology::build(vec![
        GraphNode::new("a").translated(1.0, 0.0).with_child("b"),
        GraphNode::new("b").translated(0.0, 1.0).with_child("a"),
    ]);
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("a"));
    assert!(acc.depth_limited);
    assert_eq!(acc.ancestors.len(), DEFAULT_DEPTH_LIMIT);
    assert_eq!(acc.offset, Offset::new(5.0, 5.0));
}

#[test]
fn test_distorting_ancestor_flagged() {
    let topology = Topology::build(vec![
        GraphNode::new("_root_").with_child("zoom"),
        GraphNode::new("zoom")
            .translated(10.0, 10.0)
            .with_transform(TransformOp::Scale { x: 2.0, y: 2.0 })
            .with_child("leaf"),
        GraphNode::new("leaf"),
    ]);
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("leaf"));
    assert_eq!(acc.offset, Offset::new(10.0, 10.0));
    assert!(acc.distorted);
    assert!(acc.ancestors[0].distorted);
    assert!(acc.is_approximate());
}

#[test]
fn test_identity_scale_not_flagged() {
    let topology = Topology::build(vec![
        GraphNode::new("_root_").with_child("p"),
        GraphNode::new("p")
            .with_transform(TransformOp::Scale { x: 1.0, y: 1.0 })
            .with_child("leaf"),
        GraphNode::new("leaf"),
    ]);
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("leaf"));
    assert!(!acc.is_approximate());
}

#[test]
fn test_translate_component_sums_all_translates() {
    let ops = [
        TransformOp::Translate { x: 1.0, y: 2.0 },
        TransformOp::Unknown,
        TransformOp::Translate { x: 3.0, y: -4.0 },
    ];
    let (offset, distorted) = translate_component(&ops);
    assert_eq!(offset, Offset::new(4.0, -2.0));
    assert!(distorted);
}

#[test]
fn test_without_topology_is_approximate() {
    let acc = Accumulation::without_topology();
    assert_eq!(acc.offset, Offset::ZERO);
    assert!(acc.is_approximate());
}

#[test]
fn test_ancestor_order_does_not_change_sum() {
    let forward = Topology::build(vec![
        GraphNode::new("_root_").with_child("a"),
        GraphNode::new("a").translated(7.5, -3.0).with_child("b"),
        GraphNode::new("b").translated(-2.0, 11.0).with_child("leaf"),
    ]);
    let swapped = Topology::build(vec![
        GraphNode::new("_root_").with_child("a"),
        GraphNode::new("a").translated(-2.0, 11.0).with_child("b"),
        GraphNode::new("b").translated(7.5, -3.0).with_child("leaf"),
    ]);
    let root = root();
    let leaf = GraphKey::new("leaf");
    let a = TransformAccumulator::new(&forward, &root, DEFAULT_DEPTH_LIMIT).accumulate(&leaf);
    let b = TransformAccumulator::new(&swapped, &root, DEFAULT_DEPTH_LIMIT).accumulate(&leaf);
    assert_eq!(a.offset, b.offset);
    assert_eq!(a.offset, Offset::new(5.5, 8.0));
}

#[test]
fn test_custom_root_sentinel() {
    let topology = Topology::build(vec![
        GraphNode::new("main").translated(99.0, 99.0).with_child("panel"),
        GraphNode::new("panel").translated(4.0, 4.0).with_child("leaf"),
    ]);
    let main = GraphKey::new("main");
    let acc = TransformAccumulator::new(&topology, &main, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("leaf"));
    assert_eq!(acc.offset, Offset::new(4.0, 4.0));
}

#[test]
fn test_parentless_top_node_translate_counts() {
    // No configured root in the snapshot: `top` is the implicit root, and its
    // translate is still part of the sum.
    let topology = Topology::build(vec![
        GraphNode::new("top").translated(7.0, 7.0).with_child("g1"),
        GraphNode::new("g1").translated(1.0, 2.0).with_child("g2"),
        GraphNode::new("g2").translated(50.0, 50.0),
    ]);
    let root = root();
    let acc = TransformAccumulator::new(&topology, &root, DEFAULT_DEPTH_LIMIT)
        .accumulate(&GraphKey::new("g2"));

    assert_eq!(acc.offset, Offset::new(8.0, 9.0));
    let keys: Vec<&str> = acc.ancestors.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, vec!["g1", "top"]);
    assert!(!acc.depth_limited);
    assert!(!acc.is_approximate());
}
