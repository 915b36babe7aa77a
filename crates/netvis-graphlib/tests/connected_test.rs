use netvis_graphlib::{EdgeRecord, Error, GraphData, NodeRecord, VisGraph};

fn star() -> VisGraph {
    let mut g = VisGraph::new();
    g.add_nodes(vec![
        NodeRecord::new("hub"),
        NodeRecord::new("a"),
        NodeRecord::new("b"),
        NodeRecord::new("c"),
        NodeRecord::new("lonely"),
    ])
    .unwrap();
    g.add_edges(vec![
        EdgeRecord::new("e1", "hub", "a").with_value(5.0),
        EdgeRecord::new("e2", "b", "hub").with_value(1.0),
        EdgeRecord::new("e3", "hub", "c"),
        EdgeRecord::new("e4", "a", "hub"),
    ])
    .unwrap();
    g
}

#[test]
fn connected_queries_follow_both_edge_directions() {
    let g = star();
    assert_eq!(g.connected_edges("hub").unwrap(), ["e1", "e2", "e3", "e4"]);
    assert_eq!(g.connected_nodes("hub").unwrap(), ["a", "b", "c"]);
    assert_eq!(g.connected_nodes("b").unwrap(), ["hub"]);
    assert!(g.connected_edges("lonely").unwrap().is_empty());
}

#[test]
fn connected_queries_reject_unknown_nodes() {
    let g = star();
    assert_eq!(
        g.connected_nodes("nope"),
        Err(Error::UnknownNode { id: "nope".into() })
    );
}

#[test]
fn edges_need_existing_endpoints() {
    let mut g = star();
    let err = g
        .add_edge(EdgeRecord::new("bad", "hub", "ghost"))
        .unwrap_err();
    assert_eq!(
        err,
        Error::MissingEndpoint {
            edge_id: "bad".into(),
            node_id: "ghost".into()
        }
    );
    assert!(g.edge("bad").is_none());
}

#[test]
fn removing_nodes_takes_incident_edges_and_restore_puts_them_back() {
    let mut g = star();
    let removed = g.remove_nodes(["a", "b"]);
    assert_eq!(removed.nodes.len(), 2);
    let mut edge_ids: Vec<_> = removed.edges.iter().map(|e| e.id.as_str()).collect();
    edge_ids.sort();
    assert_eq!(edge_ids, ["e1", "e2", "e4"]);
    assert_eq!(g.connected_edges("hub").unwrap(), ["e3"]);

    assert!(g.restore(removed).is_empty());
    assert_eq!(g.nodes().len(), 5);
    assert_eq!(g.edges().len(), 4);
    assert_eq!(g.connected_nodes("hub").unwrap().len(), 3);
}

#[test]
fn restore_keeps_records_that_took_a_removed_id() {
    let mut g = star();
    let removed = g.remove_nodes(["a", "c"]);
    g.add_node(NodeRecord::at("a", 7.0, 7.0)).unwrap();
    g.add_edge(EdgeRecord::new("e3", "hub", "b")).unwrap();
    g.remove_nodes(["lonely"]);

    let skipped = g.restore(removed);
    let skipped_nodes: Vec<_> = skipped.nodes.iter().map(|n| n.id.as_str()).collect();
    let skipped_edges: Vec<_> = skipped.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(skipped_nodes, ["a"]);
    assert_eq!(skipped_edges, ["e3"]);

    assert_eq!(g.node("a").unwrap().x, 7.0);
    assert!(g.node("c").is_some());
    assert_eq!(g.edge("e3").unwrap().to, "b");
    assert!(g.edge("e1").is_some() && g.edge("e4").is_some());
    assert_eq!(g.connected_nodes("a").unwrap(), ["hub"]);
    assert_eq!(g.connected_nodes("hub").unwrap(), ["b", "a"]);
}

#[test]
fn graph_data_uses_vis_field_names() {
    let json = r#"{
        "nodes": [{"id": "a", "label": "A", "x": 1.5}, {"id": "b", "hidden": true}],
        "edges": [{"id": "e", "from": "a", "to": "b", "value": 7}]
    }"#;
    let data: GraphData = serde_json::from_str(json).unwrap();
    let g = VisGraph::from_data(data).unwrap();
    assert_eq!(g.node("a").unwrap().x, 1.5);
    assert!(g.node("b").unwrap().hidden);
    assert_eq!(g.edge("e").unwrap().value, Some(7.0));

    let back = serde_json::to_value(g.to_data()).unwrap();
    assert_eq!(back["edges"][0]["from"], "a");
    assert_eq!(back["nodes"][1]["hidden"], true);
}
