use netvis::{
    EdgeRecord, Error, HeadlessHost, NodeRecord, OverlapOptions, PhysicsOptions, VisGraph,
    distribute_radially, expand_node, resolve_graph_overlaps, set_physics_enabled,
};
use std::f64::consts::PI;

fn citation_graph() -> VisGraph {
    let mut g = VisGraph::new();
    g.add_nodes(vec![
        NodeRecord::at("paper", 50.0, 50.0),
        NodeRecord::new("strong").hidden(true),
        NodeRecord::new("weak").hidden(true),
        NodeRecord::new("unweighted").hidden(true),
        NodeRecord::new("isolated"),
    ])
    .unwrap();
    g.add_edges(vec![
        EdgeRecord::new("e-strong", "paper", "strong").with_value(12.0),
        EdgeRecord::new("e-weak", "weak", "paper").with_value(2.0),
        EdgeRecord::new("e-plain", "paper", "unweighted"),
    ])
    .unwrap();
    g
}

#[test]
fn expand_hides_light_edges_and_their_unreached_neighbors() {
    let mut g = citation_graph();
    let out = expand_node(&mut g, "paper", 10.0).unwrap();

    assert_eq!(out.shown_nodes, ["strong", "unweighted"]);
    assert_eq!(out.hidden_nodes, ["weak"]);
    assert_eq!((out.shown_edges, out.hidden_edges), (2, 1));

    assert!(!g.node("strong").unwrap().hidden);
    assert!(!g.node("unweighted").unwrap().hidden);
    assert!(g.node("weak").unwrap().hidden);
    assert!(g.edge("e-weak").unwrap().hidden);
    assert!(!g.edge("e-plain").unwrap().hidden);
}

#[test]
fn expand_threshold_is_strictly_below() {
    let mut g = citation_graph();
    expand_node(&mut g, "paper", 12.0).unwrap();
    assert!(!g.edge("e-strong").unwrap().hidden);
    assert!(!g.node("strong").unwrap().hidden);
}

#[test]
fn expand_without_edges_changes_nothing() {
    let mut g = citation_graph();
    let out = expand_node(&mut g, "isolated", 0.0).unwrap();
    assert_eq!(out, Default::default());
    assert!(g.node("weak").unwrap().hidden);
}

#[test]
fn expand_unknown_node_is_an_error() {
    let mut g = citation_graph();
    assert!(matches!(
        expand_node(&mut g, "ghost", 1.0),
        Err(Error::Graph(netvis_graphlib::Error::UnknownNode { .. }))
    ));
}

#[test]
fn radial_distribution_places_and_reveals_neighbors() {
    let mut g = citation_graph();
    let mut host = HeadlessHost::new();
    let neighbors = g.connected_nodes("paper").unwrap();

    let placed = distribute_radially(&mut g, &mut host, "paper", &neighbors, 100.0).unwrap();
    assert_eq!(placed, 3);
    assert_eq!(host.redraws(), 1);

    let step = 2.0 * PI / 3.0;
    for (k, id) in neighbors.iter().enumerate() {
        let n = g.node(id).unwrap();
        let angle = k as f64 * step;
        assert_eq!(n.x, 50.0 + 100.0 * angle.cos());
        assert_eq!(n.y, 50.0 + 100.0 * angle.sin());
        assert!(!n.hidden);
    }
}

#[test]
fn radial_distribution_of_nothing_skips_the_redraw() {
    let mut g = citation_graph();
    let mut host = HeadlessHost::new();
    let none: [&str; 0] = [];
    assert_eq!(
        distribute_radially(&mut g, &mut host, "paper", &none, 100.0).unwrap(),
        0
    );
    assert_eq!(host.redraws(), 0);
}

#[test]
fn radial_distribution_rejects_unknown_ids_atomically() {
    let mut g = citation_graph();
    let mut host = HeadlessHost::new();
    let err = distribute_radially(&mut g, &mut host, "paper", &["strong", "ghost"], 100.0);
    assert!(err.is_err());
    assert_eq!(g.node("strong").unwrap().x, 0.0);
    assert_eq!(host.redraws(), 0);
}

#[test]
fn graph_overlaps_are_resolved_and_persisted() {
    let mut g = VisGraph::new();
    g.add_nodes(vec![
        NodeRecord::at("a", 0.0, 0.0),
        NodeRecord::at("b", 10.0, 0.0),
        NodeRecord::at("hidden", 5.0, 0.0).hidden(true),
    ])
    .unwrap();

    let res = resolve_graph_overlaps(&mut g, None, &OverlapOptions::default()).unwrap();
    assert!(res.converged());
    assert_eq!(g.node("a").unwrap().x, -95.0);
    assert_eq!(g.node("b").unwrap().x, 105.0);
    assert_eq!(g.node("hidden").unwrap().x, 5.0);

    let ids = vec!["a".to_string(), "hidden".to_string()];
    resolve_graph_overlaps(&mut g, Some(&ids), &OverlapOptions::default()).unwrap();
    let d = (g.node("a").unwrap().x - g.node("hidden").unwrap().x).abs();
    assert!((d - 200.0).abs() < 1e-9);
}

#[test]
fn repeated_ids_do_not_push_a_node_away_from_itself() {
    let mut g = VisGraph::new();
    g.add_nodes(vec![NodeRecord::at("a", 0.0, 0.0), NodeRecord::at("b", 10.0, 0.0)])
        .unwrap();

    let ids = vec!["a".to_string(), "a".to_string()];
    let res = resolve_graph_overlaps(&mut g, Some(&ids), &OverlapOptions::default()).unwrap();
    assert_eq!((res.passes, res.adjustments), (0, 0));
    assert_eq!(g.node("a").unwrap().x, 0.0);

    let ids = vec!["a".to_string(), "b".to_string(), "a".to_string()];
    let res = resolve_graph_overlaps(&mut g, Some(&ids), &OverlapOptions::default()).unwrap();
    assert_eq!(res.adjustments, 1);
    assert_eq!(g.node("a").unwrap().x, -95.0);
    assert_eq!(g.node("b").unwrap().x, 105.0);
}

#[test]
fn physics_toggle_reaches_the_host() {
    let mut host = HeadlessHost::new();
    set_physics_enabled(&mut host, false);
    set_physics_enabled(&mut host, true);
    assert_eq!(
        host.physics_history(),
        [PhysicsOptions::enabled(false), PhysicsOptions::enabled(true)]
    );
}
