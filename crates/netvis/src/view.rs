//! One-shot view operations on a [`VisGraph`].

use crate::error::Result;
use crate::host::{NetworkHost, PhysicsOptions};
use netvis_graphlib::{EdgePatch, Error as GraphError, NodePatch, VisGraph};
use netvis_layout::{
    OverlapOptions, Point, PositionRecord, RadialOptions, Resolution, radial_positions,
    resolve_overlaps,
};
use rustc_hash::FxHashSet;

/// What [`expand_node`] changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub shown_nodes: Vec<String>,
    pub hidden_nodes: Vec<String>,
    pub shown_edges: usize,
    pub hidden_edges: usize,
}

/// Reveals the neighborhood of `node_id`, gated by edge value.
///
/// Each edge touching the node is hidden when its value is below `min_edge_value` and shown
/// otherwise; edges without a value are always shown. A neighbor stays visible only if at least
/// one of the node's shown edges reaches it. A node without edges is left alone.
pub fn expand_node(graph: &mut VisGraph, node_id: &str, min_edge_value: f64) -> Result<Expansion> {
    let edge_ids = graph.connected_edges(node_id)?;
    if edge_ids.is_empty() {
        return Ok(Expansion::default());
    }

    let mut out = Expansion::default();
    let mut edge_patches: Vec<EdgePatch> = Vec::with_capacity(edge_ids.len());
    let mut visible: FxHashSet<String> = FxHashSet::default();
    for id in &edge_ids {
        let Some(edge) = graph.edge(id) else {
            continue;
        };
        let hidden = edge.value.is_some_and(|v| v < min_edge_value);
        if hidden {
            out.hidden_edges += 1;
        } else {
            out.shown_edges += 1;
            visible.insert(edge.from.clone());
            visible.insert(edge.to.clone());
        }
        edge_patches.push(EdgePatch::new(id.clone()).hidden(hidden));
    }

    let mut node_patches: Vec<NodePatch> = Vec::new();
    for id in graph.connected_nodes(node_id)? {
        let hidden = !visible.contains(&id);
        if hidden {
            out.hidden_nodes.push(id.clone());
        } else {
            out.shown_nodes.push(id.clone());
        }
        node_patches.push(NodePatch::new(id).hidden(hidden));
    }

    graph.update_nodes(&node_patches)?;
    graph.update_edges(&edge_patches)?;
    tracing::debug!(
        node = node_id,
        shown_nodes = out.shown_nodes.len(),
        hidden_nodes = out.hidden_nodes.len(),
        "expanded node"
    );
    Ok(out)
}

/// Places `connected` evenly on a circle of `radius` around `center_id`, un-hides them, and asks
/// the host to redraw. Returns the number of nodes placed.
pub fn distribute_radially<H>(
    graph: &mut VisGraph,
    host: &mut H,
    center_id: &str,
    connected: &[impl AsRef<str>],
    radius: f64,
) -> Result<usize>
where
    H: NetworkHost + ?Sized,
{
    let center = graph.node(center_id).ok_or_else(|| GraphError::UnknownNode {
        id: center_id.to_string(),
    })?;
    let positions = radial_positions(
        Point::new(center.x, center.y),
        connected.len(),
        &RadialOptions { radius },
    )?;
    if positions.is_empty() {
        return Ok(0);
    }

    let patches: Vec<NodePatch> = connected
        .iter()
        .zip(&positions)
        .map(|(id, p)| NodePatch::new(id.as_ref()).position(p.x, p.y).hidden(false))
        .collect();
    graph.update_nodes(&patches)?;
    host.redraw();
    Ok(patches.len())
}

/// Runs the overlap resolver over `ids` (or every visible node when `None`) and writes the new
/// positions back into the store. A repeated id counts once.
pub fn resolve_graph_overlaps(
    graph: &mut VisGraph,
    ids: Option<&[String]>,
    opts: &OverlapOptions,
) -> Result<Resolution> {
    let mut snapshot: Vec<PositionRecord> = match ids {
        Some(ids) => {
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            ids.iter()
                .filter(|id| seen.insert(id.as_str()))
                .map(|id| {
                    graph
                        .node(id)
                        .map(|n| PositionRecord::new(n.id.clone(), n.x, n.y))
                        .ok_or_else(|| GraphError::UnknownNode { id: id.clone() })
                })
                .collect::<std::result::Result<_, _>>()?
        }
        None => graph
            .nodes()
            .iter()
            .filter(|n| !n.hidden)
            .map(|n| PositionRecord::new(n.id.clone(), n.x, n.y))
            .collect(),
    };

    let res = resolve_overlaps(&mut snapshot, opts)?;
    let patches: Vec<NodePatch> = snapshot
        .into_iter()
        .map(|p| NodePatch::new(p.id).position(p.x, p.y))
        .collect();
    graph.update_nodes(&patches)?;
    Ok(res)
}

/// The page's "Enable physics" checkbox.
pub fn set_physics_enabled<H>(host: &mut H, enabled: bool)
where
    H: NetworkHost + ?Sized,
{
    host.set_physics(&PhysicsOptions::enabled(enabled));
}
