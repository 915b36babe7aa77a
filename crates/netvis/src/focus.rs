//! "Focus subgraph": show a node's neighborhood, take every hidden node out of the view, let the
//! physics simulation settle what is left, then put things back.

use crate::error::Result;
use crate::host::{NetworkHost, PhysicsOptions, RepulsionOptions, Stabilized};
use futures::future::{AbortHandle, Abortable, abortable};
use netvis_graphlib::{EdgePatch, NodePatch, Removed, VisGraph};

/// How a focus ended. `skipped` holds removed records that could not go back into the store
/// (see [`VisGraph::restore`]).
#[derive(Debug, Clone, PartialEq)]
pub enum FocusOutcome {
    /// Stabilization arrived; physics is off again and `nodes`/`edges` records are back.
    Restored {
        nodes: usize,
        edges: usize,
        skipped: Removed,
    },
    /// Cancelled (explicitly or because the host went away) before stabilization. Removed
    /// records are back in the store; the host is not touched.
    Cancelled { skipped: Removed },
}

/// A focus in progress. Finish it with [`SubgraphFocus::settle`].
#[derive(Debug)]
#[must_use = "a focus keeps hidden nodes out of the store until it is settled"]
pub struct SubgraphFocus {
    node_id: String,
    removed: Removed,
    stabilized: Abortable<Stabilized>,
    abort: AbortHandle,
}

/// Cancels a pending [`SubgraphFocus`] from elsewhere, e.g. when the view is torn down.
#[derive(Debug, Clone)]
pub struct FocusCanceller(AbortHandle);

impl FocusCanceller {
    pub fn cancel(&self) {
        self.0.abort();
    }
}

/// Starts a focus on the first node of `selection`. Returns `Ok(None)` for an empty selection.
///
/// The selected node and its neighbors and edges are made visible, every node still hidden is
/// removed from the store (with its edges), and the host's physics is switched on with the
/// repulsion solver.
pub fn show_subgraph<H>(
    graph: &mut VisGraph,
    host: &mut H,
    selection: &[impl AsRef<str>],
    repulsion: &RepulsionOptions,
) -> Result<Option<SubgraphFocus>>
where
    H: NetworkHost + ?Sized,
{
    let Some(node_id) = selection.first().map(|s| s.as_ref()) else {
        return Ok(None);
    };

    let mut node_patches = vec![NodePatch::new(node_id).hidden(false)];
    node_patches.extend(
        graph
            .connected_nodes(node_id)?
            .into_iter()
            .map(|id| NodePatch::new(id).hidden(false)),
    );
    let edge_patches: Vec<EdgePatch> = graph
        .connected_edges(node_id)?
        .into_iter()
        .map(|id| EdgePatch::new(id).hidden(false))
        .collect();
    graph.update_nodes(&node_patches)?;
    graph.update_edges(&edge_patches)?;

    let hidden: Vec<String> = graph
        .nodes()
        .filter(|n| n.hidden)
        .into_iter()
        .map(|n| n.id.clone())
        .collect();
    let removed = graph.remove_nodes(hidden.iter().map(String::as_str));

    let (stabilized, abort) = abortable(host.once_stabilized());
    host.set_physics(&PhysicsOptions::repulsion(*repulsion));

    tracing::debug!(
        node = node_id,
        removed_nodes = removed.nodes.len(),
        removed_edges = removed.edges.len(),
        "subgraph focus started"
    );
    Ok(Some(SubgraphFocus {
        node_id: node_id.to_string(),
        removed,
        stabilized,
        abort,
    }))
}

impl SubgraphFocus {
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Records held out of the store until the focus settles.
    pub fn removed(&self) -> &Removed {
        &self.removed
    }

    pub fn canceller(&self) -> FocusCanceller {
        FocusCanceller(self.abort.clone())
    }

    /// Waits for stabilization, switches physics off, then restores the removed records.
    ///
    /// Removed records are restored on cancellation too, since the store may outlive the view.
    pub async fn settle<H>(self, graph: &mut VisGraph, host: &mut H) -> FocusOutcome
    where
        H: NetworkHost + ?Sized,
    {
        let stabilized = matches!(self.stabilized.await, Ok(Ok(())));
        if stabilized {
            host.set_physics(&PhysicsOptions::disabled());
        }

        let removed_nodes = self.removed.nodes.len();
        let removed_edges = self.removed.edges.len();
        let skipped = graph.restore(self.removed);
        if !skipped.is_empty() {
            tracing::warn!(
                node = %self.node_id,
                nodes = skipped.nodes.len(),
                edges = skipped.edges.len(),
                "some removed records could not be restored"
            );
        }

        if stabilized {
            let nodes = removed_nodes - skipped.nodes.len();
            let edges = removed_edges - skipped.edges.len();
            tracing::debug!(node = %self.node_id, nodes, edges, "subgraph focus restored");
            FocusOutcome::Restored {
                nodes,
                edges,
                skipped,
            }
        } else {
            tracing::debug!(node = %self.node_id, "subgraph focus cancelled");
            FocusOutcome::Cancelled { skipped }
        }
    }
}
