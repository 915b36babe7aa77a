//! The visualization store: node and edge data sets plus an incidence index.
//!
//! Mirrors the node/edge `DataSet` pair a vis-network page keeps, with the neighborhood queries
//! (`getConnectedNodes` / `getConnectedEdges`) answered from an index instead of a scan.

use crate::dataset::DataSet;
use crate::error::{Error, Result};
use crate::record::{EdgePatch, EdgeRecord, NodePatch, NodeRecord};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<K> = hashbrown::HashSet<K, FxBuildHasher>;

/// Serialized shape of a [`VisGraph`]: `{"nodes": [...], "edges": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// Records taken out of the store by [`VisGraph::remove_nodes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removed {
    pub nodes: Vec<NodeRecord>,
    /// Edges that were incident to a removed node.
    pub edges: Vec<EdgeRecord>,
}

impl Removed {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisGraph {
    nodes: DataSet<NodeRecord>,
    edges: DataSet<EdgeRecord>,
    // node id -> incident edge ids, in edge insertion order
    incident: HashMap<String, Vec<String>>,
}

impl VisGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: GraphData) -> Result<Self> {
        let mut g = Self::new();
        g.add_nodes(data.nodes)?;
        g.add_edges(data.edges)?;
        Ok(g)
    }

    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self.nodes.iter().cloned().collect(),
            edges: self.edges.iter().cloned().collect(),
        }
    }

    pub fn nodes(&self) -> &DataSet<NodeRecord> {
        &self.nodes
    }

    pub fn edges(&self) -> &DataSet<EdgeRecord> {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeRecord> {
        self.edges.get(id)
    }

    pub fn add_node(&mut self, node: NodeRecord) -> Result<()> {
        self.nodes.add(node)
    }

    pub fn add_nodes(&mut self, nodes: Vec<NodeRecord>) -> Result<()> {
        self.nodes.add_all(nodes)
    }

    pub fn add_edge(&mut self, edge: EdgeRecord) -> Result<()> {
        self.add_edges(vec![edge])
    }

    /// Adds edges; both endpoints of every edge must already be in the store.
    pub fn add_edges(&mut self, edges: Vec<EdgeRecord>) -> Result<()> {
        for e in &edges {
            for endpoint in [&e.from, &e.to] {
                if !self.nodes.contains(endpoint) {
                    return Err(Error::MissingEndpoint {
                        edge_id: e.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }
        let links: Vec<(String, String, String)> = edges
            .iter()
            .map(|e| (e.id.clone(), e.from.clone(), e.to.clone()))
            .collect();
        self.edges.add_all(edges)?;
        for (id, from, to) in links {
            self.index_edge(id, from, to);
        }
        Ok(())
    }

    pub fn update_nodes(&mut self, patches: &[NodePatch]) -> Result<()> {
        self.nodes.update(patches)
    }

    pub fn update_edges(&mut self, patches: &[EdgePatch]) -> Result<()> {
        self.edges.update(patches)
    }

    /// Removes nodes together with every edge incident to them.
    pub fn remove_nodes<'a, I>(&mut self, ids: I) -> Removed
    where
        I: IntoIterator<Item = &'a str>,
    {
        let nodes = self.nodes.remove(ids);
        let mut seen: HashSet<String> = HashSet::default();
        let mut edge_ids: Vec<String> = Vec::new();
        for n in &nodes {
            if let Some(incident) = self.incident.remove(n.id.as_str()) {
                for e in incident {
                    if seen.insert(e.clone()) {
                        edge_ids.push(e);
                    }
                }
            }
        }
        let edges = self.remove_edges(edge_ids.iter().map(String::as_str));
        Removed { nodes, edges }
    }

    pub fn remove_edges<'a, I>(&mut self, ids: I) -> Vec<EdgeRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let removed = self.edges.remove(ids);
        for e in &removed {
            for endpoint in [&e.from, &e.to] {
                if let Some(list) = self.incident.get_mut(endpoint.as_str()) {
                    list.retain(|id| id != &e.id);
                }
            }
        }
        removed
    }

    /// Puts back what [`remove_nodes`](Self::remove_nodes) took out, record by record.
    ///
    /// A node whose id was taken in the meantime is not put back; the current record wins and
    /// the edges still attach to it. An edge is not put back when its id is taken or one of its
    /// endpoints is gone. Everything not put back is returned.
    pub fn restore(&mut self, removed: Removed) -> Removed {
        let mut skipped = Removed::default();
        for node in removed.nodes {
            if let Err(node) = self.nodes.try_insert(node) {
                skipped.nodes.push(node);
            }
        }
        for edge in removed.edges {
            if !(self.nodes.contains(&edge.from) && self.nodes.contains(&edge.to)) {
                skipped.edges.push(edge);
                continue;
            }
            let link = (edge.id.clone(), edge.from.clone(), edge.to.clone());
            match self.edges.try_insert(edge) {
                Ok(()) => self.index_edge(link.0, link.1, link.2),
                Err(edge) => skipped.edges.push(edge),
            }
        }
        skipped
    }

    /// Ids of the edges touching `node_id`, hidden or not.
    pub fn connected_edges(&self, node_id: &str) -> Result<Vec<String>> {
        if !self.nodes.contains(node_id) {
            return Err(Error::UnknownNode {
                id: node_id.to_string(),
            });
        }
        Ok(self.incident.get(node_id).cloned().unwrap_or_default())
    }

    /// Ids of the nodes at the other end of `node_id`'s edges, without duplicates. Self-loops do
    /// not make a node its own neighbor.
    pub fn connected_nodes(&self, node_id: &str) -> Result<Vec<String>> {
        if !self.nodes.contains(node_id) {
            return Err(Error::UnknownNode {
                id: node_id.to_string(),
            });
        }
        let mut seen: HashSet<&str> = HashSet::default();
        let mut out: Vec<String> = Vec::new();
        for edge_id in self.incident.get(node_id).into_iter().flatten() {
            let Some(e) = self.edges.get(edge_id) else {
                continue;
            };
            let other = if e.to != node_id { &e.to } else { &e.from };
            if other != node_id && seen.insert(other.as_str()) {
                out.push(other.clone());
            }
        }
        Ok(out)
    }

    fn index_edge(&mut self, id: String, from: String, to: String) {
        if from != to {
            self.incident.entry(to).or_default().push(id.clone());
        }
        self.incident.entry(from).or_default().push(id);
    }
}
