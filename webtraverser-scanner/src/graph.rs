//! In-memory link graph built by a traversal.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Title used for pages without one.
pub const NO_TITLE: &str = "NO TITLE";

/// Node identifiers are assigned in creation order, starting at 0.
pub type NodeId = NodeIndex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub url: String,
    pub title: String,
    pub depth: usize,
}

impl GraphNode {
    /// Build a node, collapsing whitespace in `title` and substituting
    /// [`NO_TITLE`] when nothing is left.
    pub fn new(url: impl Into<String>, title: &str, depth: usize) -> Self {
        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        let title = if title.is_empty() {
            NO_TITLE.to_string()
        } else {
            title
        };

        Self {
            url: url.into(),
            title,
            depth,
        }
    }
}

/// How the child was discovered on the parent page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// `href` of an `<a>` element.
    Anchor,
}

impl EdgeKind {
    /// Selector of the elements this kind of link is scanned from.
    pub fn selector(&self) -> &'static str {
        match self {
            EdgeKind::Anchor => "a",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub kind: EdgeKind,
}

/// Directed graph of visited pages.
///
/// Nodes and edges keep insertion order. At most one node exists per URL.
#[derive(Debug, Default, Clone)]
pub struct WebGraph {
    inner: DiGraph<GraphNode, GraphEdge>,
    by_url: HashMap<String, NodeId>,
}

impl WebGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Returns the existing id if the URL is already present.
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        if let Some(id) = self.by_url.get(&node.url) {
            return *id;
        }
        let url = node.url.clone();
        let id = self.inner.add_node(node);
        self.by_url.insert(url, id);
        id
    }

    pub fn add_edge(&mut self, parent: NodeId, child: NodeId, kind: EdgeKind) {
        self.inner.add_edge(parent, child, GraphEdge { kind });
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.inner.node_weight(id)
    }

    pub fn node_id(&self, url: &str) -> Option<NodeId> {
        self.by_url.get(url).copied()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> + '_ {
        self.inner
            .node_indices()
            .filter_map(move |id| self.inner.node_weight(id).map(|node| (id, node)))
    }

    /// Edges as `(parent, child, edge)` in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &GraphEdge)> + '_ {
        self.inner
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    pub fn incoming(&self, id: NodeId) -> usize {
        self.inner.edges_directed(id, Direction::Incoming).count()
    }

    /// Serializable copy of the graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self
                .nodes()
                .map(|(id, node)| SnapshotNode {
                    id: id.index(),
                    url: node.url.clone(),
                    title: node.title.clone(),
                    depth: node.depth,
                })
                .collect(),
            edges: self
                .edges()
                .map(|(source, target, edge)| SnapshotEdge {
                    source: source.index(),
                    target: target.index(),
                    label: edge.kind.selector().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: usize,
    pub url: String,
    pub title: String,
    pub depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: usize,
    pub target: usize,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_gets_sentinel() {
        assert_eq!(GraphNode::new("http://a", "", 0).title, NO_TITLE);
        assert_eq!(GraphNode::new("http://a", "  \n\t ", 0).title, NO_TITLE);
        assert_eq!(
            GraphNode::new("http://a", "  Hello \n  World ", 0).title,
            "Hello World"
        );
    }

    #[test]
    fn test_one_node_per_url() {
        let mut graph = WebGraph::new();
        let a = graph.add_node(GraphNode::new("http://a", "A", 0));
        let again = graph.add_node(GraphNode::new("http://a", "Other", 3));
        assert_eq!(a, again);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(a).unwrap().title, "A");
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut graph = WebGraph::new();
        let a = graph.add_node(GraphNode::new("http://a", "Same", 0));
        let b = graph.add_node(GraphNode::new("http://b", "Same", 1));
        graph.add_edge(a, b, EdgeKind::Anchor);

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(graph.node_id("http://b"), Some(b));
        assert_eq!(graph.incoming(b), 1);
        assert_eq!(graph.incoming(a), 0);

        let urls: Vec<_> = graph.nodes().map(|(_, n)| n.url.as_str()).collect();
        assert_eq!(urls, vec!["http://a", "http://b"]);

        let snapshot = graph.snapshot();
        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].source, 0);
        assert_eq!(snapshot.edges[0].target, 1);
        assert_eq!(snapshot.edges[0].label, "a");
    }
}
