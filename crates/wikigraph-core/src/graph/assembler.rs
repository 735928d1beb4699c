//! Accumulates walker output into a consistent graph.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::{Edge, EdgeType, Graph, Node};

/// Shared single-writer handle used by concurrent walker tasks.
pub type AssemblerHandle = Arc<Mutex<GraphAssembler>>;

/// Counts reported by [`GraphAssembler::finalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    /// Edges removed because an endpoint is not a node.
    pub dropped_edges: usize,
}

/// Builder for the node, edge, namespace and tag collections of one build.
///
/// Edges are keyed by ordered `(source, target)` pairs, so repeated links
/// accumulate weight on one record and `a -> b` is distinct from `b -> a`.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    nodes: BTreeMap<String, Node>,
    edges: BTreeMap<(String, String), Edge>,
    namespaces: BTreeSet<String>,
    tags: BTreeSet<String>,
    skipped_documents: usize,
}

impl GraphAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh assembler in a shared handle.
    pub fn handle() -> AssemblerHandle {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Add a page node. The first node recorded for an ID wins.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            tracing::debug!(id = %node.id, "duplicate page id, keeping first");
            return false;
        }
        self.tags.extend(node.tags.iter().cloned());
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Record a namespace. The root namespace is never recorded.
    pub fn add_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if !namespace.is_empty() {
            self.namespaces.insert(namespace);
        }
    }

    /// Record one literal link occurrence; returns the pair's weight so far.
    pub fn add_literal_edge(&mut self, source: &str, target: &str, edge_type: EdgeType) -> u32 {
        let edge = self
            .edges
            .entry((source.to_string(), target.to_string()))
            .and_modify(|edge| edge.weight += 1)
            .or_insert_with(|| Edge {
                source: source.to_string(),
                target: target.to_string(),
                weight: 1,
                edge_type,
            });
        edge.weight
    }

    /// Count a document that was listed but could not be read.
    pub fn record_skipped(&mut self) {
        self.skipped_documents += 1;
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn skipped_documents(&self) -> usize {
        self.skipped_documents
    }

    /// Add `tag` edges between pages that share tags.
    ///
    /// Must run after traversal has finished. Uses a tag -> pages index so
    /// only pages that actually share a tag are paired. Each unordered pair
    /// yields one edge from the smaller to the larger ID, weighted by the
    /// number of shared tags, unless a literal edge already holds that
    /// ordered pair. Returns the number of edges added.
    pub fn derive_tag_edges(&mut self) -> usize {
        let mut index: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for node in self.nodes.values() {
            for tag in &node.tags {
                index.entry(tag.as_str()).or_default().push(node.id.as_str());
            }
        }

        // Node iteration is ordered, so each page list is sorted
        let mut shared: BTreeMap<(String, String), u32> = BTreeMap::new();
        for pages in index.values() {
            for (i, first) in pages.iter().enumerate() {
                for second in &pages[i + 1..] {
                    *shared
                        .entry((first.to_string(), second.to_string()))
                        .or_default() += 1;
                }
            }
        }

        let mut added = 0;
        for ((source, target), count) in shared {
            if self.edges.contains_key(&(source.clone(), target.clone())) {
                continue;
            }
            self.edges.insert(
                (source.clone(), target.clone()),
                Edge {
                    source,
                    target,
                    weight: count,
                    edge_type: EdgeType::Tag,
                },
            );
            added += 1;
        }
        added
    }

    /// Drop dangling edges and produce the output graph.
    pub fn finalize(self) -> (Graph, FinalizeReport) {
        let total = self.edges.len();
        let nodes = self.nodes;

        let edges: Vec<Edge> = self
            .edges
            .into_values()
            .filter(|edge| nodes.contains_key(&edge.source) && nodes.contains_key(&edge.target))
            .collect();

        let report = FinalizeReport {
            dropped_edges: total - edges.len(),
        };

        let graph = Graph {
            nodes: nodes.into_values().collect(),
            edges,
            namespaces: self.namespaces.into_iter().collect(),
            tags: self.tags.into_iter().collect(),
        };

        (graph, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: &str, tags: &[&str]) -> Node {
        Node::new(id, id).with_tags(tags.iter().copied())
    }

    #[test]
    fn test_weight_accumulates() {
        let mut asm = GraphAssembler::new();
        asm.add_literal_edge("a", "b", EdgeType::Namespace);
        asm.add_literal_edge("a", "b", EdgeType::Namespace);
        assert_eq!(asm.add_literal_edge("a", "b", EdgeType::Namespace), 3);
        asm.add_literal_edge("b", "a", EdgeType::Namespace);
        assert_eq!(asm.edge_count(), 2);
    }

    #[test]
    fn test_tag_edges_weighted_by_shared_count() {
        let mut asm = GraphAssembler::new();
        asm.add_node(tagged("p1", &["x", "y"]));
        asm.add_node(tagged("p2", &["x", "y"]));
        asm.add_node(tagged("p3", &["x"]));

        assert_eq!(asm.derive_tag_edges(), 3);
        let (graph, _) = asm.finalize();

        let weight = |s: &str, t: &str| graph.edge(s, t).map(|e| (e.weight, e.edge_type));
        assert_eq!(weight("p1", "p2"), Some((2, EdgeType::Tag)));
        assert_eq!(weight("p1", "p3"), Some((1, EdgeType::Tag)));
        assert_eq!(weight("p2", "p3"), Some((1, EdgeType::Tag)));
        assert_eq!(graph.tags, vec!["x", "y"]);
    }

    #[test]
    fn test_literal_edge_takes_precedence() {
        let mut asm = GraphAssembler::new();
        asm.add_node(tagged("p1", &["x"]));
        asm.add_node(tagged("p2", &["x"]));
        asm.add_literal_edge("p1", "p2", EdgeType::Namespace);

        assert_eq!(asm.derive_tag_edges(), 0);
        let (graph, _) = asm.finalize();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].edge_type, EdgeType::Namespace);
        assert_eq!(graph.edges[0].weight, 1);
    }

    #[test]
    fn test_reverse_literal_does_not_block_tag_edge() {
        let mut asm = GraphAssembler::new();
        asm.add_node(tagged("p1", &["x"]));
        asm.add_node(tagged("p2", &["x"]));
        asm.add_literal_edge("p2", "p1", EdgeType::Namespace);

        assert_eq!(asm.derive_tag_edges(), 1);
        let (graph, _) = asm.finalize();
        assert_eq!(graph.edge("p1", "p2").map(|e| e.edge_type), Some(EdgeType::Tag));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let mut asm = GraphAssembler::new();
        asm.add_node(tagged("p1", &["x"]));
        asm.add_node(tagged("p2", &["x"]));
        assert_eq!(asm.derive_tag_edges(), 1);
        assert_eq!(asm.derive_tag_edges(), 0);
    }

    #[test]
    fn test_finalize_drops_dangling_edges() {
        let mut asm = GraphAssembler::new();
        asm.add_node(Node::new("a", "a"));
        asm.add_node(Node::new("b", "b"));
        asm.add_literal_edge("a", "b", EdgeType::Namespace);
        asm.add_literal_edge("a", "missing", EdgeType::Namespace);
        asm.add_literal_edge("ghost", "a", EdgeType::Namespace);

        let (graph, report) = asm.finalize();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(report.dropped_edges, 2);
    }

    #[test]
    fn test_root_namespace_not_recorded() {
        let mut asm = GraphAssembler::new();
        asm.add_namespace("");
        asm.add_namespace("wiki");
        asm.add_namespace("wiki");
        let (graph, _) = asm.finalize();
        assert_eq!(graph.namespaces, vec!["wiki"]);
    }

    #[test]
    fn test_duplicate_node_keeps_first() {
        let mut asm = GraphAssembler::new();
        assert!(asm.add_node(Node::new("a", "First")));
        assert!(!asm.add_node(Node::new("a", "Second")));
        let (graph, _) = asm.finalize();
        assert_eq!(graph.nodes[0].name, "First");
    }
}
