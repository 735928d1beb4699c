//! Graph data models.
//!
//! These types are also the wire format: field names and order match the
//! JSON consumed by the graph renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::resolver::{namespace_of, NS_SEPARATOR};

// =============================================================================
// Nodes
// =============================================================================

/// A page in the output graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Canonical page ID.
    pub id: String,
    /// First heading of the page, else the file stem.
    pub name: String,
    /// Namespace prefix of `id` (empty for root pages).
    pub namespace: String,
    /// Page importance; always 1 for now.
    pub weight: u32,
    /// Declared tags, sorted and de-duplicated.
    pub tags: Vec<String>,
    /// Store-relative document path.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl Node {
    /// Create a node for `id`, deriving its namespace.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let namespace = namespace_of(&id).to_string();
        Self {
            id,
            name: name.into(),
            namespace,
            weight: 1,
            tags: Vec::new(),
            path: String::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        tags.sort();
        tags.dedup();
        self.tags = tags;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

// =============================================================================
// Edges
// =============================================================================

/// Relationship kind between two pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Target is a direct child page of the source (`a` -> `a:b`).
    Hierarchy,
    /// Source and target live in the same namespace.
    Namespace,
    /// Cross-namespace link.
    Reference,
    /// Derived from shared tags, not from a link.
    Tag,
}

impl EdgeType {
    /// Classify a literal link purely from the two IDs.
    ///
    /// Checked in order: hierarchy, namespace, reference. Never returns `Tag`.
    pub fn classify(source: &str, target: &str) -> Self {
        let source_depth = source.split(NS_SEPARATOR).count();
        let target_depth = target.split(NS_SEPARATOR).count();

        if target_depth == source_depth + 1 && namespace_of(target) == source {
            EdgeType::Hierarchy
        } else if namespace_of(source) == namespace_of(target) {
            EdgeType::Namespace
        } else {
            EdgeType::Reference
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Hierarchy => "hierarchy",
            EdgeType::Namespace => "namespace",
            EdgeType::Reference => "reference",
            EdgeType::Tag => "tag",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, weighted edge between two pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Literal link count, or shared tag count for tag edges.
    pub weight: u32,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

// =============================================================================
// Graph
// =============================================================================

/// The assembled graph handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Distinct namespaces, excluding the root.
    pub namespaces: Vec<String>,
    /// Distinct tags across all pages.
    pub tags: Vec<String>,
}

impl Graph {
    /// A graph with no content; still a valid document.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
