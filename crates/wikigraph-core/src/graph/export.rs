//! JSON export of an assembled graph.
//!
//! Output shape:
//! ```json
//! {
//!   "nodes": [{"id": "wiki:syntax", "name": "Syntax", "namespace": "wiki", "weight": 1, "tags": [], "path": "wiki/syntax.txt"}],
//!   "edges": [{"source": "start", "target": "wiki:syntax", "weight": 1, "type": "reference"}],
//!   "namespaces": ["wiki"],
//!   "tags": []
//! }
//! ```

use std::path::Path;

use super::error::GraphError;
use super::models::Graph;

/// Content type of the exported document.
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize a graph to compact JSON bytes.
pub fn to_json(graph: &Graph) -> Result<Vec<u8>, GraphError> {
    Ok(serde_json::to_vec(graph)?)
}

/// Serialize a graph to indented JSON.
pub fn to_json_pretty(graph: &Graph) -> Result<String, GraphError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Write a graph to a file.
pub fn write_json(graph: &Graph, path: &Path, pretty: bool) -> Result<(), GraphError> {
    let bytes = if pretty {
        to_json_pretty(graph)?.into_bytes()
    } else {
        to_json(graph)?
    };
    std::fs::write(path, bytes).map_err(|e| crate::store::StoreError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::{Edge, EdgeType, Node};

    #[test]
    fn test_empty_graph_is_valid_document() {
        let json: serde_json::Value = serde_json::from_slice(&to_json(&Graph::empty()).unwrap()).unwrap();
        for key in ["nodes", "edges", "namespaces", "tags"] {
            assert_eq!(json[key], serde_json::json!([]), "{} should be an empty array", key);
        }
    }

    #[test]
    fn test_wire_layout() {
        let graph = Graph {
            nodes: vec![Node::new("wiki:syntax", "Syntax").with_tags(["docs"])],
            edges: vec![Edge {
                source: "wiki:syntax".into(),
                target: "wiki:syntax".into(),
                weight: 1,
                edge_type: EdgeType::Namespace,
            }],
            namespaces: vec!["wiki".into()],
            tags: vec!["docs".into()],
        };

        let json: serde_json::Value = serde_json::from_slice(&to_json(&graph).unwrap()).unwrap();
        let node = &json["nodes"][0];
        assert_eq!(node["id"], "wiki:syntax");
        assert_eq!(node["name"], "Syntax");
        assert_eq!(node["namespace"], "wiki");
        assert_eq!(node["weight"], 1);
        assert_eq!(node["tags"], serde_json::json!(["docs"]));
        assert!(node.get("path").is_none());

        let edge = &json["edges"][0];
        assert_eq!(edge["type"], "namespace");
        assert_eq!(json["namespaces"], serde_json::json!(["wiki"]));
    }
}
