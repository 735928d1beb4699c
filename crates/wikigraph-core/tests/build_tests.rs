use std::sync::Arc;

use async_trait::async_trait;
use wikigraph_core::access::AllowAll;
use wikigraph_core::graph::{export, EdgeType, Graph, GraphBuilder};
use wikigraph_core::store::MemoryStore;
use wikigraph_core::{DocumentStore, Entry, Identity, Location, StoreError};

async fn build(store: MemoryStore) -> Graph {
    GraphBuilder::new(Arc::new(store), Arc::new(AllowAll))
        .unwrap()
        .build(&Identity::anonymous())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_repeated_links_accumulate_weight() {
    let store = MemoryStore::new()
        .with_page("a", "[[b]] then [[b]] and once more [[b|B]]")
        .with_page("b", "target");

    let graph = build(store).await;

    assert_eq!(graph.edges.len(), 1);
    let edge = graph.edge("a", "b").unwrap();
    assert_eq!(edge.weight, 3);
    assert_eq!(edge.edge_type, EdgeType::Namespace);
}

#[tokio::test]
async fn test_edge_classification() {
    let store = MemoryStore::new()
        .with_page("ns/a", "[[:ns:a:child]] [[sibling]] [[:other:x]]")
        .with_page("ns/a/child", "child")
        .with_page("ns/sibling", "sibling")
        .with_page("other/x", "x");

    let graph = build(store).await;

    let kind = |t: &str| graph.edge("ns:a", t).map(|e| e.edge_type);
    assert_eq!(kind("ns:a:child"), Some(EdgeType::Hierarchy));
    assert_eq!(kind("ns:sibling"), Some(EdgeType::Namespace));
    assert_eq!(kind("other:x"), Some(EdgeType::Reference));
}

#[tokio::test]
async fn test_links_to_missing_pages_are_dropped() {
    let store = MemoryStore::new()
        .with_page("a", "[[b]] [[nowhere]] [[https://example.com]]")
        .with_page("b", "");

    let graph = build(store).await;

    assert!(graph.edge("a", "nowhere").is_none());
    assert_eq!(graph.edges.len(), 1);
    for edge in &graph.edges {
        assert!(graph.node(&edge.source).is_some());
        assert!(graph.node(&edge.target).is_some());
    }
}

#[tokio::test]
async fn test_relative_and_absolute_resolution() {
    let store = MemoryStore::new()
        .with_page("a/b/start", "[[c]] [[:d:e]]")
        .with_page("a/b/c", "")
        .with_page("d/e", "");

    let graph = build(store).await;

    assert!(graph.edge("a:b:start", "a:b:c").is_some());
    assert_eq!(graph.edge("a:b:start", "d:e").map(|e| e.edge_type), Some(EdgeType::Reference));
}

#[tokio::test]
async fn test_tag_edges() {
    let store = MemoryStore::new()
        .with_page("p1", "{{tag>x y}}")
        .with_page("p2", "{{tag>y}} {{tag>x}}")
        .with_page("p3", "{{tag>x}}")
        .with_page("p4", "{{tag>x}} [[p1]] [[p5]]")
        .with_page("p5", "untagged");

    let graph = build(store).await;

    let edge = |s: &str, t: &str| graph.edge(s, t).map(|e| (e.edge_type, e.weight));
    assert_eq!(edge("p1", "p2"), Some((EdgeType::Tag, 2)));
    assert_eq!(edge("p1", "p3"), Some((EdgeType::Tag, 1)));
    assert_eq!(edge("p2", "p3"), Some((EdgeType::Tag, 1)));
    // p4 -> p1 is a literal link; the tag pair p1 -> p4 is a different ordered pair
    assert_eq!(edge("p4", "p1"), Some((EdgeType::Namespace, 1)));
    assert_eq!(edge("p1", "p4"), Some((EdgeType::Tag, 1)));
    assert_eq!(edge("p4", "p5"), Some((EdgeType::Namespace, 1)));
    assert!(!graph
        .edges
        .iter()
        .any(|e| e.edge_type == EdgeType::Tag && (e.source == "p5" || e.target == "p5")));

    assert_eq!(graph.tags, vec!["x", "y"]);
    assert_eq!(graph.node("p2").unwrap().tags, vec!["x", "y"]);
}

#[tokio::test]
async fn test_literal_edge_blocks_tag_edge() {
    let store = MemoryStore::new()
        .with_page("a", "{{tag>shared}} [[b]]")
        .with_page("b", "{{tag>shared}}");

    let graph = build(store).await;

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].edge_type, EdgeType::Namespace);
}

#[tokio::test]
async fn test_display_name_and_namespaces() {
    let store = MemoryStore::new()
        .with_page("wiki/Syntax Guide", "====== Formatting Syntax ======\ntext")
        .with_page("wiki/plugins/graph", "no heading")
        .with_directory("empty");

    let graph = build(store).await;

    let guide = graph.node("wiki:syntax_guide").unwrap();
    assert_eq!(guide.name, "Formatting Syntax");
    assert_eq!(guide.namespace, "wiki");
    assert_eq!(guide.path, "wiki/Syntax Guide");

    let plugin = graph.node("wiki:plugins:graph").unwrap();
    assert_eq!(plugin.name, "graph");
    assert_eq!(plugin.weight, 1);

    assert_eq!(graph.namespaces, vec!["empty", "wiki", "wiki:plugins"]);
}

#[tokio::test]
async fn test_unreadable_page_is_skipped() {
    let store = MemoryStore::new()
        .with_page("a", "[[b]] [[c]]")
        .with_broken_page("b")
        .with_page("c", "");

    let builder = GraphBuilder::new(Arc::new(store), Arc::new(AllowAll)).unwrap();
    let (graph, stats) = builder.build_with_stats(&Identity::anonymous()).await.unwrap();

    assert!(graph.node("b").is_none());
    assert!(graph.edge("a", "b").is_none());
    assert!(graph.edge("a", "c").is_some());
    assert_eq!(stats.skipped_documents, 1);
    assert_eq!(stats.dropped_edges, 1);
    assert_eq!(stats.pages, 2);
}

#[tokio::test]
async fn test_build_is_idempotent() {
    let store = MemoryStore::new()
        .with_page("start", "{{tag>home}} [[wiki:syntax]] [[wiki:syntax]]")
        .with_page("wiki/syntax", "{{tag>home docs}} [[:start]]")
        .with_page("wiki/faq", "{{tag>docs}} [[syntax]]");

    let builder = GraphBuilder::new(Arc::new(store), Arc::new(AllowAll))
        .unwrap()
        .max_concurrent_reads(1);

    let first = builder.build(&Identity::anonymous()).await.unwrap();
    let second = builder.build(&Identity::anonymous()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(export::to_json(&first).unwrap(), export::to_json(&second).unwrap());
}

#[tokio::test]
async fn test_empty_corpus_yields_valid_graph() {
    let graph = build(MemoryStore::new()).await;

    assert!(graph.is_empty());
    let json: serde_json::Value = serde_json::from_slice(&export::to_json(&graph).unwrap()).unwrap();
    assert_eq!(json["nodes"], serde_json::json!([]));
    assert_eq!(json["edges"], serde_json::json!([]));
}

/// Memory store whose listing of one directory fails with an I/O error.
struct FailingDirectory {
    inner: MemoryStore,
    broken: Location,
}

#[async_trait]
impl DocumentStore for FailingDirectory {
    async fn list_entries(&self, location: &Location) -> Result<Vec<Entry>, StoreError> {
        if *location == self.broken {
            return Err(StoreError::io(
                location.to_string(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        self.inner.list_entries(location).await
    }

    async fn read_document(&self, location: &Location) -> Result<String, StoreError> {
        self.inner.read_document(location).await
    }
}

#[tokio::test]
async fn test_unlistable_directory_yields_nothing() {
    let store = FailingDirectory {
        inner: MemoryStore::new()
            .with_page("a", "[[broken:b]] [[ok:c]]")
            .with_page("broken/b", "hidden")
            .with_page("ok/c", ""),
        broken: Location::parse("broken"),
    };

    let builder = GraphBuilder::new(Arc::new(store), Arc::new(AllowAll)).unwrap();
    let graph = builder.build(&Identity::anonymous()).await.unwrap();

    assert!(graph.node("a").is_some());
    assert!(graph.node("ok:c").is_some());
    assert!(graph.node("broken:b").is_none());
    assert!(graph.edge("a", "broken:b").is_none());
    assert!(graph.edge("a", "ok:c").is_some());
    assert_eq!(graph.namespaces, vec!["ok"]);
}

/// Memory store whose root listing names a directory that no longer exists.
struct VanishingDirectory(MemoryStore);

#[async_trait]
impl DocumentStore for VanishingDirectory {
    async fn list_entries(&self, location: &Location) -> Result<Vec<Entry>, StoreError> {
        let mut entries = self.0.list_entries(location).await?;
        if location.is_root() {
            entries.push(Entry::directory("gone"));
        }
        Ok(entries)
    }

    async fn read_document(&self, location: &Location) -> Result<String, StoreError> {
        self.0.read_document(location).await
    }
}

#[tokio::test]
async fn test_vanished_directory_yields_nothing() {
    let store = VanishingDirectory(MemoryStore::new().with_page("a", "[[gone:x]]"));

    let builder = GraphBuilder::new(Arc::new(store), Arc::new(AllowAll)).unwrap();
    let graph = builder.build(&Identity::anonymous()).await.unwrap();

    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
    assert!(graph.namespaces.is_empty());
}
