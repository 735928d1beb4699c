//! Knowledge graph extraction for hierarchical wiki page trees.
//!
//! The crate walks a namespace tree of pages, scans each readable page for
//! `[[links]]` and `{{tag>...}}` markers, and assembles a graph of pages,
//! typed weighted edges, namespaces and tags for a downstream renderer.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wikigraph_core::{access::AllowAll, graph::GraphBuilder, store::FileStore, Identity};
//!
//! let store = Arc::new(FileStore::new("data/pages"));
//! let builder = GraphBuilder::new(store, Arc::new(AllowAll));
//! let graph = builder.build(&Identity::anonymous()).await?;
//! let json = wikigraph_core::graph::export::to_json(&graph)?;
//! ```

pub mod access;
pub mod config;
pub mod graph;
pub mod store;

pub use access::{AccessAuthority, AccessError, Identity};
pub use config::{Config, ConfigError};
pub use graph::{BuildStats, Graph, GraphBuilder, GraphError};
pub use store::{DocumentStore, Entry, EntryKind, Location, StoreError};
