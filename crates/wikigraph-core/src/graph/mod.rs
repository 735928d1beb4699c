//! Knowledge graph construction from a page corpus.
//!
//! # Pipeline
//!
//! 1. [`walker`] traverses the namespace tree, gated by the [`AccessGate`]
//! 2. [`scanner`] extracts links, tags and titles from each readable page
//! 3. [`resolver`] turns link text into canonical page IDs
//! 4. [`assembler`] accumulates nodes and weighted edges, then derives tag
//!    edges and drops dangling edges once traversal is done
//! 5. [`export`] serializes the result
//!
//! Nothing is cached between builds; every call to [`GraphBuilder::build`]
//! starts from an empty assembler and a fresh access gate.

pub mod assembler;
mod error;
pub mod export;
pub mod models;
pub mod resolver;
pub mod scanner;
mod walker;

pub use assembler::{AssemblerHandle, FinalizeReport, GraphAssembler};
pub use error::GraphError;
pub use models::{Edge, EdgeType, Graph, Node};
pub use resolver::{DokuIdCleaner, IdCleaner, IdResolver};
pub use scanner::{ScanResult, Scanner};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::access::{authority_from_config, AccessAuthority, AccessGate, Identity};
use crate::config::{Config, DEFAULT_MAX_CONCURRENT_READS};
use crate::store::{DocumentStore, FileStore, Location};
use walker::Walker;

/// Summary of one graph build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildStats {
    pub pages: usize,
    pub namespaces: usize,
    pub edges: usize,
    pub tag_edges: usize,
    pub tags: usize,
    pub skipped_documents: usize,
    pub dropped_edges: usize,
    pub access_checks: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// Builds graphs from a document store for a given identity.
pub struct GraphBuilder {
    store: Arc<dyn DocumentStore>,
    authority: Arc<dyn AccessAuthority>,
    resolver: IdResolver,
    scanner: Scanner,
    max_concurrent_reads: usize,
}

impl GraphBuilder {
    /// Create a builder over a store and an access authority.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        authority: Arc<dyn AccessAuthority>,
    ) -> Result<Self, GraphError> {
        Ok(Self {
            store,
            authority,
            resolver: IdResolver::default(),
            scanner: Scanner::new()?,
            max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
        })
    }

    /// Create a builder for the filesystem corpus and authority named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, GraphError> {
        let store = Arc::new(FileStore::with_config(&config.corpus));
        let authority = authority_from_config(&config.access)?;

        Ok(Self::new(store, authority)?.max_concurrent_reads(config.walker.max_concurrent_reads))
    }

    /// Replace the ID canonicalization rules.
    pub fn with_cleaner(mut self, cleaner: Arc<dyn IdCleaner>) -> Self {
        self.resolver = IdResolver::new(cleaner);
        self
    }

    /// Bound the number of documents read at once.
    pub fn max_concurrent_reads(mut self, n: usize) -> Self {
        self.max_concurrent_reads = n.max(1);
        self
    }

    /// Build the graph visible to `identity`.
    pub async fn build(&self, identity: &Identity) -> Result<Graph, GraphError> {
        self.build_with_stats(identity).await.map(|(graph, _)| graph)
    }

    /// Build the graph visible to `identity`, with build statistics.
    pub async fn build_with_stats(&self, identity: &Identity) -> Result<(Graph, BuildStats), GraphError> {
        let build_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("graph_build", %build_id, identity = identity.label());

        self.run(identity).instrument(span).await
    }

    async fn run(&self, identity: &Identity) -> Result<(Graph, BuildStats), GraphError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let gate = AccessGate::new(Arc::clone(&self.authority), identity.clone());
        let handle = GraphAssembler::handle();

        let walker = Walker {
            store: self.store.as_ref(),
            gate: &gate,
            resolver: &self.resolver,
            scanner: &self.scanner,
            assembler: Arc::clone(&handle),
            reads: Semaphore::new(self.max_concurrent_reads),
        };
        walker.visit(Location::root(), String::new()).await?;
        drop(walker);

        // Traversal is complete; no other task holds the handle now
        let mut assembler = std::mem::take(&mut *handle.lock().await);
        let tag_edges = assembler.derive_tag_edges();
        let skipped_documents = assembler.skipped_documents();
        let (graph, report) = assembler.finalize();

        let stats = BuildStats {
            pages: graph.nodes.len(),
            namespaces: graph.namespaces.len(),
            edges: graph.edges.len(),
            tag_edges,
            tags: graph.tags.len(),
            skipped_documents,
            dropped_edges: report.dropped_edges,
            access_checks: gate.decided(),
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
        };

        tracing::info!(
            pages = stats.pages,
            edges = stats.edges,
            tag_edges = stats.tag_edges,
            namespaces = stats.namespaces,
            skipped = stats.skipped_documents,
            dropped = stats.dropped_edges,
            elapsed_ms = stats.elapsed_ms,
            "graph built"
        );

        Ok((graph, stats))
    }
}
