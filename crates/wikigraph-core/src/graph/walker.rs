//! Recursive corpus traversal.
//!
//! Each directory is gated by a wildcard access check before anything inside
//! it is listed; each document by an exact check before it is read. Sibling
//! subtrees and documents are visited concurrently, and every result goes
//! through the shared assembler handle.

use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;
use tokio::sync::Semaphore;

use super::assembler::AssemblerHandle;
use super::error::GraphError;
use super::models::{EdgeType, Node};
use super::resolver::{join, IdResolver};
use super::scanner::Scanner;
use crate::access::AccessGate;
use crate::store::{DocumentStore, EntryKind, Location, StoreError};

/// One traversal of the corpus for one build.
pub(crate) struct Walker<'a> {
    pub store: &'a dyn DocumentStore,
    pub gate: &'a AccessGate,
    pub resolver: &'a IdResolver,
    pub scanner: &'a Scanner,
    pub assembler: AssemblerHandle,
    pub reads: Semaphore,
}

impl<'a> Walker<'a> {
    /// Visit a directory and everything beneath it.
    pub fn visit(&'a self, location: Location, namespace: String) -> BoxFuture<'a, Result<(), GraphError>> {
        async move {
            if !self.gate.can_descend(&namespace).await? {
                tracing::debug!(namespace = %namespace, "namespace denied, skipping subtree");
                return Ok(());
            }

            // An unlistable directory contributes nothing, not even its namespace
            let entries = match self.store.list_entries(&location).await {
                Ok(entries) => entries,
                Err(StoreError::NotFound(_)) => {
                    tracing::debug!(location = %location, "directory vanished, skipping subtree");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(location = %location, error = %e, "failed to list directory, skipping subtree");
                    return Ok(());
                }
            };

            self.assembler.lock().await.add_namespace(namespace.clone());

            let mut tasks: Vec<BoxFuture<'a, Result<(), GraphError>>> = Vec::with_capacity(entries.len());
            for entry in entries {
                let child = location.child(&entry.name);
                let id = self.resolver.clean(&join(&namespace, &entry.name));
                if id.is_empty() {
                    tracing::debug!(location = %child, "name has no valid id characters, skipping");
                    continue;
                }

                match entry.kind {
                    EntryKind::Directory => tasks.push(self.visit(child, id)),
                    EntryKind::Document => tasks.push(self.parse_page(child, id, entry.name).boxed()),
                }
            }

            try_join_all(tasks).await?;
            Ok(())
        }
        .boxed()
    }

    /// Read, scan and record one page.
    async fn parse_page(&'a self, location: Location, id: String, stem: String) -> Result<(), GraphError> {
        if !self.gate.can_read(&id).await? {
            tracing::debug!(id = %id, "page denied, skipping");
            return Ok(());
        }

        let text = {
            let _permit = self.reads.acquire().await.map_err(|_| GraphError::Cancelled)?;
            self.store.read_document(&location).await
        };

        let text = match text {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "failed to read page, skipping");
                self.assembler.lock().await.record_skipped();
                return Ok(());
            }
        };

        let scan = self.scanner.scan(&text);
        let node = Node::new(id, scan.title.unwrap_or(stem))
            .with_tags(scan.tags)
            .with_path(self.store.document_path(&location));

        let mut targets = Vec::with_capacity(scan.references.len());
        for reference in &scan.references {
            let Some(target) = self.resolver.resolve(reference, &node.namespace) else {
                continue;
            };
            if self.gate.can_read(&target).await? {
                targets.push(target);
            }
        }

        tracing::debug!(id = %node.id, links = targets.len(), tags = node.tags.len(), "parsed page");

        let mut assembler = self.assembler.lock().await;
        for target in &targets {
            assembler.add_literal_edge(&node.id, target, EdgeType::classify(&node.id, target));
        }
        assembler.add_node(node);

        Ok(())
    }
}
