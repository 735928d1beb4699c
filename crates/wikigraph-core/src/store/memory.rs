use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

use super::error::StoreError;
use super::{DocumentStore, Entry, Location};

/// In-memory page repository.
///
/// Handy for embedding hosts that already hold pages in memory, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<Location, Option<String>>,
    directories: BTreeSet<Location>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page at a `/`-separated path (no extension), creating parent directories.
    pub fn with_page(mut self, path: &str, text: impl Into<String>) -> Self {
        let location = Location::parse(path);
        self.add_parents(&location);
        self.documents.insert(location, Some(text.into()));
        self
    }

    /// Adds a page that is listed but fails to read.
    pub fn with_broken_page(mut self, path: &str) -> Self {
        let location = Location::parse(path);
        self.add_parents(&location);
        self.documents.insert(location, None);
        self
    }

    /// Adds an empty directory.
    pub fn with_directory(mut self, path: &str) -> Self {
        let location = Location::parse(path);
        self.add_parents(&location);
        self.directories.insert(location);
        self
    }

    fn add_parents(&mut self, location: &Location) {
        let segments = location.segments();
        for depth in 1..segments.len() {
            let parent = Location::parse(&segments[..depth].join("/"));
            self.directories.insert(parent);
        }
    }

    fn is_child(parent: &Location, candidate: &Location) -> bool {
        let (p, c) = (parent.segments(), candidate.segments());
        c.len() == p.len() + 1 && c.starts_with(p)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_entries(&self, location: &Location) -> Result<Vec<Entry>, StoreError> {
        if !location.is_root() && !self.directories.contains(location) {
            return Err(StoreError::NotFound(location.to_string()));
        }

        let dirs = self
            .directories
            .iter()
            .filter(|d| Self::is_child(location, d))
            .filter_map(|d| d.name().map(Entry::directory));
        let docs = self
            .documents
            .keys()
            .filter(|d| Self::is_child(location, d))
            .filter_map(|d| d.name().map(Entry::document));

        Ok(dirs.chain(docs).collect())
    }

    async fn read_document(&self, location: &Location) -> Result<String, StoreError> {
        match self.documents.get(location) {
            Some(Some(text)) => Ok(text.clone()),
            Some(None) => Err(StoreError::io(
                location.to_string(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable page"),
            )),
            None => Err(StoreError::NotFound(location.to_string())),
        }
    }
}
