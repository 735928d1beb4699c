//! Read-only access to the hierarchical page repository.
//!
//! The graph build only ever lists one directory level at a time and reads
//! single documents, so a store is two methods. Locations are raw,
//! store-relative paths; canonical page IDs are derived from them by the
//! graph walker.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::fmt;

/// Raw store-relative location of a directory or document.
///
/// Segments are the names exactly as the store reports them. The empty
/// location is the corpus root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    segments: Vec<String>,
}

impl Location {
    /// The corpus root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a location from `/`-separated text, ignoring empty segments.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Location of a direct child.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, if any.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A sub-namespace.
    Directory,
    /// A page document.
    Document,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Raw name; for documents, without the page extension.
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn document(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Document,
        }
    }
}

/// Trait for page repository backends.
///
/// Implementations must be safe to query concurrently; the walker lists
/// sibling directories in parallel.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists the direct children of a directory.
    async fn list_entries(&self, location: &Location) -> Result<Vec<Entry>, StoreError>;

    /// Reads the text of a document.
    async fn read_document(&self, location: &Location) -> Result<String, StoreError>;

    /// Store-relative path of a document, for display.
    fn document_path(&self, location: &Location) -> String {
        location.to_string()
    }
}
