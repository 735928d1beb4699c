use async_trait::async_trait;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CorpusConfig, DEFAULT_PAGE_EXTENSION, DEFAULT_SKIP_HIDDEN};

use super::error::StoreError;
use super::{DocumentStore, Entry, Location};

/// Filesystem-backed page repository.
///
/// Mirrors the DokuWiki page layout:
/// ```text
/// data/pages/
///   start.txt            # page `start`
///   wiki/
///     syntax.txt         # page `wiki:syntax`
///     plugins/           # namespace `wiki:plugins`
/// ```
/// Only files carrying the page extension are documents; everything else
/// that is not a directory is ignored.
pub struct FileStore {
    root: PathBuf,
    extension: String,
    skip_hidden: bool,
}

impl FileStore {
    /// Creates a store over `root` with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_PAGE_EXTENSION.to_string(),
            skip_hidden: DEFAULT_SKIP_HIDDEN,
        }
    }

    /// Creates a store from corpus configuration.
    pub fn with_config(config: &CorpusConfig) -> Self {
        Self {
            root: PathBuf::from(&config.data_dir),
            extension: config.page_extension.trim_start_matches('.').to_string(),
            skip_hidden: config.skip_hidden,
        }
    }

    fn dir_path(&self, location: &Location) -> PathBuf {
        location
            .segments()
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    fn file_path(&self, location: &Location) -> PathBuf {
        // Stems may contain dots, so the extension is appended rather than set
        let mut path = self.dir_path(location).into_os_string();
        path.push(".");
        path.push(&self.extension);
        PathBuf::from(path)
    }

    /// Lists one directory level. Runs on a blocking thread.
    fn list_dir(dir: &Path, extension: &str, skip_hidden: bool) -> Result<Vec<Entry>, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::NotFound(dir.display().to_string()));
        }

        let walker = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .standard_filters(false)
            .hidden(skip_hidden)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            // Depth 0 is the listed directory itself
            if entry.depth() == 0 {
                continue;
            }

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();

            if file_type.is_dir() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    entries.push(Entry::directory(name));
                }
            } else if file_type.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(extension)
            {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    entries.push(Entry::document(stem));
                }
            }
        }

        Ok(entries)
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn list_entries(&self, location: &Location) -> Result<Vec<Entry>, StoreError> {
        let dir = self.dir_path(location);
        let extension = self.extension.clone();
        let skip_hidden = self.skip_hidden;

        tokio::task::spawn_blocking(move || Self::list_dir(&dir, &extension, skip_hidden)).await?
    }

    async fn read_document(&self, location: &Location) -> Result<String, StoreError> {
        let path = self.file_path(location);

        tokio::task::spawn_blocking(move || -> Result<String, StoreError> {
            let bytes = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        })
        .await?
    }

    fn document_path(&self, location: &Location) -> String {
        format!("{}.{}", location, self.extension)
    }
}
