use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use crate::acquisition::{Acquisition, AcquisitionError, FileRecord};
use crate::config::LibraryConfig;

use super::{AcquisitionSource, SourceKind};

/// Downloads that have landed in the incoming directory, always `completed`.
///
/// Each immediate child of the root is one acquisition: a plain file becomes
/// a single-file item, a directory becomes an item listing every file below
/// it. The directory is re-read on every call.
pub struct FilesystemSource {
    root: PathBuf,
    ignored: Arc<HashSet<String>>,
}

impl FilesystemSource {
    pub fn new(root: impl Into<PathBuf>, ignored: impl IntoIterator<Item = String>) -> Self {
        Self {
            root: root.into(),
            ignored: Arc::new(ignored.into_iter().collect()),
        }
    }

    pub fn from_config(config: &LibraryConfig) -> Self {
        Self::new(&config.incoming_dir, config.ignored_files.iter().cloned())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AcquisitionSource for FilesystemSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Filesystem
    }

    async fn list_all(&self) -> Result<Vec<Acquisition>, AcquisitionError> {
        let root = self.root.clone();
        let ignored = Arc::clone(&self.ignored);

        let acquisitions = tokio::task::spawn_blocking(move || scan(&root, &ignored))
            .await
            .map_err(|e| AcquisitionError::DirectoryUnreadable(format!("scan task failed: {}", e)))??;

        debug!(count = acquisitions.len(), root = %self.root.display(), "Scanned incoming directory");
        Ok(acquisitions)
    }
}

fn unreadable(path: &Path, err: impl std::fmt::Display) -> AcquisitionError {
    AcquisitionError::DirectoryUnreadable(format!("{}: {}", path.display(), err))
}

fn scan(root: &Path, ignored: &HashSet<String>) -> Result<Vec<Acquisition>, AcquisitionError> {
    let metadata = fs::metadata(root).map_err(|e| unreadable(root, e))?;
    if !metadata.is_dir() {
        return Err(unreadable(root, "not a directory"));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| unreadable(root, e))? {
        let entry = entry.map_err(|e| unreadable(root, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if ignored.contains(&name) {
            continue;
        }
        let path = entry.path();
        if let Some(kind) = entry_kind(&entry)? {
            entries.push((name, path, kind));
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut acquisitions = Vec::with_capacity(entries.len());
    for (name, path, kind) in entries {
        let files = match kind {
            EntryKind::File => vec![FileRecord::new(name.clone())],
            EntryKind::Dir => walk(&path, ignored)?,
        };
        acquisitions.push(Acquisition::completed(name.clone(), name, files));
    }

    Ok(acquisitions)
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    File,
    Dir,
}

/// Kind of a top-level entry, resolving a symlink to its target.
///
/// Dangling links and anything that is neither a file nor a directory
/// yield `None`.
fn entry_kind(entry: &fs::DirEntry) -> Result<Option<EntryKind>, AcquisitionError> {
    let path = entry.path();
    let file_type = entry.file_type().map_err(|e| unreadable(&path, e))?;
    let file_type = if file_type.is_symlink() {
        match fs::metadata(&path) {
            Ok(target) => target.file_type(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(unreadable(&path, e)),
        }
    } else {
        file_type
    };

    Ok(if file_type.is_file() {
        Some(EntryKind::File)
    } else if file_type.is_dir() {
        Some(EntryKind::Dir)
    } else {
        None
    })
}

/// Every file below `dir`, named by its `/`-separated path relative to `dir`.
fn walk(dir: &Path, ignored: &HashSet<String>) -> Result<Vec<FileRecord>, AcquisitionError> {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !ignored.contains(entry.file_name().to_string_lossy().as_ref()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| unreadable(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| unreadable(entry.path(), e))?;
        files.push(FileRecord::new(slash_path(relative)));
    }

    Ok(files)
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
