/*!
 * File entries and the bins they are assigned to
 */

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A scanned file: its identity and size in bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// The final path component, used as the name inside the bin directory
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Where bins live on disk and how they are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinLayout {
    dest_dir: PathBuf,
    prefix: String,
}

impl BinLayout {
    pub fn new(dest_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// `{prefix}{index}`
    pub fn name_for(&self, index: usize) -> String {
        format!("{}{}", self.prefix, index)
    }

    pub fn target_for(&self, index: usize) -> PathBuf {
        self.dest_dir.join(self.name_for(index))
    }
}

/// One output subdirectory and the files assigned to it
#[derive(Debug, Clone, Serialize)]
pub struct Bin {
    index: usize,
    name: String,
    target: PathBuf,
    entries: Vec<FileEntry>,
    total_size: u64,
}

impl Bin {
    /// Create an empty bin named and placed by `layout`
    pub fn new(index: usize, layout: &BinLayout) -> Self {
        Self {
            index,
            name: layout.name_for(index),
            target: layout.target_for(index),
            entries: Vec::new(),
            total_size: 0,
        }
    }

    /// Take ownership of an entry
    pub fn assign(&mut self, entry: FileEntry) {
        self.total_size += entry.size;
        self.entries.push(entry);
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries in assignment order
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
