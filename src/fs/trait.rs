//! FileSystem trait definition

use std::io;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }
}

/// Read-only view of a repository tree.
///
/// All paths are relative to the repository root. Implementations never
/// mutate the tree, so one instance is a stable evidence snapshot for a whole
/// detection run.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    ///
    /// Absent files fail with [`io::ErrorKind::NotFound`].
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List the direct children of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Root this snapshot was taken from, for diagnostics only.
    fn root(&self) -> &Path;
}
