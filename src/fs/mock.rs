use super::{DirEntry, FileSystem, FileType};
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory evidence for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: BTreeMap<PathBuf, MockEntry>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            root: PathBuf::from("/mock"),
        }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, content: &str) {
        let path = normalize(path.as_ref());
        if let Some(parent) = path.parent() {
            self.ensure_parents(parent);
        }

        self.files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        self.ensure_parents(&path);
    }

    fn ensure_parents(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        path.as_os_str().is_empty() || self.files.contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = normalize(path);
        if path.as_os_str().is_empty() {
            return true;
        }
        self.files
            .get(&path)
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let normalized = normalize(path);
        let entry = self.files.get(&normalized).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;

        entry.content.clone().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a file: {}", path.display()),
            )
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let path = normalize(path);
        if !self.is_dir(&path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        // BTreeMap iteration keeps entries sorted by name.
        let entries = self
            .files
            .iter()
            .filter(|(file_path, _)| file_path.parent() == Some(path.as_path()))
            .map(|(file_path, entry)| DirEntry {
                path: file_path.clone(),
                name: file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                file_type: entry.file_type,
            })
            .collect();

        Ok(entries)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
