use super::{DirEntry, FileSystem, FileType};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Evidence backed by a directory on local disk.
pub struct RealFileSystem {
    root: PathBuf,
}

impl RealFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut result = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let mut file_type = entry.file_type()?;
            if file_type.is_symlink() {
                // Classify by target; a dangling link stays a symlink.
                if let Ok(target) = fs::metadata(entry.path()) {
                    file_type = target.file_type();
                }
            }
            let file_type = if file_type.is_dir() {
                FileType::Directory
            } else if file_type.is_file() {
                FileType::File
            } else {
                FileType::Symlink
            };

            result.push(DirEntry {
                path: path.join(&name),
                name,
                file_type,
            });
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
