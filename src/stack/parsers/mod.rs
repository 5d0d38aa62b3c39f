//! Manifest parsers.
//!
//! Each parser turns the text of one manifest format into a typed structure.
//! Reading goes through [`read_manifest`] / [`read_optional`] so that an
//! absent file and a file that exists but cannot be decoded stay distinct:
//! absence contributes nothing, a decode failure is
//! [`DetectionError::EvidenceUnreadable`].

pub mod dependency;
pub mod env_file;
pub mod json;
pub mod line;
pub mod lockfile;
pub mod toml_manifest;
pub mod xml;

pub use dependency::{normalize_python_name, DependencySpec};
pub use env_file::{parse_env_keys, Procfile};
pub use json::{ComposerJson, PackageJson};
pub use line::{version_pin, Gemfile, GoMod, Gradle, MixExs, Requirements};
pub use lockfile::{find_lockfile, LockfileInfo};
pub use toml_manifest::{CargoToml, Pipfile, PyprojectToml, RustToolchain};
pub use xml::PomXml;

use crate::error::{DetectionError, Result};
use crate::fs::FileSystem;
use std::io;
use std::path::Path;

/// Reads a file that must exist.
pub fn read_manifest(fs: &dyn FileSystem, path: &str) -> Result<String> {
    fs.read_to_string(Path::new(path))
        .map_err(|e| DetectionError::unreadable(path, e))
}

/// Reads a file that may be absent. Only `NotFound` maps to `None`; any other
/// I/O failure on the file is an error.
pub fn read_optional(fs: &dyn FileSystem, path: &str) -> Result<Option<String>> {
    match fs.read_to_string(Path::new(path)) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DetectionError::unreadable(path, e)),
    }
}

/// Reads and decodes a manifest with `parse`, tagging decode errors with the
/// manifest's path.
pub fn parse_manifest<T, E, F>(fs: &dyn FileSystem, path: &str, parse: F) -> Result<T>
where
    F: FnOnce(&str) -> std::result::Result<T, E>,
    E: ToString,
{
    let content = read_manifest(fs, path)?;
    parse(&content).map_err(|e| DetectionError::unreadable(path, e))
}

/// Reduces a version constraint such as `>=18.0.0 <21` or `^3.11` to its
/// leading bare version.
pub fn clean_version(constraint: &str) -> String {
    let trimmed = constraint
        .trim()
        .trim_start_matches(|c: char| matches!(c, '>' | '<' | '=' | '^' | '~' | '!' | 'v' | ' '));
    trimmed
        .split(|c: char| c == ' ' || c == '|' || c == '&' || c == ',')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    #[test]
    fn test_read_optional_absent() {
        let fs = MockFileSystem::new();
        assert!(read_optional(&fs, ".nvmrc").unwrap().is_none());
    }

    #[test]
    fn test_read_manifest_absent_is_unreadable() {
        let fs = MockFileSystem::new();
        let err = read_manifest(&fs, "package.json").unwrap_err();
        assert!(matches!(err, DetectionError::EvidenceUnreadable { .. }));
    }

    #[test]
    fn test_parse_manifest_tags_path() {
        let fs = MockFileSystem::new().with_file("package.json", "{");
        let err = parse_manifest(&fs, "package.json", PackageJson::parse).unwrap_err();
        assert!(err.to_string().starts_with("evidence unreadable: package.json:"));
    }

    #[test]
    fn test_clean_version() {
        assert_eq!(clean_version(">=18.0.0"), "18.0.0");
        assert_eq!(clean_version("^3.11"), "3.11");
        assert_eq!(clean_version("~> 1.15"), "1.15");
        assert_eq!(clean_version(">=18 <21"), "18");
        assert_eq!(clean_version("^8.1 || ^8.2"), "8.1");
        assert_eq!(clean_version(">=3.10,<4"), "3.10");
        assert_eq!(clean_version("v20.11.0"), "20.11.0");
        assert_eq!(clean_version("20"), "20");
    }
}
