use crate::fs::FileSystem;
use crate::stack::PackageManagerId;
use std::path::Path;

/// A lockfile found at the repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockfileInfo {
    pub file_name: &'static str,
    pub package_manager: PackageManagerId,
}

impl LockfileInfo {
    /// Short label stored in `lockfileType`.
    pub fn label(&self) -> &'static str {
        self.package_manager.as_str()
    }
}

/// Known lockfiles. Order matters where one ecosystem has several: the first
/// present entry decides the package manager.
pub const LOCKFILES: &[(&str, PackageManagerId)] = &[
    ("pnpm-lock.yaml", PackageManagerId::Pnpm),
    ("yarn.lock", PackageManagerId::Yarn),
    ("package-lock.json", PackageManagerId::Npm),
    ("uv.lock", PackageManagerId::Uv),
    ("poetry.lock", PackageManagerId::Poetry),
    ("Pipfile.lock", PackageManagerId::Pipenv),
    ("go.sum", PackageManagerId::GoMod),
    ("Cargo.lock", PackageManagerId::Cargo),
    ("Gemfile.lock", PackageManagerId::Bundler),
    ("mix.lock", PackageManagerId::Mix),
    ("composer.lock", PackageManagerId::Composer),
    ("gradle.lockfile", PackageManagerId::Gradle),
];

/// First present lockfile among `candidates`, in the given order.
pub fn find_lockfile(fs: &dyn FileSystem, candidates: &[&str]) -> Option<LockfileInfo> {
    candidates.iter().find_map(|name| {
        let &(file_name, package_manager) = LOCKFILES.iter().find(|(f, _)| f == name)?;
        fs.exists(Path::new(file_name)).then_some(LockfileInfo {
            file_name,
            package_manager,
        })
    })
}
