use super::AppProfile;
use crate::error::Result;
use crate::fs::FileSystem;
use std::path::Path;

/// One ecosystem's detection logic.
///
/// `detect` returns `Ok(None)` when the ecosystem's marker files are absent
/// and an error when a present file cannot be read or decoded. Detectors are
/// pure functions of the file tree: they never see each other's output.
pub trait EcosystemDetector: Send + Sync {
    /// Stable identifier, recorded as `detectedBy`.
    fn name(&self) -> &'static str;

    /// Lower runs earlier. Ordering only; every detector always runs.
    fn priority(&self) -> i32;

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>>;
}

pub(crate) fn exists(fs: &dyn FileSystem, path: &str) -> bool {
    fs.exists(Path::new(path))
}

pub(crate) fn is_dir(fs: &dyn FileSystem, path: &str) -> bool {
    fs.is_dir(Path::new(path))
}

/// A framework a detector recognises, with the defaults it implies.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameworkRule {
    pub framework: super::FrameworkId,
    pub confidence: f64,
    pub build: &'static str,
    pub start: &'static str,
    pub output_dir: &'static str,
}

impl FrameworkRule {
    pub fn apply(&self, profile: &mut AppProfile) {
        profile.set_framework(self.framework, self.confidence);
        if !self.build.is_empty() {
            profile.build_command = Some(self.build.to_string());
        }
        if !self.start.is_empty() {
            profile.start_command = Some(self.start.to_string());
        }
        if !self.output_dir.is_empty() {
            profile.output_dir = Some(self.output_dir.to_string());
        }
    }
}
