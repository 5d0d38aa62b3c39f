//! flkr - application stack detection and Nix flake generation
//!
//! This library inspects a project directory, works out which ecosystem it
//! belongs to (language, package manager, framework, runtime version, build
//! and start commands) from its manifest files, and renders a minimal
//! `flake.nix` that hands the actual build to the flkr-templates library.
//!
//! # Core Concepts
//!
//! - **Detectors**: one [`EcosystemDetector`] per ecosystem, each reading only
//!   the marker files it knows about through a [`FileSystem`]
//! - **Registry**: [`DetectorRegistry`] runs every detector, ranks the
//!   candidates by confidence and enriches the winner with cross-cutting
//!   metadata such as `.env.example` and `Procfile`
//! - **Profile**: [`AppProfile`], the single result type shared by detection
//!   and generation
//!
//! # Example Usage
//!
//! ```no_run
//! use flkr::{DefaultGenerator, DetectContext, DetectorRegistry, GenerateOptions, Generator};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = DetectorRegistry::with_defaults();
//! if let Some(profile) = registry.detect_from_path(&DetectContext::new(), Path::new("."))? {
//!     let result = DefaultGenerator.generate(&profile, &GenerateOptions::default())?;
//!     println!("{}", result.flake_content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod generator;
pub mod stack;
pub mod util;
pub mod vendor;

pub use config::{ConfigError, FlkrConfig};
pub use error::DetectionError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use generator::{DefaultGenerator, GenerateError, GenerateOptions, GenerateResult, Generator};
pub use stack::{
    AppProfile, DetectContext, DetectorRegistry, EcosystemDetector, FrameworkId, LanguageId,
    PackageManagerId,
};
pub use util::{init_from_env, init_logging, LoggingConfig};
pub use vendor::{go_vendor_hash, VendorHashError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_flkr() {
        assert_eq!(NAME, "flkr");
    }
}
