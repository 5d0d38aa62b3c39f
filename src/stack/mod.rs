//! Application stack detection.
//!
//! A [`DetectorRegistry`] runs one [`EcosystemDetector`] per supported
//! ecosystem against a read-only [`FileSystem`](crate::fs::FileSystem), ranks
//! the matches by confidence, and merges cross-cutting metadata
//! (environment templates, `Procfile`) onto the winner.
//!
//! # Example
//!
//! ```no_run
//! use flkr::stack::{DetectContext, DetectorRegistry};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = DetectorRegistry::with_defaults();
//! if let Some(profile) = registry.detect_from_path(&DetectContext::new(), Path::new("."))? {
//!     println!("{} via {:?}", profile.display_name(), profile.package_manager);
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod context;
pub mod crosscutting;
pub mod detector;
pub mod framework_id;
pub mod language;
pub mod language_id;
pub mod package_manager_id;
pub mod parsers;
pub mod profile;
pub mod registry;

pub use context::DetectContext;
pub use crosscutting::CrossCuttingEnricher;
pub use detector::EcosystemDetector;
pub use framework_id::FrameworkId;
pub use language_id::LanguageId;
pub use package_manager_id::PackageManagerId;
pub use profile::AppProfile;
pub use registry::DetectorRegistry;
