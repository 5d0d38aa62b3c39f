//! `flake.nix` generation from a detected [`AppProfile`].

pub mod template;

pub use template::render_flake;

use crate::config::DEFAULT_TEMPLATES_URL;
use crate::error::DetectionError;
use crate::stack::AppProfile;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    InvalidProfile(#[from] DetectionError),

    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Where to write the flake. Ignored on dry runs; `None` means render only.
    pub output_path: Option<PathBuf>,
    pub templates_url: String,
    pub template_version: Option<String>,
    pub dry_run: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_path: None,
            templates_url: DEFAULT_TEMPLATES_URL.to_string(),
            template_version: None,
            dry_run: false,
        }
    }
}

impl GenerateOptions {
    fn templates_ref(&self) -> String {
        match self.template_version.as_deref().filter(|v| !v.is_empty()) {
            Some(version) => format!("{}/{}", self.templates_url, version),
            None => self.templates_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    pub flake_content: String,
    /// Set only when the flake was written.
    pub output_path: Option<PathBuf>,
}

pub trait Generator {
    fn generate(&self, profile: &AppProfile, options: &GenerateOptions) -> Result<GenerateResult, GenerateError>;
}

/// Renders the built-in flake template.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultGenerator;

impl Generator for DefaultGenerator {
    fn generate(&self, profile: &AppProfile, options: &GenerateOptions) -> Result<GenerateResult, GenerateError> {
        profile.validate()?;

        let templates_ref = options.templates_ref();
        debug!(templates = %templates_ref, app = profile.display_name(), "Rendering flake");
        let flake_content = render_flake(profile, &templates_ref);

        let output_path = match (&options.output_path, options.dry_run) {
            (Some(path), false) => {
                write_flake(path, &flake_content)?;
                info!(path = %path.display(), "Wrote flake");
                Some(path.clone())
            }
            _ => None,
        };

        Ok(GenerateResult {
            flake_content,
            output_path,
        })
    }
}

fn write_flake(path: &Path, content: &str) -> Result<(), GenerateError> {
    let to_err = |source: io::Error| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, content).map_err(to_err)
}
