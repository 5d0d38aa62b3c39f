//! The detected application profile and its merge semantics.

use super::{FrameworkId, LanguageId, PackageManagerId};
use crate::error::DetectionError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything the engine knows about an application after one detection run.
///
/// Empty optional fields are omitted from JSON so the serialized form is the
/// contract with manifest rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageId>,

    /// Runtime version (e.g. Node or Go toolchain version).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// The application's own declared version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManagerId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<FrameworkId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Zero means "not set".
    #[serde(skip_serializing_if = "is_zero")]
    pub port: u16,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_deps: Vec<String>,

    /// Environment variable names in first-seen order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<String>,

    pub has_lockfile: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockfile_type: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub has_vendor: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_hash: Option<String>,

    pub confidence: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_by: Option<String>,
}

fn is_zero(port: &u16) -> bool {
    *port == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl AppProfile {
    /// Fresh candidate for a detector, carrying the ecosystem defaults every
    /// detector starts from.
    pub fn detected(
        language: LanguageId,
        package_manager: PackageManagerId,
        detected_by: &str,
        confidence: f64,
    ) -> Self {
        Self {
            language: Some(language),
            package_manager: Some(package_manager),
            confidence,
            detected_by: Some(detected_by.to_string()),
            ..Default::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_commands(mut self, build: &str, start: &str) -> Self {
        self.build_command = non_empty(build);
        self.start_command = non_empty(start);
        self
    }

    pub fn set_lockfile(&mut self, lockfile_type: &str) {
        self.has_lockfile = true;
        self.lockfile_type = Some(lockfile_type.to_string());
    }

    pub fn set_framework(&mut self, framework: FrameworkId, confidence: f64) {
        self.framework = Some(framework);
        self.confidence = confidence;
    }

    pub fn add_system_dep(&mut self, dep: &str) {
        if !self.system_deps.iter().any(|d| d == dep) {
            self.system_deps.push(dep.to_string());
        }
    }

    /// Framework name when one was detected, otherwise the language name.
    pub fn display_name(&self) -> &'static str {
        match (self.framework, self.language) {
            (Some(fw), _) => fw.as_str(),
            (None, Some(lang)) => lang.as_str(),
            (None, None) => "app",
        }
    }

    /// Checks the invariants every profile leaving the engine must satisfy.
    pub fn validate(&self) -> Result<(), DetectionError> {
        let mut errors = Vec::new();

        match self.language {
            None => errors.push("language is required".to_string()),
            Some(lang) => {
                if let Some(pm) = self.package_manager {
                    if pm.language() != lang {
                        errors.push(format!(
                            "packageManager {} does not belong to language {}",
                            pm, lang
                        ));
                    }
                }
                if let Some(fw) = self.framework {
                    if fw.language() != lang {
                        errors.push(format!(
                            "framework {} does not belong to language {}",
                            fw, lang
                        ));
                    }
                }
            }
        }
        if self.package_manager.is_none() {
            errors.push("packageManager is required".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            errors.push("confidence must be between 0 and 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DetectionError::InvalidProfile(errors.join("; ")))
        }
    }

    /// Overlays `other` onto this profile.
    ///
    /// Non-empty scalars in `other` win, `hasLockfile`/`hasVendor` are ORed,
    /// confidence only increases, and list fields are unioned keeping this
    /// profile's order first. Merging `None` is a no-op.
    pub fn merge(&mut self, other: Option<&AppProfile>) {
        let Some(other) = other else {
            return;
        };

        if other.language.is_some() {
            self.language = other.language;
        }
        if other.package_manager.is_some() {
            self.package_manager = other.package_manager;
        }
        if other.framework.is_some() {
            self.framework = other.framework;
        }
        overlay(&mut self.version, &other.version);
        overlay(&mut self.app_version, &other.app_version);
        overlay(&mut self.build_command, &other.build_command);
        overlay(&mut self.start_command, &other.start_command);
        overlay(&mut self.output_dir, &other.output_dir);
        overlay(&mut self.lockfile_type, &other.lockfile_type);
        overlay(&mut self.vendor_hash, &other.vendor_hash);
        overlay(&mut self.detected_by, &other.detected_by);

        if other.port != 0 {
            self.port = other.port;
        }
        self.has_lockfile |= other.has_lockfile;
        self.has_vendor |= other.has_vendor;
        if other.confidence > self.confidence {
            self.confidence = other.confidence;
        }

        merge_unique(&mut self.system_deps, &other.system_deps);
        merge_unique(&mut self.env_vars, &other.env_vars);
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn overlay(base: &mut Option<String>, other: &Option<String>) {
    if let Some(value) = other.as_deref().filter(|v| !v.is_empty()) {
        *base = Some(value.to_string());
    }
}

/// Appends items of `other` not yet present; `base` itself is left as is.
fn merge_unique(base: &mut Vec<String>, other: &[String]) {
    let mut seen: HashSet<String> = base.iter().cloned().collect();
    for item in other {
        if seen.insert(item.clone()) {
            base.push(item.clone());
        }
    }
}
