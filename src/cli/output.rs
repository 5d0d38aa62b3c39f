//! Report formatting for `flkr detect`.
//!
//! JSON output is the serialized [`AppProfile`] (camelCase, empty fields
//! omitted), pretty-printed with two-space indentation. Human output is a
//! flat `Label: value` list that skips unset fields.

use anyhow::{Context, Result};

use crate::stack::AppProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Human,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_profile(&self, profile: &AppProfile) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(profile).context("Failed to serialize profile to JSON")
            }
            OutputFormat::Human => Ok(format_human(profile)),
        }
    }

    /// Every candidate in rank order.
    pub fn format_candidates(&self, candidates: &[AppProfile]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(candidates)
                .context("Failed to serialize candidates to JSON"),
            OutputFormat::Human => {
                let sections: Vec<String> = candidates
                    .iter()
                    .enumerate()
                    .map(|(i, profile)| {
                        let detector = profile.detected_by.as_deref().unwrap_or("unknown");
                        format!("[{}] {}\n{}", i + 1, detector, format_human(profile))
                    })
                    .collect();
                Ok(sections.join("\n"))
            }
        }
    }
}

fn format_human(profile: &AppProfile) -> String {
    let mut output = String::new();
    let mut line = |label: &str, value: &str| {
        output.push_str(&format!("{:<17}{}\n", format!("{}:", label), value));
    };

    if let Some(language) = profile.language {
        line("Language", language.as_str());
    }
    if let Some(version) = &profile.version {
        line("Version", version);
    }
    if let Some(pm) = profile.package_manager {
        line("Package Manager", pm.as_str());
    }
    if let Some(framework) = profile.framework {
        line("Framework", framework.as_str());
    }
    if let Some(app_version) = &profile.app_version {
        line("App Version", app_version);
    }
    if let Some(build) = &profile.build_command {
        line("Build Command", build);
    }
    if let Some(start) = &profile.start_command {
        line("Start Command", start);
    }
    if let Some(output_dir) = &profile.output_dir {
        line("Output Dir", output_dir);
    }
    if profile.port != 0 {
        line("Port", &profile.port.to_string());
    }
    if let Some(lockfile) = &profile.lockfile_type {
        line("Lockfile", lockfile);
    }
    if profile.has_vendor {
        line("Vendored", "yes");
    }
    if !profile.system_deps.is_empty() {
        line("System Deps", &profile.system_deps.join(", "));
    }
    if !profile.env_vars.is_empty() {
        line("Env Vars", &profile.env_vars.join(", "));
    }
    line(
        "Confidence",
        &format!("{}%", (profile.confidence * 100.0).round() as u32),
    );

    output
}
