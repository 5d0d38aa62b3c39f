//! Ecosystem-agnostic enrichment.
//!
//! Environment templates and `Procfile` refine whichever ecosystem won; they
//! never compete with it, so the enrichment profile carries zero confidence.

use super::detector::EcosystemDetector;
use super::parsers::{self, parse_env_keys, Procfile};
use super::AppProfile;
use crate::error::Result;
use crate::fs::FileSystem;
use tracing::debug;

const ENV_TEMPLATES: &[&str] = &[".env.example", ".env.sample", ".env.template"];

pub struct CrossCuttingEnricher;

impl EcosystemDetector for CrossCuttingEnricher {
    fn name(&self) -> &'static str {
        "crosscutting"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        let mut profile = AppProfile::default();

        for template in ENV_TEMPLATES {
            if let Some(content) = parsers::read_optional(fs, template)? {
                for key in parse_env_keys(&content) {
                    if !profile.env_vars.contains(&key) {
                        profile.env_vars.push(key);
                    }
                }
            }
        }

        if let Some(content) = parsers::read_optional(fs, "Procfile")? {
            profile.start_command = Procfile::parse(&content).web().map(str::to_string);
        }

        if profile.env_vars.is_empty() && profile.start_command.is_none() {
            return Ok(None);
        }
        debug!(
            env_vars = profile.env_vars.len(),
            procfile = profile.start_command.is_some(),
            "Cross-cutting metadata found"
        );
        Ok(Some(profile))
    }
}
