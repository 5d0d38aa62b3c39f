use crate::error::Result;
use crate::fs::FileSystem;
use crate::stack::detector::{exists, EcosystemDetector};
use crate::stack::parsers::{self, clean_version, find_lockfile, version_pin, MixExs};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};

pub struct ElixirDetector;

impl EcosystemDetector for ElixirDetector {
    fn name(&self) -> &'static str {
        "elixir"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        if !exists(fs, "mix.exs") {
            return Ok(None);
        }
        let mix = MixExs::parse(&parsers::read_manifest(fs, "mix.exs")?);

        let mut profile =
            AppProfile::detected(LanguageId::Elixir, PackageManagerId::Mix, self.name(), 0.8)
                .with_port(4000)
                .with_commands("mix do deps.get, compile", "mix run --no-halt");
        if let Some(lockfile) = find_lockfile(fs, &["mix.lock"]) {
            profile.set_lockfile(lockfile.label());
        }

        profile.version = match parsers::read_optional(fs, ".elixir-version")?
            .as_deref()
            .and_then(version_pin)
        {
            Some(pinned) => Some(pinned),
            None => mix.elixir_constraint.as_deref().map(clean_version),
        };
        profile.app_version = mix.version.clone();

        if mix.has_dep("phoenix") {
            profile.set_framework(FrameworkId::Phoenix, 0.9);
            profile.start_command = Some("mix phx.server".to_string());
            // Live reload watches the filesystem through inotify.
            profile.add_system_dep("inotify-tools");
        }

        Ok(Some(profile))
    }
}
