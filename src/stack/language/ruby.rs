use crate::error::Result;
use crate::fs::FileSystem;
use crate::stack::detector::{exists, EcosystemDetector};
use crate::stack::parsers::{self, find_lockfile, version_pin, Gemfile};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};

pub struct RubyDetector;

impl EcosystemDetector for RubyDetector {
    fn name(&self) -> &'static str {
        "ruby"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        if !exists(fs, "Gemfile") {
            return Ok(None);
        }
        let gemfile = Gemfile::parse(&parsers::read_manifest(fs, "Gemfile")?);

        let mut profile =
            AppProfile::detected(LanguageId::Ruby, PackageManagerId::Bundler, self.name(), 0.7)
                .with_port(3000);
        if let Some(lockfile) = find_lockfile(fs, &["Gemfile.lock"]) {
            profile.set_lockfile(lockfile.label());
        }

        profile.version = match parsers::read_optional(fs, ".ruby-version")?
            .as_deref()
            .and_then(version_pin)
        {
            Some(pinned) => Some(pinned),
            None => gemfile.ruby_version.clone(),
        };

        if gemfile.has_gem("rails") || exists(fs, "config/routes.rb") {
            profile.set_framework(FrameworkId::Rails, 0.9);
            profile.build_command = Some("bundle exec rake assets:precompile".to_string());
            profile.start_command = Some("bundle exec rails server -b 0.0.0.0".to_string());
        }

        Ok(Some(profile))
    }
}
