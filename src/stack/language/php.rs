use crate::error::Result;
use crate::fs::FileSystem;
use crate::stack::detector::{exists, EcosystemDetector};
use crate::stack::parsers::{self, clean_version, find_lockfile, ComposerJson};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};

pub struct PhpDetector;

impl EcosystemDetector for PhpDetector {
    fn name(&self) -> &'static str {
        "php"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        if !exists(fs, "composer.json") {
            return Ok(None);
        }
        let composer = parsers::parse_manifest(fs, "composer.json", ComposerJson::parse)?;

        let mut profile =
            AppProfile::detected(LanguageId::Php, PackageManagerId::Composer, self.name(), 0.7)
                .with_port(8000)
                .with_commands("composer install --no-dev --optimize-autoloader", "");
        if let Some(lockfile) = find_lockfile(fs, &["composer.lock"]) {
            profile.set_lockfile(lockfile.label());
        }
        profile.app_version = composer.version.clone().filter(|v| !v.is_empty());
        profile.version = composer
            .php_constraint()
            .map(clean_version)
            .filter(|v| !v.is_empty());

        if composer.has_require("laravel/framework") {
            profile.set_framework(FrameworkId::Laravel, 0.9);
            profile.start_command =
                Some("php artisan serve --host=0.0.0.0 --port=8000".to_string());
            profile.output_dir = Some("public".to_string());
        }

        Ok(Some(profile))
    }
}
