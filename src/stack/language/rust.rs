use crate::error::Result;
use crate::fs::FileSystem;
use crate::stack::detector::{exists, EcosystemDetector};
use crate::stack::parsers::{self, find_lockfile, CargoToml, RustToolchain};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};

pub struct RustDetector;

impl EcosystemDetector for RustDetector {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        if !exists(fs, "Cargo.toml") {
            return Ok(None);
        }
        let cargo = parsers::parse_manifest(fs, "Cargo.toml", CargoToml::parse)?;

        let binary = cargo.binary_name().unwrap_or("app");
        let mut profile =
            AppProfile::detected(LanguageId::Rust, PackageManagerId::Cargo, self.name(), 0.8)
                .with_port(8080)
                .with_commands(
                    "cargo build --release",
                    &format!("./target/release/{}", binary),
                );
        if let Some(lockfile) = find_lockfile(fs, &["Cargo.lock"]) {
            profile.set_lockfile(lockfile.label());
        }
        profile.app_version = cargo.package_version().map(str::to_string);
        profile.version = toolchain_version(fs, &cargo)?;

        if cargo.has_dep("actix-web") {
            profile.set_framework(FrameworkId::Actix, 0.9);
        }

        Ok(Some(profile))
    }
}

/// Toolchain pin, then `rust-version`, then the edition.
fn toolchain_version(fs: &dyn FileSystem, cargo: &CargoToml) -> Result<Option<String>> {
    let pinned = if exists(fs, "rust-toolchain.toml") {
        Some(parsers::parse_manifest(
            fs,
            "rust-toolchain.toml",
            RustToolchain::parse,
        )?)
    } else if exists(fs, "rust-toolchain") {
        Some(parsers::parse_manifest(
            fs,
            "rust-toolchain",
            RustToolchain::parse_legacy,
        )?)
    } else {
        None
    };

    Ok(pinned
        .as_ref()
        .and_then(|tc| tc.channel())
        .or_else(|| cargo.rust_version())
        .or_else(|| cargo.edition())
        .map(str::to_string))
}
