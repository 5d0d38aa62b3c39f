use crate::error::{DetectionError, Result};
use crate::fs::FileSystem;
use crate::stack::detector::{exists, is_dir, EcosystemDetector};
use crate::stack::parsers::{self, find_lockfile, GoMod};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};
use std::path::Path;
use tracing::{debug, trace};

const GIN_MODULE: &str = "github.com/gin-gonic/gin";

pub struct GoDetector;

impl EcosystemDetector for GoDetector {
    fn name(&self) -> &'static str {
        "go"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        if !exists(fs, "go.mod") {
            return Ok(None);
        }
        let go_mod = parsers::parse_manifest(fs, "go.mod", GoMod::parse)?;

        let entry = find_entry_point(fs, &go_mod)?.unwrap_or_else(|| ".".to_string());
        debug!(entry = %entry, "Go entry point");

        let mut profile = AppProfile::detected(LanguageId::Go, PackageManagerId::GoMod, self.name(), 0.8)
            .with_port(8080)
            .with_commands(&format!("go build -o app {}", entry), "./app");
        if let Some(lockfile) = find_lockfile(fs, &["go.sum"]) {
            profile.set_lockfile(lockfile.label());
        }
        profile.version = go_mod.go_version.clone().filter(|v| !v.is_empty());
        profile.has_vendor = is_dir(fs, "vendor");

        if go_mod.has_require(GIN_MODULE) {
            profile.set_framework(FrameworkId::Gin, 0.9);
        }

        Ok(Some(profile))
    }
}

/// Directory holding `package main`, as a `go build` target.
///
/// Precedence: the repository root, then `cmd/<module basename>`, then the
/// first `cmd/*` directory by name.
fn find_entry_point(fs: &dyn FileSystem, go_mod: &GoMod) -> Result<Option<String>> {
    if has_main_package(fs, "")? {
        return Ok(Some(".".to_string()));
    }
    if !is_dir(fs, "cmd") {
        return Ok(None);
    }

    if let Some(base) = go_mod.module_basename() {
        let dir = format!("cmd/{}", base);
        if is_dir(fs, &dir) && has_main_package(fs, &dir)? {
            return Ok(Some(format!("./{}", dir)));
        }
    }

    let entries = fs
        .read_dir(Path::new("cmd"))
        .map_err(|e| DetectionError::unreadable("cmd", e))?;
    for entry in entries.iter().filter(|e| e.is_dir()) {
        let dir = format!("cmd/{}", entry.file_name());
        if has_main_package(fs, &dir)? {
            return Ok(Some(format!("./{}", dir)));
        }
    }
    Ok(None)
}

fn has_main_package(fs: &dyn FileSystem, dir: &str) -> Result<bool> {
    let dir_path = Path::new(dir);
    if fs.exists(&dir_path.join("main.go")) {
        return Ok(true);
    }

    let entries = fs
        .read_dir(dir_path)
        .map_err(|e| DetectionError::unreadable(dir_path, e))?;
    for entry in entries {
        let name = entry.file_name();
        if !entry.is_file() || !name.ends_with(".go") || name.ends_with("_test.go") {
            continue;
        }
        // An unreadable or non-UTF-8 source is not an entry point.
        let content = match fs.read_to_string(&entry.path()) {
            Ok(content) => content,
            Err(e) => {
                trace!(file = %entry.path().display(), error = %e, "Skipping unreadable Go source");
                continue;
            }
        };
        if content.lines().any(declares_package_main) {
            trace!(file = %entry.path().display(), "package main");
            return Ok(true);
        }
    }
    Ok(false)
}

fn declares_package_main(line: &str) -> bool {
    line.trim()
        .strip_prefix("package main")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with("//"))
}
