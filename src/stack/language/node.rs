use crate::error::Result;
use crate::fs::FileSystem;
use crate::stack::detector::{exists, EcosystemDetector, FrameworkRule};
use crate::stack::parsers::{self, clean_version, find_lockfile, version_pin, PackageJson};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};
use tracing::debug;

/// Candidate frameworks in match order, each with the dependency names that
/// identify it.
const FRAMEWORKS: &[(&[&str], FrameworkRule)] = &[
    (
        &["next"],
        FrameworkRule {
            framework: FrameworkId::NextJs,
            confidence: 0.9,
            build: "next build",
            start: "next start",
            output_dir: ".next",
        },
    ),
    (
        &["nuxt"],
        FrameworkRule {
            framework: FrameworkId::Nuxt,
            confidence: 0.9,
            build: "nuxt build",
            start: "node .output/server/index.mjs",
            output_dir: ".output",
        },
    ),
    (
        &["@remix-run/node", "@remix-run/react"],
        FrameworkRule {
            framework: FrameworkId::Remix,
            confidence: 0.85,
            build: "remix build",
            start: "remix-serve build",
            output_dir: "build",
        },
    ),
    (
        &["vite"],
        FrameworkRule {
            framework: FrameworkId::Vite,
            confidence: 0.8,
            build: "vite build",
            start: "vite preview",
            output_dir: "dist",
        },
    ),
];

pub struct NodeDetector;

impl EcosystemDetector for NodeDetector {
    fn name(&self) -> &'static str {
        "node"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        if !exists(fs, "package.json") {
            return Ok(None);
        }
        let pkg = parsers::parse_manifest(fs, "package.json", PackageJson::parse)?;

        let lockfile = find_lockfile(fs, &["pnpm-lock.yaml", "yarn.lock", "package-lock.json"]);
        let pm = lockfile.map_or(PackageManagerId::Npm, |l| l.package_manager);

        let mut profile =
            AppProfile::detected(LanguageId::Node, pm, self.name(), 0.7).with_port(3000);
        if let Some(lockfile) = lockfile {
            profile.set_lockfile(lockfile.label());
        }

        profile.version = self.node_version(fs, &pkg)?;
        profile.app_version = pkg.version.clone().filter(|v| !v.is_empty());

        if let Some((_, rule)) = FRAMEWORKS
            .iter()
            .find(|(deps, _)| deps.iter().any(|d| pkg.has_dep(d)))
        {
            debug!(framework = %rule.framework, "Node framework dependency found");
            rule.apply(&mut profile);
        }

        if let Some(build) = pkg.script("build") {
            profile.build_command = Some(build.to_string());
        }
        if let Some(start) = pkg.script("start") {
            profile.start_command = Some(start.to_string());
        }
        if profile.start_command.is_none() {
            profile.start_command = Some(match pkg.main.as_deref().filter(|m| !m.is_empty()) {
                Some(main) => format!("node {}", main),
                None => format!("{} start", pm),
            });
        }

        Ok(Some(profile))
    }
}

impl NodeDetector {
    /// `engines.node`, then `.nvmrc`, then `.node-version`.
    fn node_version(&self, fs: &dyn FileSystem, pkg: &PackageJson) -> Result<Option<String>> {
        if let Some(constraint) = pkg.engines.node.as_deref() {
            let version = clean_version(constraint);
            if !version.is_empty() {
                return Ok(Some(version));
            }
        }
        for pin in [".nvmrc", ".node-version"] {
            if let Some(version) = parsers::read_optional(fs, pin)?.as_deref().and_then(version_pin) {
                return Ok(Some(version));
            }
        }
        Ok(None)
    }
}
