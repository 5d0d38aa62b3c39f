use crate::error::Result;
use crate::fs::FileSystem;
use crate::stack::detector::{exists, EcosystemDetector};
use crate::stack::parsers::{self, find_lockfile, Gradle, PomXml};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};

const GRADLE_SCRIPTS: &[&str] = &["build.gradle", "build.gradle.kts"];

pub struct JavaDetector;

impl EcosystemDetector for JavaDetector {
    fn name(&self) -> &'static str {
        "java"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        let gradle_script = GRADLE_SCRIPTS.iter().copied().find(|s| exists(fs, s));
        let has_pom = exists(fs, "pom.xml");
        if !has_pom && gradle_script.is_none() {
            return Ok(None);
        }

        // Maven wins when both build systems are present.
        if has_pom {
            let pom = parsers::parse_manifest(fs, "pom.xml", PomXml::parse)?;
            let mut profile = self
                .base_profile(PackageManagerId::Maven)
                .with_commands("mvn package -DskipTests", "java -jar target/*.jar");
            profile.version = pom.java_version().map(str::to_string);
            profile.app_version = pom.version().map(str::to_string);
            if pom.is_spring_boot() {
                profile.set_framework(FrameworkId::Spring, 0.9);
            }
            return Ok(Some(profile));
        }

        let script = gradle_script.unwrap_or(GRADLE_SCRIPTS[0]);
        let gradle = Gradle::parse(&parsers::read_manifest(fs, script)?);
        let build = if exists(fs, "gradlew") {
            "./gradlew build -x test"
        } else {
            "gradle build -x test"
        };
        let mut profile = self
            .base_profile(PackageManagerId::Gradle)
            .with_commands(build, "java -jar build/libs/*.jar");
        if let Some(lockfile) = find_lockfile(fs, &["gradle.lockfile"]) {
            profile.set_lockfile(lockfile.label());
        }
        profile.version = gradle.java_version;
        if gradle.spring_boot {
            profile.set_framework(FrameworkId::Spring, 0.9);
        }
        Ok(Some(profile))
    }
}

impl JavaDetector {
    fn base_profile(&self, pm: PackageManagerId) -> AppProfile {
        AppProfile::detected(LanguageId::Java, pm, self.name(), 0.7).with_port(8080)
    }
}
