//! Registry behaviour over in-memory project snapshots.

use flkr::fs::MockFileSystem;
use flkr::{
    AppProfile, DetectContext, DetectionError, DetectorRegistry, FrameworkId, LanguageId,
    PackageManagerId,
};
use yare::parameterized;

fn detect_best(fs: &MockFileSystem) -> Option<AppProfile> {
    DetectorRegistry::with_defaults()
        .detect_best(&DetectContext::new(), fs)
        .expect("detection should succeed")
}

fn detect_all(fs: &MockFileSystem) -> Vec<AppProfile> {
    DetectorRegistry::with_defaults()
        .detect_all(&DetectContext::new(), fs)
        .expect("detection should succeed")
}

#[test]
fn test_nextjs_with_env_template_and_procfile() {
    let fs = MockFileSystem::new()
        .with_file("package.json", r#"{"dependencies":{"next":"14.0.0"}}"#)
        .with_file(".env.example", "DATABASE_URL=\nSECRET_KEY=\n")
        .with_file("Procfile", "web: npm start\n");

    let profile = detect_best(&fs).expect("node project");

    assert_eq!(profile.language, Some(LanguageId::Node));
    assert_eq!(profile.framework, Some(FrameworkId::NextJs));
    assert_eq!(profile.start_command.as_deref(), Some("npm start"));
    assert_eq!(profile.build_command.as_deref(), Some("next build"));
    assert_eq!(profile.env_vars, vec!["DATABASE_URL", "SECRET_KEY"]);
}

#[test]
fn test_minimal_go_module() {
    let fs = MockFileSystem::new()
        .with_file("go.mod", "module myapp\n\ngo 1.22.0\n")
        .with_file("go.sum", "example.com/x v1.0.0 h1:abc=\n");

    let profile = detect_best(&fs).expect("go project");

    assert_eq!(profile.language, Some(LanguageId::Go));
    assert_eq!(profile.package_manager, Some(PackageManagerId::GoMod));
    assert_eq!(profile.version.as_deref(), Some("1.22.0"));
    assert!(profile.has_lockfile);
    assert_eq!(profile.framework, None);
    assert!((profile.confidence - 0.8).abs() < 1e-9);
}

#[test]
fn test_framework_confidence_beats_plain_go() {
    let fs = MockFileSystem::new()
        .with_file("package.json", r#"{"dependencies":{"next":"14.0.0"}}"#)
        .with_file("go.mod", "module myapp\n\ngo 1.22.0\n");

    let all = detect_all(&fs);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].language, Some(LanguageId::Node));
    assert_eq!(all[1].language, Some(LanguageId::Go));

    let best = detect_best(&fs).expect("a candidate");
    assert_eq!(best.language, Some(LanguageId::Node));
    assert_eq!(best.framework, Some(FrameworkId::NextJs));
}

#[test]
fn test_plain_go_beats_plain_node() {
    let fs = MockFileSystem::new()
        .with_file("package.json", r#"{"name":"tooling"}"#)
        .with_file("go.mod", "module myapp\n\ngo 1.22.0\n");

    let best = detect_best(&fs).expect("a candidate");
    assert_eq!(best.language, Some(LanguageId::Go));
}

#[test]
fn test_truncated_manifest_is_an_error() {
    let fs = MockFileSystem::new().with_file("package.json", r#"{"dependencies":{"next":"14"#);

    let err = DetectorRegistry::with_defaults()
        .detect_best(&DetectContext::new(), &fs)
        .unwrap_err();

    match err {
        DetectionError::EvidenceUnreadable { path, .. } => {
            assert_eq!(path.to_string_lossy(), "package.json");
        }
        other => panic!("expected EvidenceUnreadable, got {other:?}"),
    }
}

#[test]
fn test_malformed_go_mod_is_an_error() {
    let fs = MockFileSystem::new().with_file("go.mod", "module myapp\nrequire (\n  example.com/x v1\n");

    let err = DetectorRegistry::with_defaults()
        .detect_all(&DetectContext::new(), &fs)
        .unwrap_err();
    assert!(matches!(err, DetectionError::EvidenceUnreadable { .. }));
}

#[test]
fn test_empty_snapshot_detects_nothing() {
    let fs = MockFileSystem::new();
    assert!(detect_all(&fs).is_empty());
    assert!(detect_best(&fs).is_none());
}

#[test]
fn test_cross_cutting_files_alone_detect_nothing() {
    let fs = MockFileSystem::new()
        .with_file(".env.example", "DATABASE_URL=\n")
        .with_file("Procfile", "web: ./run\n")
        .with_file("README.md", "# hello\n");

    assert!(detect_all(&fs).is_empty());
    assert!(detect_best(&fs).is_none());
}

#[parameterized(
    node = { "package.json", "{}", LanguageId::Node },
    python_requirements = { "requirements.txt", "requests\n", LanguageId::Python },
    python_setup = { "setup.py", "from setuptools import setup\n", LanguageId::Python },
    go = { "go.mod", "module x\n", LanguageId::Go },
    rust = { "Cargo.toml", "[package]\nname = \"x\"\n", LanguageId::Rust },
    ruby = { "Gemfile", "source \"https://rubygems.org\"\n", LanguageId::Ruby },
    elixir = { "mix.exs", "defmodule X.MixProject do\nend\n", LanguageId::Elixir },
    php = { "composer.json", "{}", LanguageId::Php },
    java_maven = { "pom.xml", "<project></project>", LanguageId::Java },
    java_gradle = { "build.gradle", "plugins { id 'java' }\n", LanguageId::Java },
)]
fn test_single_marker_yields_single_candidate(marker: &str, content: &str, language: LanguageId) {
    let fs = MockFileSystem::new().with_file(marker, content);

    let all = detect_all(&fs);
    assert_eq!(all.len(), 1, "candidates: {all:?}");
    assert_eq!(all[0].language, Some(language));

    let best = detect_best(&fs).expect("a candidate");
    assert_eq!(best.language, Some(language));
}

#[test]
fn test_env_vars_keep_file_order() {
    let fs = MockFileSystem::new()
        .with_file("go.mod", "module myapp\n")
        .with_file(".env.example", "DATABASE_URL=\nSECRET_KEY=\nAPI_URL=\n");

    let profile = detect_best(&fs).expect("go project");
    assert_eq!(profile.env_vars, vec!["DATABASE_URL", "SECRET_KEY", "API_URL"]);
}

#[test]
fn test_enrichment_never_lowers_confidence() {
    let fs = MockFileSystem::new()
        .with_file("package.json", r#"{"dependencies":{"next":"14.0.0"}}"#)
        .with_file(".env.example", "DATABASE_URL=\n");

    let base = detect_all(&fs).remove(0);
    let best = detect_best(&fs).expect("node project");
    assert!(best.confidence >= base.confidence);
}

#[test]
fn test_merging_enrichment_twice_is_idempotent() {
    let fs = MockFileSystem::new()
        .with_file("package.json", r#"{"dependencies":{"next":"14.0.0"}}"#)
        .with_file(".env.example", "DATABASE_URL=\nSECRET_KEY=\n")
        .with_file("Procfile", "web: npm start\n");

    let enrichment = AppProfile {
        start_command: Some("npm start".to_string()),
        env_vars: vec!["DATABASE_URL".to_string(), "SECRET_KEY".to_string()],
        ..Default::default()
    };

    let once = detect_best(&fs).expect("node project");
    let mut twice = once.clone();
    twice.merge(Some(&enrichment));
    assert_eq!(once, twice);
}

#[test]
fn test_dependency_prefix_does_not_match() {
    let fs = MockFileSystem::new()
        .with_file("package.json", r#"{"dependencies":{"next-auth":"4.0.0"}}"#);

    let profile = detect_best(&fs).expect("node project");
    assert_eq!(profile.framework, None);
}

#[test]
fn test_deadline_in_the_past_aborts() {
    let ctx = DetectContext::new()
        .deadline_at(std::time::Instant::now() - std::time::Duration::from_millis(1));
    let fs = MockFileSystem::new().with_file("package.json", "{}");

    let err = DetectorRegistry::with_defaults()
        .detect_all(&ctx, &fs)
        .unwrap_err();
    assert!(matches!(err, DetectionError::DeadlineExceeded));
}
