//! Detection against the on-disk fixtures under `tests/fixtures`.

use flkr::{AppProfile, DetectContext, DetectionError, DetectorRegistry, FrameworkId, LanguageId, PackageManagerId};
use std::path::PathBuf;
use yare::parameterized;

fn fixture_path(category: &str, name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(category)
        .join(name)
}

fn detect_fixture(category: &str, name: &str) -> Result<Option<AppProfile>, DetectionError> {
    DetectorRegistry::with_defaults().detect_from_path(&DetectContext::new(), &fixture_path(category, name))
}

#[parameterized(
    node_next = { "node-next", LanguageId::Node, PackageManagerId::Npm, Some(FrameworkId::NextJs), Some("20.0.0") },
    python_django = { "python-django", LanguageId::Python, PackageManagerId::Uv, Some(FrameworkId::Django), Some("3.12") },
    go_mod = { "go-mod", LanguageId::Go, PackageManagerId::GoMod, Some(FrameworkId::Gin), Some("1.22") },
    rust_actix = { "rust-actix", LanguageId::Rust, PackageManagerId::Cargo, Some(FrameworkId::Actix), Some("1.77.2") },
    ruby_rails = { "ruby-rails", LanguageId::Ruby, PackageManagerId::Bundler, Some(FrameworkId::Rails), Some("3.3.0") },
    elixir_phoenix = { "elixir-phoenix", LanguageId::Elixir, PackageManagerId::Mix, Some(FrameworkId::Phoenix), Some("1.15") },
    php_laravel = { "php-laravel", LanguageId::Php, PackageManagerId::Composer, Some(FrameworkId::Laravel), Some("8.2") },
    java_maven = { "java-maven", LanguageId::Java, PackageManagerId::Maven, Some(FrameworkId::Spring), Some("21") },
    java_gradle = { "java-gradle", LanguageId::Java, PackageManagerId::Gradle, None, Some("17") },
)]
fn test_single_language_fixture(
    fixture: &str,
    language: LanguageId,
    package_manager: PackageManagerId,
    framework: Option<FrameworkId>,
    version: Option<&str>,
) {
    let profile = detect_fixture("single-language", fixture)
        .expect("detection should succeed")
        .expect("fixture should be detected");

    assert_eq!(profile.language, Some(language));
    assert_eq!(profile.package_manager, Some(package_manager));
    assert_eq!(profile.framework, framework);
    assert_eq!(profile.version.as_deref(), version);
    assert!(profile.validate().is_ok());
    assert!(profile.start_command.is_some(), "{fixture} has no start command");
}

#[test]
fn test_node_next_fixture_details() {
    let profile = detect_fixture("single-language", "node-next").unwrap().unwrap();

    assert_eq!(profile.app_version.as_deref(), Some("1.4.0"));
    assert_eq!(profile.build_command.as_deref(), Some("next build"));
    // Procfile web process wins over scripts.start.
    assert_eq!(profile.start_command.as_deref(), Some("npm start"));
    assert_eq!(profile.output_dir.as_deref(), Some(".next"));
    assert_eq!(profile.lockfile_type.as_deref(), Some("npm"));
    assert_eq!(
        profile.env_vars,
        vec!["DATABASE_URL", "SECRET_KEY", "NEXT_PUBLIC_API_URL"]
    );
}

#[test]
fn test_go_fixture_entry_point() {
    let profile = detect_fixture("single-language", "go-mod").unwrap().unwrap();

    assert_eq!(
        profile.build_command.as_deref(),
        Some("go build -o app ./cmd/server")
    );
    assert_eq!(profile.start_command.as_deref(), Some("./app"));
    assert!(profile.has_lockfile);
    assert!(!profile.has_vendor);
}

#[test]
fn test_rust_fixture_binary_name() {
    let profile = detect_fixture("single-language", "rust-actix").unwrap().unwrap();

    assert_eq!(
        profile.start_command.as_deref(),
        Some("./target/release/inventory-server")
    );
    assert_eq!(profile.app_version.as_deref(), Some("2.0.0"));
}

#[test]
fn test_phoenix_fixture_system_deps() {
    let profile = detect_fixture("single-language", "elixir-phoenix").unwrap().unwrap();

    assert_eq!(profile.start_command.as_deref(), Some("mix phx.server"));
    assert_eq!(profile.system_deps, vec!["inotify-tools"]);
    assert_eq!(profile.port, 4000);
}

#[test]
fn test_gradle_fixture_uses_wrapper() {
    let profile = detect_fixture("single-language", "java-gradle").unwrap().unwrap();
    assert_eq!(profile.build_command.as_deref(), Some("./gradlew build -x test"));
}

#[test]
fn test_truncated_manifest_fixture() {
    let err = detect_fixture("edge-cases", "truncated-package-json").unwrap_err();
    assert!(matches!(err, DetectionError::EvidenceUnreadable { .. }));
}

#[test]
fn test_node_and_go_fixture_prefers_go() {
    let profile = detect_fixture("edge-cases", "node-and-go").unwrap().unwrap();
    assert_eq!(profile.language, Some(LanguageId::Go));
    assert_eq!(profile.build_command.as_deref(), Some("go build -o app ."));
}

#[test]
fn test_env_only_fixture_detects_nothing() {
    assert!(detect_fixture("edge-cases", "env-only").unwrap().is_none());
}
