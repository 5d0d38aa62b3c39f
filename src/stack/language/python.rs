use crate::error::Result;
use crate::fs::FileSystem;
use crate::stack::detector::{exists, EcosystemDetector};
use crate::stack::parsers::{
    self, clean_version, find_lockfile, version_pin, Pipfile, PyprojectToml, Requirements,
};
use crate::stack::{AppProfile, FrameworkId, LanguageId, PackageManagerId};
use tracing::debug;

const MARKERS: &[&str] = &["pyproject.toml", "requirements.txt", "Pipfile", "setup.py"];

/// (dependency, framework, confidence from a structured manifest,
/// confidence from `requirements.txt`)
const FRAMEWORKS: &[(&str, FrameworkId, f64, f64)] = &[
    ("django", FrameworkId::Django, 0.9, 0.85),
    ("flask", FrameworkId::Flask, 0.85, 0.8),
    ("fastapi", FrameworkId::FastApi, 0.9, 0.85),
];

pub struct PythonDetector;

impl EcosystemDetector for PythonDetector {
    fn name(&self) -> &'static str {
        "python"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn detect(&self, fs: &dyn FileSystem) -> Result<Option<AppProfile>> {
        if !MARKERS.iter().any(|m| exists(fs, m)) {
            return Ok(None);
        }

        let pyproject = if exists(fs, "pyproject.toml") {
            Some(parsers::parse_manifest(fs, "pyproject.toml", PyprojectToml::parse)?)
        } else {
            None
        };
        let pipfile = if exists(fs, "Pipfile") {
            Some(parsers::parse_manifest(fs, "Pipfile", Pipfile::parse)?)
        } else {
            None
        };
        let requirements = parsers::read_optional(fs, "requirements.txt")?
            .map(|content| Requirements::parse(&content));

        let lockfile = find_lockfile(fs, &["uv.lock", "poetry.lock"]);
        let pm = match lockfile {
            Some(lockfile) => lockfile.package_manager,
            None if pipfile.is_some() => PackageManagerId::Pipenv,
            None => PackageManagerId::Pip,
        };

        let mut profile =
            AppProfile::detected(LanguageId::Python, pm, self.name(), 0.7).with_port(8000);
        if let Some(lockfile) = lockfile.or_else(|| {
            (pm == PackageManagerId::Pipenv)
                .then(|| find_lockfile(fs, &["Pipfile.lock"]))
                .flatten()
        }) {
            profile.set_lockfile(lockfile.label());
        }
        profile.build_command = Some(build_command(pm, requirements.is_some()).to_string());

        profile.app_version = pyproject
            .as_ref()
            .and_then(|p| p.app_version())
            .map(str::to_string);
        profile.version = match pyproject.as_ref().and_then(|p| p.python_constraint()) {
            Some(constraint) => Some(clean_version(constraint)),
            None => pipfile
                .as_ref()
                .and_then(|p| p.python_version())
                .map(str::to_string),
        };
        if profile.version.is_none() {
            profile.version = parsers::read_optional(fs, ".python-version")?
                .as_deref()
                .and_then(version_pin);
        }

        let structured = FRAMEWORKS.iter().find(|(dep, ..)| {
            pyproject.as_ref().is_some_and(|p| p.has_dep(dep))
                || pipfile.as_ref().is_some_and(|p| p.has_dep(dep))
        });
        if let Some(&(_, framework, confidence, _)) = structured {
            profile.set_framework(framework, confidence);
        } else if let Some(reqs) = &requirements {
            if let Some(&(_, framework, _, confidence)) =
                FRAMEWORKS.iter().find(|(dep, ..)| reqs.has_dep(dep))
            {
                profile.set_framework(framework, confidence);
            }
        }

        match profile.framework {
            Some(FrameworkId::Django) => {
                profile.start_command =
                    Some("python manage.py runserver 0.0.0.0:8000".to_string());
            }
            Some(FrameworkId::Flask) => {
                profile.start_command = Some("flask run --host=0.0.0.0".to_string());
                profile.port = 5000;
            }
            Some(FrameworkId::FastApi) => {
                profile.start_command =
                    Some("uvicorn main:app --host 0.0.0.0 --port 8000".to_string());
            }
            _ => {}
        }
        if let Some(framework) = profile.framework {
            debug!(%framework, confidence = profile.confidence, "Python framework detected");
        }

        Ok(Some(profile))
    }
}

fn build_command(pm: PackageManagerId, has_requirements: bool) -> &'static str {
    match pm {
        PackageManagerId::Poetry => "poetry install --no-root",
        PackageManagerId::Uv => "uv sync --frozen",
        PackageManagerId::Pipenv => "pipenv install --deploy",
        _ if has_requirements => "pip install -r requirements.txt",
        _ => "pip install .",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectionError;
    use crate::fs::MockFileSystem;
    use yare::parameterized;

    fn detect(fs: &MockFileSystem) -> Option<AppProfile> {
        PythonDetector.detect(fs).unwrap()
    }

    #[test]
    fn test_no_markers() {
        assert!(detect(&MockFileSystem::new().with_file("main.py", "")).is_none());
    }

    #[test]
    fn test_setup_py_only() {
        let profile = detect(&MockFileSystem::new().with_file("setup.py", "")).unwrap();
        assert_eq!(profile.package_manager, Some(PackageManagerId::Pip));
        assert_eq!(profile.build_command.as_deref(), Some("pip install ."));
        assert_eq!(profile.port, 8000);
        assert_eq!(profile.confidence, 0.7);
    }

    #[test]
    fn test_pyproject_fastapi() {
        let fs = MockFileSystem::new().with_file(
            "pyproject.toml",
            r#"
[project]
name = "api"
version = "0.2.0"
requires-python = ">=3.11"
dependencies = ["fastapi>=0.100.0", "uvicorn"]
"#,
        );
        let profile = detect(&fs).unwrap();

        assert_eq!(profile.framework, Some(FrameworkId::FastApi));
        assert_eq!(profile.confidence, 0.9);
        assert_eq!(profile.version.as_deref(), Some("3.11"));
        assert_eq!(profile.app_version.as_deref(), Some("0.2.0"));
        assert_eq!(
            profile.start_command.as_deref(),
            Some("uvicorn main:app --host 0.0.0.0 --port 8000")
        );
    }

    #[parameterized(
        django = { "Django==5.0\n", FrameworkId::Django, 0.85, 8000 },
        flask = { "flask>=3\ngunicorn\n", FrameworkId::Flask, 0.8, 5000 },
        fastapi = { "fastapi\n", FrameworkId::FastApi, 0.85, 8000 },
    )]
    fn test_requirements_fallback(content: &str, framework: FrameworkId, confidence: f64, port: u16) {
        let fs = MockFileSystem::new().with_file("requirements.txt", content);
        let profile = detect(&fs).unwrap();

        assert_eq!(profile.framework, Some(framework));
        assert_eq!(profile.confidence, confidence);
        assert_eq!(profile.port, port);
        assert_eq!(
            profile.build_command.as_deref(),
            Some("pip install -r requirements.txt")
        );
    }

    #[test]
    fn test_flask_extension_is_not_flask() {
        let fs = MockFileSystem::new().with_file("requirements.txt", "flask-cors==4.0\n");
        assert_eq!(detect(&fs).unwrap().framework, None);
    }

    #[test]
    fn test_pipfile_with_lock() {
        let fs = MockFileSystem::new()
            .with_file("Pipfile", "[packages]\ndjango = \"*\"\n\n[requires]\npython_version = \"3.12\"\n")
            .with_file("Pipfile.lock", "{}");
        let profile = detect(&fs).unwrap();

        assert_eq!(profile.package_manager, Some(PackageManagerId::Pipenv));
        assert!(profile.has_lockfile);
        assert_eq!(profile.lockfile_type.as_deref(), Some("pipenv"));
        assert_eq!(profile.version.as_deref(), Some("3.12"));
        assert_eq!(profile.framework, Some(FrameworkId::Django));
        assert_eq!(profile.confidence, 0.9);
    }

    #[parameterized(
        uv = { "uv.lock", PackageManagerId::Uv, "uv sync --frozen" },
        poetry = { "poetry.lock", PackageManagerId::Poetry, "poetry install --no-root" },
    )]
    fn test_lockfile_package_manager(lockfile: &str, pm: PackageManagerId, build: &str) {
        let fs = MockFileSystem::new()
            .with_file("pyproject.toml", "[project]\nname = \"x\"\n")
            .with_file(lockfile, "");
        let profile = detect(&fs).unwrap();

        assert_eq!(profile.package_manager, Some(pm));
        assert!(profile.has_lockfile);
        assert_eq!(profile.build_command.as_deref(), Some(build));
    }

    #[test]
    fn test_python_version_file() {
        let fs = MockFileSystem::new()
            .with_file("requirements.txt", "")
            .with_file(".python-version", "3.12.1\n");
        assert_eq!(detect(&fs).unwrap().version.as_deref(), Some("3.12.1"));
    }

    #[test]
    fn test_malformed_pyproject_is_an_error() {
        let fs = MockFileSystem::new().with_file("pyproject.toml", "[project\nname=");
        assert!(matches!(
            PythonDetector.detect(&fs),
            Err(DetectionError::EvidenceUnreadable { .. })
        ));
    }
}
