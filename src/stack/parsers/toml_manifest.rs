//! TOML manifests: `pyproject.toml`, `Pipfile`, `Cargo.toml` and
//! `rust-toolchain[.toml]`.

use super::dependency::{normalize_python_name, DependencySpec};
use serde::Deserialize;
use std::collections::BTreeMap;
use toml::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PyprojectToml {
    pub project: Option<PyProject>,
    pub tool: Option<PyTool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PyProject {
    pub name: Option<String>,
    pub version: Option<String>,
    pub requires_python: Option<String>,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PyTool {
    pub poetry: Option<Poetry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Poetry {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: BTreeMap<String, Value>,
}

impl PyprojectToml {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn poetry(&self) -> Option<&Poetry> {
        self.tool.as_ref().and_then(|t| t.poetry.as_ref())
    }

    /// PEP 621 dependency or Poetry dependency key, compared by normalized
    /// name.
    pub fn has_dep(&self, name: &str) -> bool {
        let in_project = self.project.as_ref().is_some_and(|p| {
            p.dependencies
                .iter()
                .any(|d| DependencySpec::parse(d).is_python(name))
        });
        let wanted = normalize_python_name(name);
        in_project
            || self.poetry().is_some_and(|p| {
                p.dependencies
                    .keys()
                    .any(|k| normalize_python_name(k) == wanted)
            })
    }

    pub fn app_version(&self) -> Option<&str> {
        self.project
            .as_ref()
            .and_then(|p| p.version.as_deref())
            .or_else(|| self.poetry().and_then(|p| p.version.as_deref()))
    }

    /// `requires-python`, falling back to Poetry's `python` dependency.
    pub fn python_constraint(&self) -> Option<&str> {
        self.project
            .as_ref()
            .and_then(|p| p.requires_python.as_deref())
            .or_else(|| {
                self.poetry()
                    .and_then(|p| p.dependencies.get("python"))
                    .and_then(Value::as_str)
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pipfile {
    pub packages: BTreeMap<String, Value>,
    #[serde(rename = "dev-packages")]
    pub dev_packages: BTreeMap<String, Value>,
    pub requires: PipfileRequires,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipfileRequires {
    pub python_version: Option<String>,
    pub python_full_version: Option<String>,
}

impl Pipfile {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn has_dep(&self, name: &str) -> bool {
        let wanted = normalize_python_name(name);
        self.packages
            .keys()
            .any(|k| normalize_python_name(k) == wanted)
    }

    pub fn python_version(&self) -> Option<&str> {
        self.requires
            .python_full_version
            .as_deref()
            .or(self.requires.python_version.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CargoToml {
    pub package: Option<CargoPackage>,
    pub dependencies: BTreeMap<String, Value>,
    pub workspace: Option<CargoWorkspace>,
    pub bin: Vec<CargoTarget>,
}

/// `version`, `edition` and `rust-version` may be `{ workspace = true }`, so
/// they are kept as raw values and read through accessors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CargoPackage {
    pub name: Option<String>,
    pub version: Option<Value>,
    pub edition: Option<Value>,
    pub rust_version: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CargoWorkspace {
    pub dependencies: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CargoTarget {
    pub name: Option<String>,
}

impl CargoToml {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn has_dep(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
            || self
                .workspace
                .as_ref()
                .is_some_and(|w| w.dependencies.contains_key(name))
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().and_then(|p| p.name.as_deref())
    }

    pub fn package_version(&self) -> Option<&str> {
        self.package
            .as_ref()
            .and_then(|p| p.version.as_ref())
            .and_then(Value::as_str)
    }

    pub fn edition(&self) -> Option<&str> {
        self.package
            .as_ref()
            .and_then(|p| p.edition.as_ref())
            .and_then(Value::as_str)
    }

    pub fn rust_version(&self) -> Option<&str> {
        self.package
            .as_ref()
            .and_then(|p| p.rust_version.as_ref())
            .and_then(Value::as_str)
    }

    /// First `[[bin]]` name, else the package name.
    pub fn binary_name(&self) -> Option<&str> {
        self.bin
            .iter()
            .find_map(|b| b.name.as_deref())
            .or_else(|| self.package_name())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RustToolchain {
    pub toolchain: ToolchainSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolchainSection {
    pub channel: Option<String>,
}

impl RustToolchain {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Legacy `rust-toolchain` files hold either TOML or a bare channel name.
    pub fn parse_legacy(content: &str) -> Result<Self, toml::de::Error> {
        if content.contains("[toolchain]") {
            return Self::parse(content);
        }
        let channel = content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string);
        Ok(Self {
            toolchain: ToolchainSection { channel },
        })
    }

    pub fn channel(&self) -> Option<&str> {
        self.toolchain.channel.as_deref().filter(|c| !c.is_empty())
    }
}
