use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// `package.json`.
///
/// Dependency values are kept as raw JSON since only their keys are
/// inspected; `workspace:` and git specifiers need no special casing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackageJson {
    pub version: Option<String>,
    pub main: Option<String>,
    pub scripts: BTreeMap<String, String>,
    pub dependencies: BTreeMap<String, Value>,
    pub dev_dependencies: BTreeMap<String, Value>,
    pub engines: Engines,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Engines {
    pub node: Option<String>,
}

impl PackageJson {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Production or dev dependency with exactly this name.
    pub fn has_dep(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts
            .get(name)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// `composer.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComposerJson {
    pub version: Option<String>,
    pub require: BTreeMap<String, String>,
}

impl ComposerJson {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn has_require(&self, package: &str) -> bool {
        self.require.contains_key(package)
    }

    /// Constraint on the `php` platform package, if any.
    pub fn php_constraint(&self) -> Option<&str> {
        self.require.get("php").map(String::as_str)
    }
}
