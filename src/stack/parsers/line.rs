//! Line-oriented manifests: `go.mod`, `requirements.txt`, `Gemfile`,
//! `mix.exs`, Gradle build scripts and single-line version pin files.
//!
//! Only `go.mod` has a grammar strict enough to reject; the script-like
//! formats are scanned for the few declarations detection cares about.

use super::dependency::DependencySpec;
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GoMod {
    pub module: Option<String>,
    pub go_version: Option<String>,
    /// Module paths named by `require` directives.
    pub requires: Vec<String>,
}

enum Block {
    Require,
    Other,
}

impl GoMod {
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut go_mod = GoMod::default();
        let mut block: Option<(Block, usize)> = None;

        for (index, raw) in content.lines().enumerate() {
            let code = raw.split_once("//").map_or(raw, |(code, _)| code).trim();
            if code.is_empty() {
                continue;
            }

            if block.is_some() {
                if code == ")" {
                    block = None;
                } else if matches!(block, Some((Block::Require, _))) {
                    go_mod.push_require(code, index + 1)?;
                }
                continue;
            }

            let (directive, rest) = code.split_once(char::is_whitespace).unwrap_or((code, ""));
            let rest = rest.trim();
            match directive {
                "module" => go_mod.module = Some(rest.trim_matches('"').to_string()),
                "go" => go_mod.go_version = Some(rest.to_string()),
                "require" if rest == "(" => block = Some((Block::Require, index + 1)),
                "require" => go_mod.push_require(rest, index + 1)?,
                "toolchain" | "replace" | "exclude" | "retract" | "godebug" | "tool" | "ignore" => {
                    if rest == "(" {
                        block = Some((Block::Other, index + 1));
                    }
                }
                other => return Err(format!("line {}: unknown directive {:?}", index + 1, other)),
            }
        }

        if let Some((_, opened_at)) = block {
            return Err(format!("line {}: unterminated block", opened_at));
        }
        Ok(go_mod)
    }

    /// A require line is a module path followed by a version.
    fn push_require(&mut self, spec: &str, line: usize) -> Result<(), String> {
        let dep = DependencySpec::parse(spec);
        if dep.name.is_empty() || dep.constraint.is_empty() {
            return Err(format!("line {}: malformed require {:?}", line, spec));
        }
        self.requires.push(dep.name.trim_matches('"').to_string());
        Ok(())
    }

    /// Exact module path match among `require` directives.
    pub fn has_require(&self, path: &str) -> bool {
        self.requires.iter().any(|r| r == path)
    }

    /// Last path element of the module path, skipping a `/vN` major version
    /// suffix.
    pub fn module_basename(&self) -> Option<&str> {
        let mut elements = self.module.as_deref()?.rsplit('/');
        let last = elements.next()?;
        let base = if is_major_version(last) {
            elements.next().unwrap_or(last)
        } else {
            last
        };
        Some(base).filter(|s| !s.is_empty())
    }
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// `requirements.txt` declarations, with options and includes dropped.
#[derive(Debug, Clone, Default)]
pub struct Requirements {
    pub entries: Vec<String>,
}

impl Requirements {
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(|line| line.split(" #").next().unwrap_or_default().trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn has_dep(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| DependencySpec::parse(e).is_python(name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gemfile {
    pub gems: Vec<String>,
    pub ruby_version: Option<String>,
}

impl Gemfile {
    pub fn parse(content: &str) -> Self {
        let gem_re = Regex::new(r#"(?m)^\s*gem\s+["']([^"']+)["']"#).expect("valid regex");
        let ruby_re = Regex::new(r#"(?m)^\s*ruby\s+["']([^"']+)["']"#).expect("valid regex");

        Self {
            gems: gem_re
                .captures_iter(content)
                .map(|c| c[1].to_string())
                .collect(),
            ruby_version: ruby_re.captures(content).map(|c| c[1].to_string()),
        }
    }

    pub fn has_gem(&self, name: &str) -> bool {
        self.gems.iter().any(|g| g == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MixExs {
    pub deps: Vec<String>,
    pub version: Option<String>,
    pub elixir_constraint: Option<String>,
}

impl MixExs {
    pub fn parse(content: &str) -> Self {
        let dep_re = Regex::new(r"\{\s*:([a-z_][a-zA-Z0-9_]*)\s*,").expect("valid regex");
        let attr_re = Regex::new(r#"(?m)^\s*@([a-z_][a-zA-Z0-9_]*)\s+"([^"]*)""#).expect("valid regex");
        let version_re =
            Regex::new(r#"\bversion:\s*(?:"([^"]+)"|@([a-z_][a-zA-Z0-9_]*))"#).expect("valid regex");
        let elixir_re =
            Regex::new(r#"\belixir:\s*(?:"([^"]+)"|@([a-z_][a-zA-Z0-9_]*))"#).expect("valid regex");

        // `@version "1.2.0"` style module attributes, referenced from `project/0`.
        let attributes: HashMap<&str, &str> = attr_re
            .captures_iter(content)
            .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
            .collect();
        let keyword = |re: &Regex| -> Option<String> {
            let caps = re.captures(content)?;
            let value = match (caps.get(1), caps.get(2)) {
                (Some(literal), _) => literal.as_str(),
                (None, Some(attr)) => attributes.get(attr.as_str()).copied()?,
                (None, None) => return None,
            };
            Some(value.to_string()).filter(|v| !v.is_empty())
        };

        Self {
            deps: dep_re
                .captures_iter(content)
                .map(|c| c[1].to_string())
                .collect(),
            version: keyword(&version_re),
            elixir_constraint: keyword(&elixir_re),
        }
    }

    pub fn has_dep(&self, name: &str) -> bool {
        self.deps.iter().any(|d| d == name)
    }
}

/// `build.gradle` or `build.gradle.kts`.
#[derive(Debug, Clone, Default)]
pub struct Gradle {
    pub spring_boot: bool,
    pub java_version: Option<String>,
}

impl Gradle {
    pub fn parse(content: &str) -> Self {
        let spring_re =
            Regex::new(r#"["']org\.springframework\.boot[:"']"#).expect("valid regex");
        let toolchain_re =
            Regex::new(r"JavaLanguageVersion\.of\(\s*(\d+)\s*\)").expect("valid regex");
        let compat_re = Regex::new(
            r#"sourceCompatibility\s*=\s*['"]?(?:JavaVersion\.VERSION_)?([0-9][0-9_.]*)"#,
        )
        .expect("valid regex");

        let java_version = toolchain_re
            .captures(content)
            .or_else(|| compat_re.captures(content))
            .map(|c| c[1].replace('_', "."));

        Self {
            spring_boot: spring_re.is_match(content),
            java_version,
        }
    }
}

/// First meaningful line of a pin file such as `.nvmrc` or `.ruby-version`.
pub fn version_pin(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.strip_prefix('v').unwrap_or(l).to_string())
}
