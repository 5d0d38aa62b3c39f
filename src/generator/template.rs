//! `flake.nix` rendering.

use crate::stack::{AppProfile, LanguageId};
use std::fmt::Write;

const INDENT: &str = "      ";

/// Renders the flake for `profile`, pinned to `templates_ref`.
///
/// Optional fields that are unset are left out rather than written as empty
/// strings, so the template's own defaults apply.
pub fn render_flake(profile: &AppProfile, templates_ref: &str) -> String {
    let name = format!("{}-app", profile.display_name());
    let mut attrs = String::new();

    string_attr(&mut attrs, "name", Some(&name));
    string_attr(&mut attrs, "ecosystem", profile.language.map(|l| l.as_str()));
    string_attr(&mut attrs, "version", profile.version.as_deref());
    string_attr(&mut attrs, "appVersion", profile.app_version.as_deref());
    string_attr(
        &mut attrs,
        "packageManager",
        profile.package_manager.map(|pm| pm.as_str()),
    );
    string_attr(&mut attrs, "framework", profile.framework.map(|fw| fw.as_str()));
    string_attr(&mut attrs, "buildCommand", profile.build_command.as_deref());
    string_attr(&mut attrs, "startCommand", profile.start_command.as_deref());
    string_attr(&mut attrs, "outputDir", profile.output_dir.as_deref());
    if profile.port != 0 {
        let _ = writeln!(attrs, "{}port = {};", INDENT, profile.port);
    }
    list_attr(&mut attrs, "systemDeps", &profile.system_deps);
    list_attr(&mut attrs, "envVars", &profile.env_vars);
    if profile.language == Some(LanguageId::Go) {
        let hash = match profile.vendor_hash.as_deref().filter(|h| !h.is_empty()) {
            Some(hash) => quote(hash),
            None => "null".to_string(),
        };
        let _ = writeln!(attrs, "{}vendorHash = {};", INDENT, hash);
    }

    format!(
        r#"{{
  description = {description};

  inputs.flkr-templates.url = {templates};

  outputs = {{ self, flkr-templates, ... }}:
    flkr-templates.lib.mkApp {{
      src = self;
{attrs}    }};
}}
"#,
        description = quote(&format!("{} (generated by flkr)", name)),
        templates = quote(templates_ref),
        attrs = attrs,
    )
}

fn string_attr(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let _ = writeln!(out, "{}{} = {};", INDENT, key, quote(value));
    }
}

fn list_attr(out: &mut String, key: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let items: Vec<String> = values.iter().map(|v| quote(v)).collect();
    let _ = writeln!(out, "{}{} = [ {} ];", INDENT, key, items.join(" "));
}

/// Nix double-quoted string literal.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '$' if chars.peek() == Some(&'{') => quoted.push_str("\\$"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
