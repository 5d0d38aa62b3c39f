//! Dependency declaration tokenizer.
//!
//! Splits strings such as `django>=4.2`, `uvicorn[standard]==0.29` or
//! `github.com/gin-gonic/gin v1.9.1` into a bare name and its constraint, so
//! that membership checks compare whole names and `next` never matches
//! `next-auth`.

/// A declared dependency split into name and constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencySpec<'a> {
    pub name: &'a str,
    pub constraint: &'a str,
}

impl<'a> DependencySpec<'a> {
    pub fn parse(declaration: &'a str) -> Self {
        let declaration = declaration.trim();
        let split = declaration
            .char_indices()
            .find(|&(i, c)| is_boundary(i, c))
            .map(|(i, _)| i)
            .unwrap_or(declaration.len());

        Self {
            name: declaration[..split].trim(),
            constraint: declaration[split..].trim(),
        }
    }

    /// PEP 503 comparison: case-insensitive, runs of `-`, `_` and `.` equal.
    pub fn is_python(&self, name: &str) -> bool {
        normalize_python_name(self.name) == normalize_python_name(name)
    }
}

/// A version operator, extras bracket, marker separator, or whitespace ends a
/// name. A leading `@` belongs to scoped npm names.
fn is_boundary(index: usize, c: char) -> bool {
    match c {
        '<' | '>' | '=' | '!' | '~' | '^' | '[' | '(' | ';' | ',' => true,
        '@' => index > 0,
        c => c.is_whitespace(),
    }
}

pub fn normalize_python_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_sep {
                normalized.push('-');
            }
            last_was_sep = true;
        } else {
            normalized.extend(c.to_lowercase());
            last_was_sep = false;
        }
    }
    normalized
}
