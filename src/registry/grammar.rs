//! Line grammar of the registry file
//!
//! The registry is read as a sequence of lines of three shapes:
//! - import lines: `from MODULE import A, B`
//! - the export list: `__all__ = ['A', 'B']`
//! - anything else, kept verbatim
//!
//! Import-like and export-like lines that the strict patterns reject are
//! classified as malformed so callers can keep them in place and warn.

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"));

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^from\s+([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s+import\s+([A-Za-z_][A-Za-z0-9_]*(?:\s*,\s*[A-Za-z_][A-Za-z0-9_]*)*)\s*$",
    )
    .expect("static pattern")
});

static EXPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__all__\s*=\s*\[(.*)\]\s*$").expect("static pattern"));

static EXPORT_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:'([A-Za-z_][A-Za-z0-9_]*)'|"([A-Za-z_][A-Za-z0-9_]*)")$"#)
        .expect("static pattern")
});

/// Shape of a single registry line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// The mandatory base import
    Base,
    /// A strict `from MODULE import ...` line
    Import {
        module: String,
        symbols: BTreeSet<String>,
    },
    /// A strict `__all__ = [...]` line
    Export { names: BTreeSet<String> },
    /// A `from ...` line the strict pattern rejects
    MalformedImport,
    /// An `__all__` line the strict pattern rejects
    MalformedExport,
    /// A plain `import x` statement
    PlainImport,
    /// Anything else
    Other,
}

impl LineKind {
    /// Whether the line is an import statement of any shape
    pub fn is_import_like(&self) -> bool {
        matches!(
            self,
            LineKind::Base
                | LineKind::Import { .. }
                | LineKind::MalformedImport
                | LineKind::PlainImport
        )
    }
}

/// Classify a registry line
pub fn classify(line: &str, base_import: &str) -> LineKind {
    let trimmed = line.trim_end();
    if trimmed == base_import.trim() {
        return LineKind::Base;
    }
    if trimmed.starts_with("from ") {
        return match parse_import(trimmed) {
            Some((module, symbols)) => LineKind::Import { module, symbols },
            None => LineKind::MalformedImport,
        };
    }
    if trimmed.starts_with("import ") {
        return LineKind::PlainImport;
    }
    if trimmed.starts_with("__all__") {
        return match parse_export(trimmed) {
            Some(names) => LineKind::Export { names },
            None => LineKind::MalformedExport,
        };
    }
    LineKind::Other
}

/// Check if a string is a valid identifier
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Check if a dotted module path can appear in a strict import line
pub fn is_module_path(module: &str) -> bool {
    module.split('.').all(is_identifier)
}

/// Parse a strict import line into its module and symbol set
pub fn parse_import(line: &str) -> Option<(String, BTreeSet<String>)> {
    let captures = IMPORT_LINE.captures(line)?;
    let module = captures.get(1)?.as_str().to_string();
    let symbols = captures
        .get(2)?
        .as_str()
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();
    Some((module, symbols))
}

/// Parse a strict export list into its names
///
/// Accepts single or double quoted identifiers and a trailing comma.
pub fn parse_export(line: &str) -> Option<BTreeSet<String>> {
    let captures = EXPORT_LINE.captures(line)?;
    let body = captures.get(1)?.as_str().trim();
    let body = body.strip_suffix(',').unwrap_or(body).trim();
    if body.is_empty() {
        return Some(BTreeSet::new());
    }

    body.split(',')
        .map(|item| {
            let item = EXPORT_ITEM.captures(item.trim())?;
            item.get(1)
                .or_else(|| item.get(2))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Render the canonical import line for a module
pub fn format_import(module: &str, symbols: &BTreeSet<String>) -> String {
    let list: Vec<&str> = symbols.iter().map(String::as_str).collect();
    format!("from {module} import {}", list.join(", "))
}

/// Render the canonical export list
pub fn format_export(names: &BTreeSet<String>) -> String {
    let items: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("__all__ = [{}]", items.join(", "))
}
