//! Registry rewriting
//!
//! [`rewrite`] is a pure transform from the current registry lines and the
//! desired [`Aggregate`] to the new lines. It only ever adds symbols:
//! - the base import is present exactly once
//! - each desired module has at most one import line, replaced in place when
//!   its symbol set grows and inserted before the base import when new
//! - the export list is the sorted union of everything imported and
//!   everything it listed before
//!
//! Lines the strict grammar rejects are left where they are and reported.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::grammar::{self, LineKind};
use super::{Aggregate, ModuleSymbols, RegistryDocument};

/// Which shape a rejected line looked like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseWarningKind {
    Import,
    Export,
}

/// A registry line kept verbatim because the strict grammar rejected it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the original document
    pub line: usize,
    pub text: String,
    pub kind: ParseWarningKind,
}

/// Result of a rewrite
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub document: RegistryDocument,
    /// Symbols newly imported, per module, in insertion order
    pub added: Vec<ModuleSymbols>,
    pub warnings: Vec<ParseWarning>,
    /// Whether the lines differ from the input
    pub changed: bool,
}

/// Rewrite the registry so it imports and exports the aggregate
pub fn rewrite(
    document: &RegistryDocument,
    base_import: &str,
    base_symbol: &str,
    aggregate: &Aggregate,
) -> Rewrite {
    let base_line = base_import.trim().to_string();
    let warnings = collect_warnings(document.lines(), &base_line);

    let mut lines = document.lines().to_vec();
    ensure_base_import(&mut lines, &base_line);
    collapse_duplicate_imports(&mut lines, &base_line);
    let added = merge_modules(&mut lines, &base_line, &aggregate.modules);
    write_export_list(&mut lines, &base_line, base_symbol, &aggregate.exports);

    let changed = lines != document.lines();
    Rewrite {
        document: RegistryDocument::from_lines(lines, document.line_ending()),
        added,
        warnings,
        changed,
    }
}

fn collect_warnings(lines: &[String], base_line: &str) -> Vec<ParseWarning> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, text)| {
            let kind = match grammar::classify(text, base_line) {
                LineKind::MalformedImport => ParseWarningKind::Import,
                LineKind::MalformedExport => ParseWarningKind::Export,
                _ => return None,
            };
            warn!(
                line = i + 1,
                text = %text,
                "Registry line does not match the expected shape, keeping it verbatim"
            );
            Some(ParseWarning {
                line: i + 1,
                text: text.clone(),
                kind,
            })
        })
        .collect()
}

/// Insert the base import after the last import-like line, or after the
/// leading docstring/comment block when there are no imports.
fn ensure_base_import(lines: &mut Vec<String>, base_line: &str) {
    let kinds: Vec<LineKind> = lines
        .iter()
        .map(|l| grammar::classify(l, base_line))
        .collect();
    if kinds.contains(&LineKind::Base) {
        return;
    }

    let index = kinds
        .iter()
        .rposition(LineKind::is_import_like)
        .map_or_else(|| preamble_end(lines), |i| statement_end(lines, i) + 1);
    debug!(index, "Inserting base import");
    lines.insert(index, base_line.to_string());
}

/// Index of the last physical line of the statement starting at `start`
///
/// Follows open parentheses and trailing backslashes so nothing is ever
/// inserted inside a multi-line import.
fn statement_end(lines: &[String], start: usize) -> usize {
    let mut depth: i64 = 0;
    let mut end = start;
    for (i, line) in lines.iter().enumerate().skip(start) {
        end = i;
        let code = line.split('#').next().unwrap_or_default();
        for c in code.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        if depth <= 0 && !code.trim_end().ends_with('\\') {
            break;
        }
    }
    end
}

/// Index of the first line after the leading docstring and comments
fn preamble_end(lines: &[String]) -> usize {
    let mut i = 0;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            i += 1;
            continue;
        }

        let Some(delimiter) = ["\"\"\"", "'''"]
            .into_iter()
            .find(|d| trimmed.starts_with(d))
        else {
            break;
        };

        if trimmed.len() >= 6 && trimmed[3..].contains(delimiter) {
            i += 1;
            continue;
        }
        match lines[i + 1..].iter().position(|l| l.contains(delimiter)) {
            Some(offset) => i += offset + 2,
            // Unterminated docstring: leave the text alone and insert at the end
            None => return lines.len(),
        }
    }
    i
}

/// Merge repeated strict import lines for a module into the first one
fn collapse_duplicate_imports(lines: &mut Vec<String>, base_line: &str) {
    let mut union: HashMap<String, BTreeSet<String>> = HashMap::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for line in lines.iter() {
        if let LineKind::Import { module, symbols } = grammar::classify(line, base_line) {
            *counts.entry(module.clone()).or_default() += 1;
            union.entry(module).or_default().extend(symbols);
        }
    }
    if counts.values().all(|&c| c == 1) {
        return;
    }

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut collapsed = Vec::with_capacity(lines.len());
    for line in lines.drain(..) {
        match grammar::classify(&line, base_line) {
            LineKind::Import { module, .. } if counts[&module] > 1 => {
                if seen.insert(module.clone()) {
                    debug!(module = %module, "Collapsing duplicate import lines");
                    collapsed.push(grammar::format_import(&module, &union[&module]));
                }
            }
            _ => collapsed.push(line),
        }
    }
    *lines = collapsed;
}

fn import_index(lines: &[String], base_line: &str, wanted: &str) -> Option<usize> {
    lines.iter().position(|line| {
        matches!(
            grammar::classify(line, base_line),
            LineKind::Import { module, .. } if module == wanted
        )
    })
}

fn base_index(lines: &[String], base_line: &str) -> usize {
    lines
        .iter()
        .position(|line| grammar::classify(line, base_line) == LineKind::Base)
        .unwrap_or(lines.len())
}

/// Replace or insert one import line per module whose symbol set grows
fn merge_modules(
    lines: &mut Vec<String>,
    base_line: &str,
    modules: &[ModuleSymbols],
) -> Vec<ModuleSymbols> {
    let mut added = Vec::new();

    for desired in modules {
        let index = import_index(lines, base_line, &desired.module);
        let existing = index
            .and_then(|i| grammar::parse_import(lines[i].trim_end()))
            .map(|(_, symbols)| symbols)
            .unwrap_or_default();

        let new: BTreeSet<String> = desired.symbols.difference(&existing).cloned().collect();
        if new.is_empty() {
            continue;
        }

        let merged: BTreeSet<String> = existing.union(&desired.symbols).cloned().collect();
        let line = grammar::format_import(&desired.module, &merged);
        match index {
            Some(i) => {
                debug!(module = %desired.module, "Extending import line");
                lines[i] = line;
            }
            None => {
                debug!(module = %desired.module, "Adding import line");
                let at = base_index(lines, base_line);
                lines.insert(at, line);
            }
        }
        added.push(ModuleSymbols::new(desired.module.clone(), new));
    }

    added
}

/// Replace the first strict export list with the canonical one, or append it
fn write_export_list(
    lines: &mut Vec<String>,
    base_line: &str,
    base_symbol: &str,
    desired: &BTreeSet<String>,
) {
    let mut names: BTreeSet<String> = desired.clone();
    names.insert(base_symbol.to_string());
    let mut export_indices = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        match grammar::classify(line, base_line) {
            LineKind::Import { symbols, .. } => names.extend(symbols),
            LineKind::Export { names: listed } => {
                names.extend(listed);
                export_indices.push(i);
            }
            _ => {}
        }
    }

    let canonical = grammar::format_export(&names);
    match export_indices.split_first() {
        Some((&first, rest)) => {
            lines[first] = canonical;
            for &i in rest.iter().rev() {
                lines.remove(i);
            }
        }
        None => {
            if lines.last().is_some_and(|l| !l.trim().is_empty()) {
                lines.push(String::new());
            }
            lines.push(canonical);
        }
    }
}
