//! Declared symbol extraction
//!
//! A declared symbol is a `class NAME` statement starting at column 0. The
//! match is purely textual: indented classes, commented-out lines and text
//! inside triple-quoted strings never count.

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static CLASS_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^class\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\(.*\))?\s*:").expect("static pattern")
});

const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// Extract the names of top-level classes declared in `source`
pub fn extract_symbols(source: &str) -> BTreeSet<String> {
    let mut symbols = BTreeSet::new();
    let mut open_string: Option<&'static str> = None;

    for line in source.lines() {
        if open_string.is_none() {
            if let Some(captures) = CLASS_DECLARATION.captures(line) {
                symbols.insert(captures[1].to_string());
            }
        }
        open_string = track_triple_quotes(line, open_string);
    }

    symbols
}

/// Follow triple-quoted strings across a line
///
/// Returns the delimiter of the string still open at the end of the line.
fn track_triple_quotes(line: &str, mut open: Option<&'static str>) -> Option<&'static str> {
    let mut rest = line;
    loop {
        match open {
            Some(delimiter) => match rest.find(delimiter) {
                Some(end) => {
                    rest = &rest[end + delimiter.len()..];
                    open = None;
                }
                None => return open,
            },
            None => {
                // Anything after a comment marker is not code
                let code = rest.find('#').map_or(rest, |i| &rest[..i]);
                let next = TRIPLE_QUOTES
                    .iter()
                    .filter_map(|d| code.find(d).map(|i| (i, *d)))
                    .min_by_key(|(i, _)| *i);
                match next {
                    Some((start, delimiter)) => {
                        rest = &rest[start + delimiter.len()..];
                        open = Some(delimiter);
                    }
                    None => return None,
                }
            }
        }
    }
}
