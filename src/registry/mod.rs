//! The registry (aggregator) file
//!
//! The registry re-exports every discovered model plus the base symbol:
//!
//! ```text
//! """Docstring and comments, kept verbatim."""
//!
//! from modules.users.models import Organization, User
//! from modules.widgets.models import Widget, WidgetLog
//! from app.extensions import db
//!
//! __all__ = ['Organization', 'User', 'Widget', 'WidgetLog', 'db']
//! ```
//!
//! [`RegistryDocument`] is the in-memory form. Loading, rewriting and saving
//! are separate steps so the rewrite itself stays a pure function.

pub mod aggregate;
pub mod grammar;
pub mod rewrite;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::common;
use crate::error::{self, Result};

pub use aggregate::{Aggregate, aggregate};
pub use grammar::LineKind;
pub use rewrite::{ParseWarning, Rewrite, rewrite};

/// Symbols imported per module, as found in the registry
pub type KnownImports = BTreeMap<String, BTreeSet<String>>;

/// A module path with the symbols it provides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSymbols {
    pub module: String,
    pub symbols: BTreeSet<String>,
}

impl ModuleSymbols {
    pub fn new(module: impl Into<String>, symbols: BTreeSet<String>) -> Self {
        Self {
            module: module.into(),
            symbols,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// The registry file as a sequence of lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistryDocument {
    lines: Vec<String>,
    line_ending: LineEnding,
}

impl RegistryDocument {
    /// Parse registry text
    pub fn parse(text: &str) -> Self {
        let line_ending = if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        Self {
            lines: text.lines().map(ToString::to_string).collect(),
            line_ending,
        }
    }

    pub fn from_lines(lines: Vec<String>, line_ending: LineEnding) -> Self {
        Self { lines, line_ending }
    }

    /// Load the registry file; a missing file is an empty document
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                path = %path.display(),
                "Registry file not found, starting from an empty document"
            );
            return Ok(Self::default());
        }

        let bytes = fs::read(path).map_err(|e| error::fs::read_failed(path, e))?;
        let text = String::from_utf8(bytes).map_err(|e| error::fs::read_failed(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "Loaded registry");
        Ok(Self::parse(&text))
    }

    /// Render the document, terminating every line
    pub fn render(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push_str(ending);
        }
        out
    }

    /// Atomically replace the file at `path` with the rendered document
    pub fn save(&self, path: &Path) -> Result<()> {
        common::fs::write_atomic(path, self.render().as_bytes())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Union of symbols per module over all strict import lines
    pub fn known_imports(&self, base_import: &str) -> KnownImports {
        let mut known = KnownImports::new();
        for line in &self.lines {
            if let LineKind::Import { module, symbols } = grammar::classify(line, base_import) {
                known.entry(module).or_default().extend(symbols);
            }
        }
        known
    }

    /// Union of names over all strict export lists
    pub fn exports(&self) -> BTreeSet<String> {
        let mut exports = BTreeSet::new();
        for line in &self.lines {
            if let Some(names) = grammar::parse_export(line.trim_end()) {
                exports.extend(names);
            }
        }
        exports
    }

    /// Find the module that provides an exported symbol
    ///
    /// Returns `None` when the symbol is not in the export list or no import
    /// line brings it in. With stale entries the first provider in line order wins.
    pub fn provider_of(&self, symbol: &str, base_import: &str) -> Option<String> {
        if !self.exports().contains(symbol) {
            return None;
        }
        self.lines
            .iter()
            .find_map(|line| match grammar::classify(line, base_import) {
                LineKind::Import { module, symbols } if symbols.contains(symbol) => Some(module),
                LineKind::Base => grammar::parse_import(base_import.trim())
                    .filter(|(_, symbols)| symbols.contains(symbol))
                    .map(|(module, _)| module),
                _ => None,
            })
    }
}
