//! Symbol aggregation
//!
//! Folds scanned modules into the desired registry surface: the full symbol
//! set per module, the export list, and the delta against what the registry
//! already imports.

use std::collections::BTreeSet;

use tracing::warn;

use super::{KnownImports, ModuleSymbols, grammar};

/// Desired registry surface for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Existing ∪ discovered symbols per module, in scan order
    pub modules: Vec<ModuleSymbols>,
    /// Base symbol ∪ every symbol of every known or discovered module
    pub exports: BTreeSet<String>,
    /// Symbols per module not yet imported by the registry
    pub delta: Vec<ModuleSymbols>,
}

impl Aggregate {
    /// Whether the registry already imports everything that was discovered
    pub fn is_up_to_date(&self) -> bool {
        self.delta.is_empty()
    }
}

/// Aggregate scanned modules against the registry's known imports
///
/// Modules keep the order they were scanned in; a module yielded twice is
/// merged into its first slot. Nothing is ever removed from `known`.
/// Modules whose path cannot be written as an import line are dropped.
pub fn aggregate<I>(scanned: I, known: &KnownImports, base_symbol: &str) -> Aggregate
where
    I: IntoIterator<Item = ModuleSymbols>,
{
    let mut modules: Vec<ModuleSymbols> = Vec::new();
    for item in scanned {
        if !grammar::is_module_path(&item.module) {
            warn!(module = %item.module, "Module path is not importable, skipping");
            continue;
        }
        if let Some(existing) = modules.iter_mut().find(|m| m.module == item.module) {
            existing.symbols.extend(item.symbols);
        } else {
            modules.push(item);
        }
    }

    let mut delta = Vec::new();
    for entry in &mut modules {
        let already = known.get(&entry.module);
        let new: BTreeSet<String> = entry
            .symbols
            .iter()
            .filter(|s| already.is_none_or(|k| !k.contains(*s)))
            .cloned()
            .collect();
        if let Some(already) = already {
            entry.symbols.extend(already.iter().cloned());
        }
        if !new.is_empty() {
            delta.push(ModuleSymbols::new(entry.module.clone(), new));
        }
    }

    let mut exports = BTreeSet::from([base_symbol.to_string()]);
    for entry in &modules {
        exports.extend(entry.symbols.iter().cloned());
    }
    for symbols in known.values() {
        exports.extend(symbols.iter().cloned());
    }

    Aggregate {
        modules,
        exports,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn scanned(module: &str, symbols: &[&str]) -> ModuleSymbols {
        ModuleSymbols::new(module, set(symbols))
    }

    #[test]
    fn test_new_module_is_all_delta() {
        let result = aggregate(
            vec![scanned("modules.widgets.models", &["Widget", "WidgetLog"])],
            &KnownImports::new(),
            "db",
        );
        assert_eq!(
            result.delta,
            vec![scanned("modules.widgets.models", &["Widget", "WidgetLog"])]
        );
        assert_eq!(result.exports, set(&["Widget", "WidgetLog", "db"]));
    }

    #[test]
    fn test_known_symbols_are_not_delta() {
        let known = KnownImports::from([(
            "modules.widgets.models".to_string(),
            set(&["Widget", "WidgetLog"]),
        )]);
        let result = aggregate(
            vec![scanned("modules.widgets.models", &["Widget", "WidgetLog"])],
            &known,
            "db",
        );
        assert!(result.is_up_to_date());
    }

    #[test]
    fn test_desired_set_includes_known_symbols() {
        // WidgetArchive was removed from models.py but stays registered
        let known = KnownImports::from([(
            "modules.widgets.models".to_string(),
            set(&["Widget", "WidgetArchive"]),
        )]);
        let result = aggregate(
            vec![scanned("modules.widgets.models", &["Widget", "WidgetLog"])],
            &known,
            "db",
        );
        assert_eq!(
            result.modules,
            vec![scanned(
                "modules.widgets.models",
                &["Widget", "WidgetArchive", "WidgetLog"]
            )]
        );
        assert_eq!(
            result.delta,
            vec![scanned("modules.widgets.models", &["WidgetLog"])]
        );
    }

    #[test]
    fn test_exports_keep_modules_that_were_not_scanned() {
        let known = KnownImports::from([("modules.users.models".to_string(), set(&["User"]))]);
        let result = aggregate(vec![scanned("modules.gadgets.models", &["Gadget"])], &known, "db");
        assert_eq!(result.exports, set(&["Gadget", "User", "db"]));
    }

    #[test]
    fn test_repeated_module_merges_into_first_slot() {
        let result = aggregate(
            vec![
                scanned("b.models", &["B"]),
                scanned("a.models", &["A"]),
                scanned("b.models", &["C"]),
            ],
            &KnownImports::new(),
            "db",
        );
        let order: Vec<&str> = result.modules.iter().map(|m| m.module.as_str()).collect();
        assert_eq!(order, vec!["b.models", "a.models"]);
        assert_eq!(result.modules[0].symbols, set(&["B", "C"]));
    }

    #[test]
    fn test_renamed_module_keeps_both_paths() {
        let known = KnownImports::from([("modules.widget.models".to_string(), set(&["Widget"]))]);
        let result = aggregate(vec![scanned("modules.widgets.models", &["Widget"])], &known, "db");
        assert_eq!(
            result.delta,
            vec![scanned("modules.widgets.models", &["Widget"])]
        );
        assert_eq!(result.exports, set(&["Widget", "db"]));
    }

    #[test]
    fn test_unimportable_module_is_dropped() {
        let result = aggregate(
            vec![
                scanned("modules.my-widgets.models", &["Widget"]),
                scanned("modules.gadgets.models", &["Gadget"]),
            ],
            &KnownImports::new(),
            "db",
        );
        assert_eq!(result.delta, vec![scanned("modules.gadgets.models", &["Gadget"])]);
        assert_eq!(result.exports, set(&["Gadget", "db"]));
    }
}
