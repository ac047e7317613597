//! String helpers for package names.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

static CAMEL_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]*(?:[A-Z][a-z]*)*$").expect("static pattern")
});

/// Check if a package name is CamelCase (e.g. `Widget`, `InventoryItem`)
pub fn is_camel_case(name: &str) -> bool {
    CAMEL_CASE.is_match(name)
}

/// Convert a CamelCase name to snake_case
///
/// # Examples
/// ```ignore
/// assert_eq!(to_snake_case("InventoryItem"), "inventory_item");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
