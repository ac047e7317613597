//! Shared terminal output for commands

use console::Style;

use crate::operations::SyncSummary;
use crate::project::Project;
use crate::registry::rewrite::ParseWarningKind;

/// Print what a sync did
pub fn print_sync_summary(project: &Project, summary: &SyncSummary) {
    let warn = Style::new().yellow();
    let path = project.relative(&project.registry_path());

    if summary.store_degraded {
        println!(
            "{} enablement store unavailable ({}), only always-on packages were scanned",
            warn.apply_to("warning:"),
            project.relative(project.store().path())
        );
    }
    for warning in &summary.scan_warnings {
        println!(
            "{} skipped {}: {}",
            warn.apply_to("warning:"),
            project.relative(&warning.path),
            warning.reason
        );
    }
    for warning in &summary.parse_warnings {
        let kind = match warning.kind {
            ParseWarningKind::Import => "import",
            ParseWarningKind::Export => "export list",
        };
        println!(
            "{} {path}:{}: unrecognized {kind} line kept as is: {}",
            warn.apply_to("warning:"),
            warning.line,
            warning.text.trim()
        );
    }

    println!("Scanned {} enabled package(s)", summary.packages.len());
    if !summary.changed {
        println!("Registry is up to date ({path})");
        return;
    }

    for module in &summary.added {
        let symbols: Vec<&str> = module.symbols.iter().map(String::as_str).collect();
        println!(
            "  {} {} {}",
            Style::new().green().apply_to("+"),
            Style::new().bold().apply_to(&module.module),
            Style::new().dim().apply_to(symbols.join(", "))
        );
    }

    let verb = if summary.written { "Updated" } else { "Would update" };
    println!(
        "{verb} {path}: {} module(s), {} symbol(s) added, {} exported",
        summary.added.len(),
        summary.added_symbols(),
        summary.exports
    );
}
