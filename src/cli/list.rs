//! List command - show every asset grouped by category.

use anyhow::Result;
use owo_colors::{Stream, Style};
use std::fmt::Write as _;

use crate::asset::AssetCategory;
use crate::config::AppConfig;
use crate::logger::paint;
use crate::registry::Registry;

use super::sync::open_library;

/// Run the list command
pub fn run_list(config: &AppConfig, only: Option<AssetCategory>) -> Result<()> {
    let library = open_library(config)?;

    let categories: Vec<AssetCategory> = match only {
        Some(category) => vec![category],
        None => AssetCategory::ALL.to_vec(),
    };

    print!("{}", render_list(library.registry(), &categories));
    Ok(())
}

/// Render the grouped listing.
///
/// ```text
/// Stylesheets:
///   ✓ base.css
///   ✗ nested/cloze.css
/// Scripts:
///   (none)
/// ```
fn render_list(registry: &Registry, categories: &[AssetCategory]) -> String {
    let bold = Style::new().bold();
    let dim = Style::new().dimmed();
    let mut out = String::new();

    for &category in categories {
        let _ = writeln!(out, "{}:", paint(category.label(), bold, Stream::Stdout));

        let entries = registry.entries(category);
        if entries.is_empty() {
            let _ = writeln!(out, "  {}", paint("(none)", dim, Stream::Stdout));
            continue;
        }

        for (path, &enabled) in entries {
            if enabled {
                let mark = paint("✓", Style::new().green(), Stream::Stdout);
                let _ = writeln!(out, "  {mark} {path}");
            } else {
                let mark = paint("✗", Style::new().red(), Stream::Stdout);
                let _ = writeln!(out, "  {mark} {}", paint(path, dim, Stream::Stdout));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetScan;

    #[test]
    fn test_render_list_groups_and_orders() {
        let scan = AssetScan::default().with(AssetCategory::Stylesheet, &["b.css", "a.css"]);
        let mut registry = Registry::from_scan(&scan);
        registry.toggle(AssetCategory::Stylesheet, "b.css").unwrap();

        let out = render_list(&registry, &AssetCategory::ALL);

        let styles = out.find("Stylesheets").unwrap();
        let a = out.find("a.css").unwrap();
        let b = out.find("b.css").unwrap();
        let scripts = out.find("Scripts").unwrap();
        assert!(styles < a && a < b && b < scripts);
        assert!(out.contains("(none)"));
    }

    #[test]
    fn test_render_single_category() {
        let registry = Registry::new();
        let out = render_list(&registry, &[AssetCategory::Script]);
        assert!(out.contains("Scripts"));
        assert!(!out.contains("Stylesheets"));
    }
}
