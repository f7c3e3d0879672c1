//! Sync command, plus the library opening shared by every command.

use anyhow::{Context, Result};

use crate::asset::AssetCategory;
use crate::config::AppConfig;
use crate::library::{AssetLibrary, LoadOutcome};
use crate::registry::ReconcileReport;
use crate::utils::plural::plural_count;
use crate::{debug, log, logger};

/// Open the library for `config`, reporting how the registry was obtained.
///
/// Opening always reconciles with disk and rewrites the registry file.
pub fn open_library(config: &AppConfig) -> Result<AssetLibrary> {
    let layout = config.layout();
    let (library, outcome) = AssetLibrary::open(layout)
        .with_context(|| format!("Failed to open registry '{}'", config.assets.registry.display()))?;

    match &outcome {
        LoadOutcome::Fresh => {
            log!(
                "sync";
                "created registry with {} at {}",
                plural_count(library.registry().len(), "asset"),
                library.registry_path().display()
            );
        }
        LoadOutcome::Loaded(report) => report_changes(report),
        LoadOutcome::Recovered { backup, reason } => {
            logger::notice(
                "registry could not be read and was rebuilt; all assets are enabled again",
                &format!(
                    "reason: {reason}\nprevious file kept at {}\nreview your choices with `cardassets list`",
                    backup.display()
                ),
            );
        }
    }

    Ok(library)
}

/// Log what a reconciliation changed.
fn report_changes(report: &ReconcileReport) {
    if report.is_empty() {
        debug!("sync"; "registry is up to date");
        return;
    }

    for (category, path) in &report.added {
        debug!("sync"; "+ {}/{}", category, path);
    }
    for (category, path) in &report.removed {
        debug!("sync"; "- {}/{}", category, path);
    }

    log!(
        "sync";
        "{} added, {} removed",
        plural_count(report.added.len(), "asset"),
        plural_count(report.removed.len(), "asset")
    );
}

/// Run the sync command
pub fn run_sync(config: &AppConfig) -> Result<()> {
    let library = open_library(config)?;

    let summary: Vec<String> = AssetCategory::ALL
        .iter()
        .map(|&category| {
            let total = library.entries(category).len();
            let enabled = library.enabled(category).count();
            format!("{category} {enabled}/{total} enabled")
        })
        .collect();

    log!("sync"; "{}", summary.join(", "));
    Ok(())
}
