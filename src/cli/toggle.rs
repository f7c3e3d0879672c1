//! Toggle, enable and disable commands.

use anyhow::Result;

use crate::config::AppConfig;
use crate::log;

use super::AssetTarget;
use super::sync::open_library;

/// Run the toggle command
pub fn run_toggle(config: &AppConfig, target: &AssetTarget) -> Result<()> {
    let mut library = open_library(config)?;
    let enabled = library.toggle(target.category, &target.path)?;

    log!("toggle"; "{}/{} is now {}", target.category, target.path, state_word(enabled));
    Ok(())
}

/// Run the enable/disable commands
pub fn run_set(config: &AppConfig, target: &AssetTarget, enabled: bool) -> Result<()> {
    let mut library = open_library(config)?;
    let changed = library.set_enabled(target.category, &target.path, enabled)?;

    if changed {
        log!("toggle"; "{}/{} is now {}", target.category, target.path, state_word(enabled));
    } else {
        log!("toggle"; "{}/{} was already {}", target.category, target.path, state_word(enabled));
    }
    Ok(())
}

const fn state_word(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}
