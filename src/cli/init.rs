//! Init command - write a default config and the asset directory layout.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::asset::AssetCategory;
use crate::config::{AppConfig, CONFIG_TEMPLATE};
use crate::log;

use super::sync::open_library;

/// Run the init command
///
/// # Steps
/// 1. Refuse to overwrite an existing config unless `force`
/// 2. Write the config template
/// 3. Create one directory per category
/// 4. Build the registry
pub fn run_init(config: &AppConfig, force: bool) -> Result<()> {
    let config_path = &config.config_path;
    if config_path.exists() && !force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    fs::write(config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write '{}'", config_path.display()))?;

    create_structure(&config.assets.root)?;
    open_library(config)?;

    log!("init"; "initialized in {}", config.get_root().display());
    Ok(())
}

/// Create the assets root and one subdirectory per category.
fn create_structure(root: &Path) -> Result<()> {
    for category in AssetCategory::ALL {
        let path = root.join(category.dir_name());
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }
    Ok(())
}
