//! Configuration management for `cardassets.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error    # ConfigError
//! ├── section  # [assets], [web], [inject]
//! ├── util     # upward config file search
//! └── mod.rs   # AppConfig (this file)
//! ```
//!
//! Paths in the file are relative to the directory holding it. Without a
//! config file the defaults apply, rooted at the current directory.

mod error;
mod section;
mod util;

pub use error::ConfigError;
pub use section::{AssetsSection, InjectSection, WebSection};

use util::find_config_file;

use crate::cli::Cli;
use crate::inject::{InjectPolicy, WebExports};
use crate::library::AssetLayout;
use crate::utils::path::{normalize_path, resolve_under};
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the current directory.
pub const CONFIG_FILE: &str = "cardassets.toml";

/// Commented default config written by `cardassets init`.
pub const CONFIG_TEMPLATE: &str = r#"# cardassets configuration.
# Paths are relative to the directory containing this file.

[assets]
# Directory with one subdirectory per category: css/ and js/
root = "user_files/assets"
# Enable/disable state of every asset (rewritten on every change)
registry = "user_files/assets.json"

[web]
# URL prefix under which the host serves the assets root
prefix = "/_addons/cardassets/user_files/assets"

[inject]
# Views that never get assets: reviewer, previewer, card-layout, browser, editor, other
skip = ["browser", "editor", "other"]
"#;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cardassets.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Asset locations
    #[serde(default)]
    pub assets: AssetsSection,

    /// Web exports
    #[serde(default)]
    pub web: WebSection,

    /// Injection policy
    #[serde(default)]
    pub inject: InjectSection,
}

impl AppConfig {
    /// Load configuration for the given CLI invocation.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let (config_path, exists) = Self::resolve_config_path(cli, &cwd)?;

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);

        config.config_path = normalize_path(&config_path);
        config.finalize(cli, &root);
        config.validate()?;

        Ok(config)
    }

    /// Resolve config file path and whether it exists.
    fn resolve_config_path(cli: &Cli, cwd: &Path) -> Result<(PathBuf, bool)> {
        match &cli.config {
            Some(path) => {
                let path = cwd.join(path);
                let exists = path.is_file();
                if !exists && !cli.is_init() {
                    bail!(ConfigError::NotFound(path));
                }
                Ok((path, exists))
            }
            None if cli.is_init() => {
                let path = cwd.join(CONFIG_FILE);
                let exists = path.is_file();
                Ok((path, exists))
            }
            None => match find_config_file(Path::new(CONFIG_FILE), cwd) {
                Some(path) => Ok((path, true)),
                None => {
                    debug!("config"; "no {} found, using defaults in {}", CONFIG_FILE, cwd.display());
                    Ok((cwd.join(CONFIG_FILE), false))
                }
            },
        }
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "ignoring unknown fields in {}: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Apply CLI overrides and resolve every path against `root`.
    fn finalize(&mut self, cli: &Cli, root: &Path) {
        let root = normalize_path(root);

        Self::update_option(&mut self.assets.root, cli.root.as_ref());
        Self::update_option(&mut self.assets.registry, cli.registry.as_ref());

        self.assets.root = resolve_under(&self.assets.root, &root);
        self.assets.registry = resolve_under(&self.assets.registry, &root);
        self.root = root;
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate the resolved configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let prefix = &self.web.prefix;
        if !(prefix.starts_with('/')
            || prefix.starts_with("http://")
            || prefix.starts_with("https://"))
        {
            errors.push(format!(
                "[web.prefix] `{prefix}` must start with `/` or an http(s) scheme"
            ));
        }

        if self.assets.registry.is_dir() {
            errors.push(format!(
                "[assets.registry] `{}` is a directory, expected a JSON file path",
                self.assets.registry.display()
            ));
        }

        if self.assets.root.is_file() {
            errors.push(format!(
                "[assets.root] `{}` is a file, expected a directory",
                self.assets.root.display()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Asset and registry locations.
    pub fn layout(&self) -> AssetLayout {
        AssetLayout::new(&self.assets.root, &self.assets.registry)
    }

    pub fn exports(&self) -> WebExports {
        WebExports::new(&self.web.prefix)
    }

    pub fn policy(&self) -> InjectPolicy {
        InjectPolicy::new(self.inject.skip.clone())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking if there are unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
