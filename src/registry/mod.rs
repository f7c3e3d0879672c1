//! The enable/disable registry and its persistence.
//!
//! # Module Structure
//!
//! ```text
//! registry/
//! ├── error      # RegistryError
//! ├── reconcile  # merge a registry with a disk scan
//! ├── store      # JSON load/save, `.bak` on corruption
//! └── mod.rs     # Registry (this file)
//! ```
//!
//! # Persisted format
//!
//! ```json
//! {
//!     "css": {
//!         "base.css": true,
//!         "nested/cloze.css": false
//!     },
//!     "js": {
//!         "mathjax.js": true
//!     }
//! }
//! ```

mod error;
mod reconcile;
mod store;

pub use error::RegistryError;
pub use reconcile::{ReconcileReport, reconcile};
pub use store::{BACKUP_SUFFIX, Loaded, RegistryStore};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::asset::{AssetCategory, AssetScan};

/// Relative path -> enabled flag, sorted by path.
pub type AssetMap = BTreeMap<String, bool>;

/// Enabled/disabled state of every known asset.
///
/// One map per [`AssetCategory`]. Both keys are required when
/// deserializing, so a persisted file missing a category is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "css")]
    stylesheets: AssetMap,
    #[serde(rename = "js")]
    scripts: AssetMap,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for a first run: every scanned file, all enabled.
    pub fn from_scan(scan: &AssetScan) -> Self {
        let mut registry = Self::new();
        for category in AssetCategory::ALL {
            let map = registry.map_mut(category);
            for file in scan.files(category) {
                map.insert(file.clone(), true);
            }
        }
        registry
    }

    /// Entries of one category, sorted by path.
    pub fn entries(&self, category: AssetCategory) -> &AssetMap {
        match category {
            AssetCategory::Stylesheet => &self.stylesheets,
            AssetCategory::Script => &self.scripts,
        }
    }

    pub(crate) fn map_mut(&mut self, category: AssetCategory) -> &mut AssetMap {
        match category {
            AssetCategory::Stylesheet => &mut self.stylesheets,
            AssetCategory::Script => &mut self.scripts,
        }
    }

    /// State of one asset, `None` if unknown.
    pub fn get(&self, category: AssetCategory, path: &str) -> Option<bool> {
        self.entries(category).get(path).copied()
    }

    /// Enabled asset paths of one category, sorted.
    pub fn enabled(&self, category: AssetCategory) -> impl Iterator<Item = &str> {
        self.entries(category)
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(path, _)| path.as_str())
    }

    /// Flip one asset and return its new state.
    pub fn toggle(&mut self, category: AssetCategory, path: &str) -> Result<bool, RegistryError> {
        let flag = self.flag_mut(category, path)?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// Set one asset to `enabled`. Returns whether the flag changed.
    pub fn set_enabled(
        &mut self,
        category: AssetCategory,
        path: &str,
        enabled: bool,
    ) -> Result<bool, RegistryError> {
        let flag = self.flag_mut(category, path)?;
        let changed = *flag != enabled;
        *flag = enabled;
        Ok(changed)
    }

    fn flag_mut(&mut self, category: AssetCategory, path: &str) -> Result<&mut bool, RegistryError> {
        self.map_mut(category)
            .get_mut(path)
            .ok_or_else(|| RegistryError::UnknownAsset {
                category,
                path: path.to_string(),
            })
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.stylesheets.len() + self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
