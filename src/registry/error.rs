//! Registry error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::asset::AssetCategory;

/// Registry-related errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to serialize registry")]
    Json(#[from] serde_json::Error),

    /// Toggling a path the registry does not know is a caller bug.
    #[error("unknown {category} asset `{path}` (run `cardassets sync` after adding files)")]
    UnknownAsset {
        category: AssetCategory,
        path: String,
    },
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(path.into(), err)
    }
}
