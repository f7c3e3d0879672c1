//! Asset category definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of user asset.
///
/// The set is closed: every category owns one directory under the assets
/// root and one file extension, and the persisted registry carries exactly
/// one key per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    /// Stylesheets in `css/`.
    #[serde(rename = "css")]
    Stylesheet,
    /// Scripts in `js/`.
    #[serde(rename = "js")]
    Script,
}

impl AssetCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 2] = [Self::Stylesheet, Self::Script];

    /// Key used in the persisted registry.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Stylesheet => "css",
            Self::Script => "js",
        }
    }

    /// Directory name under the assets root (also the web path segment).
    pub const fn dir_name(self) -> &'static str {
        self.key()
    }

    /// File extension without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Stylesheet => "css",
            Self::Script => "js",
        }
    }

    /// Heading used when listing assets.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stylesheet => "Stylesheets",
            Self::Script => "Scripts",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
#[error("unknown asset category `{0}` (expected css, stylesheet, js or script)")]
pub struct UnknownCategory(String);

impl FromStr for AssetCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" | "stylesheet" | "stylesheets" => Ok(Self::Stylesheet),
            "js" | "script" | "scripts" | "javascript" => Ok(Self::Script),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
