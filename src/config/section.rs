//! Configuration section definitions.
//!
//! | Struct          | TOML Section | Purpose                                  |
//! |-----------------|--------------|------------------------------------------|
//! | `AssetsSection` | `[assets]`   | Assets root and registry file            |
//! | `WebSection`    | `[web]`      | Web prefix the host serves assets under  |
//! | `InjectSection` | `[inject]`   | Views that never receive assets          |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::inject::{DEFAULT_SKIP, DEFAULT_WEB_PREFIX, ViewKind};

/// `[assets]` section.
///
/// ```toml
/// [assets]
/// root = "user_files/assets"          # contains css/ and js/
/// registry = "user_files/assets.json" # persisted enable/disable map
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsSection {
    /// Directory with one subdirectory per category (relative to config dir).
    pub root: PathBuf,
    /// Registry JSON file (relative to config dir).
    pub registry: PathBuf,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("user_files/assets"),
            registry: PathBuf::from("user_files/assets.json"),
        }
    }
}

/// `[web]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSection {
    /// URL prefix under which the host serves the assets root.
    pub prefix: String,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_WEB_PREFIX.to_string(),
        }
    }
}

/// `[inject]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectSection {
    /// Views that never get assets injected.
    pub skip: Vec<ViewKind>,
}

impl Default for InjectSection {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::inject::ViewKind;
    use std::path::PathBuf;

    #[test]
    fn test_assets_section() {
        let config = test_parse_config("[assets]\nroot = \"css-lib\"\nregistry = \"state.json\"");
        assert_eq!(config.assets.root, PathBuf::from("css-lib"));
        assert_eq!(config.assets.registry, PathBuf::from("state.json"));
    }

    #[test]
    fn test_inject_section_kebab_case() {
        let config = test_parse_config("[inject]\nskip = [\"editor\", \"card-layout\"]");
        assert_eq!(config.inject.skip, vec![ViewKind::Editor, ViewKind::CardLayout]);
    }

    #[test]
    fn test_section_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.assets.root, PathBuf::from("user_files/assets"));
        assert_eq!(config.web.prefix, crate::inject::DEFAULT_WEB_PREFIX);
        assert_eq!(
            config.inject.skip,
            vec![ViewKind::Browser, ViewKind::Editor, ViewKind::Other]
        );
    }
}
