//! Content injection: enabled assets -> URLs the host appends to a view.
//!
//! The host exposes the assets directory under a web prefix and calls
//! [`inject`] right before rendering a card-related view. The handler gets
//! the registry as an argument; it keeps no state of its own.
//!
//! ```text
//! assets/css/nested/cloze.css
//!   -> /_addons/cardassets/user_files/assets/css/nested/cloze.css
//! ```

use std::fmt::Write as _;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::asset::AssetCategory;
use crate::registry::Registry;
use crate::utils::html::escape_attr;

/// Default web prefix the host serves the assets directory under.
pub const DEFAULT_WEB_PREFIX: &str = "/_addons/cardassets/user_files/assets";

/// Unreserved URL characters stay readable (`base.css`, `my-theme_v2.css`).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Views that get no assets unless configured otherwise.
///
/// Only card renderings (review, preview, card layout) are styled.
pub const DEFAULT_SKIP: [ViewKind; 3] = [ViewKind::Browser, ViewKind::Editor, ViewKind::Other];

/// Host view about to be rendered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    /// Card review screen.
    Reviewer,
    /// Card preview window.
    Previewer,
    /// Card template editor.
    CardLayout,
    /// Card browser.
    Browser,
    /// Note editor.
    Editor,
    /// Anything else the host renders.
    Other,
}

/// Which views receive assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectPolicy {
    skip: Vec<ViewKind>,
}

impl InjectPolicy {
    pub fn new(skip: Vec<ViewKind>) -> Self {
        Self { skip }
    }

    pub fn allows(&self, view: ViewKind) -> bool {
        !self.skip.contains(&view)
    }
}

impl Default for InjectPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP.to_vec())
    }
}

/// Web-accessible location of the assets directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebExports {
    prefix: String,
}

impl WebExports {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// URL of one asset, each path segment percent-encoded.
    pub fn url_for(&self, category: AssetCategory, path: &str) -> String {
        let mut url = format!("{}/{}", self.prefix, category.dir_name());
        for segment in path.split('/') {
            url.push('/');
            url.extend(utf8_percent_encode(segment, SEGMENT));
        }
        url
    }
}

impl Default for WebExports {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_PREFIX)
    }
}

/// Stylesheet and script URLs the host will load for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebContent {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl WebContent {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_mut(&mut self, category: AssetCategory) -> &mut Vec<String> {
        match category {
            AssetCategory::Stylesheet => &mut self.css,
            AssetCategory::Script => &mut self.js,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.js.is_empty()
    }

    /// `<link>` tags for stylesheets, then `<script>` tags, one per line.
    pub fn render_tags(&self) -> String {
        let mut out = String::new();
        for href in &self.css {
            let _ = writeln!(out, r#"<link rel="stylesheet" href="{}">"#, escape_attr(href));
        }
        for src in &self.js {
            let _ = writeln!(out, r#"<script src="{}"></script>"#, escape_attr(src));
        }
        out
    }
}

/// Append every enabled asset to `content` unless `view` is skipped.
///
/// Returns the number of URLs appended.
pub fn inject(
    registry: &Registry,
    exports: &WebExports,
    policy: &InjectPolicy,
    view: ViewKind,
    content: &mut WebContent,
) -> usize {
    if !policy.allows(view) {
        crate::debug!("inject"; "skipping {:?} view", view);
        return 0;
    }

    let mut count = 0;
    for category in AssetCategory::ALL {
        let urls = registry
            .enabled(category)
            .map(|path| exports.url_for(category, path));
        let list = content.list_mut(category);
        let before = list.len();
        list.extend(urls);
        count += list.len() - before;
    }
    count
}
