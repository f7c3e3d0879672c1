//! Asset discovery (pure, no side effects).
//!
//! ```text
//! assets/
//! ├── css/
//! │   ├── base.css          -> base.css
//! │   ├── _partial.css      -> (private, skipped)
//! │   ├── .hidden.css       -> (hidden, skipped)
//! │   ├── notes.txt         -> (wrong extension, skipped)
//! │   └── nested/
//! │       └── cloze.css     -> nested/cloze.css
//! └── js/
//!     └── mathjax.js        -> mathjax.js
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use jwalk::WalkDir;

use super::AssetCategory;

/// Files found on disk, per category, as sorted relative paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetScan {
    files: BTreeMap<AssetCategory, Vec<String>>,
}

impl AssetScan {
    /// Replace the file list of one category.
    pub fn set(&mut self, category: AssetCategory, mut files: Vec<String>) {
        files.sort();
        files.dedup();
        self.files.insert(category, files);
    }

    /// Chainable form of [`AssetScan::set`].
    pub fn with(mut self, category: AssetCategory, files: &[&str]) -> Self {
        self.set(category, files.iter().map(|f| (*f).to_string()).collect());
        self
    }

    /// Sorted relative paths for a category (empty if nothing was found).
    pub fn files(&self, category: AssetCategory) -> &[String] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `path` was found for `category`.
    pub fn contains(&self, category: AssetCategory, path: &str) -> bool {
        self.files(category)
            .binary_search_by(|f| f.as_str().cmp(path))
            .is_ok()
    }

    /// Total number of files across all categories.
    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scan every category directory under `root`.
pub fn scan_all(root: &Path) -> AssetScan {
    let mut scan = AssetScan::default();
    for category in AssetCategory::ALL {
        scan.set(category, scan_category(root, category));
    }
    scan
}

/// Scan `root/<category dir>` recursively for candidate assets.
///
/// Returns sorted paths relative to the category directory, always joined
/// with `/`. A missing directory yields an empty list.
pub fn scan_category(root: &Path, category: AssetCategory) -> Vec<String> {
    let dir = root.join(category.dir_name());
    if !dir.is_dir() {
        crate::debug!("scan"; "{} does not exist, nothing to scan", dir.display());
        return Vec::new();
    }

    // Hidden directories are walked; only file names are filtered
    let mut files: Vec<String> = WalkDir::new(&dir)
        .skip_hidden(false)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .filter_map(|e| {
            let path = e.path();
            is_candidate(&path, category)
                .then(|| relative_key(&path, &dir))
                .flatten()
        })
        .collect();

    files.sort();
    files
}

/// Whether a walked path is an asset of `category`.
fn is_candidate(path: &Path, category: AssetCategory) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        crate::debug!("scan"; "skipping non-utf8 file name: {}", path.display());
        return false;
    };

    // Hidden and private files
    if name.starts_with('.') || name.starts_with('_') {
        return false;
    }

    if path.extension().and_then(|e| e.to_str()) != Some(category.extension()) {
        return false;
    }

    // Follows links, so a link to a directory is rejected here
    path.is_file()
}

/// `/abs/assets/css/nested/base.css` -> `nested/base.css`
fn relative_key(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        let Some(part) = component.as_os_str().to_str() else {
            crate::debug!("scan"; "skipping non-utf8 path: {}", path.display());
            return None;
        };
        parts.push(part);
    }
    Some(parts.join("/"))
}
