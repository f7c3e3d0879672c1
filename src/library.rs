//! The asset library: one owned registry bound to one assets directory.
//!
//! Opening a library scans the assets root, loads the persisted registry,
//! reconciles (or rebuilds) it and writes it back. Every later mutation is
//! flushed to disk before returning.

use std::path::{Path, PathBuf};

use crate::asset::{AssetCategory, scan_all};
use crate::registry::{
    AssetMap, Loaded, ReconcileReport, Registry, RegistryError, RegistryStore, reconcile,
};
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Where the assets and their registry live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    /// Directory containing one subdirectory per category.
    pub root: PathBuf,
    /// Registry JSON file.
    pub registry: PathBuf,
}

impl AssetLayout {
    pub fn new(root: impl Into<PathBuf>, registry: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            registry: registry.into(),
        }
    }

    /// Directory of one category.
    pub fn category_dir(&self, category: AssetCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }
}

/// How the registry was obtained when the library was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No registry file existed; built from the scan.
    Fresh,
    /// Existing registry reconciled against disk.
    Loaded(ReconcileReport),
    /// Registry file was unreadable; kept at `backup` and rebuilt from the scan.
    Recovered { backup: PathBuf, reason: String },
}

/// Owned registry plus the store and layout it is bound to.
#[derive(Debug)]
pub struct AssetLibrary {
    layout: AssetLayout,
    store: RegistryStore,
    registry: Registry,
}

impl AssetLibrary {
    /// Scan, load, reconcile and persist.
    pub fn open(layout: AssetLayout) -> Result<(Self, LoadOutcome), RegistryError> {
        let store = RegistryStore::new(&layout.registry);
        let scan = scan_all(&layout.root);
        debug!("scan"; "found {} in {}", plural_count(scan.len(), "asset"), layout.root.display());

        let (registry, outcome) = match store.load()? {
            Loaded::Missing => {
                debug!("store"; "no registry at {}, building", store.path().display());
                (Registry::from_scan(&scan), LoadOutcome::Fresh)
            }
            Loaded::Parsed {
                mut registry,
                ignored,
            } => {
                if !ignored.is_empty() {
                    log!("warning"; "dropping unknown keys in {}: {}", store.path().display(), ignored.join(", "));
                }
                let report = reconcile(&mut registry, &scan);
                (registry, LoadOutcome::Loaded(report))
            }
            Loaded::Corrupt { reason } => {
                let backup = store.backup()?;
                (
                    Registry::from_scan(&scan),
                    LoadOutcome::Recovered { backup, reason },
                )
            }
        };

        // Written even when nothing changed
        store.save(&registry)?;

        Ok((
            Self {
                layout,
                store,
                registry,
            },
            outcome,
        ))
    }

    /// Reconcile against the current disk contents and persist.
    pub fn rescan(&mut self) -> Result<ReconcileReport, RegistryError> {
        let scan = scan_all(&self.layout.root);
        let report = reconcile(&mut self.registry, &scan);
        self.store.save(&self.registry)?;
        Ok(report)
    }

    /// Flip one asset, persist, and return its new state.
    ///
    /// If the write fails the in-memory flag is flipped back.
    pub fn toggle(&mut self, category: AssetCategory, path: &str) -> Result<bool, RegistryError> {
        let enabled = self.registry.toggle(category, path)?;
        if let Err(err) = self.store.save(&self.registry) {
            self.registry.set_enabled(category, path, !enabled)?;
            return Err(err);
        }
        Ok(enabled)
    }

    /// Set one asset's state and persist. Returns whether it changed.
    ///
    /// If the write fails the previous state is restored in memory.
    pub fn set_enabled(
        &mut self,
        category: AssetCategory,
        path: &str,
        enabled: bool,
    ) -> Result<bool, RegistryError> {
        let changed = self.registry.set_enabled(category, path, enabled)?;
        if let Err(err) = self.store.save(&self.registry) {
            if changed {
                self.registry.set_enabled(category, path, !enabled)?;
            }
            return Err(err);
        }
        Ok(changed)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn layout(&self) -> &AssetLayout {
        &self.layout
    }

    pub fn registry_path(&self) -> &Path {
        self.store.path()
    }

    /// Entries of one category, sorted by path.
    pub fn entries(&self, category: AssetCategory) -> &AssetMap {
        self.registry.entries(category)
    }

    /// Enabled asset paths of one category, sorted.
    pub fn enabled(&self, category: AssetCategory) -> impl Iterator<Item = &str> {
        self.registry.enabled(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(files: &[&str]) -> (TempDir, AssetLayout) {
        let dir = TempDir::new().unwrap();
        let layout = AssetLayout::new(dir.path().join("assets"), dir.path().join("assets.json"));
        for file in files {
            touch(&layout, file);
        }
        (dir, layout)
    }

    fn touch(layout: &AssetLayout, rel: &str) {
        let path = layout.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_first_open_builds_and_persists() {
        let (_dir, layout) = setup(&["css/a.css", "js/b.js"]);

        let (library, outcome) = AssetLibrary::open(layout.clone()).unwrap();

        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(library.registry().len(), 2);
        assert!(layout.registry.exists());
    }

    #[test]
    fn test_reopen_preserves_choices_and_tracks_disk() {
        let (_dir, layout) = setup(&["css/a.css", "css/gone.css"]);
        let (mut library, _) = AssetLibrary::open(layout.clone()).unwrap();
        library.toggle(AssetCategory::Stylesheet, "a.css").unwrap();

        fs::remove_file(layout.root.join("css/gone.css")).unwrap();
        touch(&layout, "css/new.css");

        let (library, outcome) = AssetLibrary::open(layout).unwrap();
        let LoadOutcome::Loaded(report) = outcome else {
            panic!("expected loaded outcome");
        };
        assert_eq!(report.added, vec![(AssetCategory::Stylesheet, "new.css".to_string())]);
        assert_eq!(report.removed, vec![(AssetCategory::Stylesheet, "gone.css".to_string())]);

        let entries = library.entries(AssetCategory::Stylesheet);
        assert_eq!(entries.get("a.css"), Some(&false));
        assert_eq!(entries.get("new.css"), Some(&true));
        assert!(!entries.contains_key("gone.css"));
    }

    #[test]
    fn test_corrupt_registry_is_backed_up_and_rebuilt() {
        let (_dir, layout) = setup(&["css/a.css"]);
        fs::write(&layout.registry, "{ definitely not json").unwrap();

        let (library, outcome) = AssetLibrary::open(layout.clone()).unwrap();

        let LoadOutcome::Recovered { backup, .. } = outcome else {
            panic!("expected recovered outcome");
        };
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ definitely not json");
        assert_eq!(library.registry().get(AssetCategory::Stylesheet, "a.css"), Some(true));

        // Primary file now holds the rebuilt registry
        let (_, outcome) = AssetLibrary::open(layout).unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded(report) if report.is_empty()));
    }

    #[test]
    fn test_toggle_persists_immediately() {
        let (_dir, layout) = setup(&["js/a.js"]);
        let (mut library, _) = AssetLibrary::open(layout.clone()).unwrap();

        assert!(!library.toggle(AssetCategory::Script, "a.js").unwrap());

        let store = RegistryStore::new(&layout.registry);
        let Loaded::Parsed { registry, .. } = store.load().unwrap() else {
            panic!("expected parsed registry");
        };
        assert_eq!(registry.get(AssetCategory::Script, "a.js"), Some(false));
    }

    #[test]
    fn test_toggle_unknown_leaves_file_untouched() {
        let (_dir, layout) = setup(&["js/a.js"]);
        let (mut library, _) = AssetLibrary::open(layout.clone()).unwrap();
        let before = fs::read(&layout.registry).unwrap();

        let err = library.toggle(AssetCategory::Script, "nope.js").unwrap_err();

        assert!(matches!(err, RegistryError::UnknownAsset { .. }));
        assert_eq!(fs::read(&layout.registry).unwrap(), before);
    }

    #[test]
    fn test_open_rewrites_unchanged_registry() {
        let (_dir, layout) = setup(&["css/a.css"]);
        fs::write(
            &layout.registry,
            r#"{"css":{"a.css":false},"js":{},"fonts":{"x.ttf":true}}"#,
        )
        .unwrap();

        let (_, outcome) = AssetLibrary::open(layout.clone()).unwrap();

        assert!(matches!(outcome, LoadOutcome::Loaded(report) if report.is_empty()));
        let written = fs::read_to_string(&layout.registry).unwrap();
        assert_eq!(
            written,
            "{\n    \"css\": {\n        \"a.css\": false\n    },\n    \"js\": {}\n}\n"
        );
        assert!(!written.contains("fonts"));
    }

    #[test]
    fn test_failed_save_keeps_memory_in_sync_with_disk() {
        let (_dir, layout) = setup(&["css/a.css"]);
        let (mut library, _) = AssetLibrary::open(layout.clone()).unwrap();

        // A directory at the registry path makes the final rename fail
        fs::remove_file(&layout.registry).unwrap();
        fs::create_dir(&layout.registry).unwrap();

        assert!(library.toggle(AssetCategory::Stylesheet, "a.css").is_err());
        assert_eq!(library.registry().get(AssetCategory::Stylesheet, "a.css"), Some(true));

        assert!(library.set_enabled(AssetCategory::Stylesheet, "a.css", false).is_err());
        assert_eq!(library.registry().get(AssetCategory::Stylesheet, "a.css"), Some(true));
    }

    #[test]
    fn test_rescan_picks_up_new_files() {
        let (_dir, layout) = setup(&["css/a.css"]);
        let (mut library, _) = AssetLibrary::open(layout.clone()).unwrap();
        touch(&layout, "css/b.css");

        let report = library.rescan().unwrap();

        assert_eq!(report.added.len(), 1);
        let enabled: Vec<_> = library.enabled(AssetCategory::Stylesheet).collect();
        assert_eq!(enabled, vec!["a.css", "b.css"]);
    }
}
