//! Merge a registry with what is currently on disk.

use crate::asset::{AssetCategory, AssetScan};

use super::Registry;

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Files found on disk with no entry; added as enabled.
    pub added: Vec<(AssetCategory, String)>,
    /// Entries whose file is gone; removed.
    pub removed: Vec<(AssetCategory, String)>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Bring `registry` in line with `scan`.
///
/// After this call every scanned file has an entry, every entry has a
/// scanned file, and entries present on both sides keep their flag.
pub fn reconcile(registry: &mut Registry, scan: &AssetScan) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for category in AssetCategory::ALL {
        let map = registry.map_mut(category);

        map.retain(|path, _| {
            let keep = scan.contains(category, path);
            if !keep {
                report.removed.push((category, path.clone()));
            }
            keep
        });

        for file in scan.files(category) {
            if !map.contains_key(file) {
                map.insert(file.clone(), true);
                report.added.push((category, file.clone()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn css(files: &[&str]) -> AssetScan {
        AssetScan::default().with(AssetCategory::Stylesheet, files)
    }

    #[test]
    fn test_new_file_is_enabled_and_old_state_kept() {
        let mut registry = Registry::from_scan(&css(&["a.css"]));
        registry.toggle(AssetCategory::Stylesheet, "a.css").unwrap();

        let report = reconcile(&mut registry, &css(&["a.css", "b.css"]));

        assert_eq!(registry.get(AssetCategory::Stylesheet, "a.css"), Some(false));
        assert_eq!(registry.get(AssetCategory::Stylesheet, "b.css"), Some(true));
        assert_eq!(
            report.added,
            vec![(AssetCategory::Stylesheet, "b.css".to_string())]
        );
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_deleted_file_is_removed() {
        let scan = AssetScan::default()
            .with(AssetCategory::Stylesheet, &["a.css", "b.css"])
            .with(AssetCategory::Script, &["x.js"]);
        let mut registry = Registry::from_scan(&scan);

        let report = reconcile(&mut registry, &css(&["b.css"]));

        assert_eq!(registry.get(AssetCategory::Stylesheet, "a.css"), None);
        assert_eq!(registry.get(AssetCategory::Script, "x.js"), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(report.removed.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let mut registry = Registry::from_scan(&css(&["a.css", "c.css"]));
        registry.toggle(AssetCategory::Stylesheet, "c.css").unwrap();
        let scan = css(&["a.css", "b.css"]);

        reconcile(&mut registry, &scan);
        let once = registry.clone();
        let report = reconcile(&mut registry, &scan);

        assert_eq!(registry, once);
        assert!(report.is_empty());
    }

    #[test]
    fn test_preserves_state_for_every_surviving_file() {
        let files = ["a.css", "b.css", "c.css", "d.css"];
        let mut registry = Registry::from_scan(&css(&files));
        registry.toggle(AssetCategory::Stylesheet, "b.css").unwrap();
        registry.toggle(AssetCategory::Stylesheet, "d.css").unwrap();
        let before = registry.clone();

        reconcile(&mut registry, &css(&["b.css", "c.css", "e.css"]));

        for path in ["b.css", "c.css"] {
            assert_eq!(
                registry.get(AssetCategory::Stylesheet, path),
                before.get(AssetCategory::Stylesheet, path)
            );
        }
        assert_eq!(registry.get(AssetCategory::Stylesheet, "e.css"), Some(true));
    }

    #[test]
    fn test_example_from_persisted_state() {
        let mut registry: Registry =
            serde_json::from_str(r#"{"css": {"a.css": false}, "js": {}}"#).unwrap();

        reconcile(&mut registry, &css(&["a.css", "b.css"]));

        let expected: Registry =
            serde_json::from_str(r#"{"css": {"a.css": false, "b.css": true}, "js": {}}"#).unwrap();
        assert_eq!(registry, expected);
    }
}
