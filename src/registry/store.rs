//! Registry persistence.
//!
//! The registry lives in one JSON file. A file that cannot be read back as
//! a registry is copied to `<file>.bak` before anything overwrites it.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{Registry, RegistryError};

/// Suffix appended to the registry file name for the corruption backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Result of reading the registry file.
#[derive(Debug)]
pub enum Loaded {
    /// No file yet (first run).
    Missing,
    /// Parsed successfully. `ignored` lists unknown keys that were dropped.
    Parsed {
        registry: Registry,
        ignored: Vec<String>,
    },
    /// The file exists but is not a valid registry.
    Corrupt { reason: String },
}

/// Reads and writes the registry file at a fixed path.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `assets.json` -> `assets.json.bak`
    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.path, BACKUP_SUFFIX)
    }

    /// Read the registry file.
    ///
    /// Only I/O failures other than "not found" are errors; unparsable
    /// content is reported as [`Loaded::Corrupt`].
    pub fn load(&self) -> Result<Loaded, RegistryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
            Err(err) => return Err(RegistryError::io(self.path.clone(), err)),
        };

        let Ok(content) = String::from_utf8(bytes) else {
            return Ok(Loaded::Corrupt {
                reason: "file is not valid UTF-8".to_string(),
            });
        };

        match parse(&content) {
            Ok((registry, ignored)) => Ok(Loaded::Parsed { registry, ignored }),
            Err(err) => Ok(Loaded::Corrupt {
                reason: err.to_string(),
            }),
        }
    }

    /// Copy the current file aside, byte for byte. Returns the backup path.
    pub fn backup(&self) -> Result<PathBuf, RegistryError> {
        let backup = self.backup_path();
        fs::copy(&self.path, &backup).map_err(|err| RegistryError::io(backup.clone(), err))?;
        crate::debug!("store"; "backed up {} to {}", self.path.display(), backup.display());
        Ok(backup)
    }

    /// Write the registry atomically (temp file + rename).
    pub fn save(&self, registry: &Registry) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| RegistryError::io(parent, err))?;
        }

        let json = to_json(registry)?;
        let temp = with_suffix(&self.path, &format!(".tmp.{}", std::process::id()));

        fs::write(&temp, &json).map_err(|err| RegistryError::io(temp.clone(), err))?;
        if let Err(err) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(RegistryError::io(self.path.clone(), err));
        }

        crate::debug!("store"; "saved {} entries to {}", registry.len(), self.path.display());
        Ok(())
    }
}

/// Parse registry JSON, collecting unknown keys instead of failing on them.
pub fn parse(content: &str) -> Result<(Registry, Vec<String>), serde_json::Error> {
    let mut ignored = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(content);
    let registry: Registry = serde_ignored::deserialize(&mut deserializer, |path| {
        ignored.push(path.to_string());
    })?;
    deserializer.end()?;
    Ok((registry, ignored))
}

/// Serialize with 4-space indentation and a trailing newline.
pub fn to_json(registry: &Registry) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    registry.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetCategory, AssetScan};
    use tempfile::TempDir;

    fn sample() -> Registry {
        let scan = AssetScan::default()
            .with(AssetCategory::Stylesheet, &["a.css", "nested/b.css"])
            .with(AssetCategory::Script, &["x.js"]);
        let mut registry = Registry::from_scan(&scan);
        registry.toggle(AssetCategory::Stylesheet, "a.css").unwrap();
        registry
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        let store = RegistryStore::new("/tmp/user_files/assets.json");
        assert_eq!(
            store.backup_path(),
            PathBuf::from("/tmp/user_files/assets.json.bak")
        );
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let store = RegistryStore::new(dir.path().join("assets.json"));
        assert!(matches!(store.load().unwrap(), Loaded::Missing));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = RegistryStore::new(dir.path().join("nested/assets.json"));
        let registry = sample();

        store.save(&registry).unwrap();

        let Loaded::Parsed { registry: loaded, ignored } = store.load().unwrap() else {
            panic!("expected parsed registry");
        };
        assert_eq!(loaded, registry);
        assert!(ignored.is_empty());
        // No temp file left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_written_format() {
        let json = String::from_utf8(to_json(&sample()).unwrap()).unwrap();
        let expected = r#"{
    "css": {
        "a.css": false,
        "nested/b.css": true
    },
    "js": {
        "x.js": true
    }
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_malformed_json_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.json");
        fs::write(&path, "{\"css\": {\"a.css\": tru").unwrap();

        let store = RegistryStore::new(&path);
        assert!(matches!(store.load().unwrap(), Loaded::Corrupt { .. }));
    }

    #[test]
    fn test_structurally_invalid_is_corrupt() {
        for content in [
            r#"{"css": {}}"#,
            r#"{"css": {"a.css": "yes"}, "js": {}}"#,
            r#"["css", "js"]"#,
            r#"{"css": {}, "js": {}} trailing"#,
            "",
        ] {
            assert!(parse(content).is_err(), "should reject: {content:?}");
        }
    }

    #[test]
    fn test_unknown_keys_are_reported() {
        let (registry, ignored) =
            parse(r#"{"css": {"a.css": true}, "js": {}, "fonts": {"x.ttf": true}}"#).unwrap();
        assert_eq!(registry.get(AssetCategory::Stylesheet, "a.css"), Some(true));
        assert_eq!(ignored, vec!["fonts".to_string()]);
    }

    #[test]
    fn test_backup_copies_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.json");
        fs::write(&path, b"not json at all").unwrap();

        let store = RegistryStore::new(&path);
        let backup = store.backup().unwrap();

        assert_eq!(backup, dir.path().join("assets.json.bak"));
        assert_eq!(fs::read(&backup).unwrap(), b"not json at all");
    }
}
