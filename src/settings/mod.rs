// ── Persisted window settings ─────────────────────────────────────────────────
//
// A small key-value store keyed by schema id, kept as JSON at
// `<config_dir>/<schema_id>/settings.json`.
// No `unsafe`; pure safe Rust + serde_json.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::files::io::replace_contents;

/// Schema id of the viewer's settings.
pub(crate) const SCHEMA_ID: &str = "com.example.TextViewer";

const SETTINGS_VERSION: u32 = 1;

const SETTINGS_FILE: &str = "settings.json";

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognised settings schema {schema:?} version {version}")]
    UnknownSchema { schema: String, version: u32 },

    #[error("no config directory available for settings")]
    NoConfigDir,

    #[error("key {key} holds a {expected}, not a {found}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

// ── Keys and values ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsKey {
    WindowWidth,
    WindowHeight,
    WindowMaximized,
}

impl SettingsKey {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::WindowWidth => "window-width",
            Self::WindowHeight => "window-height",
            Self::WindowMaximized => "window-maximized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingValue {
    Int(i32),
    Bool(bool),
}

impl SettingValue {
    fn type_name(self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
        }
    }
}

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Current values of every key.  Missing keys in the file take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct WindowGeometry {
    #[serde(rename = "window-width")]
    pub(crate) width: i32,
    #[serde(rename = "window-height")]
    pub(crate) height: i32,
    #[serde(rename = "window-maximized")]
    pub(crate) maximized: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            maximized: false,
        }
    }
}

/// Root of the JSON settings file.
#[derive(Serialize, Deserialize)]
struct SettingsFile {
    schema: String,
    version: u32,
    values: WindowGeometry,
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// The settings object bound to the main window.
///
/// Lives on the UI thread for the lifetime of the window; `flush` writes it
/// back only when a value changed.
#[derive(Debug)]
pub(crate) struct SettingsStore {
    path: PathBuf,
    values: WindowGeometry,
    dirty: bool,
}

impl SettingsStore {
    /// Open the store for [`SCHEMA_ID`] in the user's config directory.
    pub(crate) fn open() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::open_at(dir.join(SCHEMA_ID).join(SETTINGS_FILE)))
    }

    /// Open the store backed by `path`.
    ///
    /// Never fails: a missing file yields defaults silently, an unreadable
    /// or invalid one yields defaults with a warning.
    pub(crate) fn open_at(path: PathBuf) -> Self {
        let values = match load(&path) {
            Ok(Some(values)) => values,
            Ok(None) => WindowGeometry::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring settings file");
                WindowGeometry::default()
            }
        };
        Self {
            path,
            values,
            dirty: false,
        }
    }

    pub(crate) fn geometry(&self) -> WindowGeometry {
        self.values
    }

    pub(crate) fn get(&self, key: SettingsKey) -> SettingValue {
        match key {
            SettingsKey::WindowWidth => SettingValue::Int(self.values.width),
            SettingsKey::WindowHeight => SettingValue::Int(self.values.height),
            SettingsKey::WindowMaximized => SettingValue::Bool(self.values.maximized),
        }
    }

    /// Change one key.  The value must match the key's type.
    pub(crate) fn set(&mut self, key: SettingsKey, value: SettingValue) -> Result<(), SettingsError> {
        let current = self.get(key);
        if current == value {
            return Ok(());
        }
        match (key, value) {
            (SettingsKey::WindowWidth, SettingValue::Int(v)) => self.values.width = v,
            (SettingsKey::WindowHeight, SettingValue::Int(v)) => self.values.height = v,
            (SettingsKey::WindowMaximized, SettingValue::Bool(v)) => self.values.maximized = v,
            _ => {
                return Err(SettingsError::TypeMismatch {
                    key: key.name(),
                    expected: current.type_name(),
                    found: value.type_name(),
                })
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Record the window's restored (non-maximized) outer size.
    pub(crate) fn record_size(&mut self, width: i32, height: i32) -> Result<(), SettingsError> {
        self.set(SettingsKey::WindowWidth, SettingValue::Int(width))?;
        self.set(SettingsKey::WindowHeight, SettingValue::Int(height))
    }

    pub(crate) fn record_maximized(&mut self, maximized: bool) -> Result<(), SettingsError> {
        self.set(SettingsKey::WindowMaximized, SettingValue::Bool(maximized))
    }

    /// Write the settings file if anything changed since the last flush.
    ///
    /// Creates the parent directory if it does not exist.  The file is
    /// replaced atomically, so a failed flush leaves the previous one intact.
    pub(crate) fn flush(&mut self) -> Result<(), SettingsError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let sf = SettingsFile {
            schema: SCHEMA_ID.to_owned(),
            version: SETTINGS_VERSION,
            values: self.values,
        };
        replace_contents(&self.path, &serde_json::to_vec_pretty(&sf)?)?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), "settings written");
        Ok(())
    }
}

/// Read and validate the settings file.  `Ok(None)` when it does not exist.
fn load(path: &std::path::Path) -> Result<Option<WindowGeometry>, SettingsError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let sf: SettingsFile = serde_json::from_slice(&data)?;
    if sf.schema != SCHEMA_ID || sf.version != SETTINGS_VERSION {
        return Err(SettingsError::UnknownSchema {
            schema: sf.schema,
            version: sf.version,
        });
    }
    Ok(Some(sf.values))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::open_at(dir.path().join(SCHEMA_ID).join(SETTINGS_FILE))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert_eq!(store.geometry(), WindowGeometry::default());
        assert_eq!(store.get(SettingsKey::WindowWidth), SettingValue::Int(600));
        assert_eq!(store.get(SettingsKey::WindowMaximized), SettingValue::Bool(false));
    }

    #[test]
    fn values_roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        store.record_size(1024, 768).expect("size");
        store.record_maximized(true).expect("maximized");
        store.flush().expect("flush");

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.geometry(),
            WindowGeometry {
                width: 1024,
                height: 768,
                maximized: true
            }
        );
    }

    #[test]
    fn flush_without_changes_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        store.flush().expect("flush");
        assert!(!dir.path().join(SCHEMA_ID).exists());
    }

    #[test]
    fn flush_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        store.record_size(800, 500).expect("size");
        store.flush().expect("first flush");
        store.record_size(1024, 700).expect("size");
        store.flush().expect("second flush");

        assert_eq!(store_in(&dir).geometry().width, 1024);
        let names: Vec<_> = fs::read_dir(dir.path().join(SCHEMA_ID))
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, [SETTINGS_FILE]);
    }

    #[test]
    fn failed_flush_stays_dirty_and_cleans_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        // a directory squatting on the settings path cannot be replaced
        fs::create_dir_all(dir.path().join(SCHEMA_ID).join(SETTINGS_FILE)).expect("mkdir");
        let mut store = store_in(&dir);
        store.record_maximized(true).expect("maximized");

        assert!(store.flush().is_err());
        assert!(store.dirty);
        let entries = fs::read_dir(dir.path().join(SCHEMA_ID)).expect("read_dir").count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        let err = store
            .set(SettingsKey::WindowMaximized, SettingValue::Int(1))
            .expect_err("bool key must reject an integer");
        assert!(matches!(
            err,
            SettingsError::TypeMismatch {
                key: "window-maximized",
                ..
            }
        ));
        assert_eq!(store.get(SettingsKey::WindowMaximized), SettingValue::Bool(false));
    }

    /// Files written before a key existed parse with that key's default.
    #[test]
    fn missing_keys_take_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            r#"{"schema":"com.example.TextViewer","version":1,"values":{"window-width":800}}"#,
        )
        .expect("write");

        let store = SettingsStore::open_at(path);
        assert_eq!(store.geometry().width, 800);
        assert_eq!(store.geometry().height, 400);
        assert!(!store.geometry().maximized);
    }

    #[test]
    fn malformed_or_foreign_files_yield_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{not json").expect("write");
        assert_eq!(SettingsStore::open_at(garbage).geometry(), WindowGeometry::default());

        let foreign = dir.path().join("foreign.json");
        fs::write(
            &foreign,
            r#"{"schema":"org.other.App","version":1,"values":{"window-width":1}}"#,
        )
        .expect("write");
        assert_eq!(SettingsStore::open_at(foreign).geometry(), WindowGeometry::default());
    }
}
