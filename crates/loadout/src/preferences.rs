//! Per-view UI preferences.
//!
//! A flat key → value JSON document, one per view. Missing keys fall back to
//! hard-coded defaults. When the store has a path, every [`Preferences::set`]
//! is written straight back to disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;
use crate::table::Handle;

pub const ITEM_HEIGHT: &str = "item_height";
pub const ITEM_WIDTH: &str = "item_width";
pub const ITEM_SPACING: &str = "item_spacing";
pub const SHOW_ICON: &str = "show_icon";
pub const SHOW_ALTERNATE_ROW: &str = "show_alternate_row";
pub const LAST_SORT_KEY: &str = "last_sort_key";
pub const LAST_SEARCH_KEY: &str = "last_search_key";
pub const LAST_TARGET: &str = "last_target";

const DEFAULT_ITEM_HEIGHT: i64 = 32;
const DEFAULT_ITEM_WIDTH: i64 = 256;
const DEFAULT_ITEM_SPACING: i64 = 2;
const DEFAULT_SORT_KEY: &str = "name";
const DEFAULT_SEARCH_KEY: &str = "name";

/// Volatile per-view settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    values: BTreeMap<String, Value>,
    path: Option<PathBuf>,
}

impl Preferences {
    /// An in-memory store holding only defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the document at `path`, or defaults if the file does not exist.
    ///
    /// Later writes go back to the same path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let values = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            tracing::debug!(path = %path.display(), "no preferences file, using defaults");
            BTreeMap::new()
        };
        Ok(Preferences {
            values,
            path: Some(path.to_path_buf()),
        })
    }

    /// Writes the document to its path. A no-op for in-memory stores.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }

    /// Stores a value and writes the document through.
    ///
    /// The in-memory value is kept even if the write fails.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.save().inspect_err(|err| {
            tracing::warn!(key, error = %err, "failed to persist preference");
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn item_height(&self) -> i64 {
        self.int_or(ITEM_HEIGHT, DEFAULT_ITEM_HEIGHT)
    }

    pub fn item_width(&self) -> i64 {
        self.int_or(ITEM_WIDTH, DEFAULT_ITEM_WIDTH)
    }

    pub fn item_spacing(&self) -> i64 {
        self.int_or(ITEM_SPACING, DEFAULT_ITEM_SPACING)
    }

    pub fn show_icon(&self) -> bool {
        self.bool_or(SHOW_ICON, true)
    }

    pub fn show_alternate_row(&self) -> bool {
        self.bool_or(SHOW_ALTERNATE_ROW, true)
    }

    pub fn last_sort_key(&self) -> &str {
        self.str_or(LAST_SORT_KEY, DEFAULT_SORT_KEY)
    }

    pub fn last_search_key(&self) -> &str {
        self.str_or(LAST_SEARCH_KEY, DEFAULT_SEARCH_KEY)
    }

    /// The container that "send to last target" delivers to. Defaults to
    /// the kit; unknown names also fall back to it.
    pub fn last_target(&self) -> Handle {
        self.get(LAST_TARGET)
            .and_then(Value::as_str)
            .and_then(|name| name.parse().ok())
            .unwrap_or(Handle::Kit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = Preferences::new();
        assert_eq!(prefs.item_height(), 32);
        assert_eq!(prefs.item_width(), 256);
        assert_eq!(prefs.item_spacing(), 2);
        assert!(prefs.show_icon());
        assert!(prefs.show_alternate_row());
        assert_eq!(prefs.last_sort_key(), "name");
        assert_eq!(prefs.last_search_key(), "name");
        assert_eq!(prefs.last_target(), Handle::Kit);
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(dir.path().join("view.json")).unwrap();
        assert_eq!(prefs.item_height(), 32);
        assert!(!dir.path().join("view.json").exists());
    }

    #[test]
    fn set_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("view.json");

        let mut prefs = Preferences::load(&path).unwrap();
        prefs.set(ITEM_HEIGHT, 40).unwrap();
        prefs.set(LAST_TARGET, "inventory").unwrap();
        prefs.set(SHOW_ICON, false).unwrap();

        let reloaded = Preferences::load(&path).unwrap();
        assert_eq!(reloaded.item_height(), 40);
        assert_eq!(reloaded.last_target(), Handle::Inventory);
        assert!(!reloaded.show_icon());
        assert!(reloaded.show_alternate_row());
    }

    #[test]
    fn wrong_types_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        fs::write(&path, r#"{ "item_height": "tall", "last_target": "attic" }"#).unwrap();

        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.item_height(), 32);
        assert_eq!(prefs.last_target(), Handle::Kit);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(Preferences::load(&path).is_err());
    }
}
