//! 設定ストアバックエンド
//!
//! 単一のJSONファイルを `scope -> id -> bag` のキー/値ストアとして
//! 扱う。書き込みは一時ファイル経由のアトミック置換。

use super::{unwrap_document, RawRecord, StorageBackend};
use crate::definition::record::SETTINGS_SCOPE;
use crate::error::{DatadefError, Result};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

type ScopeEntries = BTreeMap<String, serde_json::Value>;
type StoreFile = BTreeMap<String, ScopeEntries>;

/// 設定ストアバックエンド
#[derive(Debug)]
pub struct SettingsStoreBackend {
    path: PathBuf,
}

impl SettingsStoreBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_file(&self) -> Result<StoreFile> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(DatadefError::Io(e)),
        }
    }

    fn persist_file(&self, store: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent)?;

        let content = serde_json::to_string_pretty(store)?;
        temp_file.write_all(content.as_bytes())?;

        temp_file
            .persist(&self.path)
            .map_err(|e| DatadefError::Io(e.error))?;

        Ok(())
    }
}

impl StorageBackend for SettingsStoreBackend {
    fn write(&self, name: &str, document: &Value) -> Result<()> {
        let raw = unwrap_document(document, name).ok_or_else(|| {
            DatadefError::Validation(format!(
                "Malformed storage document for \"{}\"",
                name
            ))
        })?;

        let bag = serde_json::to_value(Value::Mapping(raw.data))?;

        let mut store = self.load_file()?;
        store
            .entry(SETTINGS_SCOPE.to_string())
            .or_default()
            .insert(name.to_string(), bag);

        self.persist_file(&store)
    }

    fn read_raw(&self, name: &str) -> Result<Option<RawRecord>> {
        let store = self.load_file()?;

        let Some(bag) = store.get(SETTINGS_SCOPE).and_then(|scope| scope.get(name)) else {
            return Ok(None);
        };

        let value: Value = serde_json::from_value(bag.clone())?;
        let Some(data) = value.as_mapping() else {
            return Ok(None);
        };

        Ok(Some(RawRecord {
            id: name.to_string(),
            data: data.clone(),
        }))
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut store = self.load_file()?;

        let removed = store
            .get_mut(SETTINGS_SCOPE)
            .and_then(|scope| scope.remove(name))
            .is_some();

        if removed {
            self.persist_file(&store)?;
        }

        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        let store = self.load_file()?;
        Ok(store
            .get(SETTINGS_SCOPE)
            .map(|scope| scope.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "settings_store_test.rs"]
mod tests;
