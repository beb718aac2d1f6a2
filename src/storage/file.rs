//! YAMLファイルバックエンド
//!
//! 定義ごとに `<dir>/<name>.yaml` として、ネストパスでラップ済みの
//! ドキュメントをそのまま書き込む。

use super::{unwrap_document, RawRecord, StorageBackend};
use crate::error::Result;
use serde_yaml::Value;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// YAMLファイルバックエンド
#[derive(Debug)]
pub struct FileBackend {
    directory: PathBuf,
}

impl FileBackend {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.yaml", name))
    }
}

impl StorageBackend for FileBackend {
    fn write(&self, name: &str, document: &Value) -> Result<()> {
        fs::create_dir_all(&self.directory)?;

        let content = serde_yaml::to_string(document)?;

        // 同じディレクトリに一時ファイルを作成してアトミックに置換
        let mut temp_file = NamedTempFile::new_in(&self.directory)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file
            .persist(self.path_for(name))
            .map_err(|e| crate::error::DatadefError::Io(e.error))?;

        Ok(())
    }

    fn read_raw(&self, name: &str) -> Result<Option<RawRecord>> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let document: Value = serde_yaml::from_str(&content)?;

        Ok(unwrap_document(&document, name))
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        if !self.directory.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
