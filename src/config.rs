//! バンドル設定
//!
//! ストレージ記述子（エンティティ分類 → 書き込み先）と、設定ファイルに
//! 直接宣言された定義（config-as-code）を1つのYAMLファイルから読み込む。
//!
//! ```yaml
//! data_definitions:
//!   config_location:
//!     import_definitions:
//!       write_target:
//!         type: yaml
//!         options:
//!           directory: /var/lib/datadef/import_definitions
//!   import_definitions:
//!     products-from-csv:
//!       provider: csv
//! ```

use crate::definition::DefinitionRecord;
use crate::env::EnvVar;
use crate::error::{DatadefError, Result};
use crate::storage::WriteTarget;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 設定ファイルパスを上書きする環境変数
pub const CONFIG_ENV: &str = "DATADEF_CONFIG";

const DEFAULT_CONFIG_DIR: &str = ".datadef";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    data_definitions: BundleSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BundleSection {
    #[serde(default)]
    config_location: BTreeMap<String, ConfigLocation>,
    #[serde(default)]
    import_definitions: BTreeMap<String, DefinitionRecord>,
}

/// エンティティ分類ごとの書き込み先
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigLocation {
    pub write_target: WriteTarget,
}

/// ストレージ設定（エンティティ分類 → ストレージ記述子）
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    locations: BTreeMap<String, ConfigLocation>,
}

impl StorageConfig {
    /// 分類キーに対応するストレージ記述子を取得
    pub fn descriptor(&self, key: &str) -> Option<&WriteTarget> {
        self.locations.get(key).map(|l| &l.write_target)
    }
}

/// 静的宣言された定義（config-as-code、このストアからは書き戻されない）
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    definitions: BTreeMap<String, DefinitionRecord>,
}

impl ContainerConfig {
    pub fn definitions(&self) -> &BTreeMap<String, DefinitionRecord> {
        &self.definitions
    }

    pub fn get(&self, name: &str) -> Option<&DefinitionRecord> {
        self.definitions.get(name)
    }
}

/// バンドル設定全体
#[derive(Debug)]
pub struct BundleConfig {
    storage: StorageConfig,
    container: ContainerConfig,
}

impl BundleConfig {
    /// 既定パスから読み込み（DATADEF_CONFIG → ~/.datadef/config.yaml）
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DatadefError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&content)?;

        Ok(Self {
            storage: StorageConfig {
                locations: file.data_definitions.config_location,
            },
            container: ContainerConfig {
                definitions: file.data_definitions.import_definitions,
            },
        })
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn container(&self) -> &ContainerConfig {
        &self.container
    }
}

/// 設定ファイルのパスを解決
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = EnvVar::get(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let home = EnvVar::get("HOME").ok_or_else(|| {
        DatadefError::Configuration("HOME environment variable not set".to_string())
    })?;

    Ok(PathBuf::from(home)
        .join(DEFAULT_CONFIG_DIR)
        .join(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
