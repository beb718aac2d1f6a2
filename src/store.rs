//! 定義ストア（DAO）
//!
//! インポート定義の読み込み・保存・削除を、注入されたストレージ
//! バックエンドに対して行う。保存時は許可リスト射影のみを書き込み、
//! 読み込み時は永続化レコードと静的宣言（config-as-code）をマージする。

use crate::config::{ContainerConfig, StorageConfig};
use crate::definition::record::{self, CONFIG_KEY};
use crate::definition::{DefinitionRecord, ImportDefinition};
use crate::error::{DatadefError, Result};
use crate::storage::{self, StorageBackend};
use chrono::Utc;
use std::collections::BTreeMap;

/// 定義ストア
#[derive(Debug)]
pub struct DefinitionStore {
    backend: Box<dyn StorageBackend>,
    static_definitions: BTreeMap<String, DefinitionRecord>,
}

impl DefinitionStore {
    /// ストレージ設定と静的定義からストアを構成
    ///
    /// `import_definitions` 分類のストレージ記述子が無ければ
    /// Configuration エラー（起動時に致命的）。
    pub fn configure(
        storage_config: &StorageConfig,
        container_config: &ContainerConfig,
    ) -> Result<Self> {
        let target = storage_config.descriptor(CONFIG_KEY).ok_or_else(|| {
            DatadefError::Configuration(format!(
                "Missing storage configuration for \"{}\"",
                CONFIG_KEY
            ))
        })?;

        let backend = storage::open(target)?;

        Ok(Self {
            backend,
            static_definitions: container_config.definitions().clone(),
        })
    }

    /// バックエンドを直接指定して構築（テスト・組み込み用）
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            static_definitions: BTreeMap::new(),
        }
    }

    /// 静的定義を差し替え
    pub fn with_static_definitions(
        mut self,
        definitions: BTreeMap<String, DefinitionRecord>,
    ) -> Self {
        self.static_definitions = definitions;
        self
    }

    /// 名前で定義を読み込み
    ///
    /// 呼び出し側が明示した名前が、バックエンドが実際に見つけた
    /// 格納キー（id）より優先される。
    pub fn load(&self, name: &str) -> Result<ImportDefinition> {
        self.fetch(name, true)
    }

    /// 格納キー側の識別子を維持したまま読み込み
    ///
    /// ファイルの内側キーが要求名と異なる場合、結果の名前は
    /// バックエンド側のidになる。
    pub fn load_stored(&self, name: &str) -> Result<ImportDefinition> {
        self.fetch(name, false)
    }

    fn fetch(&self, name: &str, explicit: bool) -> Result<ImportDefinition> {
        if let Some(raw) = self.backend.read_raw(name)? {
            let stored = record::from_bag(&raw.data)?;
            let identity = if explicit { name } else { raw.id.as_str() };
            let mut definition = record::hydrate(&stored, identity);
            definition.set_writeable(true);
            return Ok(definition);
        }

        if let Some(stored) = self.static_definitions.get(name) {
            let mut definition = record::hydrate(stored, name);
            definition.set_writeable(false);
            return Ok(definition);
        }

        Err(DatadefError::NotFound(name.to_string()))
    }

    /// 定義を保存
    ///
    /// 初回保存時のみ creationDate を設定し、modificationDate は
    /// 毎回現在時刻（エポック秒）に更新する。許可リスト射影を
    /// ネストパスでラップし、名前をキーにバックエンドへ渡す。
    pub fn save(&self, definition: &mut ImportDefinition) -> Result<()> {
        let ts = Utc::now().timestamp();
        if definition.creation_date().is_none() {
            definition.set_creation_date(ts);
        }
        definition.set_modification_date(ts);

        let projected = record::project(definition);
        let document = record::wrap(definition.name(), &projected)?;

        self.backend.write(definition.name(), &document)
    }

    /// 定義を削除
    ///
    /// 冪等性はバックエンドの責務。ここでは無条件に削除要求を出す。
    pub fn delete(&self, name: &str) -> Result<()> {
        self.backend.delete(name)
    }

    /// 定義が存在するか（永続化または静的宣言）
    pub fn exists(&self, name: &str) -> Result<bool> {
        if self.backend.read_raw(name)?.is_some() {
            return Ok(true);
        }
        Ok(self.static_definitions.contains_key(name))
    }

    /// 既知の定義名一覧（永続化 + 静的、名前順）
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = self.backend.list_keys()?;
        for name in self.static_definitions.keys() {
            names.push(name.clone());
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// すべての定義を読み込み（名前の衝突時は永続化側が優先）
    pub fn all(&self) -> Result<Vec<ImportDefinition>> {
        self.names()?
            .iter()
            .map(|name| self.load(name))
            .collect()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

#[cfg(test)]
#[path = "store_proptests.rs"]
mod proptests;
