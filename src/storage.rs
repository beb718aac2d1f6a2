//! ストレージバックエンド抽象化
//!
//! 定義ストアの永続化先を抽象化するレイヤー。YAMLファイル方式と
//! 設定ストア（キー/値）方式の2実装を提供し、テスト時には
//! MockBackend を注入できる。

use crate::definition::record::{CONFIG_KEY, SETTINGS_SCOPE};
use crate::error::{DatadefError, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

mod file;
mod settings_store;

pub use file::FileBackend;
pub use settings_store::SettingsStoreBackend;

/// バックエンドから読み出した生レコード
///
/// `id` はバックエンドが実際に見つけた格納キー。要求した名前と
/// 一致するとは限らない（手編集されたファイル等）。
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub id: String,
    pub data: Mapping,
}

/// ストレージバックエンド契約
///
/// 書き込みはネストパスでラップ済みのドキュメントを受け取り、
/// 読み出しは内側のフィールドバッグを返す。削除の冪等性は
/// バックエンド側の責務。
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// ラップ済みドキュメントを `name` キーで書き込む
    fn write(&self, name: &str, document: &Value) -> Result<()>;

    /// `name` の生データを読み出す（存在しなければ None）
    fn read_raw(&self, name: &str) -> Result<Option<RawRecord>>;

    /// `name` のレコードを削除する（存在しなくても Ok）
    fn delete(&self, name: &str) -> Result<()>;

    /// 格納済みキーの一覧を取得
    fn list_keys(&self) -> Result<Vec<String>>;
}

/// ストレージ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageKind {
    /// 定義ごとに1つのYAMLファイル
    Yaml,
    /// 単一のキー/値ストアファイル
    SettingsStore,
}

/// バックエンドごとの追加パラメータ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// ストレージ記述子（storage-type → backend parameters）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteTarget {
    #[serde(rename = "type")]
    pub kind: StorageKind,
    #[serde(default)]
    pub options: TargetOptions,
}

/// 記述子からバックエンドを構築
pub fn open(target: &WriteTarget) -> Result<Box<dyn StorageBackend>> {
    match target.kind {
        StorageKind::Yaml => {
            let directory = target.options.directory.clone().ok_or_else(|| {
                DatadefError::Configuration(
                    "Storage type \"yaml\" requires options.directory".to_string(),
                )
            })?;
            Ok(Box::new(FileBackend::new(directory)))
        }
        StorageKind::SettingsStore => {
            let file = target.options.file.clone().ok_or_else(|| {
                DatadefError::Configuration(
                    "Storage type \"settings-store\" requires options.file".to_string(),
                )
            })?;
            Ok(Box::new(SettingsStoreBackend::new(file)))
        }
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<B> {
    fn write(&self, name: &str, document: &Value) -> Result<()> {
        (**self).write(name, document)
    }

    fn read_raw(&self, name: &str) -> Result<Option<RawRecord>> {
        (**self).read_raw(name)
    }

    fn delete(&self, name: &str) -> Result<()> {
        (**self).delete(name)
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        (**self).list_keys()
    }
}

/// ラップ済みドキュメントから内側のバッグを取り出す
///
/// `name` キーを優先し、一致しない場合は最初のエントリを
/// そのキーをidとして返す。パスが欠けていれば None。
pub(crate) fn unwrap_document(document: &Value, name: &str) -> Option<RawRecord> {
    let definitions = document
        .get(SETTINGS_SCOPE)?
        .get(CONFIG_KEY)?
        .as_mapping()?;

    if let Some(Value::Mapping(bag)) = definitions.get(name) {
        return Some(RawRecord {
            id: name.to_string(),
            data: bag.clone(),
        });
    }

    let (key, value) = definitions.iter().next()?;
    Some(RawRecord {
        id: key.as_str()?.to_string(),
        data: value.as_mapping()?.clone(),
    })
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
