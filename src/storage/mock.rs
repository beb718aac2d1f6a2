//! テスト用モックストレージバックエンド

use super::{unwrap_document, RawRecord, StorageBackend};
use crate::error::Result;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// テスト用インメモリバックエンド
///
/// 格納キーごとに (id, bag) を保持する。`insert_with_id` で
/// 要求名と異なるidを仕込み、識別子の優先順位を検証できる。
#[derive(Debug)]
pub struct MockBackend {
    records: RwLock<BTreeMap<String, (String, Mapping)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// バッグを直接追加
    pub fn insert(&self, name: &str, bag: Mapping) {
        self.insert_with_id(name, name, bag);
    }

    /// 格納キーと異なるidでバッグを追加
    pub fn insert_with_id(&self, name: &str, id: &str, bag: Mapping) {
        self.records
            .write()
            .unwrap()
            .insert(name.to_string(), (id.to_string(), bag));
    }

    /// レコードが存在するか
    pub fn contains(&self, name: &str) -> bool {
        self.records.read().unwrap().contains_key(name)
    }

    /// 格納済みのバッグを取得
    pub fn stored_bag(&self, name: &str) -> Option<Mapping> {
        self.records
            .read()
            .unwrap()
            .get(name)
            .map(|(_, bag)| bag.clone())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MockBackend {
    fn write(&self, name: &str, document: &Value) -> Result<()> {
        let raw = unwrap_document(document, name).ok_or_else(|| {
            crate::error::DatadefError::Validation(format!(
                "Malformed storage document for \"{}\"",
                name
            ))
        })?;
        self.records
            .write()
            .unwrap()
            .insert(name.to_string(), (name.to_string(), raw.data));
        Ok(())
    }

    fn read_raw(&self, name: &str) -> Result<Option<RawRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .get(name)
            .map(|(id, bag)| RawRecord {
                id: id.clone(),
                data: bag.clone(),
            }))
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.records.write().unwrap().remove(name);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.records.read().unwrap().keys().cloned().collect())
    }
}
