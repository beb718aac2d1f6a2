use super::ImportMapping;
use crate::error::DatadefError;
use serde_yaml::Mapping;

/// 名前の最大長
const MAX_NAME_LENGTH: usize = 190;

/// インポート定義
///
/// 外部データを内部ドメインオブジェクトへ対応付ける、名前付きの設定エンティティ。
/// `name` は一度設定したら不変で、ストア内で一意。
/// `writeable` は実行時フィールドであり永続化されない
/// （設定ファイル由来の定義は false、ストア永続化の定義は true）。
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDefinition {
    name: String,
    pub provider: Option<String>,
    pub class: Option<String>,
    pub configuration: Option<Mapping>,
    creation_date: Option<i64>,
    modification_date: Option<i64>,
    pub mapping: Vec<ImportMapping>,
    pub object_path: Option<String>,
    pub cleaner: Option<String>,
    pub key: Option<String>,
    pub rename_existing_objects: bool,
    pub relocate_existing_objects: bool,
    pub filter: Option<String>,
    pub runner: Option<String>,
    pub create_version: bool,
    pub stop_on_exception: bool,
    pub omit_mandatory_check: bool,
    pub failure_notification_document: Option<i64>,
    pub success_notification_document: Option<i64>,
    pub skip_existing_objects: bool,
    pub skip_new_objects: bool,
    pub force_load_object: bool,
    pub loader: Option<String>,
    pub fetcher: Option<String>,
    writeable: bool,
}

impl ImportDefinition {
    /// 新しいインポート定義を作成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: None,
            class: None,
            configuration: None,
            creation_date: None,
            modification_date: None,
            mapping: Vec::new(),
            object_path: None,
            cleaner: None,
            key: None,
            rename_existing_objects: false,
            relocate_existing_objects: false,
            filter: None,
            runner: None,
            create_version: false,
            stop_on_exception: false,
            omit_mandatory_check: false,
            failure_notification_document: None,
            success_notification_document: None,
            skip_existing_objects: false,
            skip_new_objects: false,
            force_load_object: false,
            loader: None,
            fetcher: None,
            writeable: true,
        }
    }

    /// 定義名（ストレージキー）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 作成日時（エポック秒、初回保存時に一度だけ設定される）
    pub fn creation_date(&self) -> Option<i64> {
        self.creation_date
    }

    /// 更新日時（エポック秒、保存のたびに更新される）
    pub fn modification_date(&self) -> Option<i64> {
        self.modification_date
    }

    /// ストア経由で書き戻せる定義かどうか
    pub fn writeable(&self) -> bool {
        self.writeable
    }

    pub(crate) fn set_creation_date(&mut self, ts: i64) {
        self.creation_date = Some(ts);
    }

    pub(crate) fn set_modification_date(&mut self, ts: i64) {
        self.modification_date = Some(ts);
    }

    pub(crate) fn set_writeable(&mut self, writeable: bool) {
        self.writeable = writeable;
    }
}

/// 定義名の検証
pub fn validate_name(name: &str) -> Result<(), DatadefError> {
    if name.is_empty() {
        return Err(DatadefError::Validation("Name cannot be empty".to_string()));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(DatadefError::Validation(format!(
            "Name is too long (max {} characters)",
            MAX_NAME_LENGTH
        )));
    }

    // Character validation: only [A-Za-z0-9._-]
    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '.' && c != '_' && c != '-' {
            return Err(DatadefError::Validation(format!(
                "Invalid character '{}' in name. Only [A-Za-z0-9._-] are allowed.",
                c
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
