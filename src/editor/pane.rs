use super::RuleRecord;
use serde_yaml::Value;

/// 詳細ペイン契約
///
/// `is_valid` は真偽値のみを返し、決してパニックしない。
/// 検証に失敗したペインは開いたまま残り、保存全体が中止される。
pub trait DetailPane {
    /// ペインの編集内容が保存可能か
    fn is_valid(&self) -> bool;

    /// 保存用データをバッグとして取り出す
    fn save_data(&self) -> Value;

    /// 既に開いているペインを前面化する
    fn activate(&mut self) {}
}

/// フォームペイン
///
/// ルールレコードをそのまま編集する標準実装。
#[derive(Debug, Clone)]
pub struct FormPane {
    record: RuleRecord,
}

impl FormPane {
    pub fn new(record: RuleRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &RuleRecord {
        &self.record
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.name = name.into();
    }

    pub fn set_active(&mut self, active: bool) {
        self.record.active = active;
    }

    pub fn set_conditions(&mut self, conditions: Vec<Value>) {
        self.record.conditions = conditions;
    }

    pub fn set_actions(&mut self, actions: Vec<Value>) {
        self.record.actions = actions;
    }
}

impl DetailPane for FormPane {
    fn is_valid(&self) -> bool {
        !self.record.id.is_empty() && !self.record.name.trim().is_empty()
    }

    fn save_data(&self) -> Value {
        self.record.to_bag()
    }
}

#[cfg(test)]
#[path = "pane_test.rs"]
mod tests;
