use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use uuid::Uuid;

/// ルールレコード
///
/// エディタが扱う1件のインポートルール。条件・アクションは
/// 提供側固有の不透明なバッグの列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: String,
    pub name: String,
    pub active: bool,
    #[serde(default)]
    pub conditions: Vec<Value>,
    #[serde(default)]
    pub actions: Vec<Value>,
}

impl RuleRecord {
    /// 新しいレコードを作成（idはランダムなUUID v4）
    ///
    /// 衝突チェックは行わない。一意性は統計的に保証されるものとして扱う。
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            active: true,
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// キー/値バッグへ変換
    pub fn to_bag(&self) -> Value {
        serde_yaml::to_value(self).unwrap_or(Value::Mapping(Mapping::new()))
    }

    /// キー/値バッグから復元（バッグ形状でなければ None）
    pub fn from_bag(value: &Value) -> Option<Self> {
        if !value.is_mapping() {
            return None;
        }
        serde_yaml::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
