//! マッピング行
//!
//! インポート定義に従属する値オブジェクト。親定義が排他的に所有し、
//! 独立したライフサイクルを持たない。

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// マッピング行
///
/// 1つの入力カラムを1つの出力フィールドへ対応付ける変換ルール。
/// `setter_config` / `interpreter_config` は提供側固有の不透明なバッグで、
/// エディタで編集されるインポートルールは `interpreter_config` 配下に置かれる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportMapping {
    #[serde(default)]
    pub from_column: Option<String>,
    #[serde(default)]
    pub to_column: Option<String>,
    #[serde(default)]
    pub primary_identifier: bool,
    #[serde(default)]
    pub setter: Option<String>,
    #[serde(default)]
    pub setter_config: Option<Value>,
    #[serde(default)]
    pub interpreter: Option<String>,
    #[serde(default)]
    pub interpreter_config: Option<Value>,
}

impl ImportMapping {
    /// 生のキー/値バッグから明示的にフィールドを復元
    ///
    /// 未知のキーは無視し、欠損キーは既定値になる。
    pub fn from_bag(bag: &Mapping) -> Self {
        Self {
            from_column: string_field(bag, "fromColumn"),
            to_column: string_field(bag, "toColumn"),
            primary_identifier: bool_field(bag, "primaryIdentifier"),
            setter: string_field(bag, "setter"),
            setter_config: opaque_field(bag, "setterConfig"),
            interpreter: string_field(bag, "interpreter"),
            interpreter_config: opaque_field(bag, "interpreterConfig"),
        }
    }

    /// 全属性をフラットなキー/値バッグへダンプ
    pub fn to_bag(&self) -> Mapping {
        let mut bag = Mapping::new();
        bag.insert(key("fromColumn"), opt_string(&self.from_column));
        bag.insert(key("toColumn"), opt_string(&self.to_column));
        bag.insert(key("primaryIdentifier"), Value::Bool(self.primary_identifier));
        bag.insert(key("setter"), opt_string(&self.setter));
        bag.insert(key("setterConfig"), opt_value(&self.setter_config));
        bag.insert(key("interpreter"), opt_string(&self.interpreter));
        bag.insert(key("interpreterConfig"), opt_value(&self.interpreter_config));
        bag
    }
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

fn string_field(bag: &Mapping, name: &str) -> Option<String> {
    bag.get(name).and_then(Value::as_str).map(String::from)
}

fn bool_field(bag: &Mapping, name: &str) -> bool {
    bag.get(name).and_then(Value::as_bool).unwrap_or(false)
}

fn opaque_field(bag: &Mapping, name: &str) -> Option<Value> {
    match bag.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.clone()),
    }
}

fn opt_string(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::String(s.clone()),
        None => Value::Null,
    }
}

fn opt_value(value: &Option<Value>) -> Value {
    value.clone().unwrap_or(Value::Null)
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
