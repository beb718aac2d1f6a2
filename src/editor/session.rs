use super::pane::{DetailPane, FormPane};
use super::RuleRecord;
use serde_yaml::Value;
use std::collections::HashMap;

/// 保存完了コールバック
///
/// エディタからホストへの唯一の出口。値の永続化先（定義のマッピング等）は
/// 実装側が決める。
pub trait RuleInterpreter {
    fn close(&mut self, values: Vec<Value>);
}

/// エディタセッション
///
/// レコード一覧と、レコードidをキーに開かれた詳細ペインを保持する。
pub struct EditorSession {
    records: Vec<RuleRecord>,
    panes: HashMap<String, Box<dyn DetailPane>>,
}

impl EditorSession {
    pub fn new(records: Vec<RuleRecord>) -> Self {
        Self {
            records,
            panes: HashMap::new(),
        }
    }

    /// レコード一覧（表示順）
    pub fn records(&self) -> &[RuleRecord] {
        &self.records
    }

    /// 開いているペイン数
    pub fn open_count(&self) -> usize {
        self.panes.len()
    }

    /// 検証に失敗するペイン数
    pub fn invalid_count(&self) -> usize {
        self.panes.values().filter(|pane| !pane.is_valid()).count()
    }

    /// レコードの詳細ペインを開く
    ///
    /// 既に開いていれば前面化のみ。未知のidなら false。
    pub fn open_item(&mut self, id: &str) -> bool {
        if let Some(pane) = self.panes.get_mut(id) {
            pane.activate();
            return true;
        }

        let Some(record) = self.records.iter().find(|r| r.id == id) else {
            return false;
        };

        self.panes
            .insert(id.to_string(), Box::new(FormPane::new(record.clone())));
        true
    }

    /// 任意のペイン実装でレコードを開く
    pub fn open_pane(&mut self, id: &str, pane: Box<dyn DetailPane>) {
        self.panes.insert(id.to_string(), pane);
    }

    /// 新しいレコードを追加してペインを開く
    ///
    /// idはランダムなUUID v4（衝突チェックなし）。
    pub fn add_item(&mut self, name: &str) -> String {
        let record = RuleRecord::new(name);
        let id = record.id.clone();
        self.records.push(record);
        self.open_item(&id);
        id
    }

    /// レコードを削除
    ///
    /// 開いているペインの破棄と一覧からの除去を一度に行う。確認は挟まない。
    pub fn delete_item(&mut self, id: &str) {
        self.panes.remove(id);
        self.records.retain(|r| r.id != id);
    }

    /// 保存パイプライン: 検証 → 収集 → コールバック
    ///
    /// 開いている全ペインを検証し、1つでも不正なら何も書かずに
    /// false を返す（コールバックは呼ばれない）。全て有効なら
    /// レコード順の値リストを組み立て、開いているペインのデータで
    /// 上書きしてから `interpreter.close` に渡す。
    pub fn save(&mut self, interpreter: &mut dyn RuleInterpreter) -> bool {
        if self.panes.values().any(|pane| !pane.is_valid()) {
            return false;
        }

        let mut values: Vec<(String, Value)> = self
            .records
            .iter()
            .map(|record| (record.id.clone(), record.to_bag()))
            .collect();

        for (id, pane) in &self.panes {
            if let Some(slot) = values.iter_mut().find(|(record_id, _)| record_id == id) {
                slot.1 = pane.save_data();
            }
        }

        interpreter.close(values.into_iter().map(|(_, value)| value).collect());
        true
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
