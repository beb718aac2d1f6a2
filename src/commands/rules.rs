//! datadef rules コマンド
//!
//! マッピング行の interpreterConfig に格納されたインポートルールを
//! エディタセッション経由で表示・編集する。編集の永続化は
//! 完了コールバック（RuleInterpreter）が定義のマッピングへ書き戻す。

use crate::commands::open_store;
use crate::definition::{ImportDefinition, ImportMapping};
use crate::editor::{EditorSession, FormPane, RuleInterpreter, RuleRecord};
use crate::error::Result as StoreResult;
use crate::output::CommandSummary;
use crate::store::DefinitionStore;
use clap::Parser;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::PathBuf;

/// interpreterConfig 内でルール一覧を保持するキー
const RULES_KEY: &str = "rules";

#[derive(Debug, Parser)]
pub struct Args {
    /// 定義名
    pub name: String,

    /// 対象マッピング行（toColumn で指定）
    #[arg(long, short = 'm')]
    pub mapping: String,

    /// 反映するルール一覧を記述したYAMLファイル（省略時は現在のルールを表示）
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

/// ルール編集エントリ（YAMLファイルの1要素）
#[derive(Debug, Deserialize)]
struct RuleEdit {
    /// 既存ルールを編集する場合のid（省略時は新規作成）
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    conditions: Vec<Value>,
    #[serde(default)]
    actions: Vec<Value>,
}

fn default_active() -> bool {
    true
}

pub fn run(args: Args) -> Result<(), String> {
    // 1. ストアを開いて定義を読み込み
    let store = open_store()?;
    let mut definition = store.load(&args.name).map_err(|e| e.to_string())?;

    // 2. 対象マッピング行を特定
    let index = definition
        .mapping
        .iter()
        .position(|m| m.to_column.as_deref() == Some(args.mapping.as_str()))
        .ok_or_else(|| {
            format!(
                "Mapping with toColumn '{}' not found in definition '{}'",
                args.mapping, args.name
            )
        })?;

    // 3. 現在のルールをエディタセッションへ
    let records = load_rules(&definition.mapping[index]);

    let Some(path) = &args.file else {
        print_rules(&records);
        return Ok(());
    };

    let mut session = EditorSession::new(records);

    // 4. 編集エントリをペインとして開く
    let edits = read_edit_file(path)?;
    let applied = edits.len();
    for edit in edits {
        apply_edit(&mut session, edit)?;
    }

    // 5. 保存パイプライン → マッピング行へ書き戻し
    let mut sink = MappingRuleSink {
        store: &store,
        definition: &mut definition,
        index,
        result: Ok(()),
    };

    if !session.save(&mut sink) {
        let summary = CommandSummary::format(0, session.invalid_count());
        println!("{} {}", summary.prefix, summary.message);
        return Err("Rule validation failed, nothing was saved.".to_string());
    }

    sink.result.map_err(|e| e.to_string())?;

    let summary = CommandSummary::format(applied, 0);
    println!("{} {}", summary.prefix, summary.message);

    Ok(())
}

/// マッピング行の interpreterConfig からルールレコードを取り出す
fn load_rules(mapping: &ImportMapping) -> Vec<RuleRecord> {
    mapping
        .interpreter_config
        .as_ref()
        .and_then(|config| config.get(RULES_KEY))
        .and_then(Value::as_sequence)
        .map(|rules| rules.iter().filter_map(RuleRecord::from_bag).collect())
        .unwrap_or_default()
}

fn read_edit_file(path: &PathBuf) -> Result<Vec<RuleEdit>, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_yaml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// 編集エントリをセッションに反映
///
/// id付きは既存レコードのペインを編集後の内容で開き、
/// id無しは新規レコードを追加してから同様に開く。
fn apply_edit(session: &mut EditorSession, edit: RuleEdit) -> Result<(), String> {
    let id = match edit.id {
        Some(id) => {
            if !session.records().iter().any(|r| r.id == id) {
                return Err(format!("Unknown rule id '{}'", id));
            }
            id
        }
        None => session.add_item(&edit.name),
    };

    let record = RuleRecord {
        id: id.clone(),
        name: edit.name,
        active: edit.active,
        conditions: edit.conditions,
        actions: edit.actions,
    };
    session.open_pane(&id, Box::new(FormPane::new(record)));

    Ok(())
}

fn print_rules(records: &[RuleRecord]) {
    if records.is_empty() {
        println!("No rules configured");
        return;
    }

    for record in records {
        let marker = if record.active { "●" } else { "○" };
        println!(
            "{} {} ({} condition(s), {} action(s))",
            marker,
            record.name,
            record.conditions.len(),
            record.actions.len()
        );
    }
    println!("\n{} rule(s)", records.len());
}

/// 完了コールバック: ルール値列をマッピング行へ書き戻して保存
struct MappingRuleSink<'a> {
    store: &'a DefinitionStore,
    definition: &'a mut ImportDefinition,
    index: usize,
    result: StoreResult<()>,
}

impl RuleInterpreter for MappingRuleSink<'_> {
    fn close(&mut self, values: Vec<Value>) {
        let mapping = &mut self.definition.mapping[self.index];

        let mut config = match mapping.interpreter_config.take() {
            Some(Value::Mapping(m)) => m,
            _ => Mapping::new(),
        };
        config.insert(
            Value::String(RULES_KEY.to_string()),
            Value::Sequence(values),
        );
        mapping.interpreter_config = Some(Value::Mapping(config));

        self.result = self.store.save(self.definition);
    }
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
