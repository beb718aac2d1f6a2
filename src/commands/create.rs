//! datadef create コマンド
//!
//! フラグまたはYAMLファイルから定義を組み立てて保存する。

use crate::commands::open_store;
use crate::definition::{record, validate_name, DefinitionRecord, ImportDefinition};
use clap::Parser;
use owo_colors::OwoColorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// 定義名
    pub name: String,

    /// プロバイダ名
    #[arg(long)]
    pub provider: Option<String>,

    /// 対象クラス名
    #[arg(long)]
    pub class: Option<String>,

    /// オブジェクト配置パス
    #[arg(long = "object-path")]
    pub object_path: Option<String>,

    /// 定義本体を記述したYAMLファイル
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// 既存の定義を上書き
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: Args) -> Result<(), String> {
    // 1. 名前の検証
    validate_name(&args.name).map_err(|e| e.to_string())?;

    // 2. ストアを開く
    let store = open_store()?;

    // 3. 上書きチェック（name はストア内で一意）
    let existing = match store.load(&args.name) {
        Ok(definition) => Some(definition),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.to_string()),
    };
    if existing.is_some() && !args.force {
        return Err(format!(
            "Definition '{}' already exists. Use --force to overwrite.",
            args.name
        ));
    }

    // 4. 定義を組み立て
    let mut definition = build_definition(&args)?;

    // 上書き時は作成日時を引き継ぐ（初回保存時に一度だけ設定される値）
    if definition.creation_date().is_none() {
        if let Some(ts) = existing.as_ref().and_then(|d| d.creation_date()) {
            definition.set_creation_date(ts);
        }
    }

    // 5. 保存
    store.save(&mut definition).map_err(|e| e.to_string())?;

    println!(
        "{} Definition '{}' saved.",
        "✓".green(),
        definition.name()
    );

    Ok(())
}

fn build_definition(args: &Args) -> Result<ImportDefinition, String> {
    let mut definition = match &args.file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            let stored: DefinitionRecord = serde_yaml::from_str(&content)
                .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
            record::hydrate(&stored, &args.name)
        }
        None => ImportDefinition::new(&args.name),
    };

    // フラグはファイルの内容より優先
    if args.provider.is_some() {
        definition.provider = args.provider.clone();
    }
    if args.class.is_some() {
        definition.class = args.class.clone();
    }
    if args.object_path.is_some() {
        definition.object_path = args.object_path.clone();
    }

    Ok(definition)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
