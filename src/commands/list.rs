//! datadef list コマンド
//!
//! 永続化済みと静的宣言をマージした定義一覧を表示する。

use crate::commands::open_store;
use crate::definition::{record, ImportDefinition};
use chrono::DateTime;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Debug, Parser)]
pub struct Args {
    /// Output in JSON format
    #[arg(long, conflicts_with = "simple")]
    pub json: bool,

    /// Output only definition names
    #[arg(long, conflicts_with = "json")]
    pub simple: bool,
}

pub fn run(args: Args) -> Result<(), String> {
    // 1. ストアを開いて全定義を取得
    let store = open_store()?;
    let definitions = store.all().map_err(|e| e.to_string())?;

    // 2. 出力
    if args.json {
        print_json(&definitions)?;
    } else if args.simple {
        print_simple(&definitions);
    } else {
        print_table(&definitions);
    }

    Ok(())
}

fn print_json(definitions: &[ImportDefinition]) -> Result<(), String> {
    let records: Vec<_> = definitions.iter().map(record::project).collect();
    let json = serde_json::to_string_pretty(&records).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn print_simple(definitions: &[ImportDefinition]) {
    for definition in definitions {
        println!("{}", definition.name());
    }
    println!("\n{} definition(s)", definitions.len());
}

fn print_table(definitions: &[ImportDefinition]) {
    if definitions.is_empty() {
        println!("No definitions found");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Provider", "Class", "Source", "Modified"]);

    for definition in definitions {
        table.add_row(vec![
            definition.name().to_string(),
            definition.provider.clone().unwrap_or_default(),
            definition.class.clone().unwrap_or_default(),
            source_label(definition).to_string(),
            format_date(definition.modification_date()),
        ]);
    }

    println!("{table}");
    println!("\n{} definition(s)", definitions.len());
}

fn source_label(definition: &ImportDefinition) -> &'static str {
    if definition.writeable() {
        "store"
    } else {
        "config"
    }
}

fn format_date(ts: Option<i64>) -> String {
    ts.and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
