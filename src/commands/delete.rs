//! datadef delete コマンド

use crate::commands::open_store;
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::{self, Write};

#[derive(Debug, Parser)]
pub struct Args {
    /// 定義名
    pub name: String,

    /// 確認プロンプトをスキップ
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub fn run(args: Args) -> Result<(), String> {
    // 1. 事前チェック: 定義の存在確認
    let store = open_store()?;
    let definition = store.load(&args.name).map_err(|e| e.to_string())?;

    // 2. 静的宣言はこのストアからは削除できない
    if !definition.writeable() {
        return Err(format!(
            "Definition '{}' is declared in the bundle config and cannot be deleted here.",
            args.name
        ));
    }

    // 3. 確認プロンプト（--force でスキップ）
    if !args.force && !confirm_delete(&args.name)? {
        println!("Delete cancelled.");
        return Ok(());
    }

    // 4. 削除実行
    store.delete(&args.name).map_err(|e| e.to_string())?;

    println!("{} Definition '{}' deleted.", "✓".green(), args.name);

    Ok(())
}

/// 削除確認プロンプト
fn confirm_delete(name: &str) -> Result<bool, String> {
    print!("Delete definition '{}'? [y/N]: ", name);
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
