//! datadef show コマンド

use crate::commands::open_store;
use crate::definition::record;
use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// 定義名
    pub name: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: Args) -> Result<(), String> {
    // 1. 定義を読み込み
    let store = open_store()?;
    let definition = store.load(&args.name).map_err(|e| e.to_string())?;

    // 2. 許可リスト射影を表示（保存される形と同じ内容）
    let record = record::project(&definition);

    if args.json {
        let json = serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        let yaml = serde_yaml::to_string(&record).map_err(|e| e.to_string())?;
        print!("{yaml}");
    }

    Ok(())
}
