use clap::{Parser, Subcommand};

use crate::commands::{create, delete, list, rules, show};

#[derive(Debug, Parser)]
#[command(name = "datadef")]
#[command(about = "Import definition manager CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// インポート定義の一覧を表示
    List(list::Args),

    /// 定義の詳細表示
    Show(show::Args),

    /// 定義を作成・更新
    Create(create::Args),

    /// 定義を削除
    Delete(delete::Args),

    /// マッピング行のインポートルールを表示・編集
    Rules(rules::Args),
}
