use crate::cli::Command;
use crate::config::BundleConfig;
use crate::store::DefinitionStore;

pub mod create;
pub mod delete;
pub mod list;
pub mod rules;
pub mod show;

pub fn dispatch(cli: crate::cli::Cli) -> Result<(), String> {
    match cli.command {
        Command::List(args) => list::run(args),
        Command::Show(args) => show::run(args),
        Command::Create(args) => create::run(args),
        Command::Delete(args) => delete::run(args),
        Command::Rules(args) => rules::run(args),
    }
}

/// バンドル設定からストアを開く共通処理
pub(crate) fn open_store() -> Result<DefinitionStore, String> {
    let config = BundleConfig::load().map_err(|e| e.to_string())?;
    DefinitionStore::configure(config.storage(), config.container()).map_err(|e| e.to_string())
}
