//! datadef: インポート定義の設定管理コンポーネント
//!
//! 名前付きの設定エンティティ「インポート定義」の読み込み・保存・削除を、
//! 差し替え可能なストレージバックエンド（YAMLファイル / 設定ストア）に
//! 対して行う。あわせて、定義ルールを編集するツールキット非依存の
//! エディタセッションと、管理用CLIを提供する。

pub mod cli;
pub mod commands;
pub mod config;
pub mod definition;
pub mod editor;
pub mod env;
pub mod error;
pub mod output;
pub mod storage;
pub mod store;
