//! 定義ルールエディタ
//!
//! ルールレコードの一覧と、レコードidをキーに開かれた詳細ペインを
//! 明示的な状態として持つエディタセッション。保存は
//! 検証 → 収集 → 完了コールバックの単一パイプラインで行い、
//! 永続化そのものはホスト側（`RuleInterpreter` 実装）に委譲する。

mod model;
mod pane;
mod session;

pub use model::RuleRecord;
pub use pane::{DetailPane, FormPane};
pub use session::{EditorSession, RuleInterpreter};
