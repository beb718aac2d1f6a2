//! インポート定義モデル
//!
//! インポート定義（ImportDefinition）とマッピング（ImportMapping）の
//! 型付きモデル、および永続化形状（DefinitionRecord）を提供する。

mod mapping;
mod model;
pub mod record;

pub use mapping::ImportMapping;
pub use model::{validate_name, ImportDefinition};
pub use record::DefinitionRecord;
