use thiserror::Error;

/// datadef統一エラー型
#[derive(Debug, Error)]
pub enum DatadefError {
    #[error("Import definition with ID \"{0}\" does not exist")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, DatadefError>;

impl DatadefError {
    /// 読み込み対象が存在しないエラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatadefError::NotFound(_))
    }
}
