/// Errors that can occur within the storage layer.
///
/// # Examples
///
/// ```rust
/// use callscope_storage::error::StorageError;
///
/// let err = StorageError::InvalidValue {
///     field: "low_score_threshold",
///     value: "12.5".to_string(),
/// };
/// assert!(err.to_string().contains("low_score_threshold"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An underlying database error.
    #[error("Storage: database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// JSON serialization or deserialization failure (e.g. the
    /// risk_words_detected column).
    #[error("Storage: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A caller-supplied value failed validation at the storage boundary.
    #[error("Storage: invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
