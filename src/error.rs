#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    /// A required header is absent; nothing is processed.
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("No data found.")]
    NoData,
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReconResult<T> = Result<T, ReconError>;
