use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("load failed after storing {stored} records: {message}")]
    LoadFailed { stored: usize, message: String },

    #[error("archive failed: {0}")]
    ArchiveFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EtlError>;
