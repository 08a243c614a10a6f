use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no config directory found")]
    NoConfigDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
