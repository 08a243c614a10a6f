use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("please enter the patient's name")]
    MissingName,

    #[error("please enter a valid age for the patient")]
    InvalidAge,

    #[error("invalid gender code: {0}")]
    InvalidGender(String),

    #[error("please provide an evaluation transcript by recording audio or typing notes")]
    EmptyTranscript,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
