use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("microphone access is required for recording")]
    MicPermissionDenied,

    #[error("another operation is in progress")]
    NotIdle,

    #[error("no survey is awaiting answers")]
    NoSurvey,

    #[error("no evaluation data to save; please perform an evaluation first")]
    NothingToSave,

    #[error("authentication token not found; please log in again")]
    NoToken,

    #[error(transparent)]
    Validation(#[from] cvdeval_core::error::CoreError),

    #[error(transparent)]
    Transcription(#[from] cvdeval_transcribe::error::TranscribeError),

    #[error(transparent)]
    Extraction(#[from] cvdeval_evaluator::error::EvaluatorError),

    #[error(transparent)]
    Records(#[from] cvdeval_records::error::RecordsError),

    #[error("no config directory found")]
    NoConfigDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
