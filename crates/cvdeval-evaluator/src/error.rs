use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("server returned an empty response for evaluation")]
    EmptyResponse,

    #[error("failed to parse evaluator response: {0}")]
    Parse(String),

    #[error("network error: {0}")]
    Network(String),
}
