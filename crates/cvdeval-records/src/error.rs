use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("no authentication token found")]
    NoToken,

    #[error("server returned an empty response")]
    EmptyResponse,

    #[error("failed to parse server response as JSON: {0}")]
    Parse(String),

    #[error("invalid response format from server: {0}")]
    Format(String),

    #[error("records API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}
