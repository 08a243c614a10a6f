use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login failed with status {0}")]
    LoginFailed(u16),

    #[error("{0}")]
    RegistrationFailed(String),

    #[error("no authentication token found")]
    NoToken,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse server response: {0}")]
    Parse(String),

    #[error("session storage error: {0}")]
    Storage(#[from] cvdeval_session::error::SessionError),
}
