use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend rejected request: {0}")]
    Rejected(String),

    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),

    #[error("session refresh failed: {0}")]
    Session(String),
}
