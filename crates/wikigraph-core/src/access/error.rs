use thiserror::Error;

/// Errors raised by an access-control authority.
///
/// Any of these aborts the graph build; access is never granted by default
/// when the authority cannot answer.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Access authority unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid access authority response: {0}")]
    InvalidResponse(String),

    #[error("Access authority setup failed: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for AccessError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AccessError::InvalidResponse(err.to_string())
        } else {
            AccessError::Unreachable(err.to_string())
        }
    }
}
