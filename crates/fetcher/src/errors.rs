use thiserror::Error;

/// Batch-level failure: nothing is known about any server.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("status service timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("status service returned HTTP {0}")]
    BadStatus(u16),

    #[error("malformed status response: {0}")]
    DecodeError(String),

    #[error("status service error: {0}")]
    RemoteError(String),
}

// Convert reqwest errors to FetchError
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::DecodeError(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::BadStatus(status.as_u16())
        } else {
            FetchError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::DecodeError(err.to_string())
    }
}
