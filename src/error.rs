use crate::envelope::ErrorObject;
use crate::transport::TransportError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpError {
    #[error("the provided token is empty")]
    EmptyToken,

    #[error("failed to set option in client: {0}")]
    InvalidOption(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to marshal data: {0}")]
    Marshal(#[source] serde_json::Error),

    #[error("failed to setup http request: {0}")]
    RequestSetup(#[from] url::ParseError),

    #[error("failed to send http request: {0}")]
    Send(#[source] TransportError),

    #[error("failed to parse response: {0}")]
    ResponseRead(#[source] reqwest::Error),

    #[error("failed to unmarshal data: {0}")]
    Unmarshal(#[source] serde_json::Error),

    #[error("invalid or unexpected response format")]
    InvalidResponse,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl UpError {
    /// HTTP status of an API-level failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Whether repeating the same request could reasonably succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            UpError::Send(_) | UpError::ResponseRead(_) => true,
            UpError::Api(err) => {
                err.status.is_server_error() || err.status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

/// Non-2xx response carrying the error objects reported by the API.
#[derive(Debug, Error)]
#[error(
    "error response returned from API; status_code={}, count={}, errors={}",
    .status.as_u16(),
    .errors.len(),
    self.joined_titles()
)]
pub struct ApiError {
    pub status: StatusCode,
    pub errors: Vec<ErrorObject>,
}

impl ApiError {
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.title.as_str())
    }

    fn joined_titles(&self) -> String {
        self.titles().collect::<Vec<_>>().join(";")
    }
}
