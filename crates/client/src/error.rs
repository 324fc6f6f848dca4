//! Transport error surface.

use thiserror::Error;

use expodesk_listing::FetchError;

/// Failure of one API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The response body could not be decoded.
    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

/// Map into the listing crate's storable error shape.
impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) => FetchError::Network(e.to_string()),
            ApiError::Status { status, .. } => FetchError::Status(status),
            ApiError::Decode { message, .. } => FetchError::Decode(message),
        }
    }
}
