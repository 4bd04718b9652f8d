//! Client error types.

/// Errors from the backend and storage clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session token missing locally or rejected with 401/403.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Backend returned a failure envelope or a non-success status.
    #[error("{0}")]
    Backend(String),

    /// Storage provider refused the upload; the text is the provider's own.
    #[error("{0}")]
    Rejected(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Transfer(#[from] dropzone_transfer::TransferError),
}

impl ClientError {
    /// True when the error came from local input validation, before any
    /// request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::Transfer(dropzone_transfer::TransferError::InvalidFolderName(_))
        )
    }
}
