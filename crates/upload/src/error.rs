//! Upload error types.

use crate::types::FileId;

/// Errors produced while uploading.
///
/// Per-file failures end up as the message of an
/// [`UploadResult::Failure`](crate::types::UploadResult::Failure); they never
/// abort the rest of a batch.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Missing or rejected session token.
    #[error("please sign in: {0}")]
    Authorization(String),

    /// Bad input caught locally; no request was made.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Signing or folder backend unreachable, or it sent a failure envelope.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Storage provider refused the file.
    #[error("{0}")]
    UploadRejected(String),

    /// Transport failure while sending the file.
    #[error("network error: {0}")]
    Network(String),

    /// State requested for an id that was never initialized.
    #[error("unknown file: {0}")]
    UnknownFile(FileId),

    /// Operation refused while a file is uploading.
    #[error("an upload is in progress")]
    Busy,

    #[error("cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Text recorded in a file's failure result.
    ///
    /// Remote errors keep their original wording, so a provider message is
    /// shown verbatim.
    pub fn failure_message(&self) -> String {
        match self {
            UploadError::Authorization(msg)
            | UploadError::BackendUnavailable(msg)
            | UploadError::UploadRejected(msg)
            | UploadError::Network(msg)
            | UploadError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
