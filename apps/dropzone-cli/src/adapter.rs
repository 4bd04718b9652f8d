//! Adapters bridging the HTTP clients to the traits required by
//! `dropzone-upload`.
//!
//! The clients report `ClientError`; the orchestrator records
//! `UploadError`. The mapping differs by side: a transport failure talking
//! to the backend means the backend is unavailable, while the same failure
//! talking to storage is a network error on the file itself.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use dropzone_client::{BackendClient, ClientError, StorageClient};
use dropzone_protocol::{StoredAsset, UploadSignature};
use dropzone_transfer::TransferError;
use dropzone_upload::{
    ProgressSender, SelectedFile, SignatureSource, UploadError, UploadTransport,
};

// ---------------------------------------------------------------------------
// Signing adapter
// ---------------------------------------------------------------------------

/// Implements `SignatureSource` by delegating to `BackendClient`.
pub struct SigningAdapter {
    client: Arc<BackendClient>,
    token: Option<String>,
}

impl SigningAdapter {
    pub fn new(client: Arc<BackendClient>, token: Option<String>) -> Self {
        Self { client, token }
    }
}

impl SignatureSource for SigningAdapter {
    fn request_signature(
        &self,
        folder: &str,
    ) -> Pin<Box<dyn Future<Output = Result<UploadSignature, UploadError>> + Send + '_>> {
        let folder = folder.to_string();
        Box::pin(async move {
            self.client
                .sign_upload(&folder, self.token.as_deref())
                .await
                .map_err(backend_error)
        })
    }
}

// ---------------------------------------------------------------------------
// Storage adapter
// ---------------------------------------------------------------------------

/// Implements `UploadTransport` by delegating to `StorageClient`.
pub struct StorageAdapter {
    client: Arc<StorageClient>,
}

impl StorageAdapter {
    pub fn new(client: Arc<StorageClient>) -> Self {
        Self { client }
    }
}

impl UploadTransport for StorageAdapter {
    fn upload<'a>(
        &'a self,
        file: &'a SelectedFile,
        signature: &'a UploadSignature,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<StoredAsset, UploadError>> + Send + 'a>> {
        Box::pin(async move {
            self.client
                .upload(&file.path, &file.name, signature, move |p| {
                    let _ = progress.send(p);
                })
                .await
                .map_err(storage_error)
        })
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Maps errors from the signing and folder endpoints.
pub fn backend_error(err: ClientError) -> UploadError {
    match err {
        ClientError::Unauthorized(msg) => UploadError::Authorization(msg),
        e if e.is_validation() => UploadError::Validation(e.to_string()),
        ClientError::Transfer(TransferError::Io(e)) => UploadError::Io(e),
        ClientError::Backend(msg) => UploadError::BackendUnavailable(msg),
        other => UploadError::BackendUnavailable(other.to_string()),
    }
}

/// Maps errors from the direct storage upload.
pub fn storage_error(err: ClientError) -> UploadError {
    match err {
        ClientError::Rejected(msg) => UploadError::UploadRejected(msg),
        ClientError::Unauthorized(msg) => UploadError::Authorization(msg),
        ClientError::Transfer(TransferError::Io(e)) => UploadError::Io(e),
        ClientError::Http(e) => UploadError::Network(e.to_string()),
        other => UploadError::UploadRejected(other.to_string()),
    }
}
