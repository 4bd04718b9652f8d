//! Seams between the orchestrator and the network.
//!
//! The binary implements these on top of the HTTP clients. Tests use
//! in-memory mocks.

use std::future::Future;
use std::pin::Pin;

use dropzone_protocol::{StoredAsset, UploadSignature};
use dropzone_transfer::UploadProgress;
use tokio::sync::mpsc;

use crate::error::UploadError;
use crate::types::SelectedFile;

/// Channel the transport reports byte progress on, in send order.
pub type ProgressSender = mpsc::UnboundedSender<UploadProgress>;

/// Obtains a short-lived upload signature scoped to one folder.
pub trait SignatureSource: Send + Sync {
    fn request_signature(
        &self,
        folder: &str,
    ) -> Pin<Box<dyn Future<Output = Result<UploadSignature, UploadError>> + Send + '_>>;
}

/// Sends one file straight to the storage provider.
pub trait UploadTransport: Send + Sync {
    /// Uploads `file` with a signature obtained for its folder.
    ///
    /// Progress reports must carry non-decreasing `loaded`. The final report
    /// need not reach 100%.
    fn upload<'a>(
        &'a self,
        file: &'a SelectedFile,
        signature: &'a UploadSignature,
        progress: ProgressSender,
    ) -> Pin<Box<dyn Future<Output = Result<StoredAsset, UploadError>> + Send + 'a>>;
}
