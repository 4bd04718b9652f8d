//! Direct upload to the storage provider.
//!
//! The file bytes never pass through the backend: the client posts a
//! multipart body with the file and the signed fields to
//! `{base}/v1_1/{cloud_name}/upload`.

use std::path::Path;
use std::time::Duration;

use dropzone_protocol::{StorageErrorBody, StoredAsset, UploadSignature};
use dropzone_transfer::{DEFAULT_CHUNK_SIZE, FileStream, UploadProgress};
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::error::ClientError;

/// Default storage provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

/// Storage provider upload client.
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    chunk_size: usize,
}

impl StorageClient {
    /// Creates a client for `base_url`. The timeout covers the whole upload
    /// request, so it should leave room for large files.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Overrides the read size used for streaming (and thus progress granularity).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Upload endpoint for a storage account.
    pub fn upload_url(&self, cloud_name: &str) -> String {
        format!("{}/v1_1/{}/upload", self.base_url, cloud_name)
    }

    /// Uploads the file at `path` under `file_name` using a signature
    /// obtained from the backend.
    ///
    /// `on_progress` runs as the body is streamed, with non-decreasing
    /// `loaded`. The last report is not guaranteed to be exactly 100%.
    pub async fn upload<F>(
        &self,
        path: &Path,
        file_name: &str,
        signature: &UploadSignature,
        on_progress: F,
    ) -> Result<StoredAsset, ClientError>
    where
        F: FnMut(UploadProgress) + Send + 'static,
    {
        let reader = FileStream::open(path, self.chunk_size).await?;
        let length = reader.file_size();
        let body = reqwest::Body::wrap_stream(reader.into_stream(on_progress));

        // Field order matches the order the backend signs in.
        let form = Form::new()
            .part(
                "file",
                Part::stream_with_length(body, length).file_name(file_name.to_string()),
            )
            .text("folder", signature.folder.clone())
            .text("timestamp", signature.timestamp.to_string())
            .text("api_key", signature.api_key.clone())
            .text("signature", signature.signature.clone());

        let url = self.upload_url(&signature.cloud_name);
        debug!(file = file_name, bytes = length, %url, "uploading to storage");

        let resp = self.http.post(&url).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<StorageErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| {
                    format!(
                        "storage provider rejected the upload (HTTP {})",
                        status.as_u16()
                    )
                });
            warn!(file = file_name, status = status.as_u16(), error = %message, "upload rejected");
            return Err(ClientError::Rejected(message));
        }

        let asset: StoredAsset = serde_json::from_slice(&body)?;
        debug!(file = file_name, public_id = %asset.public_id, "upload stored");
        Ok(asset)
    }
}
