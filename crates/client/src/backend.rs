//! Portal backend client.
//!
//! Async HTTP client using `reqwest`. Every endpoint answers with an
//! [`ApiResponse`] envelope; folder mutations require a Bearer token.

use std::time::Duration;

use dropzone_protocol::{ApiResponse, CreateFolderRequest, Folder, SignUploadRequest, UploadSignature};
use dropzone_transfer::validate_folder_name;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::debug;

use crate::error::ClientError;

/// Default backend location for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3003/api";

/// Message used when a failure carries no backend explanation.
const CONNECTION_ERROR: &str = "could not reach the server";

/// Backend API client.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the folders available for upload.
    pub async fn list_folders(&self) -> Result<Vec<Folder>, ClientError> {
        let req = self.http.get(self.url("/folders"));
        let resp: ApiResponse<Vec<Folder>> = self.send(req).await?;
        let folders = resp
            .into_data("failed to load folders")
            .map_err(ClientError::Backend)?;
        debug!(count = folders.len(), "folders loaded");
        Ok(folders)
    }

    /// Requests a signed upload authorization for `folder`.
    ///
    /// The token is forwarded when present; the backend decides whether
    /// signing needs it.
    pub async fn sign_upload(
        &self,
        folder: &str,
        token: Option<&str>,
    ) -> Result<UploadSignature, ClientError> {
        validate_folder_name(folder)?;

        let mut req = self
            .http
            .post(self.url("/sign-upload"))
            .json(&SignUploadRequest::auto(folder));
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            req = req.bearer_auth(token);
        }

        let resp: ApiResponse<UploadSignature> = self.send(req).await?;
        let signature = resp
            .into_data("failed to get upload signature")
            .map_err(ClientError::Backend)?;
        debug!(folder, timestamp = signature.timestamp, "upload signed");
        Ok(signature)
    }

    /// Creates a folder. Admin only; the name is validated before any
    /// request is made.
    pub async fn create_folder(&self, name: &str, token: &str) -> Result<Folder, ClientError> {
        validate_folder_name(name)?;
        let token = require_token(token)?;

        let req = self
            .http
            .post(self.url("/folders"))
            .bearer_auth(token)
            .json(&CreateFolderRequest { name: name.into() });

        let resp: ApiResponse<Folder> = self.send(req).await?;
        resp.into_data("failed to create folder")
            .map_err(ClientError::Backend)
    }

    /// Deletes a folder and everything in it. Admin only.
    pub async fn delete_folder(&self, name: &str, token: &str) -> Result<(), ClientError> {
        let token = require_token(token)?;
        let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC).to_string();

        let req = self
            .http
            .delete(self.url(&format!("/folders/{encoded}")))
            .bearer_auth(token);

        let resp: ApiResponse<IgnoredAny> = self.send(req).await?;
        resp.into_unit("failed to delete folder")
            .map_err(ClientError::Backend)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Sends a request and decodes the envelope.
    ///
    /// Non-success statuses are turned into errors here, using the
    /// envelope's `error` text when the body has one.
    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let message = envelope_error(&body);
            debug!(status = status.as_u16(), error = ?message, "backend request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(
                    message.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                ),
                _ => ClientError::Backend(message.unwrap_or_else(|| CONNECTION_ERROR.into())),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

fn require_token(token: &str) -> Result<&str, ClientError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ClientError::Unauthorized("missing session token".into()));
    }
    Ok(token)
}

fn envelope_error(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiResponse<IgnoredAny>>(body)
        .ok()
        .and_then(|env| env.error)
}
