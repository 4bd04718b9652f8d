use serde::{Deserialize, Serialize};

/// Resource type requested when signing; lets the provider detect it.
pub const RESOURCE_TYPE_AUTO: &str = "auto";

/// Multipart field names of a signed upload, in the order the backend
/// signs them.
pub const SIGNED_UPLOAD_FIELDS: [&str; 5] = ["file", "folder", "timestamp", "api_key", "signature"];

/// A storage folder as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub path: String,
}

/// Short-lived authorization for one direct upload into `folder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSignature {
    pub signature: String,
    pub timestamp: i64,
    pub api_key: String,
    pub cloud_name: String,
    pub folder: String,
}

/// Body of `POST /sign-upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUploadRequest {
    pub folder: String,
    pub resource_type: String,
}

impl SignUploadRequest {
    pub fn auto(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            resource_type: RESOURCE_TYPE_AUTO.into(),
        }
    }
}

/// Body of `POST /folders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
}

/// Successful storage upload response. The provider sends many more
/// fields; only the identity and delivery URL are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub public_id: String,
    pub secure_url: String,
}

/// Error body returned by the storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageErrorBody {
    pub error: StorageError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_uses_snake_case() {
        let json = r#"{
            "signature": "abc123",
            "timestamp": 1700000000,
            "api_key": "key",
            "cloud_name": "demo",
            "folder": "invoices"
        }"#;
        let sig: UploadSignature = serde_json::from_str(json).unwrap();
        assert_eq!(sig.timestamp, 1_700_000_000);
        assert_eq!(sig.cloud_name, "demo");

        let out = serde_json::to_value(&sig).unwrap();
        assert_eq!(out["api_key"], "key");
    }

    #[test]
    fn sign_request_defaults_to_auto() {
        let req = SignUploadRequest::auto("docs");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"folder": "docs", "resource_type": "auto"}));
    }

    #[test]
    fn stored_asset_ignores_extra_fields() {
        let json = r#"{
            "public_id": "docs/report",
            "secure_url": "https://cdn.example.com/docs/report.pdf",
            "bytes": 2048,
            "format": "pdf"
        }"#;
        let asset: StoredAsset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.public_id, "docs/report");
    }

    #[test]
    fn storage_error_body_parses() {
        let json = r#"{"error":{"message":"Invalid Signature"}}"#;
        let body: StorageErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.message, "Invalid Signature");
    }

    #[test]
    fn signed_fields_start_with_file() {
        assert_eq!(SIGNED_UPLOAD_FIELDS[0], "file");
        assert_eq!(SIGNED_UPLOAD_FIELDS.len(), 5);
    }
}
