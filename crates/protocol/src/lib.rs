//! Wire types shared by the dropzone clients.
//!
//! Two remote parties are described here: the portal backend, which wraps
//! every response in an [`ApiResponse`] envelope, and the storage provider,
//! which accepts signed multipart uploads and answers with a bare asset
//! description or an error body.

pub mod envelope;
pub mod types;

// Re-export primary types for convenience.
pub use envelope::ApiResponse;
pub use types::{
    CreateFolderRequest, Folder, RESOURCE_TYPE_AUTO, SIGNED_UPLOAD_FIELDS, SignUploadRequest,
    StorageError, StorageErrorBody, StoredAsset, UploadSignature,
};
