//! Async HTTP clients for the two remote parties of an upload.
//!
//! - [`BackendClient`]: folder listing, admin folder CRUD and upload signing
//! - [`StorageClient`]: signed multipart upload straight to the storage
//!   provider, with byte-level progress

pub mod backend;
pub mod error;
pub mod storage;

#[cfg(test)]
mod mock;

pub use backend::BackendClient;
pub use error::ClientError;
pub use storage::StorageClient;
