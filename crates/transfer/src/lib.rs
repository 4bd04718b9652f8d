//! Byte-level plumbing for direct uploads.
//!
//! - [`UploadProgress`] / [`ProgressCounter`]: percentage arithmetic
//! - [`FileStream`]: chunked async file reader that reports progress
//! - [`validate_folder_name`]: local check applied before any folder request

mod chunked;
mod progress;
mod validation;

pub use chunked::FileStream;
pub use progress::{ProgressCounter, UploadProgress};
pub use validation::{MAX_FOLDER_NAME_LEN, validate_folder_name};

/// Default read size for streamed uploads: 256 KiB.
///
/// Small enough that progress callbacks fire several times for typical
/// documents and images.
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid folder name: {0}")]
    InvalidFolderName(String),
}
