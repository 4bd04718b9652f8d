//! Multi-file signed upload flow.
//!
//! Files picked for one folder are uploaded one at a time: each file first
//! gets a short-lived signature from the backend, then goes straight to the
//! storage provider. Per-file state is tracked for the UI.
//!
//! This crate has no HTTP dependency. The app provides [`SignatureSource`]
//! and [`UploadTransport`] implementations over its clients.
//!
//! # Flow
//!
//! 1. **Select**: build a [`FileSelection`], each file with a fresh [`FileId`]
//! 2. **Sign**: request a signature scoped to the folder
//! 3. **Upload**: stream the file, forwarding progress to the tracker
//! 4. **Record**: store the terminal result; a failure never stops the batch

pub mod error;
pub mod orchestrator;
pub mod queue;
pub mod selection;
pub mod session;
pub mod state;
pub mod tracker;
pub mod transport;
pub mod types;

pub use error::UploadError;
pub use orchestrator::UploadOrchestrator;
pub use queue::{QueueError, UploadQueue};
pub use selection::FileSelection;
pub use session::UploadSession;
pub use state::{TrackerEvent, transition};
pub use tracker::UploadTracker;
pub use transport::{ProgressSender, SignatureSource, UploadTransport};
pub use types::{
    FileFingerprint, FileId, FileUploadState, SelectedFile, UploadEvent, UploadResult,
    UploadSummary,
};
