//! Data types for the upload flow.

use std::fmt;
use std::path::PathBuf;

use dropzone_transfer::UploadProgress;

/// Session-scoped identity of a selected file.
///
/// Assigned in selection order and never reused within a session, so two
/// files with the same name and size are still tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Content-derived `(name, size)` key. Only used to spot likely duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileFingerprint {
    pub name: String,
    pub size: u64,
}

/// A file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub id: FileId,
    pub path: PathBuf,
    /// Name sent to the storage provider (the path's file name).
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn fingerprint(&self) -> FileFingerprint {
        FileFingerprint {
            name: self.name.clone(),
            size: self.size,
        }
    }

    /// Whether the file looks like an image, judging by its extension.
    pub fn is_image(&self) -> bool {
        const IMAGE_EXTENSIONS: &[&str] = &[
            "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "svg", "avif", "heic",
        ];
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Terminal outcome of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Success {
        remote_id: String,
        remote_url: String,
    },
    Failure {
        message: String,
    },
    /// The batch was cancelled before or while this file was sent.
    Cancelled,
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Success { .. })
    }
}

/// Upload state of one selected file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileUploadState {
    pub is_uploading: bool,
    pub progress: UploadProgress,
    pub result: Option<UploadResult>,
}

impl FileUploadState {
    /// State of a freshly selected file.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Not uploading and holding a result.
    pub fn is_processed(&self) -> bool {
        !self.is_uploading && self.result.is_some()
    }

    pub fn is_succeeded(&self) -> bool {
        self.result.as_ref().is_some_and(UploadResult::is_success)
    }
}

/// Event emitted by the orchestrator as files move through the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    Started {
        file_id: FileId,
        name: String,
    },
    Progress {
        file_id: FileId,
        progress: UploadProgress,
    },
    Succeeded {
        file_id: FileId,
        remote_id: String,
        remote_url: String,
    },
    Failed {
        file_id: FileId,
        message: String,
    },
    Cancelled {
        file_id: FileId,
    },
    /// The whole batch is done.
    Finished(UploadSummary),
}

/// Outcome counts of one `upload_all` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    /// Files already uploaded by an earlier run.
    pub skipped: usize,
}

impl UploadSummary {
    /// Files attempted in this run.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed + self.cancelled
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.cancelled > 0
    }

    pub(crate) fn record(&mut self, result: &UploadResult) {
        match result {
            UploadResult::Success { .. } => self.succeeded += 1,
            UploadResult::Failure { .. } => self.failed += 1,
            UploadResult::Cancelled => self.cancelled += 1,
        }
    }
}
