//! One upload dialog: a target folder, a selection, and its tracked state.
//!
//! Closing is refused while a file is uploading. A closed or reset session
//! forgets every tracked state.

use std::path::Path;

use dropzone_protocol::Folder;
use tracing::debug;

use crate::error::UploadError;
use crate::orchestrator::UploadOrchestrator;
use crate::selection::FileSelection;
use crate::tracker::UploadTracker;
use crate::types::{FileId, FileUploadState, SelectedFile, UploadSummary};

pub struct UploadSession {
    folder: Folder,
    selection: FileSelection,
    tracker: UploadTracker,
}

impl UploadSession {
    pub fn new(folder: Folder) -> Self {
        Self {
            folder,
            selection: FileSelection::new(),
            tracker: UploadTracker::new(),
        }
    }

    /// Adds files to the selection and starts tracking them.
    pub fn add_files<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Vec<FileId>, UploadError> {
        let ids = self.selection.add_paths(paths)?;
        self.track(&ids);
        Ok(ids)
    }

    /// Adds every file under `root`.
    pub fn add_dir(&mut self, root: &Path) -> Result<Vec<FileId>, UploadError> {
        let ids = self.selection.add_dir(root)?;
        self.track(&ids);
        Ok(ids)
    }

    /// Removes the file at `index` along with its tracked state.
    ///
    /// Fails with [`UploadError::Busy`] if that file is uploading.
    pub fn remove(&mut self, index: usize) -> Result<Option<SelectedFile>, UploadError> {
        let Some(file) = self.selection.get(index) else {
            return Ok(None);
        };
        if self.tracker.get(file.id).is_some_and(|s| s.is_uploading) {
            return Err(UploadError::Busy);
        }
        let removed = self.selection.remove(index);
        if let Some(file) = &removed {
            self.tracker.remove(file.id);
            debug!(file_id = %file.id, name = %file.name, "file removed from session");
        }
        Ok(removed)
    }

    /// Uploads the selection through `orchestrator`.
    pub async fn start(&mut self, orchestrator: &UploadOrchestrator) -> UploadSummary {
        orchestrator
            .upload_all(&self.folder, &self.selection, &mut self.tracker)
            .await
    }

    pub fn is_busy(&self) -> bool {
        self.tracker.is_busy()
    }

    /// True when the selection is non-empty and every file has a result.
    pub fn all_processed(&self) -> bool {
        !self.selection.is_empty() && self.tracker.all_processed(self.selection.ids())
    }

    pub fn can_close(&self) -> bool {
        !self.is_busy()
    }

    /// Ends the session, discarding the selection and all tracked state.
    pub fn close(&mut self) -> Result<(), UploadError> {
        if self.is_busy() {
            return Err(UploadError::Busy);
        }
        self.reset();
        Ok(())
    }

    /// Clears the selection and tracked state. Ids are not reused.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.tracker.reset();
    }

    pub fn folder(&self) -> &Folder {
        &self.folder
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn state(&self, id: FileId) -> Option<&FileUploadState> {
        self.tracker.get(id)
    }

    pub fn summary(&self) -> UploadSummary {
        self.tracker.summary()
    }

    fn track(&mut self, ids: &[FileId]) {
        for id in ids {
            self.tracker.initialize(*id);
        }
    }
}
