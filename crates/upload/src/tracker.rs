//! Per-file upload state container.

use std::collections::HashMap;

use dropzone_transfer::UploadProgress;
use tracing::{debug, trace};

use crate::error::UploadError;
use crate::state::{TrackerEvent, transition};
use crate::types::{FileId, FileUploadState, UploadResult, UploadSummary};

/// Upload state of every file in one session, keyed by [`FileId`].
#[derive(Debug, Default)]
pub struct UploadTracker {
    states: HashMap<FileId, FileUploadState>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an idle entry unless one already exists.
    ///
    /// Re-initializing keeps in-flight and terminal states intact.
    pub fn initialize(&mut self, id: FileId) {
        self.states.entry(id).or_insert_with(FileUploadState::idle);
    }

    /// Marks the start of an upload attempt.
    pub fn mark_started(&mut self, id: FileId) -> Result<(), UploadError> {
        self.apply(id, &TrackerEvent::Started)
    }

    /// Records transport progress.
    ///
    /// Reports for a file that is not uploading, or that would move `loaded`
    /// backwards, leave the state unchanged.
    pub fn update_progress(
        &mut self,
        id: FileId,
        progress: UploadProgress,
    ) -> Result<(), UploadError> {
        let state = self.states.get(&id).ok_or(UploadError::UnknownFile(id))?;
        if !state.is_uploading {
            debug!(file_id = %id, "progress for a file that is not uploading");
        }
        self.apply(id, &TrackerEvent::Progress(progress))
    }

    /// Records the outcome of the current attempt.
    pub fn mark_terminal(&mut self, id: FileId, result: UploadResult) -> Result<(), UploadError> {
        self.apply(id, &TrackerEvent::Finished(result))
    }

    /// Drops the entry for `id`. Returns the removed state, if any.
    pub fn remove(&mut self, id: FileId) -> Option<FileUploadState> {
        self.states.remove(&id)
    }

    /// Clears every entry.
    pub fn reset(&mut self) {
        self.states.clear();
    }

    pub fn get(&self, id: FileId) -> Option<&FileUploadState> {
        self.states.get(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// True while any file is uploading.
    pub fn is_busy(&self) -> bool {
        self.states.values().any(|s| s.is_uploading)
    }

    /// True when every id is tracked, not uploading, and holds a result.
    pub fn all_processed<I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = FileId>,
    {
        ids.into_iter()
            .all(|id| self.states.get(&id).is_some_and(FileUploadState::is_processed))
    }

    /// Counts terminal results across all tracked files.
    pub fn summary(&self) -> UploadSummary {
        let mut summary = UploadSummary::default();
        for result in self.states.values().filter_map(|s| s.result.as_ref()) {
            summary.record(result);
        }
        summary
    }

    fn apply(&mut self, id: FileId, event: &TrackerEvent) -> Result<(), UploadError> {
        let state = self
            .states
            .get_mut(&id)
            .ok_or(UploadError::UnknownFile(id))?;
        *state = transition(state, event);
        trace!(file_id = %id, ?event, "tracker updated");
        Ok(())
    }
}
