//! Single-consumer upload queue.
//!
//! At most one file is in flight. Starting the next file before the
//! current one has finished is an error, not a silent overlap.

use std::collections::VecDeque;

use crate::types::FileId;

/// Queue misuse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("file {0} is still in flight")]
    Busy(FileId),

    #[error("file {0} is not the one in flight")]
    NotInFlight(FileId),
}

/// FIFO of files waiting to upload.
#[derive(Debug, Default)]
pub struct UploadQueue {
    pending: VecDeque<FileId>,
    in_flight: Option<FileId>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file to the back of the queue.
    pub fn push(&mut self, id: FileId) {
        self.pending.push_back(id);
    }

    /// Takes the next file and marks it in flight.
    ///
    /// Returns `Ok(None)` when the queue is drained.
    pub fn begin(&mut self) -> Result<Option<FileId>, QueueError> {
        if let Some(current) = self.in_flight {
            return Err(QueueError::Busy(current));
        }
        self.in_flight = self.pending.pop_front();
        Ok(self.in_flight)
    }

    /// Marks `id` as done; it must be the file in flight.
    pub fn finish(&mut self, id: FileId) -> Result<(), QueueError> {
        match self.in_flight {
            Some(current) if current == id => {
                self.in_flight = None;
                Ok(())
            }
            _ => Err(QueueError::NotInFlight(id)),
        }
    }

    /// Removes and returns everything still waiting, leaving any in-flight
    /// file untouched.
    pub fn drain_pending(&mut self) -> Vec<FileId> {
        self.pending.drain(..).collect()
    }

    pub fn in_flight(&self) -> Option<FileId> {
        self.in_flight
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending.is_empty()
    }
}

impl FromIterator<FileId> for UploadQueue {
    fn from_iter<I: IntoIterator<Item = FileId>>(iter: I) -> Self {
        Self {
            pending: iter.into_iter().collect(),
            in_flight: None,
        }
    }
}
