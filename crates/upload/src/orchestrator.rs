//! Sequential multi-file upload orchestrator.
//!
//! Drives sign-then-upload for every selected file, one at a time, records
//! each outcome in the tracker, publishes events, and supports cancellation.

use std::sync::{Arc, Mutex};

use dropzone_protocol::Folder;
use dropzone_transfer::UploadProgress;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::error::UploadError;
use crate::queue::UploadQueue;
use crate::selection::FileSelection;
use crate::tracker::UploadTracker;
use crate::transport::{SignatureSource, UploadTransport};
use crate::types::{FileId, SelectedFile, UploadEvent, UploadResult, UploadSummary};

/// Uploads a selection of files into one folder.
pub struct UploadOrchestrator {
    signer: Arc<dyn SignatureSource>,
    transport: Arc<dyn UploadTransport>,
    /// Present once a consumer has taken the receiver.
    events_tx: Option<mpsc::Sender<UploadEvent>>,
    cancel: Mutex<CancellationToken>,
}

impl UploadOrchestrator {
    pub fn new(signer: Arc<dyn SignatureSource>, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            signer,
            transport,
            events_tx: None,
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Takes the event receiver. Can only be called once.
    ///
    /// Without a receiver no events are published.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UploadEvent>> {
        if self.events_tx.is_some() {
            return None;
        }
        let (tx, rx) = mpsc::channel(256);
        self.events_tx = Some(tx);
        Some(rx)
    }

    /// Token that aborts the in-flight file and everything still queued.
    ///
    /// A run that ends cancelled installs a fresh token for the next run;
    /// fetch the token again after that.
    pub fn cancel_token(&self) -> CancellationToken {
        self.current_token().clone()
    }

    fn current_token(&self) -> std::sync::MutexGuard<'_, CancellationToken> {
        self.cancel.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Uploads every file in `selection` into `folder`, in selection order.
    ///
    /// A failing file never stops the batch. Files whose tracked result is
    /// already a success are skipped; idle, failed and cancelled files are
    /// attempted again.
    pub async fn upload_all(
        &self,
        folder: &Folder,
        selection: &FileSelection,
        tracker: &mut UploadTracker,
    ) -> UploadSummary {
        let span = info_span!(
            "upload_all",
            session = %Uuid::new_v4(),
            folder = %folder.name,
            files = selection.len()
        );
        let cancel = self.cancel_token();
        let summary = self
            .run(folder, selection, tracker, &cancel)
            .instrument(span)
            .await;
        if cancel.is_cancelled() {
            *self.current_token() = CancellationToken::new();
        }
        summary
    }

    async fn run(
        &self,
        folder: &Folder,
        selection: &FileSelection,
        tracker: &mut UploadTracker,
        cancel: &CancellationToken,
    ) -> UploadSummary {
        let mut summary = UploadSummary::default();
        let mut queue = UploadQueue::new();

        for file in selection.iter() {
            tracker.initialize(file.id);
            if tracker.get(file.id).is_some_and(|s| s.is_succeeded()) {
                debug!(file_id = %file.id, name = %file.name, "already uploaded, skipping");
                summary.skipped += 1;
            } else {
                queue.push(file.id);
            }
        }
        info!(queued = queue.pending_len(), skipped = summary.skipped, "upload started");

        loop {
            let id = match queue.begin() {
                Ok(Some(id)) => id,
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "upload queue out of sync");
                    break;
                }
            };

            let result = match selection.find(id) {
                Some(file) => self.upload_one(folder, file, tracker, cancel).await,
                None => UploadResult::Failure {
                    message: UploadError::UnknownFile(id).to_string(),
                },
            };
            self.finish_file(id, result, tracker, &mut summary).await;

            if let Err(e) = queue.finish(id) {
                error!(error = %e, "upload queue out of sync");
                break;
            }

            if cancel.is_cancelled() {
                for pending in queue.drain_pending() {
                    self.finish_file(pending, UploadResult::Cancelled, tracker, &mut summary)
                        .await;
                }
            }
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            cancelled = summary.cancelled,
            skipped = summary.skipped,
            "upload finished"
        );
        self.emit(UploadEvent::Finished(summary)).await;
        summary
    }

    /// Signs and sends one file. Returns the result to record.
    async fn upload_one(
        &self,
        folder: &Folder,
        file: &SelectedFile,
        tracker: &mut UploadTracker,
        cancel: &CancellationToken,
    ) -> UploadResult {
        if cancel.is_cancelled() {
            return UploadResult::Cancelled;
        }
        if let Err(e) = tracker.mark_started(file.id) {
            return UploadResult::Failure {
                message: e.failure_message(),
            };
        }
        self.emit(UploadEvent::Started {
            file_id: file.id,
            name: file.name.clone(),
        })
        .await;
        debug!(file_id = %file.id, name = %file.name, size = file.size, "requesting signature");

        let signed = tokio::select! {
            biased;
            _ = cancel.cancelled() => return UploadResult::Cancelled,
            r = self.signer.request_signature(&folder.name) => r,
        };
        let signature = match signed {
            Ok(sig) => sig,
            Err(e) => {
                warn!(file_id = %file.id, error = %e, "signature request failed");
                return result_from_error(e);
            }
        };

        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
        let mut upload = self.transport.upload(file, &signature, progress_tx);

        let outcome = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break None,
                Some(progress) = progress_rx.recv() => {
                    self.apply_progress(file.id, progress, tracker);
                }
                r = &mut upload => break Some(r),
            }
        };
        drop(upload);

        while let Ok(progress) = progress_rx.try_recv() {
            self.apply_progress(file.id, progress, tracker);
        }

        match outcome {
            None => UploadResult::Cancelled,
            Some(Ok(asset)) => UploadResult::Success {
                remote_id: asset.public_id,
                remote_url: asset.secure_url,
            },
            Some(Err(e)) => {
                warn!(file_id = %file.id, error = %e, "upload failed");
                result_from_error(e)
            }
        }
    }

    fn apply_progress(&self, id: FileId, progress: UploadProgress, tracker: &mut UploadTracker) {
        if let Err(e) = tracker.update_progress(id, progress) {
            error!(file_id = %id, error = %e, "progress for untracked file");
            return;
        }
        // Progress is lossy under backpressure; terminal events are not.
        if let Some(tx) = &self.events_tx {
            let _ = tx.try_send(UploadEvent::Progress {
                file_id: id,
                progress,
            });
        }
    }

    async fn finish_file(
        &self,
        id: FileId,
        result: UploadResult,
        tracker: &mut UploadTracker,
        summary: &mut UploadSummary,
    ) {
        if let Err(e) = tracker.mark_terminal(id, result.clone()) {
            error!(file_id = %id, error = %e, "cannot record result");
        }
        summary.record(&result);

        let event = match result {
            UploadResult::Success {
                remote_id,
                remote_url,
            } => {
                info!(file_id = %id, remote_id = %remote_id, "file uploaded");
                UploadEvent::Succeeded {
                    file_id: id,
                    remote_id,
                    remote_url,
                }
            }
            UploadResult::Failure { message } => UploadEvent::Failed {
                file_id: id,
                message,
            },
            UploadResult::Cancelled => {
                debug!(file_id = %id, "file cancelled");
                UploadEvent::Cancelled { file_id: id }
            }
        };
        self.emit(event).await;
    }

    async fn emit(&self, event: UploadEvent) {
        if let Some(tx) = &self.events_tx {
            let _ = tx.send(event).await;
        }
    }
}

fn result_from_error(e: UploadError) -> UploadResult {
    match e {
        UploadError::Cancelled => UploadResult::Cancelled,
        other => UploadResult::Failure {
            message: other.failure_message(),
        },
    }
}
