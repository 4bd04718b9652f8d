//! Per-file upload state machine.
//!
//! ```text
//! idle ──Started──▶ uploading ──Progress*──▶ uploading ──Finished──▶ terminal
//!                       ▲                                              │
//!                       └──────────────── Started (retry) ─────────────┘
//! ```

use dropzone_transfer::UploadProgress;

use crate::types::{FileUploadState, UploadResult};

/// Input to [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    Started,
    Progress(UploadProgress),
    Finished(UploadResult),
}

/// Computes the next state of one file.
///
/// - `Started` begins a fresh attempt: uploading, no result, zero progress.
/// - `Progress` applies only while uploading, and never moves `loaded` or
///   `percentage` backwards. A report with unknown total keeps the last
///   percentage.
/// - `Finished(Success)` forces progress to 100%.
/// - `Finished(Failure | Cancelled)` resets progress to zero.
pub fn transition(state: &FileUploadState, event: &TrackerEvent) -> FileUploadState {
    match event {
        TrackerEvent::Started => FileUploadState {
            is_uploading: true,
            progress: UploadProgress::zero(),
            result: None,
        },
        TrackerEvent::Progress(progress) => {
            if !state.is_uploading || progress.loaded < state.progress.loaded {
                return state.clone();
            }
            let mut next = *progress;
            if next.total == 0 {
                next.percentage = state.progress.percentage;
            } else if next.percentage < state.progress.percentage {
                return state.clone();
            }
            FileUploadState {
                progress: next,
                ..state.clone()
            }
        }
        TrackerEvent::Finished(result) => FileUploadState {
            is_uploading: false,
            progress: if result.is_success() {
                UploadProgress::complete()
            } else {
                UploadProgress::zero()
            },
            result: Some(result.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success() -> UploadResult {
        UploadResult::Success {
            remote_id: "docs/a".into(),
            remote_url: "https://cdn.example.com/docs/a".into(),
        }
    }

    fn uploading() -> FileUploadState {
        transition(&FileUploadState::idle(), &TrackerEvent::Started)
    }

    #[test]
    fn started_clears_previous_result() {
        let failed = FileUploadState {
            is_uploading: false,
            progress: UploadProgress::from_bytes(5, 10),
            result: Some(UploadResult::Failure {
                message: "boom".into(),
            }),
        };
        let next = transition(&failed, &TrackerEvent::Started);
        assert!(next.is_uploading);
        assert!(next.result.is_none());
        assert_eq!(next.progress, UploadProgress::zero());
    }

    #[test]
    fn progress_replaces_progress_only() {
        let s = uploading();
        let p = UploadProgress::from_bytes(40, 100);
        let next = transition(&s, &TrackerEvent::Progress(p));
        assert_eq!(next.progress, p);
        assert!(next.is_uploading);
        assert!(next.result.is_none());
    }

    #[test]
    fn progress_ignored_when_not_uploading() {
        let idle = FileUploadState::idle();
        let next = transition(&idle, &TrackerEvent::Progress(UploadProgress::from_bytes(1, 2)));
        assert_eq!(next, idle);
    }

    #[test]
    fn progress_never_goes_backwards() {
        let s = transition(
            &uploading(),
            &TrackerEvent::Progress(UploadProgress::from_bytes(70, 100)),
        );
        let next = transition(&s, &TrackerEvent::Progress(UploadProgress::from_bytes(30, 100)));
        assert_eq!(next.progress.percentage, 70);
    }

    #[test]
    fn unknown_total_keeps_last_percentage() {
        let s = transition(
            &uploading(),
            &TrackerEvent::Progress(UploadProgress::from_bytes(300, 1000)),
        );
        let next = transition(&s, &TrackerEvent::Progress(UploadProgress::from_bytes(600, 0)));
        assert_eq!(next.progress.loaded, 600);
        assert_eq!(next.progress.percentage, 30);
    }

    #[test]
    fn lower_percentage_is_ignored() {
        let s = transition(
            &uploading(),
            &TrackerEvent::Progress(UploadProgress::from_bytes(50, 100)),
        );
        // Same byte count against a larger total would read as 25%.
        let next = transition(&s, &TrackerEvent::Progress(UploadProgress::from_bytes(50, 200)));
        assert_eq!(next, s);
    }

    #[test]
    fn success_forces_complete_progress() {
        let s = transition(
            &uploading(),
            &TrackerEvent::Progress(UploadProgress::from_bytes(97, 100)),
        );
        let next = transition(&s, &TrackerEvent::Finished(success()));
        assert!(!next.is_uploading);
        assert_eq!(next.progress, UploadProgress::complete());
        assert!(next.is_processed());
    }

    #[test]
    fn failure_resets_progress() {
        let s = transition(
            &uploading(),
            &TrackerEvent::Progress(UploadProgress::from_bytes(50, 100)),
        );
        let next = transition(
            &s,
            &TrackerEvent::Finished(UploadResult::Failure {
                message: "Invalid Signature".into(),
            }),
        );
        assert!(!next.is_uploading);
        assert_eq!(next.progress, UploadProgress::zero());
        assert!(matches!(next.result, Some(UploadResult::Failure { .. })));
    }

    #[test]
    fn cancelled_is_terminal() {
        let next = transition(&uploading(), &TrackerEvent::Finished(UploadResult::Cancelled));
        assert!(next.is_processed());
        assert!(!next.is_succeeded());
    }
}
