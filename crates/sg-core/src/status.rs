//! Classification of remote job statuses.
//!
//! The service reports a free-form status string on every poll. Only two
//! values are terminal; everything else, including values this client has
//! never seen, means the job is still in progress and polling continues.

pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Terminal success; the artifact is ready to download.
    Completed,
    /// Terminal failure reported by the service.
    Failed,
    /// Anything else: queued, in_progress, or a vocabulary this client
    /// does not know yet.
    InProgress,
}

impl StatusClass {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Map a remote status string onto the three classes the lifecycle
/// controller distinguishes. Comparison is exact; the service reports
/// lowercase identifiers.
pub fn classify(status: &str) -> StatusClass {
    match status {
        STATUS_COMPLETED => StatusClass::Completed,
        STATUS_FAILED => StatusClass::Failed,
        _ => StatusClass::InProgress,
    }
}
