use crate::job::SessionSnapshot;

/// Events flowing out of the lifecycle controller, one per transition.
/// The UI replaces its copy of the snapshot and appends the message to the
/// activity log.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Update(SessionSnapshot),
}

/// Commands flowing into the controller task.
#[derive(Debug)]
pub enum Command {
    Submit(String),
    Shutdown,
}
