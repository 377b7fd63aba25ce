//! Loop-owned view of a spawned child.

/// Represents at most one running external process.
///
/// Created by [`start`](crate::process::start), consumed by
/// [`terminate`](crate::process::terminate). The handle does not own the
/// `Child`; the completion watcher does. It only captures what the loop
/// needs to track and signal the process.
#[derive(Debug, Clone)]
pub struct ChildHandle {
    pid: Option<u32>,
    program: String,
}

impl ChildHandle {
    /// Creates a handle for a freshly spawned child.
    pub(crate) fn new(pid: Option<u32>, program: impl Into<String>) -> Self {
        Self {
            pid,
            program: program.into(),
        }
    }

    /// Process identifier, if the process was ever live.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Program the handle was spawned from (for logs).
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether a `Done` event refers to this handle's process.
    pub fn matches(&self, pid: Option<u32>) -> bool {
        self.pid.is_some() && self.pid == pid
    }
}
