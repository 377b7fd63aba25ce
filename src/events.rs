//! # Control events consumed by the supervisor loop.
//!
//! Three independent producers feed one consumer over a single bounded
//! [`tokio::sync::mpsc`] channel:
//!
//! ```text
//! key reader ──── Quit / Reload ──┐
//! completion watcher ── Done ─────┼──► mpsc ──► Supervisor loop
//! (signal listener exits the      │
//!  process directly, no event) ───┘
//! ```
//!
//! ## Rules
//! - Events are transient and in-flight only; nothing is persisted.
//! - The loop consumes one event per iteration, in arrival order. No
//!   coalescing, no priority.
//! - [`Event::Done`] carries the pid of the process that exited so the loop
//!   can tell the active child's natural exit apart from a stale completion
//!   of a child that was already replaced by a reload.

/// A control event for the supervisor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Operator asked to stop (`q`, Esc, Ctrl-C, or input-device read error).
    Quit,
    /// Operator asked to restart the child (`r`).
    Reload,
    /// A spawned child finished.
    ///
    /// `pid` is the identifier of the exited process, or `None` when the
    /// spawn itself failed and no process ever existed.
    Done {
        /// Process identifier of the exited child, if one was spawned.
        pid: Option<u32>,
    },
}

impl Event {
    /// `Done` for a process that ran and exited.
    #[inline]
    pub fn done(pid: u32) -> Self {
        Event::Done { pid: Some(pid) }
    }

    /// `Done` for a spawn that never produced a process.
    #[inline]
    pub fn spawn_failed() -> Self {
        Event::Done { pid: None }
    }
}
