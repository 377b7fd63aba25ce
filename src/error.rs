//! Error types used by the runvisor supervisor.
//!
//! Fatal setup failures are represented by [`SupervisorError`]:
//!
//! - [`SupervisorError::Device`] — the raw-mode input device could not be
//!   acquired; nothing has started yet, the program exits.
//! - [`SupervisorError::Spawn`] — the child could not be spawned. Fatal only
//!   at startup (no child ever ran); on a reload the supervisor logs it and
//!   keeps running without an active child.
//!
//! Termination-phase errors (signaling a process that already exited, a
//! missing process-group API) are deliberately *not* part of this taxonomy:
//! cleanup is best-effort and those paths log instead of failing. Read errors
//! on the input device are mapped to a `Quit` event by the key source.

use std::io;

use thiserror::Error;

/// Errors that abort supervisor startup.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// Raw-mode access to the terminal input device could not be acquired.
    #[error("cannot acquire raw-mode input device: {source}")]
    Device {
        /// Underlying terminal error.
        #[source]
        source: io::Error,
    },

    /// The child program could not be spawned.
    #[error("could not start {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use runvisor::SupervisorError;
    ///
    /// let err = SupervisorError::Spawn {
    ///     program: "missing.sh".into(),
    ///     source: std::io::Error::from(std::io::ErrorKind::NotFound),
    /// };
    /// assert_eq!(err.as_label(), "spawn_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::Device { .. } => "device_unavailable",
            SupervisorError::Spawn { .. } => "spawn_failed",
        }
    }
}
