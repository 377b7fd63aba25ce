//! Child process lifecycle: spawn, completion watching, termination.
//!
//! The supervisor loop owns exactly one [`ChildHandle`] at a time. The
//! `tokio` [`Child`](tokio::process::Child) itself is owned by a completion
//! watcher task (which must reap it); the loop only keeps the pid and signals
//! through the OS.
//!
//! Internal split:
//! - [`handle`]: the loop-owned view of a spawned child;
//! - [`launcher`]: spawn in a fresh process group, wire up the watcher;
//! - [`terminator`]: graceful-then-forceful process-group termination.

mod handle;
mod launcher;
mod terminator;

pub use handle::ChildHandle;
pub use launcher::start;
pub use terminator::terminate;
