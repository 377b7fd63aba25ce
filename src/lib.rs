//! # runvisor
//!
//! **runvisor** is an interactive single-process supervisor: it launches an
//! external program, forwards its output untouched, and lets the operator
//! reload (`r`) or quit (`q`, Esc, Ctrl-C) it with a single key press in
//! raw mode. OS interrupt signals trigger emergency cleanup and exit.
//!
//! ## Architecture
//! ```text
//!  ┌──────────────┐   ┌─────────────────────┐   ┌──────────────────┐
//!  │  KeyReader   │   │ completion watcher  │   │ signal listener  │
//!  │ (raw stdin)  │   │ (one per spawn)     │   │ (SIGINT/SIGTERM) │
//!  └──────┬───────┘   └─────────┬───────────┘   └────────┬─────────┘
//!         │ Quit/Reload         │ Done{pid}              │ restore tty,
//!         ▼                     ▼                        │ exit(0)
//!  ┌─────────────────────────────────────────┐           ▼
//!  │          mpsc event channel             │      (process gone)
//!  └───────────────────┬─────────────────────┘
//!                      ▼
//!  ┌─────────────────────────────────────────┐
//!  │  Supervisor loop (single consumer)      │
//!  │  - owns the one active ChildHandle      │
//!  │  - Quit   → terminate group, stop       │
//!  │  - Reload → terminate, settle, respawn  │
//!  │  - Done   → clear/ignore by pid         │
//!  └─────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - At most one child handle is active at any instant; a replacement is
//!   spawned only after the previous termination sequence fully returned.
//! - Termination signals the child's whole process group (SIGTERM, a short
//!   grace interval, then SIGKILL), falling back to the single pid when the
//!   group cannot be resolved.
//! - Raw mode is restored on every exit path, including the signal path.
//!
//! ## Example
//! ```no_run
//! use runvisor::{Config, Supervisor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), runvisor::SupervisorError> {
//!     let sup = Supervisor::new(Config::default(), "./serve.sh", vec![]);
//!     sup.run().await
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod keys;
mod process;

// ---- Public re-exports ----

pub use config::Config;
pub use core::Supervisor;
pub use error::SupervisorError;
pub use events::Event;
pub use keys::restore_terminal;
pub use process::{start, terminate, ChildHandle};
