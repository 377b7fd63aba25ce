//! # Supervisor: the event-coordination loop.
//!
//! The [`Supervisor`] owns the single active [`ChildHandle`] and consumes
//! control events from all producers over one bounded channel:
//!
//! ```text
//! Producers:                              Consumer:
//!   KeyReader ── Quit/Reload ──┐
//!   completion watcher ─ Done ─┼── mpsc ──► event_loop
//!   signal listener ───────────┘              │ (exits the process directly,
//!                                             │  never sends an event)
//! loop {
//!   ├─► Quit   → terminate(active) → break
//!   ├─► Reload → terminate(active) → sleep(settle) → start() → replace handle
//!   └─► Done   → matches active? clear handle (stale) : ignore
//! }
//! ```
//!
//! ## Rules
//! - At most one handle is active at any instant; a new one is created only
//!   after `terminate` has fully returned (the call is awaited inline, and
//!   the settle delay runs before the respawn).
//! - One event per iteration, arrival order. All of an iteration's side
//!   effects complete before the next `recv`.
//! - A `Done` for a replaced child (racing a `Reload`) is recognized by pid
//!   and ignored.
//! - A natural exit does not auto-restart anything; only an explicit
//!   `Reload` brings a live child back.

use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::shutdown;
use crate::error::SupervisorError;
use crate::events::Event;
use crate::keys::{self, KeyReader, RawGuard};
use crate::process::{self, ChildHandle};

/// Coordinates the key reader, completion watchers, and signal listener
/// around a single supervised child.
pub struct Supervisor {
    cfg: Config,
    program: String,
    args: Vec<String>,
}

impl Supervisor {
    /// Creates a supervisor for `program` with pass-through `args`.
    pub fn new(cfg: Config, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            cfg,
            program: program.into(),
            args,
        }
    }

    /// Runs until the operator quits or the initial spawn fails.
    ///
    /// Acquires the raw-mode input device (fatal [`SupervisorError::Device`]
    /// on failure), wires up the producers, then drives the event loop. Raw
    /// mode is restored on every return path via the guard's destructor; the
    /// OS-signal path restores it explicitly before exiting the process.
    pub async fn run(&self) -> Result<(), SupervisorError> {
        let raw = RawGuard::acquire()?;

        let (tx, mut rx) = mpsc::channel(self.cfg.channel_capacity_clamped());
        let token = CancellationToken::new();

        self.spawn_signal_listener();
        tokio::spawn(KeyReader::new(tx.clone(), token.clone(), self.cfg.key_poll).run());

        tracing::info!("press 'r' to reload, 'q' to quit");
        tracing::info!(program = %self.program, "running");

        let result = self.event_loop(&tx, &mut rx).await;

        // Stop the key reader so the terminal is quiet before raw mode is
        // restored by the guard.
        token.cancel();
        drop(raw);
        result
    }

    /// Interrupt path: restore the terminal and exit the whole program,
    /// bypassing the normal quit-side termination.
    fn spawn_signal_listener(&self) {
        tokio::spawn(async {
            if shutdown::wait_for_shutdown_signal().await.is_ok() {
                tracing::info!("received interrupt, cleaning up");
                keys::restore_terminal();
                std::process::exit(0);
            }
        });
    }

    /// The state machine proper. Startup spawn failure is fatal; afterwards
    /// the loop runs until a `Quit` or until every producer is gone.
    async fn event_loop(
        &self,
        tx: &mpsc::Sender<Event>,
        rx: &mut mpsc::Receiver<Event>,
    ) -> Result<(), SupervisorError> {
        let mut active: Option<ChildHandle> =
            Some(process::start(&self.program, &self.args, tx).await?);

        while let Some(event) = rx.recv().await {
            match event {
                Event::Quit => {
                    tracing::info!("exiting");
                    if let Some(handle) = active.take() {
                        process::terminate(&handle, self.cfg.grace).await;
                    }
                    break;
                }
                Event::Reload => {
                    tracing::info!("reloading script");
                    if let Some(handle) = active.take() {
                        process::terminate(&handle, self.cfg.grace).await;
                    }
                    // Let ports and descriptors release before the respawn.
                    sleep(self.cfg.settle).await;
                    active = match process::start(&self.program, &self.args, tx).await {
                        Ok(handle) => Some(handle),
                        Err(err) => {
                            tracing::error!(
                                label = err.as_label(),
                                error = %err,
                                "relaunch failed, press 'r' to retry"
                            );
                            None
                        }
                    };
                }
                Event::Done { pid } => match &active {
                    Some(handle) if handle.matches(pid) => {
                        tracing::debug!(?pid, "script execution completed");
                        active = None;
                    }
                    _ => {
                        tracing::debug!(?pid, "stale completion ignored");
                    }
                },
            }
        }
        Ok(())
    }
}
