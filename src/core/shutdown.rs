//! # OS interrupt signal handling.
//!
//! Provides [`wait_for_shutdown_signal`], an async helper that completes
//! when the process receives an interrupt. The supervisor runs it on its own
//! task: delivery triggers emergency cleanup (terminal restore) and an
//! immediate exit, bypassing the key-driven quit path entirely.
//!
//! ## Signals
//! **Unix:** `SIGINT` (Ctrl-C outside raw mode), `SIGTERM` (default kill).
//! Note that while the input device is held in raw mode, a terminal Ctrl-C
//! arrives as a key event, not a signal; this path covers signals sent from
//! outside the terminal.
//!
//! **Other platforms:** Ctrl-C via [`tokio::signal::ctrl_c`].

/// Waits for an interrupt signal.
///
/// Each call creates independent signal listeners. Returns `Ok(())` when a
/// signal is received, or `Err` if listener registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }
    Ok(())
}

/// Waits for an interrupt signal.
///
/// Each call creates independent signal listeners. Returns `Ok(())` when a
/// signal is received, or `Err` if listener registration fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
