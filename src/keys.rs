//! # Raw-mode key event source.
//!
//! Turns single key presses into control [`Event`]s for the supervisor loop:
//!
//! - `q`, Esc, Ctrl-C → [`Event::Quit`], then the reader stops (terminal
//!   sequence: nothing is produced after a quit).
//! - `r` → [`Event::Reload`], reader keeps going.
//! - Enter → writes `"\r\n"` to stdout (cosmetic; raw mode does not echo),
//!   not part of control flow.
//! - Any read error → [`Event::Quit`], then stop. No further events will
//!   ever arrive, so an explicit quit keeps the loop from idling forever.
//!
//! ## Raw-mode discipline
//! Raw mode must be released on *every* exit path or the operator's shell is
//! left unusable. [`RawGuard`] restores it on drop for normal and error
//! returns; the OS-signal path calls [`restore_terminal`] explicitly because
//! `std::process::exit` bypasses destructors.
//!
//! ## Rules
//! - The reader polls with a short timeout and checks its cancellation token
//!   between polls, so the supervisor can stop it promptly on loop exit.
//! - One reader per program run; the sequence is not restartable.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::SupervisorError;
use crate::events::Event;

/// Exclusive raw-mode access to the terminal input device.
///
/// Acquired once at startup; dropping it restores cooked mode.
#[derive(Debug)]
pub struct RawGuard(());

impl RawGuard {
    /// Enables raw mode, failing with [`SupervisorError::Device`] if the
    /// terminal is unavailable (not a tty, already claimed, ...).
    pub fn acquire() -> Result<Self, SupervisorError> {
        enable_raw_mode().map_err(|source| SupervisorError::Device { source })?;
        Ok(Self(()))
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Best-effort raw-mode release, safe to call from any exit path.
///
/// Used by the signal listener before `std::process::exit`, which would
/// otherwise skip the [`RawGuard`] destructor.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
}

/// What a single key press means to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Reload,
    Newline,
    Ignore,
}

/// Maps one key event to its control meaning.
fn map_key(key: &KeyEvent) -> KeyAction {
    // Release/repeat events would double-fire on terminals that report them.
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Reload,
        KeyCode::Enter => KeyAction::Newline,
        _ => KeyAction::Ignore,
    }
}

/// Long-lived producer task reading raw-mode key presses.
///
/// Feeds [`Event::Quit`] / [`Event::Reload`] into the supervisor's channel
/// until a quit is emitted, the token is cancelled, or the channel closes.
pub struct KeyReader {
    events: mpsc::Sender<Event>,
    token: CancellationToken,
    poll: Duration,
}

impl KeyReader {
    /// Creates a reader feeding `events`, stopping when `token` cancels.
    pub fn new(events: mpsc::Sender<Event>, token: CancellationToken, poll: Duration) -> Self {
        Self {
            events,
            token,
            poll,
        }
    }

    /// Runs the read loop until a terminal condition.
    ///
    /// The crossterm `poll`/`read` pair is synchronous; the short poll
    /// timeout keeps each blocking stretch bounded so cancellation is
    /// observed within one `poll` interval.
    pub async fn run(self) {
        loop {
            if self.token.is_cancelled() {
                return;
            }
            match event::poll(self.poll) {
                Ok(false) => {
                    // poll blocks this worker thread for up to the poll
                    // interval; give the scheduler a turn between polls.
                    tokio::task::yield_now().await;
                }
                Ok(true) => match event::read() {
                    Ok(TermEvent::Key(key)) => match map_key(&key) {
                        KeyAction::Quit => {
                            let _ = self.events.send(Event::Quit).await;
                            return;
                        }
                        KeyAction::Reload => {
                            if self.events.send(Event::Reload).await.is_err() {
                                return;
                            }
                        }
                        KeyAction::Newline => {
                            // Raw mode: LF alone does not return the carriage.
                            let mut out = io::stdout();
                            let _ = out.write_all(b"\r\n");
                            let _ = out.flush();
                        }
                        KeyAction::Ignore => {}
                    },
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "input device read failed, quitting");
                        let _ = self.events.send(Event::Quit).await;
                        return;
                    }
                },
                Err(err) => {
                    tracing::warn!(error = %err, "input device poll failed, quitting");
                    let _ = self.events.send(Event::Quit).await;
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys_map_to_quit() {
        assert_eq!(map_key(&press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(&press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn reload_key_maps_to_reload() {
        assert_eq!(map_key(&press(KeyCode::Char('r'))), KeyAction::Reload);
    }

    #[test]
    fn enter_is_cosmetic_only() {
        assert_eq!(map_key(&press(KeyCode::Enter)), KeyAction::Newline);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(map_key(&press(KeyCode::Char('x'))), KeyAction::Ignore);
        assert_eq!(map_key(&press(KeyCode::Up)), KeyAction::Ignore);
        // Plain 'c' without control is not a quit.
        assert_eq!(map_key(&press(KeyCode::Char('c'))), KeyAction::Ignore);
    }

    #[tokio::test]
    async fn cancelled_reader_returns_without_reading() {
        let (tx, _rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        let reader = KeyReader::new(tx, token, Duration::from_millis(10));
        tokio::time::timeout(Duration::from_millis(200), reader.run())
            .await
            .expect("reader ignored cancellation");
    }

    #[test]
    fn release_events_are_ignored() {
        let key = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(map_key(&key), KeyAction::Ignore);
    }
}
