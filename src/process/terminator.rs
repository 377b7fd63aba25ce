//! # Graceful-then-forceful termination of the supervised child.
//!
//! [`terminate`] signals the child's entire process group:
//!
//! ```text
//! resolve pgid ── ok ──► SIGTERM(-pgid) ─► sleep(grace) ─► SIGKILL(-pgid)
//!      │
//!      └─ err ──► SIGTERM(pid) ─► sleep(grace) ─► SIGKILL(pid)
//! ```
//!
//! The grace interval lets well-behaved children flush state; the forceful
//! signal bounds total termination latency. The sequence always runs to
//! completion once begun — there is no cancellation of an in-flight
//! termination.
//!
//! ## Rules
//! - Termination is best-effort cleanup: every signaling error (typically
//!   `ESRCH`, the process already exited) is logged, never propagated.
//! - The call is awaited inline by the supervisor loop, so a new spawn can
//!   only happen after the whole sequence has returned.

use crate::process::ChildHandle;

#[cfg(unix)]
pub use unix::terminate;

#[cfg(unix)]
mod unix {
    use std::time::Duration;

    use nix::errno::Errno;
    use nix::sys::signal::{kill, killpg, Signal};
    use nix::unistd::{getpgid, Pid};
    use tokio::time::sleep;

    use super::ChildHandle;

    /// Process-group terminator capability, selected at runtime.
    ///
    /// `Group` signals every process in the child's group through the
    /// negated pgid; `Process` is the fallback when the group cannot be
    /// resolved and signals only the tracked pid.
    #[derive(Debug, Clone, Copy)]
    enum TermTarget {
        Group(Pid),
        Process(Pid),
    }

    impl TermTarget {
        fn resolve(pid: u32) -> Self {
            let pid = Pid::from_raw(pid as i32);
            match getpgid(Some(pid)) {
                Ok(pgid) => {
                    tracing::debug!(pgid = pgid.as_raw(), "using process-group termination");
                    TermTarget::Group(pgid)
                }
                Err(err) => {
                    tracing::debug!(error = %err, "process group unresolvable, using single-pid fallback");
                    TermTarget::Process(pid)
                }
            }
        }

        fn send(&self, signal: Signal) {
            let result = match self {
                TermTarget::Group(pgid) => killpg(*pgid, signal),
                TermTarget::Process(pid) => kill(*pid, signal),
            };
            match result {
                Ok(()) => {}
                Err(Errno::ESRCH) => {
                    tracing::debug!(target = ?self, ?signal, "process already gone");
                }
                Err(err) => {
                    tracing::warn!(target = ?self, ?signal, error = %err, "failed to signal child");
                }
            }
        }
    }

    /// Terminates `handle`'s process and its descendants.
    ///
    /// No-op with a warning when the handle has no live pid (already
    /// reaped, or the spawn never produced a process).
    pub async fn terminate(handle: &ChildHandle, grace: Duration) {
        let Some(pid) = handle.pid() else {
            tracing::warn!(program = handle.program(), "terminate: no live process");
            return;
        };
        tracing::info!(pid, program = handle.program(), "terminating process");

        let target = TermTarget::resolve(pid);
        target.send(Signal::SIGTERM);
        sleep(grace).await;
        target.send(Signal::SIGKILL);
    }
}

/// Terminates `handle`'s process and its descendants.
///
/// Process-group signaling is a unix capability; elsewhere this logs and
/// returns, leaving cleanup to the OS.
#[cfg(not(unix))]
pub async fn terminate(handle: &ChildHandle, _grace: std::time::Duration) {
    tracing::warn!(
        program = handle.program(),
        "process-group termination unsupported on this platform"
    );
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use crate::events::Event;
    use crate::process::{start, terminate, ChildHandle};

    fn alive(pid: u32) -> bool {
        // Null signal probes existence without delivering anything.
        !matches!(kill(Pid::from_raw(pid as i32), None), Err(Errno::ESRCH))
    }

    #[tokio::test]
    async fn terminate_without_pid_is_a_safe_noop() {
        let handle = ChildHandle::new(None, "ghost");
        terminate(&handle, Duration::from_millis(10)).await;
    }

    #[tokio::test]
    async fn terminate_kills_a_long_sleeper_within_grace() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = start("sh", &["-c".into(), "sleep 30".into()], &tx)
            .await
            .unwrap();
        let pid = handle.pid().unwrap();
        assert!(alive(pid));

        terminate(&handle, Duration::from_millis(100)).await;

        // The watcher reaps the child and reports completion promptly.
        let ev = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no Done within 1s of terminate")
            .expect("channel closed");
        assert_eq!(ev, Event::done(pid));
        assert!(!alive(pid));
    }

    #[tokio::test]
    async fn terminate_signals_the_whole_group_not_just_the_leader() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!("sleep 30 & echo $! > '{}'; wait", pid_file.display());

        let (tx, mut rx) = mpsc::channel(4);
        let handle = start("sh", &["-c".into(), script], &tx).await.unwrap();

        // The shell writes its backgrounded child's pid before blocking in
        // wait; both live in the group created at spawn.
        let mut grandchild = None;
        for _ in 0..100 {
            if let Some(pid) = std::fs::read_to_string(&pid_file)
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok())
            {
                grandchild = Some(pid);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let grandchild = grandchild.expect("grandchild pid never written");
        assert!(alive(grandchild));

        terminate(&handle, Duration::from_millis(100)).await;

        let ev = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no Done within 1s of terminate")
            .expect("channel closed");
        assert_eq!(ev, Event::Done { pid: handle.pid() });

        // A single-pid kill would leave the backgrounded sleeper orphaned
        // and alive for its full 30s. Allow a moment for init to reap.
        let mut gone = false;
        for _ in 0..50 {
            if !alive(grandchild) {
                gone = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(gone, "grandchild {grandchild} survived group termination");
    }

    #[tokio::test]
    async fn terminate_after_natural_exit_is_swallowed() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = start("true", &[], &tx).await.unwrap();

        // Let the child exit and be reaped first.
        let ev = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("no Done")
            .expect("channel closed");
        assert_eq!(ev, Event::Done { pid: handle.pid() });

        // Stale pid: every ESRCH on the way is logged, never raised.
        terminate(&handle, Duration::from_millis(10)).await;
    }
}
