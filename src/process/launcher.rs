//! # Spawn the supervised child and watch for its completion.
//!
//! [`start`] launches the target program with:
//! - its **own process group** (unix), so the whole descendant tree can be
//!   signaled together at termination time — an uncontrolled child tree
//!   would survive a reload or quit otherwise;
//! - stdout/stderr **inherited** from the supervisor (plain passthrough,
//!   no buffering or interception);
//! - stdin **null**: the supervisor owns the terminal input device.
//!
//! ## Completion
//! On success a detached watcher task takes ownership of the `Child`,
//! `wait()`s (reaping it, no zombies) and emits exactly one
//! [`Event::Done`] with the child's pid. The supervisor loop never blocks
//! on the wait.
//!
//! On spawn failure an [`Event::Done`] with no pid is emitted immediately,
//! so the loop never waits for a completion that cannot come, and the error
//! is returned to the caller (fatal at startup, logged on reload).

use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::mpsc;

use crate::error::SupervisorError;
use crate::events::Event;
use crate::process::ChildHandle;

/// Spawns `program` with `args` and wires up its completion watcher.
pub async fn start(
    program: &str,
    args: &[String],
    events: &mpsc::Sender<Event>,
) -> Result<ChildHandle, SupervisorError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    #[cfg(unix)]
    command.process_group(0);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(source) => {
            let _ = events.send(Event::spawn_failed()).await;
            return Err(SupervisorError::Spawn {
                program: program.to_string(),
                source,
            });
        }
    };

    // Capture the pid before handing the Child to the watcher; after wait()
    // returns, Child::id() is None.
    let pid = child.id();
    tracing::debug!(program, pid, "child spawned");

    let tx = events.clone();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => tracing::debug!(pid, %status, "child exited"),
            Err(err) => tracing::warn!(pid, error = %err, "waiting for child failed"),
        }
        let _ = tx.send(Event::Done { pid }).await;
    });

    Ok(ChildHandle::new(pid, program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    #[cfg(unix)]
    async fn spawn_emits_done_with_matching_pid() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = start("echo", &["hello".to_string()], &tx).await.unwrap();
        assert!(handle.pid().is_some());

        let ev = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("no Done within 2s")
            .expect("channel closed");
        assert_eq!(ev, Event::Done { pid: handle.pid() });
        assert!(handle.matches(handle.pid()));
    }

    #[tokio::test]
    async fn spawn_failure_reports_error_and_done() {
        let (tx, mut rx) = mpsc::channel(4);
        let err = start("/definitely/not/a/program", &[], &tx)
            .await
            .expect_err("spawn should fail");
        assert_eq!(err.as_label(), "spawn_failed");

        // The loop must not hang waiting for a completion that cannot come.
        let ev = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("no Done after failed spawn")
            .expect("channel closed");
        assert_eq!(ev, Event::Done { pid: None });
    }
}
