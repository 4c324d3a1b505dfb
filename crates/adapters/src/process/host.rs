// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tokio-backed process adapter for real host processes

use super::{ProcessAdapter, ProcessError, ProcessHandle, SignalKind};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

/// Spawns real OS processes with captured output.
#[derive(Clone, Default)]
pub struct HostProcessAdapter;

impl HostProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessAdapter for HostProcessAdapter {
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: &[(String, String)],
    ) -> Result<Arc<dyn ProcessHandle>, ProcessError> {
        // Precondition: cwd must exist
        if !cwd.exists() {
            return Err(ProcessError::SpawnFailed(format!(
                "working directory does not exist: {}",
                cwd.display()
            )));
        }

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Last-resort zombie guard: a dropped handle kills the child
            .kill_on_drop(true);
        for (key, value) in env {
            cmd.env(key, value);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(format!("{}: {}", program, e)))?;
        let pid = child.id();

        let stdout_buf = Arc::new(Mutex::new(Vec::new()));
        let stderr_buf = Arc::new(Mutex::new(Vec::new()));

        // Drain pipes in the background so the child never blocks on a full
        // pipe, and output stays available after exit.
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(drain_pipe(stdout, Arc::clone(&stdout_buf)));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(drain_pipe(stderr, Arc::clone(&stderr_buf)));
        }

        tracing::debug!(program, pid, "process spawned");

        Ok(Arc::new(HostProcessHandle {
            child: tokio::sync::Mutex::new(child),
            pid,
            stdout_buf,
            stderr_buf,
        }))
    }
}

/// Copy a pipe into a shared buffer until EOF.
async fn drain_pipe<R: AsyncReadExt + Unpin>(mut pipe: R, buf: Arc<Mutex<Vec<u8>>>) {
    let mut chunk = [0u8; 4096];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.lock().extend_from_slice(&chunk[..n]),
        }
    }
}

struct HostProcessHandle {
    child: tokio::sync::Mutex<Child>,
    pid: Option<u32>,
    stdout_buf: Arc<Mutex<Vec<u8>>>,
    stderr_buf: Arc<Mutex<Vec<u8>>>,
}

/// Exit code for a status, mapping signal death to -1.
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[async_trait]
impl ProcessHandle for HostProcessHandle {
    async fn poll(&self) -> Result<Option<i32>, ProcessError> {
        let mut child = self.child.lock().await;
        child
            .try_wait()
            .map(|status| status.map(exit_code))
            .map_err(|e| ProcessError::WaitFailed(e.to_string()))
    }

    async fn signal(&self, kind: SignalKind) -> Result<(), ProcessError> {
        let mut child = self.child.lock().await;

        // Already exited: nothing to deliver (and the pid may be recycled)
        let exited = child
            .try_wait()
            .map_err(|e| ProcessError::WaitFailed(e.to_string()))?;
        if exited.is_some() {
            return Ok(());
        }

        match kind {
            SignalKind::Terminate => send_term(&child),
            SignalKind::Kill => child
                .start_kill()
                .map_err(|e| ProcessError::SignalFailed(e.to_string())),
        }
    }

    async fn wait(&self, timeout: Duration) -> Result<Option<i32>, ProcessError> {
        let mut child = self.child.lock().await;
        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => Ok(Some(exit_code(status))),
            Ok(Err(e)) => Err(ProcessError::WaitFailed(e.to_string())),
            Err(_elapsed) => Ok(None),
        }
    }

    async fn read_output(&self) -> (String, String) {
        let stdout = String::from_utf8_lossy(&self.stdout_buf.lock()).into_owned();
        let stderr = String::from_utf8_lossy(&self.stderr_buf.lock()).into_owned();
        (stdout, stderr)
    }

    fn pid(&self) -> Option<u32> {
        self.pid
    }
}

#[cfg(unix)]
fn send_term(child: &Child) -> Result<(), ProcessError> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        return Ok(());
    };
    kill(Pid::from_raw(pid as i32), Signal::SIGTERM)
        .map_err(|e| ProcessError::SignalFailed(e.to_string()))
}

#[cfg(not(unix))]
fn send_term(_child: &Child) -> Result<(), ProcessError> {
    // No SIGTERM equivalent; the caller escalates to Kill after the timeout
    Ok(())
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
