// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process spawning adapters

mod host;

pub use host::HostProcessAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcessAdapter, ProcessCall, SpawnScript};

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from process operations
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("signal failed: {0}")]
    SignalFailed(String),
    #[error("wait failed: {0}")]
    WaitFailed(String),
}

/// Kind of termination signal to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Graceful shutdown request (SIGTERM)
    Terminate,
    /// Forceful kill (SIGKILL)
    Kill,
}

/// Handle to a spawned process.
///
/// The supervisor's table entry holds exactly one handle per workspace; the
/// handle stays valid after the process exits so late output reads and waits
/// still work.
#[async_trait]
pub trait ProcessHandle: Send + Sync {
    /// Non-blocking liveness check. `None` means still running, `Some(code)`
    /// means exited with that code (-1 if killed by a signal).
    async fn poll(&self) -> Result<Option<i32>, ProcessError>;

    /// Deliver a termination signal. Delivering to an already-exited process
    /// is not an error.
    async fn signal(&self, kind: SignalKind) -> Result<(), ProcessError>;

    /// Wait for exit up to `timeout`. `None` means the timeout elapsed with
    /// the process still running.
    async fn wait(&self, timeout: Duration) -> Result<Option<i32>, ProcessError>;

    /// Captured stdout and stderr so far.
    async fn read_output(&self) -> (String, String);

    /// OS pid, if the process has not been reaped yet.
    fn pid(&self) -> Option<u32>;
}

/// Adapter for spawning supervised processes.
#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// Spawn a process with captured stdout/stderr.
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: &[(String, String)],
    ) -> Result<Arc<dyn ProcessHandle>, ProcessError>;
}
