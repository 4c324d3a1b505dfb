// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProcessAdapter, ProcessError, ProcessHandle, SignalKind};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Recorded spawn call
#[derive(Debug, Clone)]
pub struct ProcessCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

/// Behavior of the next fake spawn.
#[derive(Debug, Clone, Default)]
pub struct SpawnScript {
    /// Exit with this code right after spawning (immediate-crash path)
    pub immediate_exit: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Stay alive through `Terminate` (forces the caller to escalate)
    pub ignore_terminate: bool,
    /// Fail the spawn itself
    pub fail_spawn: Option<String>,
}

#[derive(Debug)]
struct FakeHandleState {
    alive: bool,
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
    ignore_terminate: bool,
    signals: Vec<SignalKind>,
}

struct FakeProcessState {
    calls: Vec<ProcessCall>,
    scripts: VecDeque<SpawnScript>,
    handles: Vec<Arc<Mutex<FakeHandleState>>>,
    next_pid: u32,
}

/// Fake process adapter for testing.
///
/// Spawns never touch the OS; each spawn consumes a queued [`SpawnScript`]
/// (default: a healthy process that dies on `Terminate`).
#[derive(Clone)]
pub struct FakeProcessAdapter {
    inner: Arc<Mutex<FakeProcessState>>,
}

impl Default for FakeProcessAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProcessState {
                calls: Vec::new(),
                scripts: VecDeque::new(),
                handles: Vec::new(),
                next_pid: 1000,
            })),
        }
    }
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a script for the next spawn.
    pub fn script_next(&self, script: SpawnScript) {
        self.inner.lock().scripts.push_back(script);
    }

    /// All recorded spawn calls.
    pub fn calls(&self) -> Vec<ProcessCall> {
        self.inner.lock().calls.clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.inner.lock().calls.len()
    }

    /// Kill the nth spawned process out-of-band (simulates an external crash).
    pub fn set_exited(&self, index: usize, code: i32) {
        if let Some(handle) = self.inner.lock().handles.get(index) {
            let mut state = handle.lock();
            state.alive = false;
            state.exit_code = Some(code);
        }
    }

    /// Signals delivered to the nth spawned process.
    pub fn signals(&self, index: usize) -> Vec<SignalKind> {
        self.inner
            .lock()
            .handles
            .get(index)
            .map(|h| h.lock().signals.clone())
            .unwrap_or_default()
    }

    /// Whether the nth spawned process is still alive.
    pub fn alive(&self, index: usize) -> bool {
        self.inner
            .lock()
            .handles
            .get(index)
            .map(|h| h.lock().alive)
            .unwrap_or(false)
    }
}

struct FakeProcessHandle {
    state: Arc<Mutex<FakeHandleState>>,
    pid: u32,
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: &[(String, String)],
    ) -> Result<Arc<dyn ProcessHandle>, ProcessError> {
        let mut inner = self.inner.lock();

        inner.calls.push(ProcessCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
            env: env.to_vec(),
        });

        let script = inner.scripts.pop_front().unwrap_or_default();
        if let Some(reason) = script.fail_spawn {
            return Err(ProcessError::SpawnFailed(reason));
        }

        let state = Arc::new(Mutex::new(FakeHandleState {
            alive: script.immediate_exit.is_none(),
            exit_code: script.immediate_exit,
            stdout: script.stdout,
            stderr: script.stderr,
            ignore_terminate: script.ignore_terminate,
            signals: Vec::new(),
        }));

        inner.handles.push(Arc::clone(&state));
        inner.next_pid += 1;
        let pid = inner.next_pid;

        Ok(Arc::new(FakeProcessHandle { state, pid }))
    }
}

#[async_trait]
impl ProcessHandle for FakeProcessHandle {
    async fn poll(&self) -> Result<Option<i32>, ProcessError> {
        let state = self.state.lock();
        if state.alive {
            Ok(None)
        } else {
            Ok(Some(state.exit_code.unwrap_or(0)))
        }
    }

    async fn signal(&self, kind: SignalKind) -> Result<(), ProcessError> {
        let mut state = self.state.lock();
        state.signals.push(kind);
        match kind {
            SignalKind::Terminate if !state.ignore_terminate => {
                state.alive = false;
                state.exit_code = Some(0);
            }
            SignalKind::Kill => {
                state.alive = false;
                state.exit_code = Some(-1);
            }
            SignalKind::Terminate => {}
        }
        Ok(())
    }

    async fn wait(&self, _timeout: Duration) -> Result<Option<i32>, ProcessError> {
        // No real clock: a live fake "times out" immediately
        let state = self.state.lock();
        if state.alive {
            Ok(None)
        } else {
            Ok(Some(state.exit_code.unwrap_or(0)))
        }
    }

    async fn read_output(&self) -> (String, String) {
        let state = self.state.lock();
        (state.stdout.clone(), state.stderr.clone())
    }

    fn pid(&self) -> Option<u32> {
        Some(self.pid)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
