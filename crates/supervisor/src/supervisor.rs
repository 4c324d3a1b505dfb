// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workspace process supervisor.
//!
//! Single authority for starting, stopping, and reporting on one notebook
//! server per workspace. The table of live processes is owned by this
//! instance; compose one per application and call [`Supervisor::shutdown`]
//! on teardown.

use crate::config::SupervisorConfig;
use crate::error::StartError;
use crate::{diagnose, launch, ports, readiness, workspace};
use lw_adapters::{ProcessAdapter, ProcessHandle, SignalKind, WorkspaceStore};
use lw_core::{ProcessStatus, StartResult, Workspace, WorkspaceId, WorkspaceStatus};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Fixed token recorded in the store while server auth is disabled.
pub const NOAUTH_TOKEN: &str = "noauth";

/// Live process table entry. At most one per workspace; the handle is the
/// exclusive owner of the OS process (shared `Arc` only so liveness polls
/// can run outside the table lock).
struct Entry {
    port: u16,
    handle: Arc<dyn ProcessHandle>,
}

/// Per-workspace notebook-server process supervisor.
pub struct Supervisor<P: ProcessAdapter, S: WorkspaceStore> {
    adapter: P,
    store: S,
    config: SupervisorConfig,
    table: Mutex<HashMap<WorkspaceId, Entry>>,
    /// Serializes start/stop per workspace; closes the duplicate-start race
    /// while keeping operations on different workspaces independent.
    locks: Mutex<HashMap<WorkspaceId, Arc<tokio::sync::Mutex<()>>>>,
}

impl<P: ProcessAdapter, S: WorkspaceStore> Supervisor<P, S> {
    pub fn new(adapter: P, store: S, config: SupervisorConfig) -> Self {
        Self {
            adapter,
            store,
            config,
            table: Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Start the notebook server for `workspace`.
    ///
    /// Idempotent fast path: if this workspace already has a live process,
    /// its existing `(port, running)` is returned and nothing is spawned.
    /// A stale entry (process died out-of-band) is reaped first.
    pub async fn start(&self, workspace: &Workspace) -> Result<StartResult, StartError> {
        let lock = self.workspace_lock(workspace.id);
        let _guard = lock.lock().await;

        if let Some((port, handle)) = self.entry(workspace.id) {
            if matches!(handle.poll().await, Ok(None)) {
                tracing::info!(workspace_id = %workspace.id, port, "already running");
                return Ok(StartResult {
                    port,
                    status: WorkspaceStatus::Running,
                });
            }
            tracing::warn!(workspace_id = %workspace.id, "stale process entry, reaping");
            self.remove_if_same(workspace.id, &handle);
        }

        workspace::prepare(&workspace.path).await?;

        let in_use: HashSet<u16> = self.table.lock().values().map(|e| e.port).collect();
        let port =
            ports::find_available_port(self.config.port_start, self.config.port_end, &in_use)?;

        let plan = launch::build_launch_plan(workspace, port, &self.config);
        tracing::info!(
            workspace_id = %workspace.id,
            port,
            program = %plan.program,
            cwd = %plan.cwd.display(),
            "starting notebook server"
        );

        let handle = self
            .adapter
            .spawn(&plan.program, &plan.args, &plan.cwd, &plan.env)
            .await?;
        self.table.lock().insert(
            workspace.id,
            Entry {
                port,
                handle: Arc::clone(&handle),
            },
        );

        // Settle, then catch servers that died on the launch pad
        tokio::time::sleep(self.config.settle_delay).await;
        match handle.poll().await {
            Ok(None) => {}
            Ok(Some(code)) => {
                let (stdout, stderr) = handle.read_output().await;
                let reason = diagnose::classify(&stdout, &stderr);
                self.remove_if_same(workspace.id, &handle);
                tracing::error!(
                    workspace_id = %workspace.id,
                    code,
                    reason = %reason,
                    "notebook server exited during startup"
                );
                return Err(StartError::StartupFailed {
                    reason,
                    output: diagnose::combined_output(&stdout, &stderr),
                });
            }
            Err(e) => {
                self.kill_and_remove(workspace.id, &handle).await;
                return Err(StartError::Spawn(e));
            }
        }

        let ready = readiness::await_port(
            port,
            self.config.readiness_attempts,
            self.config.readiness_interval,
            self.config.connect_timeout,
        )
        .await;
        if !ready {
            // Tolerant-success policy: process liveness counts as started
            // even if the port never answered within the retry budget
            tracing::warn!(
                workspace_id = %workspace.id,
                port,
                "port not reachable within retry budget, reporting success on liveness alone"
            );
        }

        if let Err(e) = self
            .store
            .update_process_info(workspace.id, Some(port), Some(NOAUTH_TOKEN.to_string()))
            .await
        {
            self.kill_and_remove(workspace.id, &handle).await;
            return Err(StartError::Store(e));
        }

        tracing::info!(workspace_id = %workspace.id, port, "notebook server running");
        Ok(StartResult {
            port,
            status: WorkspaceStatus::Running,
        })
    }

    /// Stop the workspace's process, graceful-then-forceful.
    ///
    /// `false` means "nothing to stop" or "termination errored" (logged);
    /// the two are deliberately not distinguished. The caller clears the
    /// store's port/status as its own explicit step.
    pub async fn stop(&self, id: WorkspaceId) -> bool {
        let lock = self.workspace_lock(id);
        let _guard = lock.lock().await;

        let entry = self.table.lock().remove(&id);
        let Some(entry) = entry else {
            tracing::debug!(workspace_id = %id, "stop: no process entry");
            return false;
        };

        match self.terminate(&entry).await {
            Ok(()) => {
                tracing::info!(workspace_id = %id, port = entry.port, "notebook server stopped");
                true
            }
            Err(e) => {
                tracing::error!(workspace_id = %id, error = %e, "stop failed");
                false
            }
        }
    }

    /// Whether the workspace has a live process right now.
    pub async fn is_alive(&self, id: WorkspaceId) -> bool {
        let Some((_port, handle)) = self.entry(id) else {
            return false;
        };
        matches!(handle.poll().await, Ok(None))
    }

    /// Point-in-time report for route handlers.
    pub async fn status(&self, id: WorkspaceId) -> ProcessStatus {
        let Some((port, handle)) = self.entry(id) else {
            return ProcessStatus {
                running: false,
                port: None,
            };
        };
        let running = matches!(handle.poll().await, Ok(None));
        ProcessStatus {
            running,
            port: running.then_some(port),
        }
    }

    /// Remove entries whose process has already exited. Caller-driven;
    /// `start` also reaps its own workspace's stale entry.
    pub async fn reap_dead(&self) {
        let snapshot: Vec<(WorkspaceId, Arc<dyn ProcessHandle>)> = self
            .table
            .lock()
            .iter()
            .map(|(id, e)| (*id, Arc::clone(&e.handle)))
            .collect();

        let mut reaped = 0usize;
        for (id, handle) in snapshot {
            if !matches!(handle.poll().await, Ok(None)) && self.remove_if_same(id, &handle) {
                tracing::info!(workspace_id = %id, "reaped dead process entry");
                reaped += 1;
            }
        }
        if reaped > 0 {
            tracing::debug!(reaped, "reap pass complete");
        }
    }

    /// Stop every live entry (application teardown).
    pub async fn shutdown(&self) {
        let ids: Vec<WorkspaceId> = self.table.lock().keys().copied().collect();
        tracing::info!(count = ids.len(), "supervisor shutting down");
        for id in ids {
            self.stop(id).await;
        }
    }

    /// Display URL for a workspace's running server.
    pub fn url(&self, workspace: &Workspace) -> Option<String> {
        workspace
            .port
            .map(|port| format!("{}:{}/lab", self.config.base_url, port))
    }

    fn workspace_lock(&self, id: WorkspaceId) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(self.locks.lock().entry(id).or_default())
    }

    fn entry(&self, id: WorkspaceId) -> Option<(u16, Arc<dyn ProcessHandle>)> {
        self.table
            .lock()
            .get(&id)
            .map(|e| (e.port, Arc::clone(&e.handle)))
    }

    /// Remove the entry for `id` only if it still holds `handle`, so a scan
    /// never removes an entry that was replaced since the snapshot.
    fn remove_if_same(&self, id: WorkspaceId, handle: &Arc<dyn ProcessHandle>) -> bool {
        let mut table = self.table.lock();
        if table
            .get(&id)
            .is_some_and(|e| Arc::ptr_eq(&e.handle, handle))
        {
            table.remove(&id);
            return true;
        }
        false
    }

    /// Post-spawn failure cleanup: no table entry may outlive its process.
    async fn kill_and_remove(&self, id: WorkspaceId, handle: &Arc<dyn ProcessHandle>) {
        if let Err(e) = handle.signal(SignalKind::Kill).await {
            tracing::warn!(workspace_id = %id, error = %e, "cleanup kill failed");
        }
        let _ = handle.wait(self.config.kill_timeout).await;
        self.remove_if_same(id, handle);
    }

    /// Graceful termination with bounded escalation.
    async fn terminate(&self, entry: &Entry) -> Result<(), lw_adapters::ProcessError> {
        entry.handle.signal(SignalKind::Terminate).await?;
        if entry.handle.wait(self.config.term_timeout).await?.is_some() {
            return Ok(());
        }

        tracing::warn!(port = entry.port, "graceful stop timed out, escalating to kill");
        entry.handle.signal(SignalKind::Kill).await?;
        if entry.handle.wait(self.config.kill_timeout).await?.is_none() {
            // Best effort: the entry is gone either way
            tracing::warn!(port = entry.port, "process survived kill timeout");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
