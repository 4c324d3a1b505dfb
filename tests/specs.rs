//! Behavioral specifications for the workspace supervisor.
//!
//! These tests are end-to-end against real host processes: the notebook
//! interpreter is replaced by a stub shell script so no Jupyter install is
//! needed, but spawning, signalling, and escalation are the real thing.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use lw_adapters::{HostProcessAdapter, MemoryWorkspaceStore, WorkspaceStore};
use lw_core::{OwnerId, Workspace, WorkspaceId, WorkspaceStatus};
use lw_supervisor::{StartError, Supervisor, SupervisorConfig, NOAUTH_TOKEN};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Write an executable stub standing in for the notebook interpreter.
fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

fn config(python: PathBuf, port_start: u16, port_end: u16) -> SupervisorConfig {
    SupervisorConfig {
        port_start,
        port_end,
        python,
        settle_delay: Duration::from_millis(200),
        readiness_attempts: 1,
        readiness_interval: Duration::from_millis(10),
        connect_timeout: Duration::from_millis(100),
        term_timeout: Duration::from_secs(2),
        kill_timeout: Duration::from_secs(2),
        ..SupervisorConfig::default()
    }
}

fn seeded_store(dir: &Path, id: i64) -> (MemoryWorkspaceStore, Workspace) {
    let store = MemoryWorkspaceStore::new();
    let ws = Workspace::new(
        WorkspaceId::new(id),
        OwnerId::random(),
        dir.join(format!("ws{}", id)),
    );
    store.insert(ws.clone());
    (store, ws)
}

#[tokio::test]
async fn start_stop_round_trip_with_real_process() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "python-stub", "exec sleep 30");
    let (store, ws) = seeded_store(dir.path(), 1);
    let supervisor = Supervisor::new(
        HostProcessAdapter::new(),
        store.clone(),
        config(stub, 23000, 23010),
    );

    let result = supervisor.start(&ws).await.unwrap();
    assert!((23000..23010).contains(&result.port));
    assert_eq!(result.status, WorkspaceStatus::Running);
    assert!(supervisor.is_alive(ws.id).await);

    let stored = store.read(ws.id).await.unwrap();
    assert_eq!(stored.port, Some(result.port));
    assert_eq!(stored.auth_token.as_deref(), Some(NOAUTH_TOKEN));

    assert!(supervisor.stop(ws.id).await);
    assert!(!supervisor.is_alive(ws.id).await);
    assert!(!supervisor.stop(ws.id).await);

    // The store cleanup is the caller's explicit follow-up
    store.update_process_info(ws.id, None, None).await.unwrap();
    let cleared = store.read(ws.id).await.unwrap();
    assert_eq!(cleared.port, None);
    assert_eq!(cleared.status, WorkspaceStatus::Stopped);
}

#[tokio::test]
async fn workspace_layout_is_created_on_first_start() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "python-stub", "exec sleep 30");
    let (store, ws) = seeded_store(dir.path(), 2);
    let supervisor = Supervisor::new(
        HostProcessAdapter::new(),
        store,
        config(stub, 23010, 23020),
    );

    supervisor.start(&ws).await.unwrap();

    assert!(ws.path.join("notebooks/Welcome.ipynb").is_file());
    assert!(ws.path.join("data").is_dir());
    assert!(ws.path.join("outputs").is_dir());

    supervisor.stop(ws.id).await;
}

#[tokio::test]
async fn immediate_crash_surfaces_classified_reason() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(
        dir.path(),
        "python-stub",
        "echo \"ModuleNotFoundError: No module named 'jupyterlab'\" 1>&2\nexit 1",
    );
    let (store, ws) = seeded_store(dir.path(), 3);
    let supervisor = Supervisor::new(
        HostProcessAdapter::new(),
        store,
        config(stub, 23020, 23030),
    );

    let err = supervisor.start(&ws).await.unwrap_err();
    match err {
        StartError::StartupFailed { reason, output } => {
            assert!(
                reason.contains("not correctly installed"),
                "reason: {}",
                reason
            );
            assert!(output.contains("No module named 'jupyterlab'"));
        }
        other => panic!("expected StartupFailed, got {:?}", other),
    }
    assert!(!supervisor.is_alive(ws.id).await);
}

#[tokio::test]
async fn stop_escalates_past_term_trapping_process() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "python-stub", "trap '' TERM\nsleep 30");
    let (store, ws) = seeded_store(dir.path(), 4);
    let supervisor = Supervisor::new(
        HostProcessAdapter::new(),
        store,
        config(stub, 23030, 23040),
    );

    supervisor.start(&ws).await.unwrap();
    assert!(supervisor.is_alive(ws.id).await);

    assert!(supervisor.stop(ws.id).await);
    assert!(!supervisor.is_alive(ws.id).await);
}

#[tokio::test]
async fn shutdown_tears_down_all_workspaces() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "python-stub", "exec sleep 30");

    let store = MemoryWorkspaceStore::new();
    let mut workspaces = Vec::new();
    for id in 5..8 {
        let ws = Workspace::new(
            WorkspaceId::new(id),
            OwnerId::random(),
            dir.path().join(format!("ws{}", id)),
        );
        store.insert(ws.clone());
        workspaces.push(ws);
    }

    let supervisor = Supervisor::new(
        HostProcessAdapter::new(),
        store,
        config(stub, 23040, 23050),
    );

    let mut ports = Vec::new();
    for ws in &workspaces {
        ports.push(supervisor.start(ws).await.unwrap().port);
    }
    ports.sort_unstable();
    ports.dedup();
    assert_eq!(ports.len(), workspaces.len(), "ports are distinct");

    supervisor.shutdown().await;
    for ws in &workspaces {
        assert!(!supervisor.is_alive(ws.id).await);
    }
}
