// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace record and process lifecycle status.
//!
//! A workspace is a per-user project directory that may have at most one
//! running notebook-server process. The supervisor owns the process; the
//! record here mirrors what the workspace store persists about it (assigned
//! port, last-known status, auth token placeholder).

use crate::owner::OwnerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Unique identifier of a workspace (the store's primary key).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WorkspaceId(pub i64);

impl WorkspaceId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WorkspaceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Last-known state of a workspace's notebook-server process.
///
/// Transitions are driven only by supervisor start/stop outcomes. `port` on
/// the record is populated iff the status is `Running` (a brief window of
/// inconsistency is tolerated while `Starting`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceStatus {
    /// No process; the resting state
    #[default]
    Stopped,
    /// Start requested, process not yet confirmed up
    Starting,
    /// Process alive with an assigned port
    Running,
    /// Last start attempt failed
    Error,
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceStatus::Stopped => write!(f, "stopped"),
            WorkspaceStatus::Starting => write!(f, "starting"),
            WorkspaceStatus::Running => write!(f, "running"),
            WorkspaceStatus::Error => write!(f, "error"),
        }
    }
}

/// Persisted workspace record, as read from the workspace store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub owner_id: OwnerId,
    /// Absolute directory backing the workspace; created before spawn if missing.
    pub path: PathBuf,
    /// Assigned notebook-server port; set on successful start, cleared on stop.
    pub port: Option<u16>,
    pub status: WorkspaceStatus,
    /// Auth token placeholder (fixed no-auth scheme).
    pub auth_token: Option<String>,
}

impl Workspace {
    /// A workspace with no process state, ready to be started.
    pub fn new(id: WorkspaceId, owner_id: OwnerId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            owner_id,
            path: path.into(),
            port: None,
            status: WorkspaceStatus::Stopped,
            auth_token: None,
        }
    }
}

/// Outcome of a successful start call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartResult {
    pub port: u16,
    pub status: WorkspaceStatus,
}

/// Point-in-time process report for a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessStatus {
    pub running: bool,
    pub port: Option<u16>,
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
