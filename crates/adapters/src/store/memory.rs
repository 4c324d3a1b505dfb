// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory workspace store

use super::{StoreError, WorkspaceStore};
use async_trait::async_trait;
use lw_core::{Workspace, WorkspaceId, WorkspaceStatus};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory [`WorkspaceStore`] keyed by workspace id.
///
/// Used for tests and single-process deployments; a database-backed store
/// implements the same trait elsewhere.
#[derive(Clone, Default)]
pub struct MemoryWorkspaceStore {
    inner: Arc<Mutex<HashMap<WorkspaceId, Workspace>>>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record (record creation is outside the supervisor's contract).
    pub fn insert(&self, workspace: Workspace) {
        self.inner.lock().insert(workspace.id, workspace);
    }
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    async fn read(&self, id: WorkspaceId) -> Result<Workspace, StoreError> {
        self.inner
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_process_info(
        &self,
        id: WorkspaceId,
        port: Option<u16>,
        token: Option<String>,
    ) -> Result<Workspace, StoreError> {
        let mut inner = self.inner.lock();
        let workspace = inner.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        workspace.port = port;
        workspace.auth_token = token;
        workspace.status = if port.is_some() {
            WorkspaceStatus::Running
        } else {
            WorkspaceStatus::Stopped
        };

        Ok(workspace.clone())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
