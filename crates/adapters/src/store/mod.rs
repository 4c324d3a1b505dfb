// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace store adapters

mod memory;

pub use memory::MemoryWorkspaceStore;

use async_trait::async_trait;
use lw_core::{Workspace, WorkspaceId};
use thiserror::Error;

/// Errors from workspace store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workspace not found: {0}")]
    NotFound(WorkspaceId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persisted workspace records, as consumed by the supervisor.
///
/// The supervisor never creates or deletes records; it only reads them and
/// updates the process-related fields (port, token, status).
#[async_trait]
pub trait WorkspaceStore: Clone + Send + Sync + 'static {
    async fn read(&self, id: WorkspaceId) -> Result<Workspace, StoreError>;

    /// Record a start (`port: Some`) or a stop (`port: None`). The stored
    /// status follows: `Running` with a port, `Stopped` without.
    async fn update_process_info(
        &self,
        id: WorkspaceId,
        port: Option<u16>,
        token: Option<String>,
    ) -> Result<Workspace, StoreError>;
}
