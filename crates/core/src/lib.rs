// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lw-core: Domain types for the Lab Warden workspace supervisor

pub mod owner;
pub mod workspace;

pub use owner::OwnerId;
pub use workspace::{ProcessStatus, StartResult, Workspace, WorkspaceId, WorkspaceStatus};
