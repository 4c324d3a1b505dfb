// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lw-adapters: Seams between the supervisor and the outside world.
//!
//! `process` wraps OS process spawning and signalling behind a trait so the
//! supervisor can be driven against fakes; `store` does the same for the
//! persisted workspace records.

pub mod process;
pub mod store;

pub use process::{HostProcessAdapter, ProcessAdapter, ProcessError, ProcessHandle, SignalKind};
pub use store::{MemoryWorkspaceStore, StoreError, WorkspaceStore};

#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcessAdapter, ProcessCall, SpawnScript};
