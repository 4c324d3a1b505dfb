// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lw-supervisor: Per-workspace notebook-server process supervision.
//!
//! One [`Supervisor`] instance owns the table of live subprocesses. For each
//! workspace it allocates a port from the configured range, prepares the
//! workspace directory, spawns the server, detects immediate-exit failures
//! (classifying them from captured output), probes the port for readiness,
//! and records the outcome in the workspace store. Stop is graceful-then-
//! forceful with bounded waits.

pub mod config;
pub mod diagnose;
mod env;
pub mod error;
pub mod launch;
pub mod ports;
pub mod readiness;
pub mod supervisor;
pub mod workspace;

pub use config::SupervisorConfig;
pub use error::StartError;
pub use supervisor::{Supervisor, NOAUTH_TOKEN};
