// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the supervisor

use lw_adapters::{ProcessError, StoreError};
use thiserror::Error;

/// Maximum captured-output length carried in a start error message.
const OUTPUT_SNIPPET_LEN: usize = 1024;

/// Errors from starting a workspace process.
///
/// Pre-spawn failures (directory, port, spawn) propagate directly; post-spawn
/// failures always clean up the table entry before surfacing.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("no port available in range {start}..{end}")]
    NoPortAvailable { start: u16, end: u16 },
    #[error("notebook server exited during startup: {reason}\n{}", truncate_output(.output))]
    StartupFailed { reason: String, output: String },
    #[error("workspace directory preparation failed: {0}")]
    Workspace(#[from] std::io::Error),
    #[error("spawn failed: {0}")]
    Spawn(#[from] ProcessError),
    #[error("workspace store update failed: {0}")]
    Store(#[from] StoreError),
}

/// Cap raw subprocess output to a readable snippet.
fn truncate_output(output: &str) -> String {
    if output.len() <= OUTPUT_SNIPPET_LEN {
        return output.to_string();
    }
    let mut end = OUTPUT_SNIPPET_LEN;
    while !output.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &output[..end])
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
