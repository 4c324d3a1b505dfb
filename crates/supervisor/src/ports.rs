// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Port allocation by bind probe.
//!
//! Allocation is advisory: the probe binds and immediately releases, so a
//! window remains between "probe succeeded" and "subprocess actually binds"
//! (TOCTOU). Ports held by live table entries are excluded up front, which
//! keeps point-in-time uniqueness across the supervisor's own processes even
//! before they bind.

use crate::error::StartError;
use std::collections::HashSet;
use std::net::TcpListener;

/// First free port in `[start, end)` not in `in_use`, confirmed by an
/// exclusive local bind-and-release probe.
pub fn find_available_port(
    start: u16,
    end: u16,
    in_use: &HashSet<u16>,
) -> Result<u16, StartError> {
    for port in start..end {
        if in_use.contains(&port) {
            continue;
        }
        match TcpListener::bind(("127.0.0.1", port)) {
            Ok(_listener) => return Ok(port),
            Err(_) => continue,
        }
    }
    Err(StartError::NoPortAvailable { start, end })
}

#[cfg(test)]
#[path = "ports_tests.rs"]
mod tests;
