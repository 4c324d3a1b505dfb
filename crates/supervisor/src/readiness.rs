// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness detection: bounded-retry TCP connect probing.

use std::time::Duration;
use tokio::net::TcpStream;

/// Single TCP connect probe against localhost.
pub async fn port_open(port: u16, connect_timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(connect_timeout, TcpStream::connect(("127.0.0.1", port))).await,
        Ok(Ok(_))
    )
}

/// Probe `port` up to `attempts` times, sleeping `interval` between tries.
///
/// Returns whether the port ever accepted a connection. Callers decide what
/// a `false` means; the supervisor treats it as degraded readiness, not a
/// hard failure.
pub async fn await_port(
    port: u16,
    attempts: u32,
    interval: Duration,
    connect_timeout: Duration,
) -> bool {
    for attempt in 0..attempts {
        if port_open(port, connect_timeout).await {
            tracing::debug!(port, attempt, "port accepted connection");
            return true;
        }
        if attempt + 1 < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    false
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
