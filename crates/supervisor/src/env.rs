// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the supervisor crate.

use std::path::PathBuf;
use std::time::Duration;

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse::<T>().ok())
}

/// Port range start override
pub fn port_start() -> Option<u16> {
    parse_var("LW_PORT_START")
}

/// Port range end (exclusive) override
pub fn port_end() -> Option<u16> {
    parse_var("LW_PORT_END")
}

/// Display base URL override
pub fn base_url() -> Option<String> {
    std::env::var("LW_BASE_URL").ok()
}

/// Notebook-server interpreter override
pub fn python() -> Option<PathBuf> {
    std::env::var("LW_PYTHON").ok().map(PathBuf::from)
}

/// Post-spawn settle delay override
pub fn settle_delay() -> Option<Duration> {
    parse_var::<u64>("LW_SETTLE_MS").map(Duration::from_millis)
}

/// Readiness probe attempt budget override
pub fn readiness_attempts() -> Option<u32> {
    parse_var("LW_READINESS_ATTEMPTS")
}

/// Readiness probe interval override
pub fn readiness_interval() -> Option<Duration> {
    parse_var::<u64>("LW_READINESS_INTERVAL_MS").map(Duration::from_millis)
}
