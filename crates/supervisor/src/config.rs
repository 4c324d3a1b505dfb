// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor configuration

use crate::env;
use std::path::PathBuf;
use std::time::Duration;

/// Tunables for the workspace process supervisor.
///
/// Defaults match a local single-host deployment; every timing knob has an
/// `LW_*` environment override so tests and constrained hosts can shrink the
/// waits (see `env.rs`).
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// First port considered for allocation (inclusive)
    pub port_start: u16,
    /// End of the port range (exclusive)
    pub port_end: u16,
    /// Base URL used only for display URL construction
    pub base_url: String,
    /// Interpreter used to launch the notebook server
    pub python: PathBuf,
    /// Delay after spawn before the immediate-exit check
    pub settle_delay: Duration,
    /// Readiness probe attempts before giving up (soft)
    pub readiness_attempts: u32,
    /// Delay between readiness probe attempts
    pub readiness_interval: Duration,
    /// Per-attempt TCP connect timeout
    pub connect_timeout: Duration,
    /// Wait after graceful termination before escalating
    pub term_timeout: Duration,
    /// Wait after forceful kill before giving up (best-effort)
    pub kill_timeout: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            port_start: 8888,
            port_end: 9000,
            base_url: "http://localhost".to_string(),
            python: PathBuf::from("python3"),
            settle_delay: Duration::from_secs(5),
            readiness_attempts: 20,
            readiness_interval: Duration::from_secs(1),
            connect_timeout: Duration::from_millis(500),
            term_timeout: Duration::from_secs(10),
            kill_timeout: Duration::from_secs(5),
        }
    }
}

impl SupervisorConfig {
    /// Defaults with any `LW_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(start) = env::port_start() {
            config.port_start = start;
        }
        if let Some(end) = env::port_end() {
            config.port_end = end;
        }
        if let Some(url) = env::base_url() {
            config.base_url = url;
        }
        if let Some(python) = env::python() {
            config.python = python;
        }
        if let Some(delay) = env::settle_delay() {
            config.settle_delay = delay;
        }
        if let Some(attempts) = env::readiness_attempts() {
            config.readiness_attempts = attempts;
        }
        if let Some(interval) = env::readiness_interval() {
            config.readiness_interval = interval;
        }
        config
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
