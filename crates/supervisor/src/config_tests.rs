// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn defaults_match_deployment_baseline() {
    let config = SupervisorConfig::default();
    assert_eq!(config.port_start, 8888);
    assert_eq!(config.port_end, 9000);
    assert_eq!(config.base_url, "http://localhost");
    assert_eq!(config.settle_delay, Duration::from_secs(5));
}

// Env tests are serialized because they mutate process-wide variables.

#[test]
#[serial(lw_env)]
fn from_env_applies_overrides() {
    std::env::set_var("LW_PORT_START", "9100");
    std::env::set_var("LW_PORT_END", "9110");
    std::env::set_var("LW_SETTLE_MS", "50");
    std::env::set_var("LW_READINESS_ATTEMPTS", "2");

    let config = SupervisorConfig::from_env();

    std::env::remove_var("LW_PORT_START");
    std::env::remove_var("LW_PORT_END");
    std::env::remove_var("LW_SETTLE_MS");
    std::env::remove_var("LW_READINESS_ATTEMPTS");

    assert_eq!(config.port_start, 9100);
    assert_eq!(config.port_end, 9110);
    assert_eq!(config.settle_delay, Duration::from_millis(50));
    assert_eq!(config.readiness_attempts, 2);
}

#[test]
#[serial(lw_env)]
fn from_env_ignores_unparseable_values() {
    std::env::set_var("LW_PORT_START", "not-a-port");

    let config = SupervisorConfig::from_env();

    std::env::remove_var("LW_PORT_START");

    assert_eq!(config.port_start, 8888);
}
