// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn startup_failed_includes_reason_and_output() {
    let err = StartError::StartupFailed {
        reason: "a required component is not installed".to_string(),
        output: "STDERR: ModuleNotFoundError".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("a required component is not installed"));
    assert!(msg.contains("ModuleNotFoundError"));
}

#[test]
fn long_output_is_truncated() {
    let err = StartError::StartupFailed {
        reason: "unknown failure".to_string(),
        output: "x".repeat(5000),
    };
    let msg = err.to_string();
    assert!(msg.contains("[truncated]"));
    assert!(msg.len() < 2000);
}

#[test]
fn no_port_available_names_the_range() {
    let err = StartError::NoPortAvailable {
        start: 9000,
        end: 9001,
    };
    assert_eq!(err.to_string(), "no port available in range 9000..9001");
}
