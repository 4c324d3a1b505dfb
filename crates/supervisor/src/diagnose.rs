// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup failure classification.
//!
//! When the notebook server exits during the settle window, its captured
//! output is scanned for known failure signatures to turn a raw traceback
//! into an actionable reason. Signatures are checked most-specific first;
//! every match contributes to the reason so compound failures stay visible.

/// One recognizable failure signature class.
struct Signature {
    needles: &'static [&'static str],
    reason: &'static str,
}

const SIGNATURES: &[Signature] = &[
    Signature {
        needles: &[
            "No module named jupyter",
            "No module named jupyterlab",
            "No module named notebook",
            "jupyter: command not found",
        ],
        reason: "the notebook launcher is not correctly installed",
    },
    Signature {
        needles: &["ModuleNotFoundError", "ImportError"],
        reason: "a required component is not installed",
    },
    Signature {
        needles: &["PermissionError", "Permission denied", "EACCES"],
        reason: "permission problem accessing the workspace",
    },
    Signature {
        needles: &[
            "Address already in use",
            "address is already in use",
            "EADDRINUSE",
        ],
        reason: "the allocated port is already in use",
    },
];

/// Classify combined stdout/stderr of a crashed startup.
///
/// Returns the matching reasons joined with "; ", or "unknown failure" when
/// nothing matches (the raw output travels alongside in the error).
pub fn classify(stdout: &str, stderr: &str) -> String {
    let mut reasons: Vec<&'static str> = Vec::new();
    for sig in SIGNATURES {
        let matched = sig
            .needles
            .iter()
            .any(|needle| stdout.contains(needle) || stderr.contains(needle));
        if matched && !reasons.contains(&sig.reason) {
            reasons.push(sig.reason);
        }
    }
    if reasons.is_empty() {
        "unknown failure".to_string()
    } else {
        reasons.join("; ")
    }
}

/// Combined output block carried in `StartupFailed` errors.
pub fn combined_output(stdout: &str, stderr: &str) -> String {
    format!("STDOUT: {}\nSTDERR: {}", stdout, stderr)
}

#[cfg(test)]
#[path = "diagnose_tests.rs"]
mod tests;
