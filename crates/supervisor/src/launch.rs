// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notebook-server launch plan construction

use crate::config::SupervisorConfig;
use lw_core::Workspace;
use std::path::{Path, PathBuf};

/// Everything needed to spawn one notebook-server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

/// Build the spawn command for a workspace's notebook server.
///
/// The server runs with authentication disabled (fixed no-token mode) and
/// remote access enabled; access control happens in the platform layer in
/// front of it. JUPYTER_* directories are scoped inside the workspace so
/// concurrent instances never collide on shared default paths, and PATH is
/// prepended with the interpreter's own directory so the server resolves
/// kernels from the runtime that launched it.
pub fn build_launch_plan(workspace: &Workspace, port: u16, config: &SupervisorConfig) -> LaunchPlan {
    let ws_path = workspace.path.display().to_string();

    let args = vec![
        "-m".to_string(),
        "jupyter".to_string(),
        "lab".to_string(),
        "--port".to_string(),
        port.to_string(),
        "--no-browser".to_string(),
        "--ip".to_string(),
        "0.0.0.0".to_string(),
        format!("--notebook-dir={}", ws_path),
        "--ServerApp.token=''".to_string(),
        "--ServerApp.password=''".to_string(),
        "--ServerApp.disable_check_xsrf=True".to_string(),
        "--ServerApp.allow_origin='*'".to_string(),
        "--ServerApp.allow_remote_access=True".to_string(),
    ];

    let jupyter_dir = workspace.path.join(".jupyter");
    let mut env = vec![
        ("PYTHONPATH".to_string(), ws_path),
        (
            "JUPYTER_RUNTIME_DIR".to_string(),
            jupyter_dir.join("runtime").display().to_string(),
        ),
        (
            "JUPYTER_DATA_DIR".to_string(),
            jupyter_dir.join("data").display().to_string(),
        ),
        (
            "JUPYTER_CONFIG_DIR".to_string(),
            jupyter_dir.join("config").display().to_string(),
        ),
    ];

    if let Some(path_var) = prepended_path(&config.python) {
        env.push(("PATH".to_string(), path_var));
    }

    LaunchPlan {
        program: config.python.display().to_string(),
        args,
        cwd: workspace.path.clone(),
        env,
    }
}

/// PATH with the interpreter's directory in front, when the interpreter is
/// given as an absolute path.
fn prepended_path(python: &Path) -> Option<String> {
    let dir = python.parent().filter(|p| !p.as_os_str().is_empty())?;
    let current = std::env::var("PATH").unwrap_or_default();
    Some(if current.is_empty() {
        dir.display().to_string()
    } else {
        format!("{}:{}", dir.display(), current)
    })
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
