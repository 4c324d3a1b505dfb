// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lw_core::{OwnerId, WorkspaceId};

fn workspace() -> Workspace {
    Workspace::new(WorkspaceId::new(7), OwnerId::new("u1"), "/tmp/ws7")
}

#[test]
fn plan_targets_allocated_port_and_workspace_dir() {
    let plan = build_launch_plan(&workspace(), 8890, &SupervisorConfig::default());

    assert_eq!(plan.program, "python3");
    assert_eq!(plan.cwd, PathBuf::from("/tmp/ws7"));

    let port_pos = plan.args.iter().position(|a| a == "--port").unwrap();
    assert_eq!(plan.args[port_pos + 1], "8890");
    assert!(plan.args.contains(&"--notebook-dir=/tmp/ws7".to_string()));
}

#[test]
fn auth_is_disabled_and_remote_access_enabled() {
    let plan = build_launch_plan(&workspace(), 8890, &SupervisorConfig::default());

    assert!(plan.args.contains(&"--ServerApp.token=''".to_string()));
    assert!(plan.args.contains(&"--ServerApp.password=''".to_string()));
    assert!(plan
        .args
        .contains(&"--ServerApp.allow_remote_access=True".to_string()));
    assert!(plan.args.contains(&"--no-browser".to_string()));
}

#[test]
fn jupyter_dirs_are_scoped_inside_workspace() {
    let plan = build_launch_plan(&workspace(), 8890, &SupervisorConfig::default());

    let get = |key: &str| {
        plan.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    assert_eq!(get("PYTHONPATH").as_deref(), Some("/tmp/ws7"));
    assert_eq!(
        get("JUPYTER_RUNTIME_DIR").as_deref(),
        Some("/tmp/ws7/.jupyter/runtime")
    );
    assert_eq!(
        get("JUPYTER_DATA_DIR").as_deref(),
        Some("/tmp/ws7/.jupyter/data")
    );
    assert_eq!(
        get("JUPYTER_CONFIG_DIR").as_deref(),
        Some("/tmp/ws7/.jupyter/config")
    );
}

#[test]
fn absolute_interpreter_prepends_its_directory_to_path() {
    let config = SupervisorConfig {
        python: PathBuf::from("/opt/venv/bin/python3"),
        ..SupervisorConfig::default()
    };

    let plan = build_launch_plan(&workspace(), 8890, &config);

    let path_var = plan
        .env
        .iter()
        .find(|(k, _)| k == "PATH")
        .map(|(_, v)| v.clone())
        .unwrap();
    assert!(path_var.starts_with("/opt/venv/bin"));
}

#[test]
fn bare_interpreter_name_leaves_path_alone() {
    let plan = build_launch_plan(&workspace(), 8890, &SupervisorConfig::default());
    assert!(!plan.env.iter().any(|(k, _)| k == "PATH"));
}
