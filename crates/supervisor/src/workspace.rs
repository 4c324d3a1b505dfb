// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace directory preparation

use serde_json::json;
use std::io;
use std::path::Path;
use tokio::fs;

/// Ensure the workspace directory exists with its standard layout.
///
/// Creates the directory recursively if missing, plus the `notebooks/`,
/// `data/`, and `outputs/` subdirectories. A starter notebook is written the
/// first time only; user files are never touched.
pub async fn prepare(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).await?;

    let notebooks = path.join("notebooks");
    fs::create_dir_all(&notebooks).await?;
    fs::create_dir_all(path.join("data")).await?;
    fs::create_dir_all(path.join("outputs")).await?;

    let welcome = notebooks.join("Welcome.ipynb");
    if !welcome.exists() {
        fs::write(&welcome, welcome_notebook()).await?;
    }

    Ok(())
}

/// Starter notebook content for a fresh workspace.
fn welcome_notebook() -> String {
    let notebook = json!({
        "cells": [
            {
                "cell_type": "markdown",
                "metadata": {},
                "source": [
                    "# Welcome to your workspace\n",
                    "\n",
                    "Folder layout:\n",
                    "- `notebooks/`: notebook files\n",
                    "- `data/`: input data\n",
                    "- `outputs/`: saved results"
                ]
            },
            {
                "cell_type": "code",
                "execution_count": null,
                "metadata": {},
                "outputs": [],
                "source": [
                    "print('workspace ready')"
                ]
            }
        ],
        "metadata": {
            "kernelspec": {
                "display_name": "Python 3",
                "language": "python",
                "name": "python3"
            },
            "language_info": { "name": "python" }
        },
        "nbformat": 4,
        "nbformat_minor": 4
    });
    serde_json::to_string_pretty(&notebook).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
