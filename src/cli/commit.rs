// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI arguments for the `commit` command.
//!
//! ```text
//! forge-commit commit --repo R --base B -m MSG [--new-branch N [--pull-request]] PATH...
//!
//! USAGE:
//! $ forge-commit commit --repo site --base main -m "Update docs" docs/
//! $ forge-commit commit --repo site --base main -m "Fix" \
//!       --new-branch fix-typo --pull-request README.md
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `commit` command.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// GitHub access token.
    #[arg(long = "token", value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository name, owned by the token's user.
    #[arg(short = 'r', long = "repo", value_name = "NAME")]
    pub repo: String,

    /// Branch to commit onto, or to fork the new branch from.
    #[arg(short = 'b', long = "base", value_name = "BRANCH")]
    pub base: String,

    /// Commit message, also used as pull request title.
    #[arg(short = 'm', long = "message", value_name = "MESSAGE")]
    pub message: String,

    /// Create this branch from the base branch and commit there.
    #[arg(short = 'n', long = "new-branch", value_name = "BRANCH")]
    pub new_branch: Option<String>,

    /// Open a pull request from the new branch into the base branch.
    #[arg(short = 'p', long = "pull-request", requires = "new_branch")]
    pub pull_request: bool,

    /// Directory the paths are relative to [default: current directory].
    #[arg(long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Files or directories to commit.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}
