// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit command: collect local files and commit them through the forge API.
//!
//! ```text
//! CommitArgs --> collect_files() --> CommitRequest
//!            --> CommitOrchestrator<GitHubClient>::execute() --> summary
//! ```

use anyhow::Context;
use tracing::info;

use crate::cli::commit::CommitArgs;
use crate::commit::{CommitOrchestrator, CommitOutcome, CommitRequest};
use crate::config::Config;
use crate::error::Result;
use crate::forge::github::GitHubClient;
use crate::utility::fs::walk::{WalkOptions, collect_files};


/// Builds the commit request from command-line arguments.
#[must_use]
pub fn build_request(args: &CommitArgs) -> CommitRequest {
    CommitRequest::builder()
        .access_token(args.token.clone().unwrap_or_default())
        .repository(args.repo.as_str())
        .base_branch(args.base.as_str())
        .create_new_branch(args.new_branch.is_some())
        .maybe_new_branch(args.new_branch.clone())
        .create_pull_request(args.pull_request)
        .build()
}

/// Summary lines printed after a successful commit.
#[must_use]
pub fn format_outcome(outcome: &CommitOutcome) -> Vec<String> {
    let mut lines = vec![
        format!("branch: {}", outcome.branch),
        format!("commit: {}", outcome.commit_sha),
    ];
    if let Some(pull) = &outcome.pull_request {
        lines.push(format!("pull request: #{} {}", pull.number, pull.html_url));
    }
    lines
}

/// Run the commit command.
///
/// # Errors
///
/// Returns an error if:
/// - The paths cannot be collected (missing, outside the root, not UTF-8 text).
/// - The orchestration fails at any step.
pub async fn run_commit_command(args: &CommitArgs, config: &Config) -> Result<()> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let files = collect_files(&root, &args.paths, &WalkOptions::default())
        .with_context(|| format!("failed to collect files under {}", root.display()))?;
    info!(root = %root.display(), files = files.len(), "collected file changes");

    let request = build_request(args);
    let orchestrator = CommitOrchestrator::new(GitHubClient::new(&config.forge))
        .with_bootstrap(config.bootstrap.clone());

    let outcome = orchestrator
        .execute(&request, &files, &args.message)
        .await
        .with_context(|| format!("failed to commit to {}", args.repo))?;

    for line in format_outcome(&outcome) {
        println!("{line}");
    }
    Ok(())
}
