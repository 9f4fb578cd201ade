// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit request, file changes and the validated plan.
//!
//! ```text
//! CommitRequest + [FileChange] --validate()--> CommitPlan
//!   create_new_branch=false                -> CommitOnly        (PR flag ignored)
//!   create_new_branch=true, pr=false       -> CommitOnNewBranch
//!   create_new_branch=true, pr=true        -> CommitOnNewBranchWithPullRequest
//! ```

use bon::Builder;

use crate::error::{CommitError, CommitResult};
use crate::forge::AccessToken;

/// What to commit, where, and whether to open a pull request.
#[derive(Debug, Clone, Builder)]
pub struct CommitRequest {
    #[builder(into)]
    access_token: AccessToken,
    /// Repository name, owned by the token's user.
    #[builder(into)]
    repository: String,
    #[builder(into)]
    base_branch: String,
    #[builder(default)]
    create_new_branch: bool,
    /// Required when `create_new_branch` is set.
    #[builder(into)]
    new_branch: Option<String>,
    /// Only honoured together with `create_new_branch`.
    #[builder(default)]
    create_pull_request: bool,
}

impl CommitRequest {
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Repository name, without surrounding whitespace.
    #[must_use]
    pub fn repository(&self) -> &str {
        self.repository.trim()
    }

    /// Base branch name, without surrounding whitespace.
    #[must_use]
    pub fn base_branch(&self) -> &str {
        self.base_branch.trim()
    }

    #[must_use]
    pub const fn create_new_branch(&self) -> bool {
        self.create_new_branch
    }

    /// New branch name, without surrounding whitespace.
    #[must_use]
    pub fn new_branch(&self) -> Option<&str> {
        self.new_branch.as_deref().map(str::trim)
    }

    #[must_use]
    pub const fn create_pull_request(&self) -> bool {
        self.create_pull_request
    }

    /// Check the request and the file list, and decide the commit plan.
    ///
    /// All problems are reported at once.
    ///
    /// # Errors
    ///
    /// Returns `CommitError::Validation` listing every missing field or
    /// invalid file change.
    pub fn validate(&self, files: &[FileChange]) -> CommitResult<CommitPlan> {
        let mut problems = Vec::new();

        if self.access_token.is_empty() {
            problems.push("access token is required".to_string());
        }
        if self.repository().is_empty() {
            problems.push("repository is required".to_string());
        }
        if self.base_branch().is_empty() {
            problems.push("base branch is required".to_string());
        }

        let new_branch = self.new_branch().filter(|name| !name.is_empty());
        if self.create_new_branch && new_branch.is_none() {
            problems.push("new branch is required when creating a new branch".to_string());
        }

        if files.is_empty() {
            problems.push("at least one file change is required".to_string());
        }
        for (index, file) in files.iter().enumerate() {
            if file.path.trim().is_empty() {
                problems.push(format!("file change #{} has an empty path", index + 1));
            }
        }

        if !problems.is_empty() {
            return Err(CommitError::Validation(problems.join("; ").into_boxed_str()));
        }

        Ok(match new_branch {
            Some(branch) if self.create_new_branch => {
                let branch = branch.to_string();
                if self.create_pull_request {
                    CommitPlan::CommitOnNewBranchWithPullRequest { branch }
                } else {
                    CommitPlan::CommitOnNewBranch { branch }
                }
            }
            _ => CommitPlan::CommitOnly,
        })
    }
}

/// Shape of the requested outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitPlan {
    /// Commit directly onto the base branch.
    CommitOnly,
    /// Commit onto a new branch forked from the base branch.
    CommitOnNewBranch { branch: String },
    /// As `CommitOnNewBranch`, then open a pull request into the base branch.
    CommitOnNewBranchWithPullRequest { branch: String },
}

impl CommitPlan {
    /// Branch to create, if any.
    #[must_use]
    pub fn new_branch(&self) -> Option<&str> {
        match self {
            Self::CommitOnly => None,
            Self::CommitOnNewBranch { branch }
            | Self::CommitOnNewBranchWithPullRequest { branch } => Some(branch),
        }
    }

    #[must_use]
    pub const fn opens_pull_request(&self) -> bool {
        matches!(self, Self::CommitOnNewBranchWithPullRequest { .. })
    }
}

/// One file to write, by repository-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    path: String,
    content: String,
}

impl FileChange {
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
