// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 CommitError (<= 32 bytes)
//!                          |
//!   +-----------+----------+----------+------------+
//!   v           v          v          v            v
//! Validation  Invalid   Repository Bootstrap  RemoteOperation
//!  Box<str>   Creds     NotFound    Failed       Failed
//!                \          |          |        { step, .. }
//!                 +---------+----------+------------+
//!                                  v
//!                          Box<ForgeError>
//!
//! ForgeError   NotFound, Conflict, Http, InvalidUrl, Reqwest
//! ConfigError  MissingKey, InvalidValue
//! ```

use std::fmt;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`CommitError`].
pub type CommitResult<T> = std::result::Result<T, CommitError>;

/// Result type using [`ForgeError`].
pub type ForgeResult<T> = std::result::Result<T, ForgeError>;

// --- Commit Errors ---

/// Failure of one commit orchestration.
///
/// Remote causes are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The request was rejected before any remote call.
    #[error("invalid request: {0}")]
    Validation(Box<str>),

    /// The access token could not be exchanged for an identity.
    #[error("invalid access token")]
    InvalidCredentials(#[source] Box<ForgeError>),

    /// The repository could not be found under the resolved identity.
    #[error("repository not found: {repository}")]
    RepositoryNotFound {
        repository: Box<str>,
        #[source]
        source: Box<ForgeError>,
    },

    /// The seed commit for an empty repository could not be created.
    #[error("failed to create initial commit in {repository}")]
    BootstrapFailed {
        repository: Box<str>,
        #[source]
        source: Box<ForgeError>,
    },

    /// A branch, tree, blob, commit, reference or pull request call failed.
    #[error("failed to {step}")]
    RemoteOperationFailed {
        step: Step,
        #[source]
        source: Box<ForgeError>,
    },
}

impl CommitError {
    /// Wrap a forge failure as a failure of `step`.
    #[must_use]
    pub fn remote(step: Step, source: ForgeError) -> Self {
        Self::RemoteOperationFailed {
            step,
            source: Box::new(source),
        }
    }

    /// Returns the failing step for remote operation failures.
    #[must_use]
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::RemoteOperationFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Remote step of the orchestration, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Looking up a branch.
    FetchBranch,
    /// Creating a branch reference.
    CreateBranch,
    /// Reading the head reference of the target branch.
    ReadReference,
    /// Reading the head commit of the target branch.
    ReadCommit,
    /// Uploading a file blob.
    CreateBlob,
    /// Creating the new tree.
    CreateTree,
    /// Creating the new commit.
    CreateCommit,
    /// Advancing the branch reference.
    UpdateReference,
    /// Opening the pull request.
    CreatePullRequest,
}

impl Step {
    /// Short description used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchBranch => "fetch branch",
            Self::CreateBranch => "create branch",
            Self::ReadReference => "read branch reference",
            Self::ReadCommit => "read head commit",
            Self::CreateBlob => "create blob",
            Self::CreateTree => "create tree",
            Self::CreateCommit => "create commit",
            Self::UpdateReference => "update branch reference",
            Self::CreatePullRequest => "create pull request",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Forge Errors ---

/// Errors returned by the remote hosting API.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The requested object does not exist (HTTP 404).
    #[error("not found: {url}")]
    NotFound { url: String },

    /// The remote rejected the change against its current state (HTTP 409/422).
    #[error("conflict at {url}: {message}")]
    Conflict { url: String, message: String },

    /// Any other non-success response.
    #[error("http error {status}: {url} ({body})")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    /// The configured API URL cannot carry a path.
    #[error("invalid api url: {url}")]
    InvalidUrl { url: String },

    /// Transport or decoding error from reqwest.
    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl ForgeError {
    /// Classify a non-success response.
    #[must_use]
    pub fn from_status(status: u16, url: impl Into<String>, body: String) -> Self {
        let url = url.into();
        match status {
            404 => Self::NotFound { url },
            409 | 422 => Self::Conflict { url, message: body },
            _ => Self::Http { status, url, body },
        }
    }

    /// Returns true for a 404 response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
