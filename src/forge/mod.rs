// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote hosting API abstraction.
//!
//! ```text
//! CommitOrchestrator --> ForgeApi (trait) --> GitHubClient (reqwest)
//!                                        \--> in-memory forge (tests)
//! ```
//!
//! Every call is independent; implementations must be safe to share across
//! concurrent orchestrations.

pub mod github;
pub mod types;

#[cfg(test)]
pub(crate) mod memory;

use std::fmt;

use async_trait::async_trait;

use crate::error::ForgeResult;
use types::{
    Branch, Commit, NewCommit, NewFile, NewPullRequest, NewTree, PullRequest, Reference,
    Repository, Tree, User,
};

/// Secret API token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([hidden])")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Repository addressed by owner and name, with the token to act as.
#[derive(Debug, Clone, Copy)]
pub struct RepoRef<'a> {
    pub token: &'a AccessToken,
    pub owner: &'a str,
    pub name: &'a str,
}

impl fmt::Display for RepoRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// `heads/<branch>`, the short form used by the reference endpoints.
#[must_use]
pub fn heads_ref(branch: &str) -> String {
    format!("heads/{branch}")
}

/// Operations consumed from the hosting service.
#[async_trait]
pub trait ForgeApi: Send + Sync {
    /// Identity owning `token`.
    async fn current_user(&self, token: &AccessToken) -> ForgeResult<User>;

    /// Repository `owner/name`.
    async fn repository(&self, repo: RepoRef<'_>) -> ForgeResult<Repository>;

    /// Branch by name; `None` when it does not exist.
    async fn branch(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Option<Branch>>;

    /// Create `refs/heads/...` (full name) pointing at `sha`.
    async fn create_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference>;

    /// Reference by short name (`heads/main`).
    async fn reference(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Reference>;

    /// Fast-forward reference `name` (short form) to `sha`.
    async fn update_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference>;

    async fn commit(&self, repo: RepoRef<'_>, sha: &str) -> ForgeResult<Commit>;

    /// Upload UTF-8 `content`; returns the blob sha.
    async fn create_blob(&self, repo: RepoRef<'_>, content: &str) -> ForgeResult<String>;

    async fn create_tree(&self, repo: RepoRef<'_>, tree: &NewTree) -> ForgeResult<Tree>;

    async fn create_commit(&self, repo: RepoRef<'_>, commit: &NewCommit) -> ForgeResult<Commit>;

    /// Commit a single file through the contents endpoint.
    async fn create_file(&self, repo: RepoRef<'_>, file: &NewFile) -> ForgeResult<()>;

    async fn create_pull_request(
        &self,
        repo: RepoRef<'_>,
        pull: &NewPullRequest,
    ) -> ForgeResult<PullRequest>;
}

#[async_trait]
impl<T: ForgeApi + ?Sized> ForgeApi for std::sync::Arc<T> {
    async fn current_user(&self, token: &AccessToken) -> ForgeResult<User> {
        (**self).current_user(token).await
    }

    async fn repository(&self, repo: RepoRef<'_>) -> ForgeResult<Repository> {
        (**self).repository(repo).await
    }

    async fn branch(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Option<Branch>> {
        (**self).branch(repo, name).await
    }

    async fn create_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference> {
        (**self).create_reference(repo, name, sha).await
    }

    async fn reference(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Reference> {
        (**self).reference(repo, name).await
    }

    async fn update_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference> {
        (**self).update_reference(repo, name, sha).await
    }

    async fn commit(&self, repo: RepoRef<'_>, sha: &str) -> ForgeResult<Commit> {
        (**self).commit(repo, sha).await
    }

    async fn create_blob(&self, repo: RepoRef<'_>, content: &str) -> ForgeResult<String> {
        (**self).create_blob(repo, content).await
    }

    async fn create_tree(&self, repo: RepoRef<'_>, tree: &NewTree) -> ForgeResult<Tree> {
        (**self).create_tree(repo, tree).await
    }

    async fn create_commit(&self, repo: RepoRef<'_>, commit: &NewCommit) -> ForgeResult<Commit> {
        (**self).create_commit(repo, commit).await
    }

    async fn create_file(&self, repo: RepoRef<'_>, file: &NewFile) -> ForgeResult<()> {
        (**self).create_file(repo, file).await
    }

    async fn create_pull_request(
        &self,
        repo: RepoRef<'_>,
        pull: &NewPullRequest,
    ) -> ForgeResult<PullRequest> {
        (**self).create_pull_request(repo, pull).await
    }
}
